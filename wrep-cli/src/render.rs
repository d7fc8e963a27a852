//! Plain and fancy (colour + emoji) text output for a [`WeatherInfo`].

use owo_colors::{OwoColorize, Style};
use wrep_core::{WeatherCategory, WeatherInfo};

pub fn style_for(category: WeatherCategory) -> Style {
    let style = Style::new();
    match category {
        WeatherCategory::Sunny => style.yellow(),
        WeatherCategory::Cloudy => style.white(),
        WeatherCategory::Rainy => style.blue(),
        WeatherCategory::Snowy => style.cyan(),
        WeatherCategory::Stormy => style.magenta(),
        WeatherCategory::Foggy => style.bright_black(),
        WeatherCategory::Unknown => style.green(),
    }
}

pub fn emoji_for(category: WeatherCategory) -> &'static str {
    match category {
        WeatherCategory::Sunny => "\u{2600}\u{fe0f}",
        WeatherCategory::Cloudy => "\u{2601}\u{fe0f}",
        WeatherCategory::Rainy => "\u{1f327}\u{fe0f}",
        WeatherCategory::Snowy => "\u{2744}\u{fe0f}",
        WeatherCategory::Stormy => "\u{26c8}\u{fe0f}",
        WeatherCategory::Foggy => "\u{1f32b}\u{fe0f}",
        WeatherCategory::Unknown => "\u{1f308}",
    }
}

fn paint(line: &str, category: WeatherCategory, fancy: bool) -> String {
    if fancy {
        format!("{} {line}", emoji_for(category)).style(style_for(category)).to_string()
    } else {
        line.to_string()
    }
}

/// Current conditions as one line, or the forecast as a header plus one line per day.
pub fn render(info: &WeatherInfo, fancy: bool) -> String {
    if info.forecast.is_empty() {
        let line = format!(
            "Weather: {}, {}, UVIndex {}",
            info.temperature, info.description, info.uv_index
        );
        return format!("{}\n", paint(&line, info.category(), fancy));
    }

    let mut out = if fancy {
        format!("{}\n", "Forecast:".bold())
    } else {
        "Forecast:\n".to_string()
    };

    for (i, day) in info.forecast.iter().enumerate() {
        let line = format!(
            "Day {} ({}): {}, {} - {}",
            i + 1,
            day.date,
            day.description,
            day.min_temp,
            day.max_temp
        );
        out.push_str(&paint(&line, day.category(), fancy));
        out.push('\n');
    }

    out
}
