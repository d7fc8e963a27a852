//! Keyword classification of free-text condition descriptions.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WeatherCategory {
    #[default]
    Unknown,
    Sunny,
    Cloudy,
    Rainy,
    Snowy,
    Stormy,
    Foggy,
}

impl WeatherCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCategory::Unknown => "unknown",
            WeatherCategory::Sunny => "sunny",
            WeatherCategory::Cloudy => "cloudy",
            WeatherCategory::Rainy => "rainy",
            WeatherCategory::Snowy => "snowy",
            WeatherCategory::Stormy => "stormy",
            WeatherCategory::Foggy => "foggy",
        }
    }
}

impl std::fmt::Display for WeatherCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered rule table; the first rule with a matching keyword wins.
const RULES: &[(&[&str], WeatherCategory)] = &[
    (&["sun", "clear"], WeatherCategory::Sunny),
    (&["cloud", "overcast"], WeatherCategory::Cloudy),
    (&["rain", "shower"], WeatherCategory::Rainy),
    (&["snow"], WeatherCategory::Snowy),
    (&["storm", "thunder"], WeatherCategory::Stormy),
    (&["fog", "mist"], WeatherCategory::Foggy),
];

/// Map a description to a category. Total: unmatched text is [`WeatherCategory::Unknown`].
pub fn classify(description: &str) -> WeatherCategory {
    let lower = description.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(WeatherCategory::Unknown)
}
