//! wttr.in, a keyless weather aggregator reached through `/<location>?format=j1`.
//!
//! Temperatures arrive as strings already rounded by upstream, so they are passed
//! through with the unit glyph appended and never reparsed.

use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::{
    ForecastDay, Unit, WeatherError, WeatherInfo, WeatherRequest,
    provider::{ProviderId, WeatherProvider},
};

pub const DEFAULT_BASE_URL: &str = "https://wttr.in";

#[derive(Debug, Clone)]
pub struct WttrProvider {
    base_url: String,
}

impl WttrProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }
}

impl Default for WttrProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct WttrResponse {
    #[serde(default)]
    current_condition: Vec<WttrCurrent>,
    #[serde(default)]
    weather: Vec<WttrDay>,
}

#[derive(Debug, Deserialize)]
struct WttrCurrent {
    #[serde(rename = "temp_C", default)]
    temp_c: String,
    #[serde(rename = "temp_F", default)]
    temp_f: String,
    #[serde(rename = "uvIndex", default)]
    uv_index: String,
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WttrValue>,
}

#[derive(Debug, Deserialize)]
struct WttrValue {
    #[serde(default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct WttrDay {
    #[serde(default)]
    date: String,
    #[serde(rename = "mintempC", default)]
    min_temp_c: String,
    #[serde(rename = "mintempF", default)]
    min_temp_f: String,
    #[serde(rename = "maxtempC", default)]
    max_temp_c: String,
    #[serde(rename = "maxtempF", default)]
    max_temp_f: String,
    #[serde(default)]
    hourly: Vec<WttrHour>,
}

#[derive(Debug, Deserialize)]
struct WttrHour {
    #[serde(rename = "weatherDesc", default)]
    weather_desc: Vec<WttrValue>,
}

fn first_value(values: &[WttrValue]) -> String {
    values.first().map(|v| v.value.clone()).unwrap_or_default()
}

/// Append the glyph to an upstream string, leaving missing values empty.
fn with_glyph(raw: &str, unit: Unit) -> String {
    let raw = raw.trim();
    if raw.is_empty() { String::new() } else { format!("{raw}{}", unit.glyph()) }
}

impl WttrDay {
    fn into_forecast_day(self, unit: Unit) -> ForecastDay {
        let (min, max) = match unit {
            Unit::Metric => (&self.min_temp_c, &self.max_temp_c),
            Unit::Imperial => (&self.min_temp_f, &self.max_temp_f),
        };

        ForecastDay {
            min_temp: with_glyph(min, unit),
            max_temp: with_glyph(max, unit),
            description: self
                .hourly
                .first()
                .map(|h| first_value(&h.weather_desc))
                .unwrap_or_default(),
            date: self.date,
        }
    }
}

impl WeatherProvider for WttrProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Wttr
    }

    fn request_url(&self, request: &WeatherRequest) -> Result<Url, WeatherError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| WeatherError::Transport {
            message: format!("invalid wttr.in base URL '{}': {e}", self.base_url),
        })?;

        url.path_segments_mut()
            .map_err(|_| WeatherError::Transport {
                message: format!("wttr.in base URL '{}' cannot take a path", self.base_url),
            })?
            .pop_if_empty()
            .push(&request.location);
        url.query_pairs_mut().append_pair("format", "j1");

        Ok(url)
    }

    fn decode(&self, body: &str, request: &WeatherRequest) -> Result<WeatherInfo, WeatherError> {
        let parsed: WttrResponse = serde_json::from_str(body).map_err(WeatherError::decode)?;

        let current = parsed
            .current_condition
            .first()
            .ok_or(WeatherError::EmptyUpstreamData)?;

        let temperature = match request.unit {
            Unit::Metric => with_glyph(&current.temp_c, request.unit),
            Unit::Imperial => with_glyph(&current.temp_f, request.unit),
        };

        let mut info = WeatherInfo {
            temperature,
            description: first_value(&current.weather_desc),
            uv_index: current.uv_index.clone(),
            forecast: Vec::new(),
        };

        if request.wants_forecast() {
            let wanted = request.forecast_days as usize;
            if parsed.weather.len() < wanted {
                debug!(
                    requested = wanted,
                    available = parsed.weather.len(),
                    "wttr.in returned fewer forecast days than requested"
                );
            }

            info.forecast = parsed
                .weather
                .into_iter()
                .take(wanted)
                .map(|day| day.into_forecast_day(request.unit))
                .collect();
        }

        Ok(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const BODY: &str = r#"{
        "current_condition": [{
            "temp_C": "18", "temp_F": "64", "uvIndex": "4",
            "weatherDesc": [{"value": "Partly cloudy"}]
        }],
        "weather": [
            {"date": "2026-10-19", "mintempC": "11", "mintempF": "52", "maxtempC": "19", "maxtempF": "66",
             "hourly": [{"weatherDesc": [{"value": "Light rain shower"}]}]},
            {"date": "2026-10-20", "mintempC": "9", "mintempF": "48", "maxtempC": "15", "maxtempF": "59",
             "hourly": []},
            {"date": "2026-10-21"}
        ]
    }"#;

    fn request(unit: Unit, forecast_days: u32) -> WeatherRequest {
        WeatherRequest { location: "Paris".into(), unit, forecast_days }
    }

    #[test]
    fn builds_path_based_url() {
        let url = WttrProvider::new().request_url(&request(Unit::Metric, 0)).unwrap();
        assert_eq!(url.as_str(), "https://wttr.in/Paris?format=j1");
    }

    #[test]
    fn location_is_percent_encoded() {
        let req = WeatherRequest { location: "New York".into(), ..request(Unit::Metric, 0) };
        let url = WttrProvider::new().request_url(&req).unwrap();
        assert_eq!(url.as_str(), "https://wttr.in/New%20York?format=j1");
    }

    #[test]
    fn decodes_current_metric() {
        let info = WttrProvider::new().decode(BODY, &request(Unit::Metric, 0)).unwrap();
        assert_eq!(info.temperature, "18°C");
        assert_eq!(info.description, "Partly cloudy");
        assert_eq!(info.uv_index, "4");
        assert!(info.forecast.is_empty());
    }

    #[test]
    fn decodes_current_imperial_without_reparsing() {
        let info = WttrProvider::new().decode(BODY, &request(Unit::Imperial, 0)).unwrap();
        assert_eq!(info.temperature, "64°F");
    }

    #[test]
    fn forecast_is_truncated_and_degrades_missing_fields() {
        let info = WttrProvider::new().decode(BODY, &request(Unit::Metric, 5)).unwrap();
        assert_eq!(info.forecast.len(), 3);

        let first = &info.forecast[0];
        assert_eq!(first.date, "2026-10-19");
        assert_eq!(first.min_temp, "11°C");
        assert_eq!(first.max_temp, "19°C");
        assert_eq!(first.description, "Light rain shower");

        assert_eq!(info.forecast[1].description, "");
        assert_eq!(info.forecast[2], ForecastDay { date: "2026-10-21".into(), ..Default::default() });

        let info = WttrProvider::new().decode(BODY, &request(Unit::Imperial, 1)).unwrap();
        assert_eq!(info.forecast.len(), 1);
        assert_eq!(info.forecast[0].max_temp, "66°F");
    }

    #[test]
    fn empty_current_condition_is_an_error() {
        let err = WttrProvider::new()
            .decode(r#"{"current_condition": [], "weather": []}"#, &request(Unit::Metric, 0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyUpstreamData);

        let err = WttrProvider::new().decode("{}", &request(Unit::Metric, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyUpstreamData);
    }

    #[test]
    fn missing_description_degrades_to_empty() {
        let body = r#"{"current_condition": [{"temp_C": "3", "temp_F": "37", "uvIndex": "1"}]}"#;
        let info = WttrProvider::new().decode(body, &request(Unit::Metric, 2)).unwrap();
        assert_eq!(info.description, "");
        assert!(info.forecast.is_empty());
    }

    #[test]
    fn malformed_json_is_decode_failure() {
        let err = WttrProvider::new()
            .decode("Unknown location; please try ~48.85,2.35", &request(Unit::Metric, 0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    }
}
