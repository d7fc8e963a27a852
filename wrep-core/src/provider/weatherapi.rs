use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::{
    ForecastDay, Unit, WeatherError, WeatherInfo, WeatherRequest,
    provider::{ProviderId, WeatherProvider},
    units::format_temperature,
};

pub const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
}

impl WeatherApiProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self { api_key, base_url }
    }
}

#[derive(Debug, Default, Deserialize)]
struct WaCondition {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    #[serde(default)]
    temp_c: f64,
    #[serde(default)]
    temp_f: f64,
    #[serde(default)]
    uv: f64,
    #[serde(default)]
    condition: WaCondition,
}

#[derive(Debug, Default, Deserialize)]
struct WaDay {
    maxtemp_c: Option<f64>,
    maxtemp_f: Option<f64>,
    mintemp_c: Option<f64>,
    mintemp_f: Option<f64>,
    #[serde(default)]
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    #[serde(default)]
    date: String,
    #[serde(default)]
    day: WaDay,
}

#[derive(Debug, Default, Deserialize)]
struct WaForecast {
    #[serde(default)]
    forecastday: Vec<WaForecastDay>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    current: WaCurrent,
    #[serde(default)]
    forecast: WaForecast,
}

fn format_optional(value: Option<f64>, unit: Unit) -> String {
    value.map(|v| format_temperature(v, unit)).unwrap_or_default()
}

impl WaForecastDay {
    fn into_forecast_day(self, unit: Unit) -> ForecastDay {
        let (min, max) = match unit {
            Unit::Metric => (self.day.mintemp_c, self.day.maxtemp_c),
            Unit::Imperial => (self.day.mintemp_f, self.day.maxtemp_f),
        };

        ForecastDay {
            date: self.date,
            min_temp: format_optional(min, unit),
            max_temp: format_optional(max, unit),
            description: self.day.condition.text.trim().to_string(),
        }
    }
}

impl WeatherProvider for WeatherApiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::WeatherApi
    }

    fn request_url(&self, request: &WeatherRequest) -> Result<Url, WeatherError> {
        let endpoint = if request.wants_forecast() { "forecast.json" } else { "current.json" };
        let base = format!("{}/{endpoint}", self.base_url.trim_end_matches('/'));

        let mut params = vec![("key", self.api_key.clone()), ("q", request.location.clone())];
        if request.wants_forecast() {
            params.push(("days", request.forecast_days.to_string()));
        }

        Url::parse_with_params(&base, &params).map_err(|e| WeatherError::Transport {
            message: format!("invalid WeatherAPI URL '{base}': {e}"),
        })
    }

    fn check_status(&self, status: u16, body: &str) -> Result<(), WeatherError> {
        match status {
            200 => Ok(()),
            401 => Err(WeatherError::Unauthorized),
            400 => Err(WeatherError::BadRequest),
            403 => Err(WeatherError::Forbidden),
            _ => Err(WeatherError::upstream_status(status, body)),
        }
    }

    fn decode(&self, body: &str, request: &WeatherRequest) -> Result<WeatherInfo, WeatherError> {
        let parsed: WaResponse = serde_json::from_str(body).map_err(WeatherError::decode)?;
        let current = parsed.current;

        let temperature = match request.unit {
            Unit::Metric => format_temperature(current.temp_c, request.unit),
            Unit::Imperial => format_temperature(current.temp_f, request.unit),
        };

        let mut info = WeatherInfo {
            temperature,
            description: current.condition.text.trim().to_string(),
            uv_index: format!("{:.1}", current.uv),
            forecast: Vec::new(),
        };

        if request.wants_forecast() {
            let days = parsed.forecast.forecastday;
            if days.len() < request.forecast_days as usize {
                debug!(
                    requested = request.forecast_days,
                    available = days.len(),
                    "WeatherAPI returned fewer forecast days than requested"
                );
            }

            info.forecast = days
                .into_iter()
                .take(request.forecast_days as usize)
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

    const CURRENT: &str = r#"{
        "location": {"name": "Tokyo", "country": "Japan"},
        "current": {"temp_c": 22.4, "temp_f": 72.3, "uv": 6.0, "condition": {"text": " Sunny "}}
    }"#;

    const FORECAST: &str = r#"{
        "current": {"temp_c": 10.0, "temp_f": 50.0, "uv": 2.0, "condition": {"text": "Overcast"}},
        "forecast": {"forecastday": [
            {"date": "2026-10-19", "day": {"maxtemp_c": 12.5, "maxtemp_f": 54.5, "mintemp_c": 6.0,
                "mintemp_f": 42.8, "condition": {"text": "Patchy rain nearby"}}},
            {"date": "2026-10-20", "day": {"maxtemp_c": 14.0, "condition": {"text": "Sunny"}}},
            {"date": "2026-10-21"}
        ]}
    }"#;

    fn request(unit: Unit, forecast_days: u32) -> WeatherRequest {
        WeatherRequest { location: "Tokyo".into(), unit, forecast_days }
    }

    fn provider() -> WeatherApiProvider {
        WeatherApiProvider::new("KEY".into())
    }

    #[test]
    fn current_url_has_key_and_location() {
        let url = provider().request_url(&request(Unit::Metric, 0)).unwrap();
        assert_eq!(url.as_str(), "https://api.weatherapi.com/v1/current.json?key=KEY&q=Tokyo");
    }

    #[test]
    fn forecast_url_uses_forecast_endpoint_and_days() {
        let req = WeatherRequest { location: "São Paulo".into(), ..request(Unit::Metric, 3) };
        let url = provider().request_url(&req).unwrap();
        assert_eq!(url.path(), "/v1/forecast.json");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("key".to_string(), "KEY".to_string()),
                ("q".to_string(), "São Paulo".to_string()),
                ("days".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn status_codes_are_classified() {
        let p = provider();
        assert!(p.check_status(200, "").is_ok());
        assert_eq!(p.check_status(401, "").unwrap_err().kind(), ErrorKind::Unauthorized);
        assert_eq!(p.check_status(400, "").unwrap_err().kind(), ErrorKind::BadRequest);
        assert_eq!(p.check_status(403, "").unwrap_err().kind(), ErrorKind::Forbidden);
        assert_eq!(p.check_status(500, "boom").unwrap_err().kind(), ErrorKind::UpstreamStatus);
        assert_eq!(p.check_status(204, "").unwrap_err().kind(), ErrorKind::UpstreamStatus);
    }

    #[test]
    fn decodes_current_with_one_decimal() {
        let info = provider().decode(CURRENT, &request(Unit::Metric, 0)).unwrap();
        assert_eq!(info.temperature, "22.4°C");
        assert_eq!(info.description, "Sunny");
        assert_eq!(info.uv_index, "6.0");
        assert!(info.forecast.is_empty());

        let info = provider().decode(CURRENT, &request(Unit::Imperial, 0)).unwrap();
        assert_eq!(info.temperature, "72.3°F");
    }

    #[test]
    fn forecast_is_flat_and_never_padded() {
        let info = provider().decode(FORECAST, &request(Unit::Metric, 5)).unwrap();
        assert_eq!(info.forecast.len(), 3);
        assert_eq!(
            info.forecast[0],
            ForecastDay {
                date: "2026-10-19".into(),
                min_temp: "6.0°C".into(),
                max_temp: "12.5°C".into(),
                description: "Patchy rain nearby".into(),
            }
        );
        assert_eq!(info.forecast[1].min_temp, "");
        assert_eq!(info.forecast[1].max_temp, "14.0°C");
        assert_eq!(info.forecast[2].description, "");
    }

    #[test]
    fn forecast_respects_requested_days() {
        let info = provider().decode(FORECAST, &request(Unit::Imperial, 1)).unwrap();
        assert_eq!(info.forecast.len(), 1);
        assert_eq!(info.forecast[0].min_temp, "42.8°F");
        assert_eq!(info.forecast[0].max_temp, "54.5°F");
    }

    #[test]
    fn missing_forecast_block_is_empty_not_error() {
        let info = provider().decode(CURRENT, &request(Unit::Metric, 3)).unwrap();
        assert!(info.forecast.is_empty());
    }

    #[test]
    fn malformed_body_is_decode_failure() {
        let err = provider().decode("<html>oops</html>", &request(Unit::Metric, 0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);

        let err = provider()
            .decode(r#"{"error": {"code": 1006}}"#, &request(Unit::Metric, 0))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DecodeFailure);
    }
}
