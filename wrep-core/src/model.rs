use crate::{
    Config, Unit,
    classify::{WeatherCategory, classify},
};

/// What a provider needs to know to build and decode one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    pub location: String,
    pub unit: Unit,
    /// Number of forecast days; `0` means current conditions only.
    pub forecast_days: u32,
}

impl WeatherRequest {
    pub fn wants_forecast(&self) -> bool {
        self.forecast_days > 0
    }
}

impl From<&Config> for WeatherRequest {
    fn from(config: &Config) -> Self {
        Self {
            location: config.location.clone(),
            unit: config.unit,
            forecast_days: config.forecast_days,
        }
    }
}

/// Canonical weather report every provider is normalized into.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherInfo {
    /// Pre-formatted, e.g. `18°C` or `72.3°F`.
    pub temperature: String,
    pub description: String,
    pub uv_index: String,
    pub forecast: Vec<ForecastDay>,
}

impl WeatherInfo {
    pub fn category(&self) -> WeatherCategory {
        classify(&self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForecastDay {
    /// Provider-native date string, passed through untouched.
    pub date: String,
    pub min_temp: String,
    pub max_temp: String,
    pub description: String,
}

impl ForecastDay {
    pub fn category(&self) -> WeatherCategory {
        classify(&self.description)
    }
}
