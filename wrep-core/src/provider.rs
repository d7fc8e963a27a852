use crate::{
    Config, WeatherError, WeatherInfo, WeatherRequest,
    provider::{weatherapi::WeatherApiProvider, wttr::WttrProvider},
};
use reqwest::Url;
use std::fmt::Debug;

pub mod weatherapi;
pub mod wttr;

/// The closed set of supported upstreams. `Wttr` is the keyless default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderId {
    #[default]
    Wttr,
    WeatherApi,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::Wttr => "wttr",
            ProviderId::WeatherApi => "weatherapi",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::Wttr, ProviderId::WeatherApi]
    }

    pub fn requires_api_key(&self) -> bool {
        match self {
            ProviderId::Wttr => false,
            ProviderId::WeatherApi => true,
        }
    }

    /// Lenient lookup used at fetch time: empty or unknown tags select the default provider.
    pub fn from_tag(value: &str) -> Self {
        ProviderId::try_from(value).unwrap_or_default()
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.trim().to_lowercase();

        match lower.as_str() {
            "wttr" | "wttr.in" => Ok(ProviderId::Wttr),
            "weatherapi" => Ok(ProviderId::WeatherApi),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: wttr, weatherapi."
            )),
        }
    }
}

/// One upstream weather service: how to ask it, and how to read its answer.
pub trait WeatherProvider: Send + Sync + Debug {
    fn id(&self) -> ProviderId;

    fn request_url(&self, request: &WeatherRequest) -> Result<Url, WeatherError>;

    /// Classify the HTTP status before the body is decoded.
    fn check_status(&self, status: u16, body: &str) -> Result<(), WeatherError> {
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(WeatherError::upstream_status(status, body))
        }
    }

    fn decode(&self, body: &str, request: &WeatherRequest) -> Result<WeatherInfo, WeatherError>;
}

/// Base URLs of every provider. Overridable so tests can point at a local server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub wttr: String,
    pub weatherapi: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            wttr: wttr::DEFAULT_BASE_URL.to_string(),
            weatherapi: weatherapi::DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Construct the provider selected by `config.provider`, falling back to wttr.in.
pub fn provider_from_config(config: &Config, endpoints: &Endpoints) -> Box<dyn WeatherProvider> {
    match config.provider_id() {
        ProviderId::Wttr => Box::new(WttrProvider::with_base_url(endpoints.wttr.clone())),
        ProviderId::WeatherApi => Box::new(WeatherApiProvider::with_base_url(
            config.api_key.clone(),
            endpoints.weatherapi.clone(),
        )),
    }
}
