use tracing::{debug, info};

use crate::{
    Config, WeatherError, WeatherInfo, WeatherRequest,
    provider::{Endpoints, provider_from_config},
    transport::{HttpTransport, ReqwestTransport},
};

/// Turns a resolved [`Config`] into a [`WeatherInfo`] with exactly one network call.
#[derive(Debug)]
pub struct WeatherFetcher {
    transport: Box<dyn HttpTransport>,
    endpoints: Endpoints,
}

impl WeatherFetcher {
    pub fn new() -> Self {
        Self::with_transport(Box::new(ReqwestTransport::new()))
    }

    pub fn with_transport(transport: Box<dyn HttpTransport>) -> Self {
        Self { transport, endpoints: Endpoints::default() }
    }

    pub fn with_endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub async fn fetch(&self, config: &Config) -> Result<WeatherInfo, WeatherError> {
        let provider = provider_from_config(config, &self.endpoints);
        let request = WeatherRequest::from(config);
        let url = provider.request_url(&request)?;

        debug!(provider = %provider.id(), location = %request.location, "fetching weather");
        if config.verbose {
            info!("Requesting: {url}");
        }

        let response = self.transport.get(&url).await?;
        debug!(status = response.status, bytes = response.body.len(), "received response");

        provider.check_status(response.status, &response.body)?;
        provider.decode(&response.body, &request)
    }
}

impl Default for WeatherFetcher {
    fn default() -> Self {
        Self::new()
    }
}
