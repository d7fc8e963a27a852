//! Core library for the `wrep` weather CLI.
//!
//! This crate defines:
//! - Configuration loading, merging and validation
//! - Abstraction over weather providers (wttr.in, WeatherAPI.com)
//! - The canonical weather model every provider is normalized into
//! - Classification of condition descriptions into weather categories
//!
//! It is used by `wrep-cli`, but can also be reused by other binaries or services.

pub mod classify;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod provider;
pub mod transport;
pub mod units;

pub use classify::{WeatherCategory, classify};
pub use config::{Config, FileConfig, Overrides, ProviderConfig};
pub use error::{ErrorKind, WeatherError};
pub use fetcher::WeatherFetcher;
pub use model::{ForecastDay, WeatherInfo, WeatherRequest};
pub use provider::{Endpoints, ProviderId, WeatherProvider};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
pub use units::{Unit, format_temperature};
