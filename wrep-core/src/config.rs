use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{Unit, WeatherError, provider::ProviderId};

/// Written on first run when no config file exists yet.
const DEFAULT_CITY: &str = "Moscow";

/// Configuration for a single provider (e.g., API key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Persisted configuration, stored on disk as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Optional default provider id, e.g. "wttr" or "weatherapi".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_city: Option<String>,

    /// "metric" or "imperial".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_days: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fancy: Option<bool>,

    /// Example TOML:
    /// [providers.weatherapi]
    /// api_key = "..."
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Values given on the command line. Each one that is set wins over the file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub provider: Option<String>,
    pub api_key: Option<String>,
    pub city: Option<String>,
    pub unit: Option<Unit>,
    pub forecast_days: Option<u32>,
    /// `Some(false)` switches off a `fancy = true` from the file.
    pub fancy: Option<bool>,
    pub verbose: bool,
}

/// Fully resolved configuration handed to the fetcher and renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Provider tag as given; empty or unknown means the default provider.
    pub provider: String,
    pub api_key: String,
    pub location: String,
    pub unit: Unit,
    /// `0` requests current conditions only.
    pub forecast_days: u32,
    pub fancy: bool,
    pub verbose: bool,
}

impl Config {
    pub fn provider_id(&self) -> ProviderId {
        ProviderId::from_tag(&self.provider)
    }

    pub fn validate(&self) -> Result<(), WeatherError> {
        if self.location.trim().is_empty() {
            return Err(WeatherError::ConfigInvalid {
                message: "no location configured; pass --city or set default_city".to_string(),
            });
        }

        let id = self.provider_id();
        if id.requires_api_key() && self.api_key.trim().is_empty() {
            return Err(WeatherError::ConfigInvalid {
                message: format!(
                    "no API key configured for provider '{id}'; pass --apikey or run `wrep configure {id}`"
                ),
            });
        }

        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_owned)
}

impl FileConfig {
    /// Return the default provider as a strongly-typed ProviderId (wttr when unset).
    pub fn default_provider_id(&self) -> ProviderId {
        self.default_provider.as_deref().map(ProviderId::from_tag).unwrap_or_default()
    }

    /// Store default provider as string.
    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Convenience helper: set/replace a provider API key and optionally set default provider.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });

        if self.default_provider.is_none() {
            self.default_provider = Some(provider_id.to_string());
        }
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers.get(provider_id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        !provider_id.requires_api_key()
            || self.provider_api_key(provider_id).is_some_and(|k| !k.trim().is_empty())
    }

    /// Apply command-line overrides field by field. Empty strings count as absent.
    pub fn merge(&self, overrides: &Overrides) -> Config {
        let provider = non_empty(&overrides.provider)
            .or_else(|| non_empty(&self.default_provider))
            .unwrap_or_default();
        let id = ProviderId::from_tag(&provider);

        let api_key = non_empty(&overrides.api_key)
            .or_else(|| self.provider_api_key(id).map(str::to_owned))
            .unwrap_or_default();

        let location = non_empty(&overrides.city)
            .or_else(|| non_empty(&self.default_city))
            .unwrap_or_default();

        let unit = overrides
            .unit
            .or_else(|| self.units.as_deref().map(Unit::from_tag))
            .unwrap_or_default();

        Config {
            provider,
            api_key,
            location,
            unit,
            forecast_days: overrides.forecast_days.or(self.forecast_days).unwrap_or(0),
            fancy: overrides.fancy.or(self.fancy).unwrap_or(false),
            verbose: overrides.verbose,
        }
    }

    /// Load config from the default location, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Like [`FileConfig::load_from`], but writes a starter file first when none exists.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if !path.exists() {
            Self::starter().save_to(path).context("Failed to generate default config")?;
            tracing::info!(path = %path.display(), "generated default config file");
        }

        Self::load_from(path)
    }

    /// Save config to the default location, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "wrep", "wrep")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn starter() -> Self {
        Self {
            default_city: Some(DEFAULT_CITY.to_string()),
            units: Some(Unit::Metric.to_string()),
            ..Self::default()
        }
    }
}

/// Load (or create) the config file at `path`, apply overrides and validate the result.
pub fn resolve_from(path: &Path, overrides: &Overrides) -> Result<Config> {
    let file = FileConfig::load_or_create(path)?;
    let config = file.merge(overrides);
    config.validate()?;
    Ok(config)
}

/// [`resolve_from`] against the platform config file.
pub fn resolve(overrides: &Overrides) -> Result<Config> {
    resolve_from(&FileConfig::config_file_path()?, overrides)
}
