use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, warn};
use wrep_core::{
    Config, FileConfig, Overrides, ProviderId, Unit, WeatherError, WeatherFetcher, config,
};

use crate::render;

/// Top-level CLI struct. Without a subcommand it shows the weather.
#[derive(Debug, Parser)]
#[command(
    name = "wrep",
    version,
    about = "Weather reporter CLI",
    args_conflicts_with_subcommands = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub show: ShowArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a provider and make it the default.
    Configure {
        /// Provider short name, e.g. "wttr" or "weatherapi".
        provider: String,
    },

    /// Print the location of the config file.
    ConfigPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitArg {
    Metric,
    Imperial,
}

impl From<UnitArg> for Unit {
    fn from(value: UnitArg) -> Self {
        match value {
            UnitArg::Metric => Unit::Metric,
            UnitArg::Imperial => Unit::Imperial,
        }
    }
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// City or location name; overrides `default_city` from the config file.
    #[arg(long)]
    pub city: Option<String>,

    /// Unit system for temperatures.
    #[arg(long, value_enum)]
    pub unit: Option<UnitArg>,

    /// API key for the selected provider.
    #[arg(long = "apikey")]
    pub api_key: Option<String>,

    /// Provider short name; unknown names fall back to wttr.
    #[arg(long)]
    pub provider: Option<String>,

    /// Number of forecast days (0 = current conditions only).
    #[arg(long, value_name = "DAYS")]
    pub forecast: Option<u32>,

    /// Colour and emoji output.
    #[arg(long, overrides_with = "no_fancy")]
    pub fancy: bool,

    /// Plain output even when the config file sets `fancy = true`.
    #[arg(long, overrides_with = "fancy")]
    pub no_fancy: bool,

    /// Log the request URL.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ShowArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            provider: self.provider.clone(),
            api_key: self.api_key.clone(),
            city: self.city.clone(),
            unit: self.unit.map(Unit::from),
            forecast_days: self.forecast,
            fancy: match (self.fancy, self.no_fancy) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            verbose: self.verbose,
        }
    }
}

impl Cli {
    pub fn verbose(&self) -> bool {
        self.show.verbose
    }

    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure { provider }) => configure(&provider),
            Some(Command::ConfigPath) => {
                println!("{}", FileConfig::config_file_path()?.display());
                Ok(())
            }
            None => show(&self.show).await,
        }
    }
}

/// Whether `err` should end the process with a failure status. Errors that are not a
/// [`WeatherError`] (I/O, prompts) always do.
pub fn is_failure(err: &anyhow::Error) -> bool {
    err.downcast_ref::<WeatherError>().is_none_or(WeatherError::is_fatal)
}

/// A broken or incomplete config is only a warning; the fetch still runs with an empty
/// configuration and only fetch errors end the process with a failure.
fn resolve_or_warn(result: anyhow::Result<Config>) -> Config {
    match result {
        Ok(config) => config,
        Err(err) => {
            warn!("configuration problem: {err:#}");
            eprintln!("Warning: {err:#}");
            // The fallback carries no overrides either: -v and --fancy given on the
            // command line are dropped along with the file values.
            Config::default()
        }
    }
}

async fn show(args: &ShowArgs) -> anyhow::Result<()> {
    let config = resolve_or_warn(config::resolve(&args.overrides()));
    debug!(
        provider = %config.provider_id(),
        unit = %config.unit,
        days = config.forecast_days,
        "resolved configuration"
    );

    let info = WeatherFetcher::new().fetch(&config).await?;
    debug!(category = %info.category(), days = info.forecast.len(), "fetched weather");
    print!("{}", render::render(&info, config.fancy));

    Ok(())
}

fn configure(provider_name: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider_name)?;
    let mut cfg = FileConfig::load()?;

    if id.requires_api_key() {
        let key = inquire::Password::new(&format!("API key for {id}:"))
            .without_confirmation()
            .prompt()
            .context("Failed to read API key")?;
        let key = key.trim();
        if key.is_empty() {
            bail!("API key for '{id}' must not be empty");
        }
        cfg.upsert_provider_api_key(id, key.to_string());
    }
    cfg.set_default_provider(id);

    let mut prompt = inquire::Text::new("Default city:");
    if let Some(city) = cfg.default_city.as_deref() {
        prompt = prompt.with_default(city);
    }
    let city = prompt.prompt().context("Failed to read default city")?;
    let city = city.trim();
    if !city.is_empty() {
        cfg.default_city = Some(city.to_string());
    }

    cfg.save()?;
    println!(
        "Saved {id} as default provider in {}",
        FileConfig::config_file_path()?.display()
    );

    Ok(())
}
