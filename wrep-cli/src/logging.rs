//! Tracing subscriber initialisation.
//!
//! `wrep-core` only emits events; the binary decides where they go.
//! Default level is `warn`, `--verbose` raises it to `info` so the request URL is shown.
//! `RUST_LOG` overrides both.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_logging(verbose: bool) -> anyhow::Result<()> {
    let level = derive_level(verbose);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wrep={level},wrep_core={level}")));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn derive_level(verbose: bool) -> &'static str {
    if verbose { "info" } else { "warn" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_default() {
        assert_eq!(derive_level(false), "warn");
    }

    #[test]
    fn level_verbose() {
        assert_eq!(derive_level(true), "info");
    }
}
