use crate::config::Logging;
use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// `--log-level` beats `RUST_LOG`, which beats the configured level.
fn build_filter(cfg: &Logging, level_override: Option<&str>) -> EnvFilter {
    match level_override {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level)),
    }
}

/// Install the global subscriber. Events go to stderr: stdout carries the
/// MCP transport and the interactive prompts.
pub fn init(cfg: &Logging, level_override: Option<&str>) -> Result<()> {
    let filter = build_filter(cfg, level_override);

    let layer = if cfg.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_level_wins_over_config() {
        let cfg = Logging {
            level: "warn".into(),
            json: false,
        };
        let filter = build_filter(&cfg, Some("debug"));
        assert_eq!(filter.to_string(), "debug");
    }
}
