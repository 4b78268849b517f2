//! # Serve Settings
//!
//! File: cli/src/commands/serve/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Command-line arguments for `treept serve` and their merge with the
//! `[server]` section of the layered configuration. A command-line value wins
//! only when it differs from the built-in default, so a port chosen in
//! `.treept.toml` is kept unless `--port` names a different one.
//!
use crate::commands::input::InputArgs;
use crate::common::diagram::{LegendScheme, Size};
use crate::core::config::{self, Config};
use crate::core::error::{Result, TreeptError};
use clap::Parser;
use std::net::{IpAddr, Ipv4Addr};
use tracing::{debug, warn};

#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Port to listen on. The next free port is used if it is taken.
    #[arg(long, short, default_value_t = config::default_port())]
    pub port: u16,

    /// Interface to bind.
    #[arg(long, default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Send permissive CORS headers.
    #[arg(long)]
    pub cors: bool,

    /// Initial container width (defaults to `[render] width`).
    #[arg(long)]
    pub width: Option<f64>,

    /// Initial container height (defaults to `[render] height`).
    #[arg(long)]
    pub height: Option<f64>,

    /// Legend preset. Defaults to `[legend] scheme`, or two-tone for `--related`.
    #[arg(long, value_enum)]
    pub legend: Option<LegendScheme>,
}

/// Effective server settings after merging arguments and configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ServeSettings {
    pub host: IpAddr,
    pub port: u16,
    pub enable_cors: bool,
    pub size: Size,
}

impl ServeArgs {
    /// Merges the arguments over `cfg`.
    pub fn resolve(&self, cfg: &Config) -> Result<ServeSettings> {
        let default_host: IpAddr = Ipv4Addr::LOCALHOST.into();

        let port = if self.port == config::default_port() {
            cfg.server.port
        } else {
            self.port
        };
        let host = if self.host == default_host {
            cfg.server.host.parse().unwrap_or_else(|e| {
                warn!(
                    "Invalid host '{}' in configuration ({}), using {}",
                    cfg.server.host, e, default_host
                );
                default_host
            })
        } else {
            self.host
        };

        let size = Size::new(
            self.width.unwrap_or(cfg.render.width),
            self.height.unwrap_or(cfg.render.height),
        );
        if !size.is_drawable() {
            anyhow::bail!(TreeptError::Input(format!(
                "Diagram size must be finite and positive, got {}x{}",
                size.width, size.height
            )));
        }

        let settings = ServeSettings {
            host,
            port,
            enable_cors: self.cors || cfg.server.enable_cors,
            size,
        };
        debug!("Effective serve settings: {:?}", settings);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(argv: &[&str]) -> ServeArgs {
        let mut full = vec!["serve", "--dir", "."];
        full.extend_from_slice(argv);
        ServeArgs::parse_from(full)
    }

    fn file_config() -> Config {
        let mut cfg = Config::default();
        cfg.server.host = "0.0.0.0".to_string();
        cfg.server.port = 9090;
        cfg.render.width = 1200.0;
        cfg
    }

    #[test]
    fn test_defaults_take_file_values() -> Result<()> {
        let settings = args(&[]).resolve(&file_config())?;
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.host.to_string(), "0.0.0.0");
        assert!(!settings.enable_cors);
        assert_eq!(settings.size, Size::new(1200.0, 600.0));
        Ok(())
    }

    #[test]
    fn test_explicit_args_override_file() -> Result<()> {
        let settings = args(&["--port", "9999", "--host", "10.0.0.1", "--cors", "--height", "300"])
            .resolve(&file_config())?;
        assert_eq!(settings.port, 9999);
        assert_eq!(settings.host.to_string(), "10.0.0.1");
        assert!(settings.enable_cors);
        assert_eq!(settings.size, Size::new(1200.0, 300.0));
        Ok(())
    }

    #[test]
    fn test_invalid_config_host_falls_back() -> Result<()> {
        let mut cfg = Config::default();
        cfg.server.host = "not-an-ip".to_string();
        let settings = args(&[]).resolve(&cfg)?;
        assert_eq!(settings.host, IpAddr::from(Ipv4Addr::LOCALHOST));
        Ok(())
    }

    #[test]
    fn test_input_source_is_flattened() {
        let parsed = args(&[]);
        assert_eq!(parsed.input.dir, Some(PathBuf::from(".")));
        assert!(parsed.input.github_tree.is_none());
    }

    #[test]
    fn test_rejects_undrawable_size() {
        assert!(args(&["--width", "0"]).resolve(&Config::default()).is_err());
        assert!(args(&["--height", "inf"]).resolve(&Config::default()).is_err());
        assert!(args(&["--width", "NaN"]).resolve(&Config::default()).is_err());
    }
}
