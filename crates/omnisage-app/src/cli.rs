//! CLI argument definitions for the OmniSage application.
//!
//! Uses `clap` with derive macros for ergonomic argument parsing.
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "OMNISAGE_CONFIG";
/// Environment variable overriding the HTTP port.
pub const PORT_ENV: &str = "OMNISAGE_PORT";

/// OmniSage: a conversational assistant with voice input and web search.
#[derive(Parser, Debug)]
#[command(name = "omnisage", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// HTTP server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Interface to bind.
    #[arg(long = "host", default_value = "127.0.0.1")]
    pub host: String,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > OMNISAGE_CONFIG env var > ~/.omnisage/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        self.config_path_with(|name| std::env::var(name).ok())
    }

    /// Resolve the HTTP port.
    ///
    /// Priority: --port flag > OMNISAGE_PORT env var > config file value.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        self.port_with(config_port, |name| std::env::var(name).ok())
    }

    /// Resolve the log level.
    ///
    /// Priority: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    fn config_path_with<F>(&self, env: F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Some(p) = env(CONFIG_ENV).filter(|p| !p.trim().is_empty()) {
            return PathBuf::from(p);
        }
        default_config_path(env)
    }

    fn port_with<F>(&self, config_port: u16, env: F) -> u16
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(p) = self.port {
            return p;
        }
        if let Some(p) = env(PORT_ENV).and_then(|v| v.trim().parse::<u16>().ok()) {
            return p;
        }
        config_port
    }
}

/// Default config file path for the current platform.
fn default_config_path<F>(env: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let home_var = if cfg!(target_os = "windows") {
        "USERPROFILE"
    } else {
        "HOME"
    };
    match env(home_var) {
        Some(home) => PathBuf::from(home).join(".omnisage").join("config.toml"),
        None => PathBuf::from("config.toml"),
    }
}
