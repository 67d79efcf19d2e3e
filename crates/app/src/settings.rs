//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml`, then `MOCKBANK_*` environment variables
//! (`MOCKBANK_SERVER__PORT=9000`), then the legacy `API_PORT` and
//! `ALLOWED_ORIGIN` variables.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    pub allowed_origin: String,
    pub allow_reset: bool,
}

#[derive(Debug, Deserialize)]
pub struct Watcher {
    pub enabled: bool,
    pub interval_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub watcher: Watcher,
}

#[derive(Debug, Parser)]
#[command(name = "mockbank", about = "Mock personal-finance backend")]
struct Args {
    /// Optional config file path (TOML, extension may be omitted).
    #[arg(long)]
    config: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        Self::build(
            path,
            std::env::var("API_PORT").ok(),
            std::env::var("ALLOWED_ORIGIN").ok(),
        )
    }

    fn build(
        path: &str,
        api_port: Option<String>,
        allowed_origin: Option<String>,
    ) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("server.allowed_origin", "http://localhost:3000")?
            .set_default("server.allow_reset", false)?
            .set_default("watcher.enabled", true)?
            .set_default("watcher.interval_secs", 10)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("MOCKBANK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("server.port", api_port.filter(|v| !v.trim().is_empty()))?
            .set_override_option(
                "server.allowed_origin",
                allowed_origin.filter(|v| !v.trim().is_empty()),
            )?
            .build()?;

        settings.try_deserialize()
    }
}
