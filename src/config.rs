use crate::error::{env_error, AppResult};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Hourly rate used by forecasts when neither the request nor a project provides one
pub const DEFAULT_HOURLY_RATE: f64 = 65.0;

/// Default port for the HTTP server
pub const DEFAULT_PORT: u16 = 3000;

/// Main configuration structure for the service
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub host: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Redis connection URL; in-memory storage is used when absent
    pub redis_url: Option<String>,
    /// Fallback hourly rate for forecasts
    pub default_hourly_rate: f64,
    /// Optional TOML file with the holiday table
    pub holidays_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            redis_url: None,
            default_hourly_rate: DEFAULT_HOURLY_RATE,
            holidays_file: None,
        }
    }
}

impl Config {
    /// Load configuration from the environment
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let defaults = Config::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = parse_var("PORT")?.unwrap_or(defaults.port);
        let redis_url = non_empty_var("REDIS_URL");
        let holidays_file = non_empty_var("HOLIDAYS_FILE");

        let default_hourly_rate =
            parse_var::<f64>("DEFAULT_HOURLY_RATE")?.unwrap_or(defaults.default_hourly_rate);
        if !default_hourly_rate.is_finite() || default_hourly_rate < 0.0 {
            return Err(env_error("DEFAULT_HOURLY_RATE"));
        }

        Ok(Config {
            host,
            port,
            redis_url,
            default_hourly_rate,
            holidays_file,
        })
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &str) -> AppResult<Option<T>> {
    match non_empty_var(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| env_error(name)),
        None => Ok(None),
    }
}
