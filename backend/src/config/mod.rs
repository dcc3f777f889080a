//! Configuration management for the TopWeight backend
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: TW__)

use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub events: EventsConfig,
    #[serde(default)]
    pub uploads: UploadsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// History grouping configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// IANA zone name (e.g. "Europe/Madrid") used when a request names no zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    /// Fixed offset from UTC used when neither the request nor `time_zone` names a zone
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

/// Change feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Events buffered per subscriber before it starts lagging
    pub channel_capacity: usize,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
        }
    }
}

/// Photo upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadsConfig {
    pub max_photo_bytes: usize,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            max_photo_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: "sqlite://topweight.db".to_string(),
                max_connections: 5,
            },
            history: HistoryConfig::default(),
            events: EventsConfig::default(),
            uploads: UploadsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with TW__ prefix
    pub fn load() -> Result<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g., TW__SERVER__PORT=9000 sets server.port
            .add_source(config::Environment::with_prefix("TW").separator("__"))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no deployment can run with
    pub fn validate(&self) -> Result<()> {
        // Valid UTC offsets span -12:00 to +14:00
        if !(-12 * 60..=14 * 60).contains(&self.history.utc_offset_minutes) {
            anyhow::bail!(
                "history.utc_offset_minutes must be between -720 and 840, got {}",
                self.history.utc_offset_minutes
            );
        }
        if let Some(name) = &self.history.time_zone {
            if name.parse::<Tz>().is_err() {
                anyhow::bail!("history.time_zone is not a known time zone: {}", name);
            }
        }
        if self.events.channel_capacity == 0 {
            anyhow::bail!("events.channel_capacity must be greater than 0");
        }
        if self.database.max_connections == 0 {
            anyhow::bail!("database.max_connections must be greater than 0");
        }
        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}
