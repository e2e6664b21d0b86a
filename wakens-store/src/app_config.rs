use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub redis: Option<RedisConfig>,
    #[serde(default)]
    pub email: Option<EmailConfig>,
    #[serde(default)]
    pub booking_rules: BookingRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RedisConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: String,
    pub from_address: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BookingRules {
    #[serde(default = "default_handoff_ttl")]
    pub handoff_ttl_minutes: i64,
    #[serde(default = "default_history_limit")]
    pub sensor_history_limit: usize,
}

fn default_handoff_ttl() -> i64 {
    10
}

fn default_history_limit() -> usize {
    50
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            handoff_ttl_minutes: default_handoff_ttl(),
            sensor_history_limit: default_history_limit(),
        }
    }
}

impl Config {
    /// Live repositories need both stores configured. Anything less runs
    /// the canned in-memory demo dataset.
    pub fn is_live(&self) -> bool {
        self.database.is_some() && self.redis.is_some()
    }

    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file (optional)
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of WAKENS)
            // Eg. `WAKENS__SERVER__PORT=8080` would set the server port
            .add_source(config::Environment::with_prefix("WAKENS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_store_sections_mean_demo_mode() {
        let cfg = Config {
            server: ServerConfig { port: 8080 },
            database: None,
            redis: Some(RedisConfig {
                url: "redis://localhost".to_string(),
            }),
            email: None,
            booking_rules: BookingRules::default(),
        };
        assert!(!cfg.is_live());
    }

    #[test]
    fn both_stores_mean_live_mode() {
        let cfg = Config {
            server: ServerConfig { port: 8080 },
            database: Some(DatabaseConfig {
                url: "postgres://localhost/wakens".to_string(),
            }),
            redis: Some(RedisConfig {
                url: "redis://localhost".to_string(),
            }),
            email: None,
            booking_rules: BookingRules::default(),
        };
        assert!(cfg.is_live());
    }
}
