// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;

const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_PHOTO_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_MAX_ALERT_LENGTH: usize = 500;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Project that issues user ID tokens and hosts Firestore
    pub firebase_project_id: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Largest photo accepted for registration
    pub max_photo_bytes: u64,
    /// Longest accepted alert message, in characters
    pub max_alert_length: usize,
}

impl Config {
    /// Load configuration from environment variables (and `.env`, if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let firebase_project_id = env::var("FIREBASE_PROJECT_ID")
            .map(|v| v.trim().to_string())
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("FIREBASE_PROJECT_ID"))?;

        Ok(Self {
            firebase_project_id,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
            port: parse_var("PORT", DEFAULT_PORT)?,
            max_photo_bytes: parse_var("MAX_PHOTO_BYTES", DEFAULT_MAX_PHOTO_BYTES)?,
            max_alert_length: parse_var("MAX_ALERT_LENGTH", DEFAULT_MAX_ALERT_LENGTH)?,
        })
    }

    /// Default config for tests.
    pub fn test_default() -> Self {
        Self {
            firebase_project_id: "trailhead-test".to_string(),
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            port: DEFAULT_PORT,
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
            max_alert_length: DEFAULT_MAX_ALERT_LENGTH,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-wide, so everything touching them
    // lives in a single test.
    #[test]
    fn test_config_from_env() {
        env::set_var("FIREBASE_PROJECT_ID", " demo-project ");
        env::remove_var("PORT");
        env::set_var("MAX_PHOTO_BYTES", "2048");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.firebase_project_id, "demo-project");
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_photo_bytes, 2048);
        assert_eq!(config.max_alert_length, DEFAULT_MAX_ALERT_LENGTH);

        env::set_var("PORT", "not-a-port");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));

        env::remove_var("PORT");
        env::remove_var("MAX_PHOTO_BYTES");
        env::set_var("FIREBASE_PROJECT_ID", "");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("FIREBASE_PROJECT_ID"))
        ));
    }
}
