use std::env;
use std::fmt;

use chrono::Duration;

const DEFAULT_FOLLOW_UP_WINDOW_DAYS: u32 = 3;
const DEFAULT_RECENT_WINDOW_DAYS: u32 = 7;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub tracker: TrackerConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let follow_up_window_days =
            window_from_env("APP_FOLLOW_UP_WINDOW_DAYS", DEFAULT_FOLLOW_UP_WINDOW_DAYS)?;
        let recent_window_days =
            window_from_env("APP_RECENT_WINDOW_DAYS", DEFAULT_RECENT_WINDOW_DAYS)?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            tracker: TrackerConfig {
                follow_up_window_days,
                recent_window_days,
            },
        })
    }
}

fn window_from_env(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidWindow { name }),
        Err(_) => Ok(default),
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Horizons used by the analytics queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// How far ahead a follow-up counts as due.
    pub follow_up_window_days: u32,
    /// How far back an application counts as sent "this week".
    pub recent_window_days: u32,
}

impl TrackerConfig {
    pub fn follow_up_window(&self) -> Duration {
        Duration::days(i64::from(self.follow_up_window_days))
    }

    pub fn recent_window(&self) -> Duration {
        Duration::days(i64::from(self.recent_window_days))
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            follow_up_window_days: DEFAULT_FOLLOW_UP_WINDOW_DAYS,
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidWindow { name: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWindow { name } => {
                write!(f, "{name} must be a non-negative whole number of days")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_FOLLOW_UP_WINDOW_DAYS");
        env::remove_var("APP_RECENT_WINDOW_DAYS");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.tracker, TrackerConfig::default());
        assert_eq!(config.tracker.follow_up_window(), Duration::days(3));
        assert_eq!(config.tracker.recent_window(), Duration::days(7));
    }

    #[test]
    fn reads_windows_and_environment() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "CI");
        env::set_var("APP_FOLLOW_UP_WINDOW_DAYS", "5");
        env::set_var("APP_RECENT_WINDOW_DAYS", " 14 ");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Test);
        assert_eq!(config.tracker.follow_up_window_days, 5);
        assert_eq!(config.tracker.recent_window_days, 14);
    }

    #[test]
    fn rejects_negative_window() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_RECENT_WINDOW_DAYS", "-1");
        let result = AppConfig::load();
        reset_env();

        match result {
            Err(ConfigError::InvalidWindow { name }) => {
                assert_eq!(name, "APP_RECENT_WINDOW_DAYS")
            }
            other => panic!("expected invalid window, got {other:?}"),
        }
    }
}
