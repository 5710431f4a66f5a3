//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PERSONA_LENS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use persona_lens::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Catalog at {}", config.catalog.path.display());
//! ```

mod adaptive;
mod ai;
mod catalog;
mod database;
mod error;
mod interpretation;
mod log;

pub use adaptive::AdaptiveConfig;
pub use ai::AiConfig;
pub use catalog::CatalogConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use interpretation::InterpretationConfig;
pub use log::LogConfig;

use serde::Deserialize;

use crate::application::handlers::{AdaptiveSettings, AssemblerConfig};

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields an in-memory
/// setup with generation disabled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// OpenAI provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Adaptive session configuration
    #[serde(default)]
    pub adaptive: AdaptiveConfig,

    /// Interpretation assembly configuration
    #[serde(default)]
    pub interpretation: InterpretationConfig,

    /// Quiz catalog location
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Database configuration (PostgreSQL, optional)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PERSONA_LENS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PERSONA_LENS__AI__MODEL=gpt-4o` -> `ai.model = gpt-4o`
    /// - `PERSONA_LENS__ADAPTIVE__TOTAL_QUESTIONS=8` -> `adaptive.total_questions = 8`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PERSONA_LENS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.adaptive.validate()?;
        self.catalog.validate()?;
        self.database.validate()?;
        self.log.validate()?;
        Ok(())
    }

    /// Settings for the adaptive handlers
    pub fn adaptive_settings(&self) -> AdaptiveSettings {
        AdaptiveSettings {
            total_questions: self.adaptive.total_questions,
            context_answers: self.adaptive.context_answers,
            personalization: self.interpretation.personalization,
        }
    }

    /// Settings for the interpretation assembler
    pub fn assembler_config(&self) -> AssemblerConfig {
        AssemblerConfig {
            direction_guard: self.interpretation.direction_guard,
            temperature: self.ai.rewrite_temperature,
            section_max_tokens: self.ai.section_max_tokens,
            batch_max_tokens: self.ai.batch_max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interpretation::PersonalizationMode;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [(&str, &str); 5] = [
        ("PERSONA_LENS__AI__MODEL", "gpt-4o"),
        ("PERSONA_LENS__ADAPTIVE__TOTAL_QUESTIONS", "8"),
        ("PERSONA_LENS__INTERPRETATION__PERSONALIZATION", "batched"),
        ("PERSONA_LENS__DATABASE__URL", "postgresql://test@localhost/test"),
        ("PERSONA_LENS__LOG__JSON", "true"),
    ];

    fn set_env() {
        for (key, value) in VARS {
            env::set_var(key, value);
        }
    }

    fn clear_env() {
        for (key, _) in VARS {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.ai.model, "gpt-4o");
        assert_eq!(config.adaptive.total_questions, 8);
        assert_eq!(config.interpretation.personalization, PersonalizationMode::Batched);
        assert_eq!(config.database.url(), Some("postgresql://test@localhost/test"));
        assert!(config.log.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.adaptive.total_questions, 12);
        assert_eq!(config.database.url(), None);
        assert!(config.interpretation.direction_guard);
    }

    #[test]
    fn test_settings_are_derived_from_sections() {
        let mut config = AppConfig::default();
        config.adaptive.context_answers = 5;
        config.interpretation.personalization = PersonalizationMode::PerSection;
        config.ai.section_max_tokens = 300;

        let settings = config.adaptive_settings();
        assert_eq!(settings.context_answers, 5);
        assert_eq!(settings.personalization, PersonalizationMode::PerSection);
        assert_eq!(config.assembler_config().section_max_tokens, 300);
    }

    #[test]
    fn test_validate_reports_first_failure() {
        let mut config = AppConfig::default();
        config.log.level = "chatty".to_string();
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidLogLevel("chatty".to_string()))
        );
    }
}
