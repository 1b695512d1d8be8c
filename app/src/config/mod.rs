//! Configuration management for the QuickCalc session host
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: QC__)

use crate::error::AppError;
use quickcalc_engine::{ConversionRule, EngineSettings, Measurement};
use serde::{Deserialize, Serialize};
use std::env;
use validator::Validate;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub session: SessionConfig,
}

/// Initial state of a new session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SessionConfig {
    #[validate(range(min = 1, message = "Age must be at least 1"))]
    pub age: u32,
    #[validate(range(min = 1.0, message = "Weight must be at least 1 kg"))]
    pub weight_kg: f64,
    #[validate(range(min = 50.0, message = "Height must be at least 50 cm"))]
    pub height_cm: f64,
    /// Registry key preselected in the converter
    pub default_rule: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let measurement = Measurement::default();
        Self {
            age: measurement.age,
            weight_kg: measurement.weight_kg,
            height_cm: measurement.height_cm,
            default_rule: ConversionRule::default().key().to_string(),
        }
    }
}

impl SessionConfig {
    /// Starting measurement for the BMI calculator
    pub fn measurement(&self) -> Measurement {
        Measurement::new(self.age, self.weight_kg, self.height_cm)
    }

    /// Preselected conversion rule
    pub fn rule(&self) -> Result<ConversionRule, AppError> {
        ConversionRule::from_key(&self.default_rule).map_err(|_| {
            AppError::Config(format!("Unknown default_rule: {}", self.default_rule))
        })
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with QC__ prefix
    pub fn load() -> Result<Self, AppError> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Load from environment-specific config file
            .add_source(config::File::with_name(&config_file).required(false))
            // Override with environment variables (QC__ prefix)
            // e.g., QC__ENGINE__LABEL_PRECISION=5 sets engine.label_precision
            .add_source(config::Environment::with_prefix("QC").separator("__"))
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check field ranges and that the default rule exists
    pub fn validate(&self) -> Result<(), AppError> {
        Validate::validate(&self.session)?;
        self.session.rule()?;
        Ok(())
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcalc_engine::{BandScheme, LabelPrecision};

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.engine.bmi_scheme, BandScheme::FourBand);
        assert_eq!(config.engine.label_precision, LabelPrecision::Two);
        assert_eq!(config.session.age, 25);
        assert_eq!(config.session.default_rule, "Kilometers to Miles");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_session() {
        let mut config = AppConfig::default();
        config.session.height_cm = 20.0;
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_rejects_unknown_default_rule() {
        let mut config = AppConfig::default();
        config.session.default_rule = "Parsecs to Miles".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_toml_overrides() {
        let toml = r#"
            [engine]
            bmi_scheme = "five_band"
            label_precision = 5

            [session]
            age = 40
            weight_kg = 82.0
            height_cm = 180.0
            default_rule = "Celsius to Fahrenheit"
        "#;

        let config: AppConfig = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default()).unwrap())
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.engine.bmi_scheme, BandScheme::FiveBand);
        assert_eq!(config.engine.label_precision, LabelPrecision::Five);
        assert_eq!(config.session.rule().unwrap(), ConversionRule::CelsiusToFahrenheit);
        assert_eq!(config.session.measurement().age, 40);
    }

    #[test]
    fn test_is_production() {
        // Default should be false (development)
        assert!(!AppConfig::is_production());
    }
}
