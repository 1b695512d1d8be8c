//! Session state management
//!
//! One [`Session`] holds everything a UI session edits: the BMI stepper
//! values, the converter selection and input, and the expense ledger.
//! Handlers receive it by `&mut` from the caller instead of reaching for
//! module-level state.

use crate::config::AppConfig;
use crate::error::AppError;
use chrono::NaiveDate;
use quickcalc_engine::{
    convert_text, BmiResult, Category, ConversionResult, ConversionRule, EngineError,
    EngineSettings, Ledger, Measurement, MeasurementField, Step, Transaction, TransactionKind,
    WeeklySummary,
};
use tracing::{debug, info};

/// Converter screen state
#[derive(Debug, Clone, Default)]
pub struct ConverterState {
    pub rule: ConversionRule,
    pub input_text: String,
    /// Outcome of the last convert request, shown until superseded
    pub last: Option<Result<ConversionResult, EngineError>>,
}

impl ConverterState {
    /// Text for the result box: the label, or the error message
    pub fn display(&self) -> Option<String> {
        self.last.as_ref().map(|outcome| match outcome {
            Ok(result) => result.label.clone(),
            Err(err) => err.user_message().to_string(),
        })
    }
}

/// Caller-owned state for one UI session
#[derive(Debug, Clone)]
pub struct Session {
    settings: EngineSettings,
    pub measurement: Measurement,
    pub last_bmi: Option<BmiResult>,
    pub converter: ConverterState,
    pub ledger: Ledger,
}

impl Session {
    /// Create a session from loaded configuration
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let rule = config.session.rule()?;
        info!(
            bmi_scheme = ?config.engine.bmi_scheme,
            precision = config.engine.label_precision.places(),
            rule = rule.key(),
            "Session started"
        );

        Ok(Self {
            settings: config.engine,
            measurement: config.session.measurement(),
            last_bmi: None,
            converter: ConverterState {
                rule,
                ..ConverterState::default()
            },
            ledger: Ledger::new(),
        })
    }

    /// Engine settings in force for this session
    #[inline]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    // ========================================================================
    // BMI calculator
    // ========================================================================

    pub fn step(&mut self, field: MeasurementField, step: Step) -> &Measurement {
        self.measurement.step(field, step);
        debug!(?field, ?step, measurement = ?self.measurement, "Stepped measurement");
        &self.measurement
    }

    /// Compute BMI for the current measurement, replacing the previous result
    pub fn calculate_bmi(&mut self) -> Result<BmiResult, EngineError> {
        let result = self.measurement.compute(self.settings.bmi_scheme)?;
        self.last_bmi = Some(result);
        Ok(result)
    }

    // ========================================================================
    // Unit converter
    // ========================================================================

    /// Select a rule by registry key
    ///
    /// An unknown key leaves the current selection untouched.
    pub fn select_rule(&mut self, key: &str) -> Result<ConversionRule, EngineError> {
        let rule = ConversionRule::from_key(key)?;
        self.converter.rule = rule;
        Ok(rule)
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.converter.input_text = text.into();
    }

    /// Convert the current input with the selected rule
    pub fn convert(&mut self) -> Result<ConversionResult, EngineError> {
        let outcome = convert_text(
            self.converter.rule,
            &self.converter.input_text,
            self.settings.label_precision,
        );
        self.converter.last = Some(outcome.clone());
        outcome
    }

    // ========================================================================
    // Expense ledger
    // ========================================================================

    pub fn add_transaction(
        &mut self,
        amount_text: &str,
        category: Category,
        kind: TransactionKind,
        date: NaiveDate,
    ) -> Result<&Transaction, EngineError> {
        self.ledger.add(amount_text, category, kind, date)
    }

    pub fn weekly_summary(&self, today: NaiveDate) -> WeeklySummary {
        self.ledger.weekly_summary(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use quickcalc_engine::{BandScheme, BmiCategory, LabelPrecision};

    fn session() -> Session {
        Session::new(&AppConfig::default()).unwrap()
    }

    fn field_strategy() -> impl Strategy<Value = MeasurementField> {
        prop_oneof![
            Just(MeasurementField::Age),
            Just(MeasurementField::Weight),
            Just(MeasurementField::Height),
        ]
    }

    fn step_strategy() -> impl Strategy<Value = Step> {
        prop_oneof![Just(Step::Increment), Just(Step::Decrement)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: any stepper sequence keeps every field at or above its minimum
        #[test]
        fn prop_steps_respect_minimums(
            steps in prop::collection::vec((field_strategy(), step_strategy()), 0..300)
        ) {
            let mut session = session();
            for (field, step) in steps {
                session.step(field, step);
            }
            prop_assert!(session.measurement.age >= 1);
            prop_assert!(session.measurement.weight_kg >= 1.0);
            prop_assert!(session.measurement.height_cm >= 50.0);
            prop_assert!(session.calculate_bmi().is_ok());
        }
    }

    #[test]
    fn test_new_session_uses_config() {
        let mut config = AppConfig::default();
        config.session.default_rule = "Liters to Gallons".to_string();
        config.engine.label_precision = LabelPrecision::Five;

        let session = Session::new(&config).unwrap();
        assert_eq!(session.converter.rule, ConversionRule::LitersToGallons);
        assert_eq!(session.settings().label_precision, LabelPrecision::Five);
        assert!(session.last_bmi.is_none());
        assert!(session.converter.display().is_none());
    }

    #[test]
    fn test_bmi_flow() {
        let mut session = session();
        for _ in 0..20 {
            session.step(MeasurementField::Weight, Step::Increment);
        }
        // 80kg, 170cm -> 27.68 -> 27.7
        let result = session.calculate_bmi().unwrap();
        assert_eq!(result.value, 27.7);
        assert_eq!(result.category, BmiCategory::Overweight);
        assert_eq!(session.last_bmi, Some(result));
    }

    #[test]
    fn test_five_band_session() {
        let mut config = AppConfig::default();
        config.engine.bmi_scheme = BandScheme::FiveBand;
        config.session.weight_kg = 120.0;
        config.session.height_cm = 170.0;

        // 120kg, 170cm -> 41.5
        let mut session = Session::new(&config).unwrap();
        let result = session.calculate_bmi().unwrap();
        assert_eq!(result.category, BmiCategory::ExtremelyObese);
    }

    #[test]
    fn test_convert_flow() {
        let mut session = session();
        session.set_input("10");
        let result = session.convert().unwrap();
        assert_eq!(result.label, "10 km = 6.21 mi");
        assert_eq!(session.converter.display().unwrap(), "10 km = 6.21 mi");

        session.set_input("ten");
        assert!(session.convert().is_err());
        assert_eq!(
            session.converter.display().unwrap(),
            "Please enter a valid number"
        );
    }

    #[test]
    fn test_unknown_rule_keeps_selection() {
        let mut session = session();
        session.select_rule("Celsius to Fahrenheit").unwrap();
        let err = session.select_rule("Celsius to Kelvin").unwrap_err();
        assert_eq!(err, EngineError::UnknownRule("Celsius to Kelvin".to_string()));
        assert_eq!(session.converter.rule, ConversionRule::CelsiusToFahrenheit);
    }
}
