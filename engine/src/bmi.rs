//! BMI engine
//!
//! Computes a body-mass index from weight and height and classifies it
//! into a category band.
//!
//! # Band schemes
//!
//! Two mutually exclusive category sets exist and one is picked per product
//! configuration:
//!
//! - [`BandScheme::FourBand`]: Underweight, Normal, Overweight, Obese
//! - [`BandScheme::FiveBand`]: adds Extremely Obese from 34.9
//!
//! Classification runs on the value *after* rounding to one decimal place,
//! and the upper bounds are exclusive at 24.9 and 29.9 while the next band
//! starts at 25 and 30. Values in `[24.9, 25)` and `[29.9, 30)` therefore
//! fall through to Obese under either scheme. This matches the shipped calculator.

use crate::errors::{EngineError, EngineResult};
use crate::validation::validate_finite;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Display text for the healthy range shown next to a result
pub const NORMAL_RANGE_LABEL: &str = "Normal range: 18.5 - 24.9";

pub const MIN_AGE: u32 = 1;
pub const MIN_WEIGHT_KG: f64 = 1.0;
pub const MIN_HEIGHT_CM: f64 = 50.0;

// ============================================================================
// Categories
// ============================================================================

/// Which set of BMI bands is in force
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BandScheme {
    #[default]
    FourBand,
    FiveBand,
}

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
    /// Only produced under [`BandScheme::FiveBand`]
    ExtremelyObese,
}

impl BmiCategory {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
            BmiCategory::ExtremelyObese => "Extremely Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an already-rounded BMI value
pub fn classify(scheme: BandScheme, bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi >= 18.5 && bmi < 24.9 {
        BmiCategory::Normal
    } else if bmi >= 25.0 && bmi < 29.9 {
        BmiCategory::Overweight
    } else {
        match scheme {
            BandScheme::FourBand => BmiCategory::Obese,
            BandScheme::FiveBand if bmi >= 34.9 => BmiCategory::ExtremelyObese,
            BandScheme::FiveBand => BmiCategory::Obese,
        }
    }
}

// ============================================================================
// Computation
// ============================================================================

/// BMI calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI rounded to one decimal place
    pub value: f64,
    pub category: BmiCategory,
}

/// Round half-up to `places` decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Unrounded BMI
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn raw_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Compute and classify BMI under the four-band scheme
pub fn compute_bmi(weight_kg: f64, height_cm: f64) -> EngineResult<BmiResult> {
    compute_bmi_with(BandScheme::FourBand, weight_kg, height_cm)
}

/// Compute and classify BMI under the given scheme
///
/// Inputs are not clamped here; that is the caller's job (see
/// [`Measurement`]). Non-finite inputs, and a non-finite result such as
/// a zero height produces, are rejected.
pub fn compute_bmi_with(
    scheme: BandScheme,
    weight_kg: f64,
    height_cm: f64,
) -> EngineResult<BmiResult> {
    if let Err(err) =
        validate_finite("Weight", weight_kg).and_then(|_| validate_finite("Height", height_cm))
    {
        warn!(weight_kg, height_cm, "Rejected non-finite BMI input");
        return Err(err);
    }

    let bmi = raw_bmi(weight_kg, height_cm);
    if let Err(err) = validate_finite("BMI", bmi) {
        warn!(weight_kg, height_cm, "BMI is not a finite number");
        return Err(err);
    }

    let value = round_to(bmi, 1);
    let category = classify(scheme, value);
    debug!(weight_kg, height_cm, value, ?category, ?scheme, "Computed BMI");

    Ok(BmiResult { value, category })
}

// ============================================================================
// Measurement (stepper state)
// ============================================================================

/// Field adjusted by a stepper control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementField {
    Age,
    Weight,
    Height,
}

impl std::str::FromStr for MeasurementField {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "age" => Ok(MeasurementField::Age),
            "weight" => Ok(MeasurementField::Weight),
            "height" => Ok(MeasurementField::Height),
            _ => Err(EngineError::InvalidInput(format!("Unknown field: {}", s))),
        }
    }
}

/// Stepper direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Increment,
    Decrement,
}

/// Age, weight and height as edited by the user
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub age: u32,
    pub weight_kg: f64,
    pub height_cm: f64,
}

impl Default for Measurement {
    fn default() -> Self {
        Self {
            age: 25,
            weight_kg: 60.0,
            height_cm: 170.0,
        }
    }
}

impl Measurement {
    /// Create a measurement, clamping every field to its minimum
    pub fn new(age: u32, weight_kg: f64, height_cm: f64) -> Self {
        Self {
            age: age.max(MIN_AGE),
            weight_kg: weight_kg.max(MIN_WEIGHT_KG),
            height_cm: height_cm.max(MIN_HEIGHT_CM),
        }
    }

    /// Move one field by one unit, never below its minimum
    pub fn step(&mut self, field: MeasurementField, step: Step) {
        let delta = match step {
            Step::Increment => 1.0,
            Step::Decrement => -1.0,
        };
        match field {
            MeasurementField::Age => {
                self.age = match step {
                    Step::Increment => self.age.saturating_add(1),
                    Step::Decrement => self.age.saturating_sub(1).max(MIN_AGE),
                };
            }
            MeasurementField::Weight => {
                self.weight_kg = (self.weight_kg + delta).max(MIN_WEIGHT_KG);
            }
            MeasurementField::Height => {
                self.height_cm = (self.height_cm + delta).max(MIN_HEIGHT_CM);
            }
        }
    }

    /// Compute BMI for the current weight and height
    pub fn compute(&self, scheme: BandScheme) -> EngineResult<BmiResult> {
        compute_bmi_with(scheme, self.weight_kg, self.height_cm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    // =========================================================================
    // Computation Tests
    // =========================================================================

    #[test]
    fn test_bmi_calculation() {
        // 70kg, 175cm -> 22.857... -> 22.9
        let result = compute_bmi(70.0, 175.0).unwrap();
        assert_eq!(result.value, 22.9);
        assert_eq!(result.category, BmiCategory::Normal);
    }

    #[test]
    fn test_default_measurement() {
        // 60kg, 170cm -> 20.76... -> 20.8
        let result = Measurement::default().compute(BandScheme::FourBand).unwrap();
        assert_eq!(result.value, 20.8);
        assert_eq!(result.category, BmiCategory::Normal);
    }

    #[test]
    fn test_non_finite_is_invalid_input() {
        assert!(matches!(
            compute_bmi(f64::NAN, 170.0),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_bmi(70.0, f64::INFINITY),
            Err(EngineError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_bmi(70.0, 0.0),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_infinite_inputs_rejected() {
        // 70 / inf would otherwise read as a BMI of 0.0
        for (weight, height) in [
            (70.0, f64::INFINITY),
            (70.0, f64::NEG_INFINITY),
            (f64::INFINITY, 175.0),
            (70.0, f64::NAN),
        ] {
            let err = compute_bmi_with(BandScheme::FiveBand, weight, height).unwrap_err();
            assert!(matches!(err, EngineError::InvalidInput(_)), "{} / {}", weight, height);
        }
    }

    #[test]
    fn test_five_band_extremely_obese_only_from_34_9() {
        for tenths in 0..349 {
            let bmi = tenths as f64 / 10.0;
            assert_ne!(classify(BandScheme::FiveBand, bmi), BmiCategory::ExtremelyObese, "{}", bmi);
        }
        assert_eq!(classify(BandScheme::FiveBand, 34.9), BmiCategory::ExtremelyObese);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(22.857, 1), 22.9);
        assert_eq!(round_to(22.85001, 1), 22.9);
        assert_eq!(round_to(22.84, 1), 22.8);
        assert_eq!(round_to(3.14159, 2), 3.14);
    }

    // =========================================================================
    // Classification Tests
    // =========================================================================

    #[rstest]
    #[case(10.0, BmiCategory::Underweight)]
    #[case(18.4, BmiCategory::Underweight)]
    #[case(18.5, BmiCategory::Normal)]
    #[case(24.8, BmiCategory::Normal)]
    #[case(24.9, BmiCategory::Obese)] // gap: fails both Normal and Overweight tests
    #[case(25.0, BmiCategory::Overweight)]
    #[case(29.8, BmiCategory::Overweight)]
    #[case(29.9, BmiCategory::Obese)]
    #[case(30.0, BmiCategory::Obese)]
    #[case(45.0, BmiCategory::Obese)]
    fn test_four_band_boundaries(#[case] bmi: f64, #[case] expected: BmiCategory) {
        assert_eq!(classify(BandScheme::FourBand, bmi), expected);
    }

    #[rstest]
    #[case(18.4, BmiCategory::Underweight)]
    #[case(22.0, BmiCategory::Normal)]
    #[case(24.9, BmiCategory::Obese)]
    #[case(27.0, BmiCategory::Overweight)]
    #[case(29.9, BmiCategory::Obese)]
    #[case(30.0, BmiCategory::Obese)]
    #[case(34.8, BmiCategory::Obese)]
    #[case(34.9, BmiCategory::ExtremelyObese)]
    #[case(40.0, BmiCategory::ExtremelyObese)]
    fn test_five_band_boundaries(#[case] bmi: f64, #[case] expected: BmiCategory) {
        assert_eq!(classify(BandScheme::FiveBand, bmi), expected);
    }

    #[test]
    fn test_four_band_never_extremely_obese() {
        for tenths in 0..1000 {
            let bmi = tenths as f64 / 10.0;
            assert_ne!(classify(BandScheme::FourBand, bmi), BmiCategory::ExtremelyObese);
        }
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(BmiCategory::ExtremelyObese.to_string(), "Extremely Obese");
        assert_eq!(BmiCategory::Normal.label(), "Normal");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: value is the one-decimal rounding of weight / height(m)²
        #[test]
        fn prop_value_is_rounded_bmi(weight in 1.0f64..500.0, height in 50.0f64..250.0) {
            let result = compute_bmi(weight, height).unwrap();
            let expected = (weight / ((height / 100.0) * (height / 100.0)) * 10.0).round() / 10.0;
            prop_assert_eq!(result.value, expected);
        }

        /// Property: identical inputs give identical output
        #[test]
        fn prop_compute_is_idempotent(weight in 1.0f64..500.0, height in 50.0f64..250.0) {
            let first = compute_bmi(weight, height).unwrap();
            let second = compute_bmi(weight, height).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: category depends only on the rounded value
        #[test]
        fn prop_category_follows_value(weight in 1.0f64..500.0, height in 50.0f64..250.0) {
            let result = compute_bmi(weight, height).unwrap();
            prop_assert_eq!(result.category, classify(BandScheme::FourBand, result.value));
        }
    }

    // =========================================================================
    // Stepper Tests
    // =========================================================================

    #[test]
    fn test_stepper_clamps_at_minimums() {
        let mut m = Measurement::new(1, 1.0, 50.0);
        m.step(MeasurementField::Age, Step::Decrement);
        m.step(MeasurementField::Weight, Step::Decrement);
        m.step(MeasurementField::Height, Step::Decrement);
        assert_eq!(m, Measurement::new(1, 1.0, 50.0));
    }

    #[test]
    fn test_stepper_moves_one_unit() {
        let mut m = Measurement::default();
        m.step(MeasurementField::Age, Step::Increment);
        m.step(MeasurementField::Weight, Step::Increment);
        m.step(MeasurementField::Height, Step::Decrement);
        assert_eq!(m.age, 26);
        assert_eq!(m.weight_kg, 61.0);
        assert_eq!(m.height_cm, 169.0);
    }

    #[test]
    fn test_new_clamps() {
        let m = Measurement::new(0, -5.0, 20.0);
        assert_eq!(m.age, MIN_AGE);
        assert_eq!(m.weight_kg, MIN_WEIGHT_KG);
        assert_eq!(m.height_cm, MIN_HEIGHT_CM);
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("Height".parse::<MeasurementField>().unwrap(), MeasurementField::Height);
        assert!("shoe".parse::<MeasurementField>().is_err());
    }
}
