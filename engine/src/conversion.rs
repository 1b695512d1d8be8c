//! Unit conversion engine
//!
//! A fixed registry of sixteen directional rules covering length, mass,
//! temperature and volume. Rules are a closed enum; string keys are only
//! parsed at the boundary via [`ConversionRule::from_key`].
//!
//! # Design Principles
//!
//! 1. **Closed Set**: Adding a rule means adding a variant, so every `match`
//!    over rules is checked for exhaustiveness
//! 2. **Paired Rules**: Every rule has its inverse in the table
//! 3. **Stable Order**: [`ConversionRule::ALL`] is the display order and its
//!    first entry is the default selection

use crate::bmi::round_to;
use crate::errors::{EngineError, EngineResult};
use crate::validation::{parse_number, validate_finite};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

const MILES_PER_KM: f64 = 0.621371;
const YARDS_PER_METER: f64 = 1.09361;
const METERS_PER_FOOT: f64 = 0.3048;
const INCHES_PER_CM: f64 = 0.393701;
const POUNDS_PER_KG: f64 = 2.20462;
const OUNCES_PER_GRAM: f64 = 0.035274;
const GALLONS_PER_LITER: f64 = 0.264172;

// ============================================================================
// Quantities and Rules
// ============================================================================

/// Physical quantity a rule converts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quantity {
    Length,
    Mass,
    Temperature,
    Volume,
}

/// A named, directional conversion between two unit symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionRule {
    KilometersToMiles,
    MilesToKilometers,
    MetersToYards,
    YardsToMeters,
    FeetToMeters,
    MetersToFeet,
    CentimetersToInches,
    InchesToCentimeters,
    KilogramsToPounds,
    PoundsToKilograms,
    GramsToOunces,
    OuncesToGrams,
    CelsiusToFahrenheit,
    FahrenheitToCelsius,
    LitersToGallons,
    GallonsToLiters,
}

impl ConversionRule {
    /// The registry, in display order
    pub const ALL: [ConversionRule; 16] = [
        ConversionRule::KilometersToMiles,
        ConversionRule::MilesToKilometers,
        ConversionRule::MetersToYards,
        ConversionRule::YardsToMeters,
        ConversionRule::FeetToMeters,
        ConversionRule::MetersToFeet,
        ConversionRule::CentimetersToInches,
        ConversionRule::InchesToCentimeters,
        ConversionRule::KilogramsToPounds,
        ConversionRule::PoundsToKilograms,
        ConversionRule::GramsToOunces,
        ConversionRule::OuncesToGrams,
        ConversionRule::CelsiusToFahrenheit,
        ConversionRule::FahrenheitToCelsius,
        ConversionRule::LitersToGallons,
        ConversionRule::GallonsToLiters,
    ];

    /// Registry key shown in the selection control
    pub fn key(&self) -> &'static str {
        match self {
            ConversionRule::KilometersToMiles => "Kilometers to Miles",
            ConversionRule::MilesToKilometers => "Miles to Kilometers",
            ConversionRule::MetersToYards => "Meters to Yards",
            ConversionRule::YardsToMeters => "Yards to Meters",
            ConversionRule::FeetToMeters => "Feet to Meters",
            ConversionRule::MetersToFeet => "Meters to Feet",
            ConversionRule::CentimetersToInches => "Centimeters to Inches",
            ConversionRule::InchesToCentimeters => "Inches to Centimeters",
            ConversionRule::KilogramsToPounds => "Kilograms to Pounds",
            ConversionRule::PoundsToKilograms => "Pounds to Kilograms",
            ConversionRule::GramsToOunces => "Grams to Ounces",
            ConversionRule::OuncesToGrams => "Ounces to Grams",
            ConversionRule::CelsiusToFahrenheit => "Celsius to Fahrenheit",
            ConversionRule::FahrenheitToCelsius => "Fahrenheit to Celsius",
            ConversionRule::LitersToGallons => "Liters to Gallons",
            ConversionRule::GallonsToLiters => "Gallons to Liters",
        }
    }

    /// Look up a rule by exact, case-sensitive key
    pub fn from_key(key: &str) -> EngineResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|rule| rule.key() == key)
            .ok_or_else(|| EngineError::UnknownRule(key.to_string()))
    }

    /// Source and target unit symbols
    pub fn units(&self) -> (&'static str, &'static str) {
        match self {
            ConversionRule::KilometersToMiles => ("km", "mi"),
            ConversionRule::MilesToKilometers => ("mi", "km"),
            ConversionRule::MetersToYards => ("m", "yd"),
            ConversionRule::YardsToMeters => ("yd", "m"),
            ConversionRule::FeetToMeters => ("ft", "m"),
            ConversionRule::MetersToFeet => ("m", "ft"),
            ConversionRule::CentimetersToInches => ("cm", "in"),
            ConversionRule::InchesToCentimeters => ("in", "cm"),
            ConversionRule::KilogramsToPounds => ("kg", "lbs"),
            ConversionRule::PoundsToKilograms => ("lbs", "kg"),
            ConversionRule::GramsToOunces => ("g", "oz"),
            ConversionRule::OuncesToGrams => ("oz", "g"),
            ConversionRule::CelsiusToFahrenheit => ("°C", "°F"),
            ConversionRule::FahrenheitToCelsius => ("°F", "°C"),
            ConversionRule::LitersToGallons => ("L", "gal"),
            ConversionRule::GallonsToLiters => ("gal", "L"),
        }
    }

    pub fn source_unit(&self) -> &'static str {
        self.units().0
    }

    pub fn target_unit(&self) -> &'static str {
        self.units().1
    }

    pub fn quantity(&self) -> Quantity {
        match self {
            ConversionRule::KilometersToMiles
            | ConversionRule::MilesToKilometers
            | ConversionRule::MetersToYards
            | ConversionRule::YardsToMeters
            | ConversionRule::FeetToMeters
            | ConversionRule::MetersToFeet
            | ConversionRule::CentimetersToInches
            | ConversionRule::InchesToCentimeters => Quantity::Length,
            ConversionRule::KilogramsToPounds
            | ConversionRule::PoundsToKilograms
            | ConversionRule::GramsToOunces
            | ConversionRule::OuncesToGrams => Quantity::Mass,
            ConversionRule::CelsiusToFahrenheit | ConversionRule::FahrenheitToCelsius => {
                Quantity::Temperature
            }
            ConversionRule::LitersToGallons | ConversionRule::GallonsToLiters => Quantity::Volume,
        }
    }

    /// The rule converting in the opposite direction
    pub fn inverse(&self) -> ConversionRule {
        match self {
            ConversionRule::KilometersToMiles => ConversionRule::MilesToKilometers,
            ConversionRule::MilesToKilometers => ConversionRule::KilometersToMiles,
            ConversionRule::MetersToYards => ConversionRule::YardsToMeters,
            ConversionRule::YardsToMeters => ConversionRule::MetersToYards,
            ConversionRule::FeetToMeters => ConversionRule::MetersToFeet,
            ConversionRule::MetersToFeet => ConversionRule::FeetToMeters,
            ConversionRule::CentimetersToInches => ConversionRule::InchesToCentimeters,
            ConversionRule::InchesToCentimeters => ConversionRule::CentimetersToInches,
            ConversionRule::KilogramsToPounds => ConversionRule::PoundsToKilograms,
            ConversionRule::PoundsToKilograms => ConversionRule::KilogramsToPounds,
            ConversionRule::GramsToOunces => ConversionRule::OuncesToGrams,
            ConversionRule::OuncesToGrams => ConversionRule::GramsToOunces,
            ConversionRule::CelsiusToFahrenheit => ConversionRule::FahrenheitToCelsius,
            ConversionRule::FahrenheitToCelsius => ConversionRule::CelsiusToFahrenheit,
            ConversionRule::LitersToGallons => ConversionRule::GallonsToLiters,
            ConversionRule::GallonsToLiters => ConversionRule::LitersToGallons,
        }
    }

    /// Apply the numeric transform
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            ConversionRule::KilometersToMiles => value * MILES_PER_KM,
            ConversionRule::MilesToKilometers => value / MILES_PER_KM,
            ConversionRule::MetersToYards => value * YARDS_PER_METER,
            ConversionRule::YardsToMeters => value / YARDS_PER_METER,
            ConversionRule::FeetToMeters => value * METERS_PER_FOOT,
            ConversionRule::MetersToFeet => value / METERS_PER_FOOT,
            ConversionRule::CentimetersToInches => value * INCHES_PER_CM,
            ConversionRule::InchesToCentimeters => value / INCHES_PER_CM,
            ConversionRule::KilogramsToPounds => value * POUNDS_PER_KG,
            ConversionRule::PoundsToKilograms => value / POUNDS_PER_KG,
            ConversionRule::GramsToOunces => value * OUNCES_PER_GRAM,
            ConversionRule::OuncesToGrams => value / OUNCES_PER_GRAM,
            ConversionRule::CelsiusToFahrenheit => value * 9.0 / 5.0 + 32.0,
            ConversionRule::FahrenheitToCelsius => (value - 32.0) * 5.0 / 9.0,
            ConversionRule::LitersToGallons => value * GALLONS_PER_LITER,
            ConversionRule::GallonsToLiters => value / GALLONS_PER_LITER,
        }
    }
}

impl Default for ConversionRule {
    fn default() -> Self {
        Self::ALL[0]
    }
}

impl fmt::Display for ConversionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for ConversionRule {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

/// Registry keys in display order
pub fn list_conversion_rules() -> Vec<&'static str> {
    ConversionRule::ALL.iter().map(|rule| rule.key()).collect()
}

// ============================================================================
// Label Precision
// ============================================================================

/// Decimal places used for the output in a result label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u8", into = "u8")]
pub enum LabelPrecision {
    #[default]
    Two,
    Five,
}

impl LabelPrecision {
    pub fn places(&self) -> usize {
        match self {
            LabelPrecision::Two => 2,
            LabelPrecision::Five => 5,
        }
    }
}

impl TryFrom<u8> for LabelPrecision {
    type Error = String;

    fn try_from(places: u8) -> Result<Self, Self::Error> {
        match places {
            2 => Ok(LabelPrecision::Two),
            5 => Ok(LabelPrecision::Five),
            other => Err(format!("Unsupported label precision: {} (expected 2 or 5)", other)),
        }
    }
}

impl From<LabelPrecision> for u8 {
    fn from(precision: LabelPrecision) -> Self {
        precision.places() as u8
    }
}

// ============================================================================
// Conversion
// ============================================================================

/// Outcome of one conversion request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub input: f64,
    pub rule: ConversionRule,
    pub output: f64,
    /// e.g. `"10 km = 6.21 mi"`
    pub label: String,
}

/// Format `"{input} {from} = {output} {to}"` with the output at `precision`
///
/// The output is rounded half-up (33.125 shows as 33.13) and negative zero
/// shows as 0.
pub fn format_label(rule: ConversionRule, input: f64, output: f64, precision: LabelPrecision) -> String {
    let places = precision.places();
    let output = output + 0.0;
    let rounded = round_to(output, places as u32);
    let shown = if rounded.is_finite() { rounded } else { output };
    format!(
        "{} {} = {:.*} {}",
        input + 0.0,
        rule.source_unit(),
        places,
        shown,
        rule.target_unit()
    )
}

/// Apply a rule to a finite value
pub fn convert_with(
    rule: ConversionRule,
    input: f64,
    precision: LabelPrecision,
) -> EngineResult<ConversionResult> {
    if let Err(err) = validate_finite("Input", input) {
        warn!(rule = rule.key(), "Rejected non-finite conversion input");
        return Err(err);
    }

    let output = rule.apply(input);
    validate_finite("Result", output)?;

    let label = format_label(rule, input, output, precision);
    debug!(rule = rule.key(), input, output, "Converted value");

    Ok(ConversionResult {
        input,
        rule,
        output,
        label,
    })
}

/// Convert by registry key with the default two-decimal label
pub fn convert(rule_key: &str, input: f64) -> EngineResult<ConversionResult> {
    let rule = ConversionRule::from_key(rule_key)?;
    convert_with(rule, input, LabelPrecision::default())
}

/// Convert raw text from an input field
pub fn convert_text(
    rule: ConversionRule,
    text: &str,
    precision: LabelPrecision,
) -> EngineResult<ConversionResult> {
    let input = parse_number(text)?;
    convert_with(rule, input, precision)
}
