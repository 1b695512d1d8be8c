//! QuickCalc Engine Library
//!
//! Pure calculation engines behind the QuickCalc utility apps: BMI
//! classification, unit conversion and the session expense ledger.
//! Presentation layers call into this crate and own all session state.

pub mod bmi;
pub mod conversion;
pub mod errors;
pub mod ledger;
pub mod settings;
pub mod validation;

// Re-export commonly used items
pub use bmi::{
    classify, compute_bmi, compute_bmi_with, BandScheme, BmiCategory, BmiResult, Measurement,
    MeasurementField, Step,
};
pub use conversion::{
    convert, convert_text, convert_with, list_conversion_rules, ConversionResult, ConversionRule,
    LabelPrecision, Quantity,
};
pub use errors::*;
pub use ledger::{Category, Ledger, Transaction, TransactionKind, WeeklySummary};
pub use settings::EngineSettings;
