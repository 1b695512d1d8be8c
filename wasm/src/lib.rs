//! QuickCalc WASM Module
//!
//! This crate provides WebAssembly bindings so a browser or hybrid mobile
//! presentation layer can call the engines directly. Structured results
//! cross the boundary as JSON strings; failures come back as the
//! user-facing message.

use quickcalc_engine::{
    compute_bmi_with, convert_with, BandScheme, ConversionRule, EngineError, LabelPrecision,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct BmiView {
    value: f64,
    category: &'static str,
}

#[derive(Serialize)]
struct ConversionView {
    value: f64,
    label: String,
}

fn to_js_error(err: EngineError) -> JsValue {
    JsValue::from_str(err.user_message())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn bmi_json(scheme: BandScheme, weight_kg: f64, height_cm: f64) -> Result<String, EngineError> {
    let result = compute_bmi_with(scheme, weight_kg, height_cm)?;
    let view = BmiView {
        value: result.value,
        category: result.category.label(),
    };
    serde_json::to_string(&view).map_err(|e| EngineError::InvalidInput(e.to_string()))
}

/// Calculate BMI from weight (kg) and height (cm)
///
/// Returns `{"value": .., "category": ..}`. Set `five_band` to use the
/// five-category scheme.
#[wasm_bindgen]
pub fn compute_bmi(weight_kg: f64, height_cm: f64, five_band: bool) -> Result<String, JsValue> {
    let scheme = if five_band {
        BandScheme::FiveBand
    } else {
        BandScheme::FourBand
    };
    bmi_json(scheme, weight_kg, height_cm).map_err(to_js_error)
}

/// Convert a value with the rule named by `rule_key`
///
/// Returns `{"value": .., "label": ..}`. `precision` is 2 or 5.
#[wasm_bindgen]
pub fn convert(rule_key: &str, input: f64, precision: u8) -> Result<String, JsValue> {
    let precision = LabelPrecision::try_from(precision).map_err(|e| JsValue::from_str(&e))?;
    let rule = ConversionRule::from_key(rule_key).map_err(to_js_error)?;
    let result = convert_with(rule, input, precision).map_err(to_js_error)?;

    to_json(&ConversionView {
        value: result.output,
        label: result.label,
    })
}

/// Registry keys in display order, for populating a picker
#[wasm_bindgen]
pub fn list_conversion_rules() -> Vec<String> {
    quickcalc_engine::list_conversion_rules()
        .into_iter()
        .map(str::to_string)
        .collect()
}
