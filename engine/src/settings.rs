//! Per-deployment engine choices

use crate::bmi::BandScheme;
use crate::conversion::LabelPrecision;
use serde::{Deserialize, Serialize};

/// Product configuration consumed by the engines
///
/// Both choices are fixed for a deployment and never mixed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EngineSettings {
    #[serde(default)]
    pub bmi_scheme: BandScheme,
    #[serde(default)]
    pub label_precision: LabelPrecision,
}
