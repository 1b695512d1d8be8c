//! One-shot commands for the `quickcalc` binary
//!
//! Each command runs against a [`Session`] and yields a JSON value.

use crate::error::AppError;
use crate::session::Session;
use quickcalc_engine::bmi::NORMAL_RANGE_LABEL;
use quickcalc_engine::validation::parse_number;
use quickcalc_engine::{list_conversion_rules, Measurement};
use serde_json::{json, Value};

pub const USAGE: &str = "quickcalc bmi <weight_kg> <height_cm> | quickcalc convert \"<rule>\" <value> | quickcalc rules";

/// Parsed command line
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Bmi { weight: String, height: String },
    Convert { rule: String, value: String },
    Rules,
}

impl Command {
    /// Parse arguments, excluding the program name
    pub fn parse<I, S>(args: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
            ["bmi", weight, height] => Ok(Command::Bmi {
                weight: weight.to_string(),
                height: height.to_string(),
            }),
            ["convert", rule, value] => Ok(Command::Convert {
                rule: rule.to_string(),
                value: value.to_string(),
            }),
            ["rules"] => Ok(Command::Rules),
            _ => Err(AppError::Usage(USAGE.to_string())),
        }
    }
}

/// Run a command against the session
pub fn run(command: &Command, session: &mut Session) -> Result<Value, AppError> {
    match command {
        Command::Bmi { weight, height } => {
            let weight_kg = parse_number(weight)?;
            let height_cm = parse_number(height)?;
            session.measurement = Measurement::new(session.measurement.age, weight_kg, height_cm);

            let result = session.calculate_bmi()?;
            Ok(json!({
                "value": result.value,
                "category": result.category.label(),
                "range": NORMAL_RANGE_LABEL,
            }))
        }
        Command::Convert { rule, value } => {
            let rule = session.select_rule(rule)?;
            session.set_input(value.as_str());

            let result = session.convert()?;
            Ok(json!({
                "rule": rule.key(),
                "input": result.input,
                "value": result.output,
                "label": result.label,
            }))
        }
        Command::Rules => Ok(json!(list_conversion_rules())),
    }
}
