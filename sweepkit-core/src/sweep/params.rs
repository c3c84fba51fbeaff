//! Declared hyperparameter ranges.

use super::value::{Hyperparams, ParamValue};
use crate::error::ExtensionError;
use serde::{Deserialize, Serialize};

/// Legal values of one tunable hyperparameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParamDomain {
    /// A fixed set of choices.
    Discrete { options: Vec<ParamValue> },
    /// A continuous interval, inclusive on both ends.
    Float { min: f64, max: f64, log_scale: bool },
    /// An integer interval, inclusive on both ends.
    Long {
        min: i64,
        max: i64,
        log_scale: bool,
        step_size: Option<f64>,
    },
}

/// A named hyperparameter together with its legal range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepableParam {
    pub name: String,
    pub domain: ParamDomain,
}

impl SweepableParam {
    pub fn discrete(name: &str, options: Vec<ParamValue>) -> Self {
        Self {
            name: name.to_string(),
            domain: ParamDomain::Discrete { options },
        }
    }

    pub fn float(name: &str, min: f64, max: f64, log_scale: bool) -> Self {
        Self {
            name: name.to_string(),
            domain: ParamDomain::Float {
                min,
                max,
                log_scale,
            },
        }
    }

    pub fn long(name: &str, min: i64, max: i64, log_scale: bool, step_size: Option<f64>) -> Self {
        Self {
            name: name.to_string(),
            domain: ParamDomain::Long {
                min,
                max,
                log_scale,
                step_size,
            },
        }
    }

    /// Whether `value` is a legal assignment for this parameter.
    pub fn contains(&self, value: &ParamValue) -> bool {
        match &self.domain {
            ParamDomain::Discrete { options } => options.iter().any(|o| o.matches(value)),
            ParamDomain::Float { min, max, .. } => value
                .as_f64()
                .is_some_and(|v| v >= *min && v <= *max),
            ParamDomain::Long { min, max, .. } => {
                matches!(value, ParamValue::Int(_) | ParamValue::Float(_))
                    && value.as_i64().is_some_and(|v| v >= *min && v <= *max)
            }
        }
    }

    /// A representative legal value: the first discrete option, or the lower bound.
    pub fn default_value(&self) -> ParamValue {
        match &self.domain {
            ParamDomain::Discrete { options } => {
                options.first().cloned().unwrap_or(ParamValue::Auto)
            }
            ParamDomain::Float { min, .. } => ParamValue::Float(*min),
            ParamDomain::Long { min, .. } => ParamValue::Int(*min),
        }
    }

    fn describe(&self) -> String {
        match &self.domain {
            ParamDomain::Discrete { options } => {
                let opts: Vec<String> = options.iter().map(ToString::to_string).collect();
                format!("one of [{}]", opts.join(", "))
            }
            ParamDomain::Float { min, max, .. } => format!("a number in [{min}, {max}]"),
            ParamDomain::Long { min, max, .. } => format!("an integer in [{min}, {max}]"),
        }
    }
}

/// Check an assignment against declared ranges.
///
/// Every supplied name must be declared and every value must lie in its domain.
/// Names that are declared but not supplied keep the trainer's defaults.
pub fn validate_assignment(
    trainer: &str,
    ranges: &[SweepableParam],
    params: &Hyperparams,
) -> Result<(), ExtensionError> {
    for (name, value) in params.iter() {
        let declared = ranges.iter().find(|p| p.name == name).ok_or_else(|| {
            ExtensionError::UnknownHyperparameter {
                trainer: trainer.to_string(),
                name: name.to_string(),
            }
        })?;
        if !declared.contains(value) {
            return Err(ExtensionError::invalid_value(
                trainer,
                name,
                format!("{value} is not {}", declared.describe()),
            ));
        }
    }
    Ok(())
}
