//! Trainer extensions: the uniform contract every supported trainer implements.
//!
//! An extension declares the hyperparameters its trainer family can sweep, builds
//! a ready-to-fit [`Estimator`] from a concrete assignment, and describes that same
//! configuration as a [`PipelineNode`]. Multiclass extensions either configure a
//! native multiclass trainer or wrap a binary extension in one-versus-all.

pub mod binary;
pub mod multiclass;
pub mod util;

use crate::columns::ColumnInformation;
use crate::error::ExtensionError;
use crate::estimator::Estimator;
use crate::pipeline::PipelineNode;
use crate::sweep::{Hyperparams, SweepableParam};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use binary::{
    AveragedPerceptronBinaryExtension, FastForestBinaryExtension, FastTreeBinaryExtension,
    LbfgsLogisticRegressionBinaryExtension, LightGbmBinaryExtension, LinearSvmBinaryExtension,
    SdcaLogisticRegressionBinaryExtension, SgdCalibratedBinaryExtension,
    SymbolicSgdLogisticRegressionBinaryExtension,
};
pub use multiclass::{
    LbfgsMaximumEntropyMultiExtension, LightGbmMultiExtension, OvaExtension,
    SdcaMaximumEntropyMultiExtension,
};

/// Learning task a trainer solves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Binary,
    Multiclass,
}

impl FromStr for TaskKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binary" => Ok(Self::Binary),
            "multiclass" => Ok(Self::Multiclass),
            other => Err(format!("unknown task '{other}' (expected binary or multiclass)")),
        }
    }
}

/// Stable identifier of every trainer in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrainerName {
    AveragedPerceptronBinary,
    FastForestBinary,
    FastTreeBinary,
    LightGbmBinary,
    LinearSvmBinary,
    LbfgsLogisticRegressionBinary,
    SdcaLogisticRegressionBinary,
    SgdCalibratedBinary,
    SymbolicSgdLogisticRegressionBinary,
    AveragedPerceptronOva,
    FastForestOva,
    FastTreeOva,
    LightGbmMulti,
    LinearSvmOva,
    LbfgsLogisticRegressionOva,
    LbfgsMaximumEntropyMulti,
    SdcaMaximumEntropyMulti,
    SgdCalibratedOva,
    SymbolicSgdLogisticRegressionOva,
}

impl TrainerName {
    pub const ALL: [TrainerName; 19] = [
        Self::AveragedPerceptronBinary,
        Self::FastForestBinary,
        Self::FastTreeBinary,
        Self::LightGbmBinary,
        Self::LinearSvmBinary,
        Self::LbfgsLogisticRegressionBinary,
        Self::SdcaLogisticRegressionBinary,
        Self::SgdCalibratedBinary,
        Self::SymbolicSgdLogisticRegressionBinary,
        Self::AveragedPerceptronOva,
        Self::FastForestOva,
        Self::FastTreeOva,
        Self::LightGbmMulti,
        Self::LinearSvmOva,
        Self::LbfgsLogisticRegressionOva,
        Self::LbfgsMaximumEntropyMulti,
        Self::SdcaMaximumEntropyMulti,
        Self::SgdCalibratedOva,
        Self::SymbolicSgdLogisticRegressionOva,
    ];

    pub fn task(self) -> TaskKind {
        match self {
            Self::AveragedPerceptronBinary
            | Self::FastForestBinary
            | Self::FastTreeBinary
            | Self::LightGbmBinary
            | Self::LinearSvmBinary
            | Self::LbfgsLogisticRegressionBinary
            | Self::SdcaLogisticRegressionBinary
            | Self::SgdCalibratedBinary
            | Self::SymbolicSgdLogisticRegressionBinary => TaskKind::Binary,
            _ => TaskKind::Multiclass,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AveragedPerceptronBinary => "AveragedPerceptronBinary",
            Self::FastForestBinary => "FastForestBinary",
            Self::FastTreeBinary => "FastTreeBinary",
            Self::LightGbmBinary => "LightGbmBinary",
            Self::LinearSvmBinary => "LinearSvmBinary",
            Self::LbfgsLogisticRegressionBinary => "LbfgsLogisticRegressionBinary",
            Self::SdcaLogisticRegressionBinary => "SdcaLogisticRegressionBinary",
            Self::SgdCalibratedBinary => "SgdCalibratedBinary",
            Self::SymbolicSgdLogisticRegressionBinary => "SymbolicSgdLogisticRegressionBinary",
            Self::AveragedPerceptronOva => "AveragedPerceptronOva",
            Self::FastForestOva => "FastForestOva",
            Self::FastTreeOva => "FastTreeOva",
            Self::LightGbmMulti => "LightGbmMulti",
            Self::LinearSvmOva => "LinearSvmOva",
            Self::LbfgsLogisticRegressionOva => "LbfgsLogisticRegressionOva",
            Self::LbfgsMaximumEntropyMulti => "LbfgsMaximumEntropyMulti",
            Self::SdcaMaximumEntropyMulti => "SdcaMaximumEntropyMulti",
            Self::SgdCalibratedOva => "SgdCalibratedOva",
            Self::SymbolicSgdLogisticRegressionOva => "SymbolicSgdLogisticRegressionOva",
        }
    }
}

impl fmt::Display for TrainerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrainerName {
    type Err = ExtensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|n| n.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ExtensionError::UnknownTrainer {
                name: s.to_string(),
            })
    }
}

/// What to do when a weight column is supplied to an algorithm without weight support.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightColumnPolicy {
    /// Drop the weight column and log a warning.
    #[default]
    Ignore,
    /// Fail with [`ExtensionError::UnsupportedColumnRole`].
    Reject,
}

/// Caller-side settings threaded through every `create_instance` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainerContext {
    pub weight_policy: WeightColumnPolicy,
}

impl TrainerContext {
    pub fn new(weight_policy: WeightColumnPolicy) -> Self {
        Self { weight_policy }
    }
}

/// Contract implemented by every trainer extension.
///
/// Implementations are stateless apart from an optional wrapped binary extension
/// fixed at construction, so they can be shared across threads.
pub trait TrainerExtension: Send + Sync + fmt::Debug {
    /// The catalog name of this extension.
    fn name(&self) -> TrainerName;

    /// Hyperparameters this trainer can sweep, with their legal ranges.
    fn hyperparam_sweep_ranges(&self) -> Vec<SweepableParam>;

    /// Build a ready-to-fit estimator from a concrete assignment.
    fn create_instance(
        &self,
        ctx: &TrainerContext,
        params: &Hyperparams,
        columns: &ColumnInformation,
    ) -> Result<Estimator, ExtensionError>;

    /// Describe the configured step without building the estimator.
    fn create_pipeline_node(
        &self,
        params: &Hyperparams,
        columns: &ColumnInformation,
    ) -> Result<PipelineNode, ExtensionError>;

    /// Whether the trainer consumes a per-example weight column.
    fn supports_example_weight(&self) -> bool;

    /// The binary trainer this extension wraps in one-versus-all, if any.
    fn wrapped(&self) -> Option<TrainerName> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trainer_name_roundtrip() {
        for name in TrainerName::ALL {
            let parsed: TrainerName = name.as_str().parse().unwrap();
            assert_eq!(parsed, name);
        }
        let lower: TrainerName = "fastforestova".parse().unwrap();
        assert_eq!(lower, TrainerName::FastForestOva);
    }

    #[test]
    fn test_unknown_trainer_name() {
        let err = "Perceptron".parse::<TrainerName>().unwrap_err();
        assert!(matches!(err, ExtensionError::UnknownTrainer { .. }));
    }

    #[test]
    fn test_task_split() {
        let binary = TrainerName::ALL
            .iter()
            .filter(|n| n.task() == TaskKind::Binary)
            .count();
        let multi = TrainerName::ALL
            .iter()
            .filter(|n| n.task() == TaskKind::Multiclass)
            .count();
        assert_eq!(binary, 9);
        assert_eq!(multi, 10);
    }

    #[test]
    fn test_task_parse() {
        assert_eq!("Binary".parse::<TaskKind>().unwrap(), TaskKind::Binary);
        assert!("regression".parse::<TaskKind>().is_err());
    }
}
