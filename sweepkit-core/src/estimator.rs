//! Configured, not yet fitted trainers produced by extensions.

use crate::error::ExtensionError;
use crate::options::{
    AveragedPerceptronOptions, FastForestOptions, FastTreeOptions, LbfgsOptions,
    LightGbmMulticlassOptions, LightGbmOptions, LinearSvmOptions, SdcaOptions,
    SgdCalibratedOptions, SymbolicSgdOptions,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Algorithm of a binary trainer, used to check delegation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryTrainerKind {
    AveragedPerceptron,
    FastForest,
    FastTree,
    LightGbm,
    LinearSvm,
    LbfgsLogisticRegression,
    SdcaLogisticRegression,
    SgdCalibrated,
    SymbolicSgdLogisticRegression,
}

impl fmt::Display for BinaryTrainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A binary classification trainer with its options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", content = "options")]
pub enum BinaryEstimator {
    AveragedPerceptron(AveragedPerceptronOptions),
    FastForest(FastForestOptions),
    FastTree(FastTreeOptions),
    LightGbm(LightGbmOptions),
    LinearSvm(LinearSvmOptions),
    LbfgsLogisticRegression(LbfgsOptions),
    SdcaLogisticRegression(SdcaOptions),
    SgdCalibrated(SgdCalibratedOptions),
    SymbolicSgdLogisticRegression(SymbolicSgdOptions),
}

impl BinaryEstimator {
    pub fn kind(&self) -> BinaryTrainerKind {
        match self {
            Self::AveragedPerceptron(_) => BinaryTrainerKind::AveragedPerceptron,
            Self::FastForest(_) => BinaryTrainerKind::FastForest,
            Self::FastTree(_) => BinaryTrainerKind::FastTree,
            Self::LightGbm(_) => BinaryTrainerKind::LightGbm,
            Self::LinearSvm(_) => BinaryTrainerKind::LinearSvm,
            Self::LbfgsLogisticRegression(_) => BinaryTrainerKind::LbfgsLogisticRegression,
            Self::SdcaLogisticRegression(_) => BinaryTrainerKind::SdcaLogisticRegression,
            Self::SgdCalibrated(_) => BinaryTrainerKind::SgdCalibrated,
            Self::SymbolicSgdLogisticRegression(_) => {
                BinaryTrainerKind::SymbolicSgdLogisticRegression
            }
        }
    }
}

/// One-versus-all composite: one copy of `binary` is fitted per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneVersusAll {
    pub binary: BinaryEstimator,
    pub label_column_name: String,
}

/// Any estimator an extension can produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    Binary(BinaryEstimator),
    OneVersusAll(OneVersusAll),
    LightGbmMulticlass(LightGbmMulticlassOptions),
    SdcaMaximumEntropy(SdcaOptions),
    LbfgsMaximumEntropy(LbfgsOptions),
}

impl Estimator {
    /// Short description of the concrete trainer type, used in error messages.
    pub fn type_name(&self) -> String {
        match self {
            Self::Binary(b) => b.kind().to_string(),
            Self::OneVersusAll(ova) => format!("OneVersusAll<{}>", ova.binary.kind()),
            Self::LightGbmMulticlass(_) => "LightGbmMulticlass".to_string(),
            Self::SdcaMaximumEntropy(_) => "SdcaMaximumEntropy".to_string(),
            Self::LbfgsMaximumEntropy(_) => "LbfgsMaximumEntropy".to_string(),
        }
    }

    /// Unwrap a binary trainer of the expected algorithm.
    pub fn into_binary(
        self,
        expected: BinaryTrainerKind,
    ) -> Result<BinaryEstimator, ExtensionError> {
        match self {
            Self::Binary(binary) if binary.kind() == expected => Ok(binary),
            other => Err(ExtensionError::UnexpectedTrainerType {
                expected: expected.to_string(),
                actual: other.type_name(),
            }),
        }
    }

    pub fn is_multiclass(&self) -> bool {
        !matches!(self, Self::Binary(_))
    }
}
