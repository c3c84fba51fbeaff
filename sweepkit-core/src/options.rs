//! Typed options records for each supported trainer algorithm.
//!
//! An options record is what a trainer constructor consumes. Extensions fill one
//! in by copying every chosen hyperparameter onto the field of the same name and
//! then binding the column roles.

use crate::columns::{DEFAULT_LABEL_COLUMN, FEATURES_COLUMN};
use crate::error::ExtensionError;
use crate::sweep::ParamValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column names an options record is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnBinding {
    pub label_column_name: String,
    pub feature_column_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_weight_column_name: Option<String>,
}

impl Default for ColumnBinding {
    fn default() -> Self {
        Self {
            label_column_name: DEFAULT_LABEL_COLUMN.to_string(),
            feature_column_name: FEATURES_COLUMN.to_string(),
            example_weight_column_name: None,
        }
    }
}

/// Contract between an options record and the generic options builder.
pub trait TrainerOptions:
    Default + Clone + fmt::Debug + PartialEq + Serialize + Send + Sync
{
    /// Whether the algorithm can consume a per-example weight column.
    const SUPPORTS_EXAMPLE_WEIGHT: bool;

    /// Hyperparameter names this record accepts.
    fn hyperparameter_names() -> &'static [&'static str];

    /// Copy one hyperparameter value onto its field.
    fn set_hyperparameter(
        &mut self,
        trainer: &str,
        name: &str,
        value: &ParamValue,
    ) -> Result<(), ExtensionError>;

    fn columns(&self) -> &ColumnBinding;

    fn columns_mut(&mut self) -> &mut ColumnBinding;
}

fn unsupported(trainer: &str, name: &str) -> ExtensionError {
    ExtensionError::UnsupportedHyperparameter {
        trainer: trainer.to_string(),
        name: name.to_string(),
    }
}

fn wrong_type(trainer: &str, name: &str, expected: &str, value: &ParamValue) -> ExtensionError {
    ExtensionError::invalid_value(
        trainer,
        name,
        format!("expected {expected}, got {} {value}", value.kind()),
    )
}

fn float(trainer: &str, name: &str, value: &ParamValue) -> Result<f64, ExtensionError> {
    value
        .as_f64()
        .ok_or_else(|| wrong_type(trainer, name, "a number", value))
}

fn int(trainer: &str, name: &str, value: &ParamValue) -> Result<i64, ExtensionError> {
    value
        .as_i64()
        .ok_or_else(|| wrong_type(trainer, name, "an integer", value))
}

fn boolean(trainer: &str, name: &str, value: &ParamValue) -> Result<bool, ExtensionError> {
    value
        .as_bool()
        .ok_or_else(|| wrong_type(trainer, name, "a bool", value))
}

fn float_or_auto(
    trainer: &str,
    name: &str,
    value: &ParamValue,
) -> Result<Option<f64>, ExtensionError> {
    if value.is_auto() {
        return Ok(None);
    }
    float(trainer, name, value).map(Some)
}

fn int_or_auto(
    trainer: &str,
    name: &str,
    value: &ParamValue,
) -> Result<Option<i64>, ExtensionError> {
    if value.is_auto() {
        return Ok(None);
    }
    int(trainer, name, value).map(Some)
}

/// Loss used by the averaged perceptron.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassificationLoss {
    #[default]
    HingeLoss,
    LogLoss,
    SmoothedHingeLoss,
}

impl FromStr for ClassificationLoss {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HingeLoss" => Ok(Self::HingeLoss),
            "LogLoss" => Ok(Self::LogLoss),
            "SmoothedHingeLoss" => Ok(Self::SmoothedHingeLoss),
            other => Err(format!("unknown loss function '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AveragedPerceptronOptions {
    #[serde(flatten)]
    pub columns: ColumnBinding,
    pub loss_function: ClassificationLoss,
    pub learning_rate: f64,
    pub decrease_learning_rate: bool,
    pub l2_regularization: f64,
    pub number_of_iterations: i64,
}

impl Default for AveragedPerceptronOptions {
    fn default() -> Self {
        Self {
            columns: ColumnBinding::default(),
            loss_function: ClassificationLoss::HingeLoss,
            learning_rate: 1.0,
            decrease_learning_rate: false,
            l2_regularization: 0.0,
            number_of_iterations: 1,
        }
    }
}

impl TrainerOptions for AveragedPerceptronOptions {
    const SUPPORTS_EXAMPLE_WEIGHT: bool = false;

    fn hyperparameter_names() -> &'static [&'static str] {
        &[
            "LossFunction",
            "LearningRate",
            "DecreaseLearningRate",
            "L2Regularization",
            "NumberOfIterations",
        ]
    }

    fn set_hyperparameter(
        &mut self,
        trainer: &str,
        name: &str,
        value: &ParamValue,
    ) -> Result<(), ExtensionError> {
        match name {
            "LossFunction" => {
                let text = value
                    .as_text()
                    .ok_or_else(|| wrong_type(trainer, name, "a loss name", value))?;
                self.loss_function = text.parse().map_err(|reason: String| {
                    ExtensionError::invalid_value(trainer, name, reason)
                })?;
            }
            "LearningRate" => self.learning_rate = float(trainer, name, value)?,
            "DecreaseLearningRate" => self.decrease_learning_rate = boolean(trainer, name, value)?,
            "L2Regularization" => self.l2_regularization = float(trainer, name, value)?,
            "NumberOfIterations" => self.number_of_iterations = int(trainer, name, value)?,
            _ => return Err(unsupported(trainer, name)),
        }
        Ok(())
    }

    fn columns(&self) -> &ColumnBinding {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut ColumnBinding {
        &mut self.columns
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastForestOptions {
    #[serde(flatten)]
    pub columns: ColumnBinding,
    pub number_of_leaves: i64,
    pub minimum_example_count_per_leaf: i64,
    pub number_of_trees: i64,
    pub feature_fraction: f64,
}

impl Default for FastForestOptions {
    fn default() -> Self {
        Self {
            columns: ColumnBinding::default(),
            number_of_leaves: 20,
            minimum_example_count_per_leaf: 10,
            number_of_trees: 100,
            feature_fraction: 0.7,
        }
    }
}

impl TrainerOptions for FastForestOptions {
    const SUPPORTS_EXAMPLE_WEIGHT: bool = true;

    fn hyperparameter_names() -> &'static [&'static str] {
        &[
            "NumberOfLeaves",
            "MinimumExampleCountPerLeaf",
            "NumberOfTrees",
            "FeatureFraction",
        ]
    }

    fn set_hyperparameter(
        &mut self,
        trainer: &str,
        name: &str,
        value: &ParamValue,
    ) -> Result<(), ExtensionError> {
        match name {
            "NumberOfLeaves" => self.number_of_leaves = int(trainer, name, value)?,
            "MinimumExampleCountPerLeaf" => {
                self.minimum_example_count_per_leaf = int(trainer, name, value)?
            }
            "NumberOfTrees" => self.number_of_trees = int(trainer, name, value)?,
            "FeatureFraction" => self.feature_fraction = float(trainer, name, value)?,
            _ => return Err(unsupported(trainer, name)),
        }
        Ok(())
    }

    fn columns(&self) -> &ColumnBinding {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut ColumnBinding {
        &mut self.columns
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastTreeOptions {
    #[serde(flatten)]
    pub columns: ColumnBinding,
    pub number_of_leaves: i64,
    pub minimum_example_count_per_leaf: i64,
    pub number_of_trees: i64,
    pub learning_rate: f64,
    pub shrinkage: f64,
}

impl Default for FastTreeOptions {
    fn default() -> Self {
        Self {
            columns: ColumnBinding::default(),
            number_of_leaves: 20,
            minimum_example_count_per_leaf: 10,
            number_of_trees: 100,
            learning_rate: 0.2,
            shrinkage: 1.0,
        }
    }
}

impl TrainerOptions for FastTreeOptions {
    const SUPPORTS_EXAMPLE_WEIGHT: bool = true;

    fn hyperparameter_names() -> &'static [&'static str] {
        &[
            "NumberOfLeaves",
            "MinimumExampleCountPerLeaf",
            "NumberOfTrees",
            "LearningRate",
            "Shrinkage",
        ]
    }

    fn set_hyperparameter(
        &mut self,
        trainer: &str,
        name: &str,
        value: &ParamValue,
    ) -> Result<(), ExtensionError> {
        match name {
            "NumberOfLeaves" => self.number_of_leaves = int(trainer, name, value)?,
            "MinimumExampleCountPerLeaf" => {
                self.minimum_example_count_per_leaf = int(trainer, name, value)?
            }
            "NumberOfTrees" => self.number_of_trees = int(trainer, name, value)?,
            "LearningRate" => self.learning_rate = float(trainer, name, value)?,
            "Shrinkage" => self.shrinkage = float(trainer, name, value)?,
            _ => return Err(unsupported(trainer, name)),
        }
        Ok(())
    }

    fn columns(&self) -> &ColumnBinding {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut ColumnBinding {
        &mut self.columns
    }
}

/// Gradient-boosting settings shared by the binary and multiclass LightGBM trainers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightGbmOptions {
    #[serde(flatten)]
    pub columns: ColumnBinding,
    pub number_of_iterations: i64,
    pub learning_rate: Option<f64>,
    pub number_of_leaves: Option<i64>,
    pub minimum_example_count_per_leaf: Option<i64>,
    pub use_categorical_split: Option<bool>,
    pub handle_missing_value: bool,
    pub minimum_example_count_per_group: i64,
    pub maximum_categorical_split_point_count: i64,
    pub categorical_smoothing: f64,
    pub l2_categorical_regularization: f64,
    pub booster: BoosterOptions,
}

/// Regularization applied by the gradient booster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoosterOptions {
    pub l1_regularization: f64,
    pub l2_regularization: f64,
}

impl Default for LightGbmOptions {
    fn default() -> Self {
        Self {
            columns: ColumnBinding::default(),
            number_of_iterations: 100,
            learning_rate: None,
            number_of_leaves: None,
            minimum_example_count_per_leaf: None,
            use_categorical_split: None,
            handle_missing_value: true,
            minimum_example_count_per_group: 100,
            maximum_categorical_split_point_count: 32,
            categorical_smoothing: 10.0,
            l2_categorical_regularization: 10.0,
            booster: BoosterOptions::default(),
        }
    }
}

impl TrainerOptions for LightGbmOptions {
    const SUPPORTS_EXAMPLE_WEIGHT: bool = true;

    fn hyperparameter_names() -> &'static [&'static str] {
        &[
            "NumberOfIterations",
            "LearningRate",
            "NumberOfLeaves",
            "MinimumExampleCountPerLeaf",
            "UseCategoricalSplit",
            "HandleMissingValue",
            "MinimumExampleCountPerGroup",
            "MaximumCategoricalSplitPointCount",
            "CategoricalSmoothing",
            "L2CategoricalRegularization",
            "L1Regularization",
            "L2Regularization",
        ]
    }

    fn set_hyperparameter(
        &mut self,
        trainer: &str,
        name: &str,
        value: &ParamValue,
    ) -> Result<(), ExtensionError> {
        match name {
            "NumberOfIterations" => self.number_of_iterations = int(trainer, name, value)?,
            "LearningRate" => self.learning_rate = Some(float(trainer, name, value)?),
            "NumberOfLeaves" => self.number_of_leaves = Some(int(trainer, name, value)?),
            "MinimumExampleCountPerLeaf" => {
                self.minimum_example_count_per_leaf = Some(int(trainer, name, value)?)
            }
            "UseCategoricalSplit" => {
                self.use_categorical_split = Some(boolean(trainer, name, value)?)
            }
            "HandleMissingValue" => self.handle_missing_value = boolean(trainer, name, value)?,
            "MinimumExampleCountPerGroup" => {
                self.minimum_example_count_per_group = int(trainer, name, value)?
            }
            "MaximumCategoricalSplitPointCount" => {
                self.maximum_categorical_split_point_count = int(trainer, name, value)?
            }
            "CategoricalSmoothing" => self.categorical_smoothing = float(trainer, name, value)?,
            "L2CategoricalRegularization" => {
                self.l2_categorical_regularization = float(trainer, name, value)?
            }
            "L1Regularization" => self.booster.l1_regularization = float(trainer, name, value)?,
            "L2Regularization" => self.booster.l2_regularization = float(trainer, name, value)?,
            _ => return Err(unsupported(trainer, name)),
        }
        Ok(())
    }

    fn columns(&self) -> &ColumnBinding {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut ColumnBinding {
        &mut self.columns
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LightGbmMulticlassOptions {
    #[serde(flatten)]
    pub base: LightGbmOptions,
    pub use_softmax: Option<bool>,
}

impl TrainerOptions for LightGbmMulticlassOptions {
    const SUPPORTS_EXAMPLE_WEIGHT: bool = true;

    fn hyperparameter_names() -> &'static [&'static str] {
        &[
            "NumberOfIterations",
            "LearningRate",
            "NumberOfLeaves",
            "MinimumExampleCountPerLeaf",
            "UseCategoricalSplit",
            "HandleMissingValue",
            "MinimumExampleCountPerGroup",
            "MaximumCategoricalSplitPointCount",
            "CategoricalSmoothing",
            "L2CategoricalRegularization",
            "L1Regularization",
            "L2Regularization",
            "UseSoftmax",
        ]
    }

    fn set_hyperparameter(
        &mut self,
        trainer: &str,
        name: &str,
        value: &ParamValue,
    ) -> Result<(), ExtensionError> {
        if name == "UseSoftmax" {
            self.use_softmax = Some(boolean(trainer, name, value)?);
            return Ok(());
        }
        self.base.set_hyperparameter(trainer, name, value)
    }

    fn columns(&self) -> &ColumnBinding {
        &self.base.columns
    }

    fn columns_mut(&mut self) -> &mut ColumnBinding {
        &mut self.base.columns
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearSvmOptions {
    #[serde(flatten)]
    pub columns: ColumnBinding,
    pub lambda: f64,
    pub perform_projection: bool,
    pub no_bias: bool,
    pub number_of_iterations: i64,
}

impl Default for LinearSvmOptions {
    fn default() -> Self {
        Self {
            columns: ColumnBinding::default(),
            lambda: 0.001,
            perform_projection: false,
            no_bias: false,
            number_of_iterations: 1,
        }
    }
}

impl TrainerOptions for LinearSvmOptions {
    const SUPPORTS_EXAMPLE_WEIGHT: bool = false;

    fn hyperparameter_names() -> &'static [&'static str] {
        &["Lambda", "PerformProjection", "NoBias", "NumberOfIterations"]
    }

    fn set_hyperparameter(
        &mut self,
        trainer: &str,
        name: &str,
        value: &ParamValue,
    ) -> Result<(), ExtensionError> {
        match name {
            "Lambda" => self.lambda = float(trainer, name, value)?,
            "PerformProjection" => self.perform_projection = boolean(trainer, name, value)?,
            "NoBias" => self.no_bias = boolean(trainer, name, value)?,
            "NumberOfIterations" => self.number_of_iterations = int(trainer, name, value)?,
            _ => return Err(unsupported(trainer, name)),
        }
        Ok(())
    }

    fn columns(&self) -> &ColumnBinding {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut ColumnBinding {
        &mut self.columns
    }
}

/// L-BFGS settings shared by logistic regression and maximum entropy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LbfgsOptions {
    #[serde(flatten)]
    pub columns: ColumnBinding,
    pub optimization_tolerance: f64,
    pub history_size: i64,
    pub l1_regularization: f64,
    pub l2_regularization: f64,
}

impl Default for LbfgsOptions {
    fn default() -> Self {
        Self {
            columns: ColumnBinding::default(),
            optimization_tolerance: 1e-7,
            history_size: 20,
            l1_regularization: 1.0,
            l2_regularization: 1.0,
        }
    }
}

impl TrainerOptions for LbfgsOptions {
    const SUPPORTS_EXAMPLE_WEIGHT: bool = true;

    fn hyperparameter_names() -> &'static [&'static str] {
        &[
            "OptimizationTolerance",
            "HistorySize",
            "L1Regularization",
            "L2Regularization",
        ]
    }

    fn set_hyperparameter(
        &mut self,
        trainer: &str,
        name: &str,
        value: &ParamValue,
    ) -> Result<(), ExtensionError> {
        match name {
            "OptimizationTolerance" => self.optimization_tolerance = float(trainer, name, value)?,
            "HistorySize" => self.history_size = int(trainer, name, value)?,
            "L1Regularization" => self.l1_regularization = float(trainer, name, value)?,
            "L2Regularization" => self.l2_regularization = float(trainer, name, value)?,
            _ => return Err(unsupported(trainer, name)),
        }
        Ok(())
    }

    fn columns(&self) -> &ColumnBinding {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut ColumnBinding {
        &mut self.columns
    }
}

/// Stochastic dual coordinate ascent settings. `None` fields keep the
/// trainer's data-dependent defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdcaOptions {
    #[serde(flatten)]
    pub columns: ColumnBinding,
    pub l2_regularization: Option<f64>,
    pub l1_regularization: Option<f64>,
    pub convergence_tolerance: f64,
    pub maximum_number_of_iterations: Option<i64>,
    pub shuffle: bool,
    pub bias_learning_rate: f64,
}

impl Default for SdcaOptions {
    fn default() -> Self {
        Self {
            columns: ColumnBinding::default(),
            l2_regularization: None,
            l1_regularization: None,
            convergence_tolerance: 0.1,
            maximum_number_of_iterations: None,
            shuffle: true,
            bias_learning_rate: 0.0,
        }
    }
}

impl TrainerOptions for SdcaOptions {
    const SUPPORTS_EXAMPLE_WEIGHT: bool = false;

    fn hyperparameter_names() -> &'static [&'static str] {
        &[
            "L2Regularization",
            "L1Regularization",
            "ConvergenceTolerance",
            "MaximumNumberOfIterations",
            "Shuffle",
            "BiasLearningRate",
        ]
    }

    fn set_hyperparameter(
        &mut self,
        trainer: &str,
        name: &str,
        value: &ParamValue,
    ) -> Result<(), ExtensionError> {
        match name {
            "L2Regularization" => self.l2_regularization = float_or_auto(trainer, name, value)?,
            "L1Regularization" => self.l1_regularization = float_or_auto(trainer, name, value)?,
            "ConvergenceTolerance" => self.convergence_tolerance = float(trainer, name, value)?,
            "MaximumNumberOfIterations" => {
                self.maximum_number_of_iterations = int_or_auto(trainer, name, value)?
            }
            "Shuffle" => self.shuffle = boolean(trainer, name, value)?,
            "BiasLearningRate" => self.bias_learning_rate = float(trainer, name, value)?,
            _ => return Err(unsupported(trainer, name)),
        }
        Ok(())
    }

    fn columns(&self) -> &ColumnBinding {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut ColumnBinding {
        &mut self.columns
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SgdCalibratedOptions {
    #[serde(flatten)]
    pub columns: ColumnBinding,
    pub l2_regularization: f64,
    pub convergence_tolerance: f64,
    pub number_of_iterations: i64,
    pub shuffle: bool,
}

impl Default for SgdCalibratedOptions {
    fn default() -> Self {
        Self {
            columns: ColumnBinding::default(),
            l2_regularization: 1e-6,
            convergence_tolerance: 1e-4,
            number_of_iterations: 20,
            shuffle: true,
        }
    }
}

impl TrainerOptions for SgdCalibratedOptions {
    const SUPPORTS_EXAMPLE_WEIGHT: bool = true;

    fn hyperparameter_names() -> &'static [&'static str] {
        &[
            "L2Regularization",
            "ConvergenceTolerance",
            "NumberOfIterations",
            "Shuffle",
        ]
    }

    fn set_hyperparameter(
        &mut self,
        trainer: &str,
        name: &str,
        value: &ParamValue,
    ) -> Result<(), ExtensionError> {
        match name {
            "L2Regularization" => self.l2_regularization = float(trainer, name, value)?,
            "ConvergenceTolerance" => self.convergence_tolerance = float(trainer, name, value)?,
            "NumberOfIterations" => self.number_of_iterations = int(trainer, name, value)?,
            "Shuffle" => self.shuffle = boolean(trainer, name, value)?,
            _ => return Err(unsupported(trainer, name)),
        }
        Ok(())
    }

    fn columns(&self) -> &ColumnBinding {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut ColumnBinding {
        &mut self.columns
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolicSgdOptions {
    #[serde(flatten)]
    pub columns: ColumnBinding,
    pub number_of_iterations: i64,
    pub learning_rate: Option<f64>,
    pub l2_regularization: f64,
    pub update_frequency: Option<i64>,
}

impl Default for SymbolicSgdOptions {
    fn default() -> Self {
        Self {
            columns: ColumnBinding::default(),
            number_of_iterations: 50,
            learning_rate: None,
            l2_regularization: 0.0,
            update_frequency: None,
        }
    }
}

impl TrainerOptions for SymbolicSgdOptions {
    const SUPPORTS_EXAMPLE_WEIGHT: bool = false;

    fn hyperparameter_names() -> &'static [&'static str] {
        &[
            "NumberOfIterations",
            "LearningRate",
            "L2Regularization",
            "UpdateFrequency",
        ]
    }

    fn set_hyperparameter(
        &mut self,
        trainer: &str,
        name: &str,
        value: &ParamValue,
    ) -> Result<(), ExtensionError> {
        match name {
            "NumberOfIterations" => self.number_of_iterations = int(trainer, name, value)?,
            "LearningRate" => self.learning_rate = float_or_auto(trainer, name, value)?,
            "L2Regularization" => self.l2_regularization = float(trainer, name, value)?,
            "UpdateFrequency" => self.update_frequency = int_or_auto(trainer, name, value)?,
            _ => return Err(unsupported(trainer, name)),
        }
        Ok(())
    }

    fn columns(&self) -> &ColumnBinding {
        &self.columns
    }

    fn columns_mut(&mut self) -> &mut ColumnBinding {
        &mut self.columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_averaged_perceptron_loss_parsing() {
        let mut opts = AveragedPerceptronOptions::default();
        let trainer = "AveragedPerceptronBinary";
        opts.set_hyperparameter(trainer, "LossFunction", &"LogLoss".into())
            .unwrap();
        assert_eq!(opts.loss_function, ClassificationLoss::LogLoss);

        let err = opts
            .set_hyperparameter(trainer, "LossFunction", &"Squared".into())
            .unwrap_err();
        assert!(err.to_string().contains("unknown loss function"));
    }

    #[test]
    fn test_sdca_auto_maps_to_none() {
        let mut opts = SdcaOptions {
            l2_regularization: Some(1e-3),
            ..SdcaOptions::default()
        };
        let trainer = "SdcaLogisticRegressionBinary";
        opts.set_hyperparameter(trainer, "L2Regularization", &ParamValue::Auto)
            .unwrap();
        assert_eq!(opts.l2_regularization, None);
        opts.set_hyperparameter(trainer, "MaximumNumberOfIterations", &ParamValue::Int(20))
            .unwrap();
        assert_eq!(opts.maximum_number_of_iterations, Some(20));
    }

    #[test]
    fn test_unknown_field_is_unsupported() {
        let mut opts = LinearSvmOptions::default();
        let err = opts
            .set_hyperparameter("LinearSvmBinary", "Shrinkage", &ParamValue::Float(1.0))
            .unwrap_err();
        assert!(matches!(err, ExtensionError::UnsupportedHyperparameter { .. }));
    }

    #[test]
    fn test_wrong_type_is_invalid() {
        let mut opts = FastTreeOptions::default();
        let err = opts
            .set_hyperparameter("FastTreeBinary", "NumberOfTrees", &ParamValue::Bool(true))
            .unwrap_err();
        assert!(matches!(err, ExtensionError::InvalidHyperparameter { .. }));
        assert!(err.to_string().contains("expected an integer"));
    }

    #[test]
    fn test_light_gbm_multiclass_delegates_to_base() {
        let mut opts = LightGbmMulticlassOptions::default();
        opts.set_hyperparameter("LightGbmMulti", "UseSoftmax", &ParamValue::Bool(true))
            .unwrap();
        opts.set_hyperparameter("LightGbmMulti", "L1Regularization", &ParamValue::Float(0.5))
            .unwrap();
        assert_eq!(opts.use_softmax, Some(true));
        assert_eq!(opts.base.booster.l1_regularization, 0.5);
        assert_eq!(opts.columns().feature_column_name, "Features");
    }

    #[test]
    fn test_options_serialize_flat_columns() {
        let opts = LbfgsOptions::default();
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json["label_column_name"], "Label");
        assert!(json.get("example_weight_column_name").is_none());
    }
}
