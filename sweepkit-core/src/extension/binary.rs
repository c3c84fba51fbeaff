//! Binary classification extensions (9 trainers).

use super::util::{build_pipeline_node, create_options};
use super::{TrainerContext, TrainerExtension, TrainerName};
use crate::columns::ColumnInformation;
use crate::error::ExtensionError;
use crate::estimator::{BinaryEstimator, Estimator};
use crate::options::{
    AveragedPerceptronOptions, FastForestOptions, FastTreeOptions, LbfgsOptions,
    LightGbmOptions, LinearSvmOptions, SdcaOptions, SgdCalibratedOptions, SymbolicSgdOptions,
    TrainerOptions,
};
use crate::pipeline::PipelineNode;
use crate::sweep::{Hyperparams, SweepableParam, builders};

macro_rules! binary_extension {
    ($name:ident, $trainer:expr, $options:ty, $variant:path, $ranges:path) => {
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $name;

        impl $name {
            pub fn new() -> Self {
                Self
            }
        }

        impl TrainerExtension for $name {
            fn name(&self) -> TrainerName {
                $trainer
            }

            fn hyperparam_sweep_ranges(&self) -> Vec<SweepableParam> {
                $ranges()
            }

            fn create_instance(
                &self,
                ctx: &TrainerContext,
                params: &Hyperparams,
                columns: &ColumnInformation,
            ) -> Result<Estimator, ExtensionError> {
                let options: $options =
                    create_options($trainer, &$ranges(), ctx, params, columns)?;
                Ok(Estimator::Binary($variant(options)))
            }

            fn create_pipeline_node(
                &self,
                params: &Hyperparams,
                columns: &ColumnInformation,
            ) -> Result<PipelineNode, ExtensionError> {
                let weight = columns
                    .weight_column()
                    .filter(|_| <$options as TrainerOptions>::SUPPORTS_EXAMPLE_WEIGHT);
                build_pipeline_node(
                    $trainer,
                    &$ranges(),
                    params,
                    &columns.label_column,
                    weight,
                )
            }

            fn supports_example_weight(&self) -> bool {
                <$options as TrainerOptions>::SUPPORTS_EXAMPLE_WEIGHT
            }
        }
    };
}

binary_extension!(
    AveragedPerceptronBinaryExtension,
    TrainerName::AveragedPerceptronBinary,
    AveragedPerceptronOptions,
    BinaryEstimator::AveragedPerceptron,
    builders::averaged_perceptron_params
);

binary_extension!(
    FastForestBinaryExtension,
    TrainerName::FastForestBinary,
    FastForestOptions,
    BinaryEstimator::FastForest,
    builders::fast_forest_params
);

binary_extension!(
    FastTreeBinaryExtension,
    TrainerName::FastTreeBinary,
    FastTreeOptions,
    BinaryEstimator::FastTree,
    builders::fast_tree_params
);

binary_extension!(
    LightGbmBinaryExtension,
    TrainerName::LightGbmBinary,
    LightGbmOptions,
    BinaryEstimator::LightGbm,
    builders::light_gbm_params
);

binary_extension!(
    LinearSvmBinaryExtension,
    TrainerName::LinearSvmBinary,
    LinearSvmOptions,
    BinaryEstimator::LinearSvm,
    builders::linear_svm_params
);

binary_extension!(
    LbfgsLogisticRegressionBinaryExtension,
    TrainerName::LbfgsLogisticRegressionBinary,
    LbfgsOptions,
    BinaryEstimator::LbfgsLogisticRegression,
    builders::lbfgs_logistic_regression_params
);

binary_extension!(
    SdcaLogisticRegressionBinaryExtension,
    TrainerName::SdcaLogisticRegressionBinary,
    SdcaOptions,
    BinaryEstimator::SdcaLogisticRegression,
    builders::sdca_params
);

binary_extension!(
    SgdCalibratedBinaryExtension,
    TrainerName::SgdCalibratedBinary,
    SgdCalibratedOptions,
    BinaryEstimator::SgdCalibrated,
    builders::sgd_params
);

binary_extension!(
    SymbolicSgdLogisticRegressionBinaryExtension,
    TrainerName::SymbolicSgdLogisticRegressionBinary,
    SymbolicSgdOptions,
    BinaryEstimator::SymbolicSgdLogisticRegression,
    builders::symbolic_sgd_params
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::ParamValue;

    #[test]
    fn test_fast_tree_instance() {
        let ext = FastTreeBinaryExtension::new();
        let params = Hyperparams::new()
            .with("NumberOfLeaves", 32i64)
            .with("LearningRate", 0.1)
            .with("Shrinkage", 2.0);
        let est = ext
            .create_instance(&TrainerContext::default(), &params, &ColumnInformation::default())
            .unwrap();
        match est {
            Estimator::Binary(BinaryEstimator::FastTree(opts)) => {
                assert_eq!(opts.number_of_leaves, 32);
                assert_eq!(opts.learning_rate, 0.1);
                assert_eq!(opts.shrinkage, 2.0);
                assert_eq!(opts.number_of_trees, 100);
            }
            other => panic!("unexpected estimator {other:?}"),
        }
    }

    #[test]
    fn test_symbolic_sgd_node_omits_weight() {
        let ext = SymbolicSgdLogisticRegressionBinaryExtension::new();
        let columns = ColumnInformation::default().weight("Weight");
        let params = Hyperparams::new().with("LearningRate", ParamValue::Auto);
        let node = ext.create_pipeline_node(&params, &columns).unwrap();
        assert_eq!(node.name, "SymbolicSgdLogisticRegressionBinary");
        assert!(node.property("ExampleWeightColumnName").is_none());
        assert!(!ext.supports_example_weight());
    }

    #[test]
    fn test_lbfgs_node_records_weight() {
        let ext = LbfgsLogisticRegressionBinaryExtension::new();
        let columns = ColumnInformation::default().weight("Weight");
        let node = ext
            .create_pipeline_node(&Hyperparams::new().with("HistorySize", 50i64), &columns)
            .unwrap();
        assert!(node.property("ExampleWeightColumnName").is_some());
        assert!(node.property("HistorySize").is_some());
    }

    #[test]
    fn test_out_of_range_value_rejected() {
        let ext = LinearSvmBinaryExtension::new();
        let params = Hyperparams::new().with("NumberOfIterations", 1000i64);
        let err = ext
            .create_instance(&TrainerContext::default(), &params, &ColumnInformation::default())
            .unwrap_err();
        assert!(matches!(err, ExtensionError::InvalidHyperparameter { .. }));
    }
}
