//! Multiclass extensions: one-versus-all wrappers and native multiclass trainers.

use super::util::{build_ova_pipeline_node, build_pipeline_node, create_options};
use super::{TrainerContext, TrainerExtension, TrainerName};
use crate::columns::ColumnInformation;
use crate::error::ExtensionError;
use crate::estimator::{BinaryTrainerKind, Estimator, OneVersusAll};
use crate::options::{LbfgsOptions, LightGbmMulticlassOptions, SdcaOptions, TrainerOptions};
use crate::pipeline::PipelineNode;
use crate::sweep::{Hyperparams, SweepableParam, builders};
use std::sync::Arc;
use tracing::debug;

/// Turns a binary extension into a multiclass one by wrapping the binary trainer
/// it produces in [`OneVersusAll`].
///
/// The wrapped extension is fixed at construction and only ever read.
#[derive(Debug, Clone)]
pub struct OvaExtension {
    name: TrainerName,
    binary: Arc<dyn TrainerExtension>,
    expected: BinaryTrainerKind,
}

impl OvaExtension {
    pub fn new(
        name: TrainerName,
        binary: Arc<dyn TrainerExtension>,
        expected: BinaryTrainerKind,
    ) -> Self {
        debug!(trainer = %name, binary = %binary.name(), "Constructing one-versus-all extension");
        Self {
            name,
            binary,
            expected,
        }
    }

    /// The binary extension this wrapper delegates to.
    pub fn binary(&self) -> &Arc<dyn TrainerExtension> {
        &self.binary
    }
}

impl TrainerExtension for OvaExtension {
    fn name(&self) -> TrainerName {
        self.name
    }

    fn hyperparam_sweep_ranges(&self) -> Vec<SweepableParam> {
        self.binary.hyperparam_sweep_ranges()
    }

    fn create_instance(
        &self,
        ctx: &TrainerContext,
        params: &Hyperparams,
        columns: &ColumnInformation,
    ) -> Result<Estimator, ExtensionError> {
        let binary = self
            .binary
            .create_instance(ctx, params, columns)?
            .into_binary(self.expected)?;
        Ok(Estimator::OneVersusAll(OneVersusAll {
            binary,
            label_column_name: columns.label_column.clone(),
        }))
    }

    fn create_pipeline_node(
        &self,
        params: &Hyperparams,
        columns: &ColumnInformation,
    ) -> Result<PipelineNode, ExtensionError> {
        build_ova_pipeline_node(self, self.binary.as_ref(), params, columns)
    }

    fn supports_example_weight(&self) -> bool {
        self.binary.supports_example_weight()
    }

    fn wrapped(&self) -> Option<TrainerName> {
        Some(self.binary.name())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LightGbmMultiExtension;

impl TrainerExtension for LightGbmMultiExtension {
    fn name(&self) -> TrainerName {
        TrainerName::LightGbmMulti
    }

    fn hyperparam_sweep_ranges(&self) -> Vec<SweepableParam> {
        builders::light_gbm_multiclass_params()
    }

    fn create_instance(
        &self,
        ctx: &TrainerContext,
        params: &Hyperparams,
        columns: &ColumnInformation,
    ) -> Result<Estimator, ExtensionError> {
        let options: LightGbmMulticlassOptions = create_options(
            self.name(),
            &self.hyperparam_sweep_ranges(),
            ctx,
            params,
            columns,
        )?;
        Ok(Estimator::LightGbmMulticlass(options))
    }

    fn create_pipeline_node(
        &self,
        params: &Hyperparams,
        columns: &ColumnInformation,
    ) -> Result<PipelineNode, ExtensionError> {
        build_pipeline_node(
            self.name(),
            &self.hyperparam_sweep_ranges(),
            params,
            &columns.label_column,
            columns.weight_column(),
        )
    }

    fn supports_example_weight(&self) -> bool {
        LightGbmMulticlassOptions::SUPPORTS_EXAMPLE_WEIGHT
    }
}

/// Native multiclass SDCA. Has no example-weight support, so its node never
/// records a weight column.
#[derive(Debug, Default, Clone, Copy)]
pub struct SdcaMaximumEntropyMultiExtension;

impl TrainerExtension for SdcaMaximumEntropyMultiExtension {
    fn name(&self) -> TrainerName {
        TrainerName::SdcaMaximumEntropyMulti
    }

    fn hyperparam_sweep_ranges(&self) -> Vec<SweepableParam> {
        builders::sdca_params()
    }

    fn create_instance(
        &self,
        ctx: &TrainerContext,
        params: &Hyperparams,
        columns: &ColumnInformation,
    ) -> Result<Estimator, ExtensionError> {
        let options: SdcaOptions = create_options(
            self.name(),
            &self.hyperparam_sweep_ranges(),
            ctx,
            params,
            columns,
        )?;
        Ok(Estimator::SdcaMaximumEntropy(options))
    }

    fn create_pipeline_node(
        &self,
        params: &Hyperparams,
        columns: &ColumnInformation,
    ) -> Result<PipelineNode, ExtensionError> {
        build_pipeline_node(
            self.name(),
            &self.hyperparam_sweep_ranges(),
            params,
            &columns.label_column,
            None,
        )
    }

    fn supports_example_weight(&self) -> bool {
        SdcaOptions::SUPPORTS_EXAMPLE_WEIGHT
    }
}

/// Native multiclass L-BFGS; sweeps the same ranges as logistic regression.
#[derive(Debug, Default, Clone, Copy)]
pub struct LbfgsMaximumEntropyMultiExtension;

impl TrainerExtension for LbfgsMaximumEntropyMultiExtension {
    fn name(&self) -> TrainerName {
        TrainerName::LbfgsMaximumEntropyMulti
    }

    fn hyperparam_sweep_ranges(&self) -> Vec<SweepableParam> {
        builders::lbfgs_logistic_regression_params()
    }

    fn create_instance(
        &self,
        ctx: &TrainerContext,
        params: &Hyperparams,
        columns: &ColumnInformation,
    ) -> Result<Estimator, ExtensionError> {
        let options: LbfgsOptions = create_options(
            self.name(),
            &self.hyperparam_sweep_ranges(),
            ctx,
            params,
            columns,
        )?;
        Ok(Estimator::LbfgsMaximumEntropy(options))
    }

    fn create_pipeline_node(
        &self,
        params: &Hyperparams,
        columns: &ColumnInformation,
    ) -> Result<PipelineNode, ExtensionError> {
        build_pipeline_node(
            self.name(),
            &self.hyperparam_sweep_ranges(),
            params,
            &columns.label_column,
            columns.weight_column(),
        )
    }

    fn supports_example_weight(&self) -> bool {
        LbfgsOptions::SUPPORTS_EXAMPLE_WEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::BinaryEstimator;
    use crate::extension::binary::{FastForestBinaryExtension, FastTreeBinaryExtension};
    use crate::pipeline::NodeProperty;

    fn fast_forest_ova() -> OvaExtension {
        OvaExtension::new(
            TrainerName::FastForestOva,
            Arc::new(FastForestBinaryExtension::new()),
            BinaryTrainerKind::FastForest,
        )
    }

    #[test]
    fn test_ova_wraps_binary_trainer() {
        let ext = fast_forest_ova();
        let params = Hyperparams::new().with("NumberOfTrees", 20i64);
        let est = ext
            .create_instance(&TrainerContext::default(), &params, &ColumnInformation::default())
            .unwrap();
        match est {
            Estimator::OneVersusAll(ova) => {
                assert_eq!(ova.label_column_name, "Label");
                match ova.binary {
                    BinaryEstimator::FastForest(opts) => assert_eq!(opts.number_of_trees, 20),
                    other => panic!("unexpected binary trainer {other:?}"),
                }
            }
            other => panic!("unexpected estimator {other:?}"),
        }
    }

    #[test]
    fn test_ova_rejects_mismatched_delegate() {
        let ext = OvaExtension::new(
            TrainerName::FastForestOva,
            Arc::new(FastTreeBinaryExtension::new()),
            BinaryTrainerKind::FastForest,
        );
        let err = ext
            .create_instance(
                &TrainerContext::default(),
                &Hyperparams::new(),
                &ColumnInformation::default(),
            )
            .unwrap_err();
        assert!(matches!(err, ExtensionError::UnexpectedTrainerType { .. }));
    }

    #[test]
    fn test_ova_node_nests_binary_node() {
        let ext = fast_forest_ova();
        let node = ext
            .create_pipeline_node(&Hyperparams::new(), &ColumnInformation::default())
            .unwrap();
        assert_eq!(node.name, "FastForestOva");
        match node.property("BinaryTrainer") {
            Some(NodeProperty::Node(inner)) => assert_eq!(inner.name, "FastForestBinary"),
            other => panic!("missing binary node: {other:?}"),
        }
    }

    #[test]
    fn test_ova_ranges_match_binary() {
        let ext = fast_forest_ova();
        assert_eq!(
            ext.hyperparam_sweep_ranges(),
            ext.binary().hyperparam_sweep_ranges()
        );
    }

    #[test]
    fn test_wrapped_names_the_binary_trainer() {
        assert_eq!(fast_forest_ova().wrapped(), Some(TrainerName::FastForestBinary));
        assert_eq!(LightGbmMultiExtension.wrapped(), None);
    }

    #[test]
    fn test_sdca_multi_node_never_records_weight() {
        let columns = ColumnInformation::default().weight("Weight");
        let node = SdcaMaximumEntropyMultiExtension
            .create_pipeline_node(&Hyperparams::new(), &columns)
            .unwrap();
        assert!(node.property("ExampleWeightColumnName").is_none());
    }

    #[test]
    fn test_light_gbm_multi_softmax() {
        let params = Hyperparams::new().with("UseSoftmax", true);
        let est = LightGbmMultiExtension
            .create_instance(
                &TrainerContext::default(),
                &params,
                &ColumnInformation::default().weight("Weight"),
            )
            .unwrap();
        match est {
            Estimator::LightGbmMulticlass(opts) => {
                assert_eq!(opts.use_softmax, Some(true));
                assert_eq!(
                    opts.base.columns.example_weight_column_name.as_deref(),
                    Some("Weight")
                );
            }
            other => panic!("unexpected estimator {other:?}"),
        }
    }
}
