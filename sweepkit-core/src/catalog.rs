//! Trainer catalog: registration, lookup and enumeration of trainer extensions.
//!
//! The default catalog registers every binary extension once and hands the same
//! shared instance to the one-versus-all extension that wraps it.

use crate::config::CatalogConfig;
use crate::error::ExtensionError;
use crate::estimator::{BinaryTrainerKind, Estimator};
use crate::extension::{
    AveragedPerceptronBinaryExtension, FastForestBinaryExtension, FastTreeBinaryExtension,
    LbfgsLogisticRegressionBinaryExtension, LbfgsMaximumEntropyMultiExtension,
    LightGbmBinaryExtension, LightGbmMultiExtension, LinearSvmBinaryExtension, OvaExtension,
    SdcaLogisticRegressionBinaryExtension, SdcaMaximumEntropyMultiExtension,
    SgdCalibratedBinaryExtension, SymbolicSgdLogisticRegressionBinaryExtension, TaskKind,
    TrainerContext, TrainerExtension, TrainerName,
};
use crate::pipeline::PipelineNode;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// One-versus-all wrappers in the default catalog: (OVA name, binary name, expected kind).
const OVA_FAMILIES: [(TrainerName, TrainerName, BinaryTrainerKind); 7] = [
    (
        TrainerName::AveragedPerceptronOva,
        TrainerName::AveragedPerceptronBinary,
        BinaryTrainerKind::AveragedPerceptron,
    ),
    (
        TrainerName::FastForestOva,
        TrainerName::FastForestBinary,
        BinaryTrainerKind::FastForest,
    ),
    (
        TrainerName::LinearSvmOva,
        TrainerName::LinearSvmBinary,
        BinaryTrainerKind::LinearSvm,
    ),
    (
        TrainerName::LbfgsLogisticRegressionOva,
        TrainerName::LbfgsLogisticRegressionBinary,
        BinaryTrainerKind::LbfgsLogisticRegression,
    ),
    (
        TrainerName::SgdCalibratedOva,
        TrainerName::SgdCalibratedBinary,
        BinaryTrainerKind::SgdCalibrated,
    ),
    (
        TrainerName::SymbolicSgdLogisticRegressionOva,
        TrainerName::SymbolicSgdLogisticRegressionBinary,
        BinaryTrainerKind::SymbolicSgdLogisticRegression,
    ),
    (
        TrainerName::FastTreeOva,
        TrainerName::FastTreeBinary,
        BinaryTrainerKind::FastTree,
    ),
];

/// The catalog holds every registered extension keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TrainerCatalog {
    extensions: BTreeMap<TrainerName, Arc<dyn TrainerExtension>>,
}

impl TrainerCatalog {
    pub fn new() -> Self {
        Self {
            extensions: BTreeMap::new(),
        }
    }

    /// Catalog with all built-in binary and multiclass extensions.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        let binaries: Vec<Arc<dyn TrainerExtension>> = vec![
            Arc::new(AveragedPerceptronBinaryExtension::new()),
            Arc::new(FastForestBinaryExtension::new()),
            Arc::new(FastTreeBinaryExtension::new()),
            Arc::new(LightGbmBinaryExtension::new()),
            Arc::new(LinearSvmBinaryExtension::new()),
            Arc::new(LbfgsLogisticRegressionBinaryExtension::new()),
            Arc::new(SdcaLogisticRegressionBinaryExtension::new()),
            Arc::new(SgdCalibratedBinaryExtension::new()),
            Arc::new(SymbolicSgdLogisticRegressionBinaryExtension::new()),
        ];
        for ext in binaries {
            catalog.insert(ext);
        }

        for (ova, binary, expected) in OVA_FAMILIES {
            if let Some(inner) = catalog.extensions.get(&binary).cloned() {
                catalog.insert(Arc::new(OvaExtension::new(ova, inner, expected)));
            }
        }

        catalog.insert(Arc::new(LightGbmMultiExtension));
        catalog.insert(Arc::new(SdcaMaximumEntropyMultiExtension));
        catalog.insert(Arc::new(LbfgsMaximumEntropyMultiExtension));

        info!(trainers = catalog.len(), "Trainer catalog initialized");
        catalog
    }

    fn insert(&mut self, ext: Arc<dyn TrainerExtension>) {
        self.extensions.insert(ext.name(), ext);
    }

    /// Register an extension. Returns error if the name is already taken.
    pub fn register(&mut self, ext: Arc<dyn TrainerExtension>) -> Result<(), ExtensionError> {
        let name = ext.name();
        if self.extensions.contains_key(&name) {
            return Err(ExtensionError::AlreadyRegistered {
                name: name.to_string(),
            });
        }
        debug!(trainer = %name, "Registering trainer extension");
        self.extensions.insert(name, ext);
        Ok(())
    }

    pub fn get(&self, name: TrainerName) -> Result<Arc<dyn TrainerExtension>, ExtensionError> {
        self.extensions
            .get(&name)
            .cloned()
            .ok_or_else(|| ExtensionError::UnknownTrainer {
                name: name.to_string(),
            })
    }

    /// Look up by display name, case-insensitively.
    pub fn get_by_name(&self, name: &str) -> Result<Arc<dyn TrainerExtension>, ExtensionError> {
        self.get(name.parse()?)
    }

    /// Display name of an extension instance.
    pub fn trainer_name(ext: &dyn TrainerExtension) -> TrainerName {
        ext.name()
    }

    /// Extensions for a task, in name order, filtered by the allow/deny lists.
    pub fn extensions_for(
        &self,
        task: TaskKind,
        filter: &CatalogConfig,
    ) -> Vec<Arc<dyn TrainerExtension>> {
        self.extensions
            .iter()
            .filter(|(name, _)| name.task() == task && filter.permits(**name))
            .map(|(_, ext)| Arc::clone(ext))
            .collect()
    }

    pub fn names(&self) -> Vec<TrainerName> {
        self.extensions.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Rebuild the estimator a pipeline node describes.
    ///
    /// Produces the same estimator `create_instance` builds from the inputs that
    /// produced the node. A one-versus-all node must nest exactly the binary
    /// trainer its extension wraps, and no other node may nest one.
    ///
    /// Nodes never record a weight column the trainer cannot consume, so under
    /// [`WeightColumnPolicy::Reject`](crate::WeightColumnPolicy::Reject) a rebuild
    /// succeeds without a weight where `create_instance` with that weight fails.
    pub fn estimator_from_node(
        &self,
        ctx: &TrainerContext,
        node: &PipelineNode,
    ) -> Result<Estimator, ExtensionError> {
        let ext = self.get_by_name(&node.name)?;
        match (ext.wrapped(), node.binary_trainer()?) {
            (Some(expected), Some(inner)) => {
                let inner: TrainerName = inner.name.parse()?;
                if inner != expected {
                    return Err(ExtensionError::invalid_node(format!(
                        "'{}' must wrap '{expected}', found '{inner}'",
                        node.name
                    )));
                }
            }
            (Some(expected), None) => {
                return Err(ExtensionError::invalid_node(format!(
                    "'{}' has no nested '{expected}' node",
                    node.name
                )));
            }
            (None, Some(inner)) => {
                return Err(ExtensionError::invalid_node(format!(
                    "'{}' does not wrap a binary trainer, found nested '{}'",
                    node.name, inner.name
                )));
            }
            (None, None) => {}
        }
        let (params, columns) = node.trainer_inputs()?;
        debug!(
            trainer = %ext.name(),
            params = params.len(),
            "Rebuilding estimator from pipeline node"
        );
        ext.create_instance(ctx, &params, &columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::ColumnInformation;
    use crate::sweep::Hyperparams;

    #[test]
    fn test_default_catalog_is_complete() {
        let catalog = TrainerCatalog::with_defaults();
        assert_eq!(catalog.len(), TrainerName::ALL.len());
        for name in TrainerName::ALL {
            assert_eq!(catalog.get(name).unwrap().name(), name);
        }
    }

    #[test]
    fn test_register_duplicate_fails() {
        let mut catalog = TrainerCatalog::with_defaults();
        let err = catalog
            .register(Arc::new(LightGbmMultiExtension))
            .unwrap_err();
        assert!(matches!(err, ExtensionError::AlreadyRegistered { .. }));
    }

    #[test]
    fn test_get_unknown() {
        let catalog = TrainerCatalog::new();
        assert!(catalog.is_empty());
        let err = catalog.get(TrainerName::FastTreeOva).unwrap_err();
        assert_eq!(err.to_string(), "Trainer not found: FastTreeOva");
    }

    #[test]
    fn test_extensions_for_task_and_filter() {
        let catalog = TrainerCatalog::with_defaults();
        let all = catalog.extensions_for(TaskKind::Multiclass, &CatalogConfig::default());
        assert_eq!(all.len(), 10);

        let filter = CatalogConfig {
            allowlist: vec![TrainerName::FastTreeOva, TrainerName::LightGbmMulti],
            denylist: vec![TrainerName::LightGbmMulti],
        };
        let names: Vec<_> = catalog
            .extensions_for(TaskKind::Multiclass, &filter)
            .iter()
            .map(|e| e.name())
            .collect();
        assert_eq!(names, vec![TrainerName::FastTreeOva]);
    }

    #[test]
    fn test_ova_shares_binary_instance() {
        let catalog = TrainerCatalog::with_defaults();
        let binary = catalog.get(TrainerName::LinearSvmBinary).unwrap();
        let ova = catalog.get(TrainerName::LinearSvmOva).unwrap();
        assert_eq!(
            ova.hyperparam_sweep_ranges(),
            binary.hyperparam_sweep_ranges()
        );
        // catalog entry, wrapper handle, local clone
        assert_eq!(Arc::strong_count(&binary), 3);
    }

    #[test]
    fn test_estimator_from_node_rejects_missing_inner_node() {
        let catalog = TrainerCatalog::with_defaults();
        let ova = catalog.get(TrainerName::FastTreeOva).unwrap();
        let mut node = ova
            .create_pipeline_node(&Hyperparams::new(), &ColumnInformation::default())
            .unwrap();
        node.properties.remove(crate::pipeline::BINARY_TRAINER_PROPERTY);
        let err = catalog
            .estimator_from_node(&TrainerContext::default(), &node)
            .unwrap_err();
        assert!(matches!(err, ExtensionError::InvalidPipelineNode { .. }));
    }

    #[test]
    fn test_estimator_from_node_matches_direct_build() {
        let catalog = TrainerCatalog::with_defaults();
        let ctx = TrainerContext::default();
        let ext = catalog.get(TrainerName::LbfgsMaximumEntropyMulti).unwrap();
        let params = Hyperparams::new()
            .with("HistorySize", 5i64)
            .with("L1Regularization", 0.25);
        let columns = ColumnInformation::default().weight("Weight");

        let node = ext.create_pipeline_node(&params, &columns).unwrap();
        let rebuilt = catalog.estimator_from_node(&ctx, &node).unwrap();
        let direct = ext.create_instance(&ctx, &params, &columns).unwrap();
        assert_eq!(rebuilt, direct);
    }
}
