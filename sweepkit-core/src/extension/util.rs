//! Helpers shared by all extensions: options population and node building.

use super::{TrainerContext, TrainerExtension, TrainerName, WeightColumnPolicy};
use crate::columns::ColumnInformation;
use crate::error::ExtensionError;
use crate::options::TrainerOptions;
use crate::pipeline::{
    BINARY_TRAINER_PROPERTY, LABEL_COLUMN_PROPERTY, NodeProperty, PipelineNode,
    WEIGHT_COLUMN_PROPERTY,
};
use crate::sweep::{Hyperparams, ParamValue, SweepableParam, validate_assignment};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Populate an options record from a hyperparameter assignment and column roles.
pub fn create_options<O: TrainerOptions>(
    trainer: TrainerName,
    ranges: &[SweepableParam],
    ctx: &TrainerContext,
    params: &Hyperparams,
    columns: &ColumnInformation,
) -> Result<O, ExtensionError> {
    validate_assignment(trainer.as_str(), ranges, params)?;

    let mut options = O::default();
    for (name, value) in params.iter() {
        options.set_hyperparameter(trainer.as_str(), name, value)?;
    }

    let binding = options.columns_mut();
    binding.label_column_name = columns.label_column.clone();
    if let Some(weight) = columns.weight_column() {
        if O::SUPPORTS_EXAMPLE_WEIGHT {
            binding.example_weight_column_name = Some(weight.to_string());
        } else {
            match ctx.weight_policy {
                WeightColumnPolicy::Ignore => {
                    warn!(
                        trainer = %trainer,
                        column = weight,
                        "Trainer has no example weight support; ignoring weight column"
                    );
                }
                WeightColumnPolicy::Reject => {
                    return Err(ExtensionError::UnsupportedColumnRole {
                        trainer: trainer.to_string(),
                        role: "example weight".to_string(),
                    });
                }
            }
        }
    }

    debug!(trainer = %trainer, params = params.len(), "Built trainer options");
    Ok(options)
}

/// Node for a directly configured trainer.
///
/// `weight_column` should already be filtered by the trainer's weight support.
pub fn build_pipeline_node(
    trainer: TrainerName,
    ranges: &[SweepableParam],
    params: &Hyperparams,
    label_column: &str,
    weight_column: Option<&str>,
) -> Result<PipelineNode, ExtensionError> {
    validate_assignment(trainer.as_str(), ranges, params)?;

    let mut properties: BTreeMap<String, NodeProperty> = params
        .iter()
        .map(|(name, value)| (name.to_string(), NodeProperty::Value(value.clone())))
        .collect();
    properties.insert(
        LABEL_COLUMN_PROPERTY.to_string(),
        NodeProperty::Value(ParamValue::Text(label_column.to_string())),
    );
    if let Some(weight) = weight_column {
        properties.insert(
            WEIGHT_COLUMN_PROPERTY.to_string(),
            NodeProperty::Value(ParamValue::Text(weight.to_string())),
        );
    }

    Ok(PipelineNode::trainer(trainer.as_str(), properties))
}

/// Node for a one-versus-all trainer: records the label column and nests the
/// binary trainer's own node.
pub fn build_ova_pipeline_node(
    ova: &dyn TrainerExtension,
    binary: &dyn TrainerExtension,
    params: &Hyperparams,
    columns: &ColumnInformation,
) -> Result<PipelineNode, ExtensionError> {
    let binary_node = binary.create_pipeline_node(params, columns)?;

    let mut properties = BTreeMap::new();
    properties.insert(
        LABEL_COLUMN_PROPERTY.to_string(),
        NodeProperty::Value(ParamValue::Text(columns.label_column.clone())),
    );
    properties.insert(
        BINARY_TRAINER_PROPERTY.to_string(),
        NodeProperty::Node(Box::new(binary_node)),
    );

    Ok(PipelineNode::trainer(ova.name().as_str(), properties))
}
