//! Serializable descriptions of configured pipeline steps.

use crate::columns::{ColumnInformation, FEATURES_COLUMN, SCORE_COLUMN};
use crate::error::ExtensionError;
use crate::sweep::{Hyperparams, ParamValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const LABEL_COLUMN_PROPERTY: &str = "LabelColumnName";
pub const WEIGHT_COLUMN_PROPERTY: &str = "ExampleWeightColumnName";
pub const BINARY_TRAINER_PROPERTY: &str = "BinaryTrainer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineNodeType {
    Transform,
    Trainer,
}

/// A node property: a plain value or a nested node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeProperty {
    Value(ParamValue),
    Node(Box<PipelineNode>),
}

/// One configured step of a model-building pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineNode {
    pub name: String,
    pub node_type: PipelineNodeType,
    pub in_columns: Vec<String>,
    pub out_columns: Vec<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, NodeProperty>,
}

impl PipelineNode {
    /// A trainer node reading the features column and writing the score column.
    pub fn trainer(name: impl Into<String>, properties: BTreeMap<String, NodeProperty>) -> Self {
        Self {
            name: name.into(),
            node_type: PipelineNodeType::Trainer,
            in_columns: vec![FEATURES_COLUMN.to_string()],
            out_columns: vec![SCORE_COLUMN.to_string()],
            properties,
        }
    }

    pub fn property(&self, key: &str) -> Option<&NodeProperty> {
        self.properties.get(key)
    }

    fn text_property(&self, key: &str) -> Result<Option<String>, ExtensionError> {
        match self.properties.get(key) {
            None => Ok(None),
            Some(NodeProperty::Value(ParamValue::Text(s))) => Ok(Some(s.clone())),
            Some(other) => Err(ExtensionError::invalid_node(format!(
                "property '{key}' of node '{}' must be text, got {other:?}",
                self.name
            ))),
        }
    }

    /// The wrapped binary trainer node of a one-versus-all node, if any.
    pub fn binary_trainer(&self) -> Result<Option<&PipelineNode>, ExtensionError> {
        match self.properties.get(BINARY_TRAINER_PROPERTY) {
            None => Ok(None),
            Some(NodeProperty::Node(node)) => Ok(Some(node.as_ref())),
            Some(NodeProperty::Value(_)) => Err(ExtensionError::invalid_node(format!(
                "property '{BINARY_TRAINER_PROPERTY}' of node '{}' must be a node",
                self.name
            ))),
        }
    }

    /// Recover the hyperparameter assignment and column roles that produced this node.
    ///
    /// For one-versus-all nodes the hyperparameters come from the nested binary
    /// trainer node; the label column comes from the outer node.
    pub fn trainer_inputs(&self) -> Result<(Hyperparams, ColumnInformation), ExtensionError> {
        if self.node_type != PipelineNodeType::Trainer {
            return Err(ExtensionError::invalid_node(format!(
                "node '{}' is not a trainer",
                self.name
            )));
        }

        if let Some(binary) = self.binary_trainer()? {
            let (params, mut columns) = binary.trainer_inputs()?;
            if let Some(label) = self.text_property(LABEL_COLUMN_PROPERTY)? {
                columns.label_column = label;
            }
            return Ok((params, columns));
        }

        let label = self.text_property(LABEL_COLUMN_PROPERTY)?.ok_or_else(|| {
            ExtensionError::invalid_node(format!(
                "node '{}' has no '{LABEL_COLUMN_PROPERTY}' property",
                self.name
            ))
        })?;
        let mut columns = ColumnInformation::with_label(label);
        columns.example_weight_column = self.text_property(WEIGHT_COLUMN_PROPERTY)?;

        let mut params = Hyperparams::new();
        for (key, prop) in &self.properties {
            if key == LABEL_COLUMN_PROPERTY || key == WEIGHT_COLUMN_PROPERTY {
                continue;
            }
            match prop {
                NodeProperty::Value(value) => params.insert(key.clone(), value.clone())?,
                NodeProperty::Node(_) => {
                    return Err(ExtensionError::invalid_node(format!(
                        "unexpected nested node '{key}' in '{}'",
                        self.name
                    )));
                }
            }
        }
        Ok((params, columns))
    }
}
