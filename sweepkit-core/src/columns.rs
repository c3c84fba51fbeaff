//! Column-role metadata supplied by the caller.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LABEL_COLUMN: &str = "Label";
pub const FEATURES_COLUMN: &str = "Features";
pub const SCORE_COLUMN: &str = "Score";

/// Which dataset columns play which role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInformation {
    /// Column holding the target value.
    #[serde(default = "default_label_column")]
    pub label_column: String,
    /// Optional per-example weight column.
    #[serde(default)]
    pub example_weight_column: Option<String>,
    /// Optional column used to keep related rows in the same split.
    #[serde(default)]
    pub sampling_key_column: Option<String>,
    #[serde(default)]
    pub categorical_columns: Vec<String>,
    #[serde(default)]
    pub numeric_columns: Vec<String>,
    #[serde(default)]
    pub text_columns: Vec<String>,
    #[serde(default)]
    pub ignored_columns: Vec<String>,
}

impl Default for ColumnInformation {
    fn default() -> Self {
        Self {
            label_column: default_label_column(),
            example_weight_column: None,
            sampling_key_column: None,
            categorical_columns: Vec::new(),
            numeric_columns: Vec::new(),
            text_columns: Vec::new(),
            ignored_columns: Vec::new(),
        }
    }
}

fn default_label_column() -> String {
    DEFAULT_LABEL_COLUMN.to_string()
}

impl ColumnInformation {
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label_column: label.into(),
            ..Self::default()
        }
    }

    pub fn weight(mut self, column: impl Into<String>) -> Self {
        self.example_weight_column = Some(column.into());
        self
    }

    pub fn sampling_key(mut self, column: impl Into<String>) -> Self {
        self.sampling_key_column = Some(column.into());
        self
    }

    pub fn weight_column(&self) -> Option<&str> {
        self.example_weight_column.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_label() {
        let info = ColumnInformation::default();
        assert_eq!(info.label_column, "Label");
        assert!(info.weight_column().is_none());
    }

    #[test]
    fn test_builder() {
        let info = ColumnInformation::with_label("Target").weight("Weight");
        assert_eq!(info.label_column, "Target");
        assert_eq!(info.weight_column(), Some("Weight"));
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let info: ColumnInformation =
            serde_json::from_str(r#"{"example_weight_column": "W"}"#).unwrap();
        assert_eq!(info.label_column, "Label");
        assert_eq!(info.weight_column(), Some("W"));
        assert!(info.categorical_columns.is_empty());
    }
}
