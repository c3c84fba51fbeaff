//! Error types for the sweepkit trainer catalog.
//!
//! Uses `thiserror` with structured variants. Every defect class an extension can
//! hit (undeclared hyperparameters, delegation returning the wrong trainer, column
//! roles an algorithm cannot honor) is a distinct variant so callers can match on it.

use std::path::PathBuf;

/// Errors raised while building estimators or pipeline nodes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtensionError {
    #[error("Hyperparameter '{name}' is not declared in the sweep ranges of {trainer}")]
    UnknownHyperparameter { trainer: String, name: String },

    #[error("Invalid value for hyperparameter '{name}' of {trainer}: {reason}")]
    InvalidHyperparameter {
        trainer: String,
        name: String,
        reason: String,
    },

    #[error("Hyperparameter '{name}' was supplied more than once")]
    DuplicateHyperparameter { name: String },

    #[error("{trainer} declares hyperparameter '{name}' but its options have no such field")]
    UnsupportedHyperparameter { trainer: String, name: String },

    #[error("Unexpected trainer type: expected {expected}, got {actual}")]
    UnexpectedTrainerType { expected: String, actual: String },

    #[error("{trainer} does not support the {role} column role")]
    UnsupportedColumnRole { trainer: String, role: String },

    #[error("Trainer not found: {name}")]
    UnknownTrainer { name: String },

    #[error("Trainer already registered: {name}")]
    AlreadyRegistered { name: String },

    #[error("Invalid pipeline node: {reason}")]
    InvalidPipelineNode { reason: String },
}

impl ExtensionError {
    pub fn invalid_value(
        trainer: impl Into<String>,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidHyperparameter {
            trainer: trainer.into(),
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_node(reason: impl Into<String>) -> Self {
        Self::InvalidPipelineNode {
            reason: reason.into(),
        }
    }

    /// Whether this error stems from a hyperparameter assignment that does not
    /// match the declared sweep ranges.
    pub fn is_configuration_mismatch(&self) -> bool {
        matches!(
            self,
            Self::UnknownHyperparameter { .. }
                | Self::InvalidHyperparameter { .. }
                | Self::DuplicateHyperparameter { .. }
                | Self::UnsupportedHyperparameter { .. }
        )
    }
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Configuration parse error: {0}")]
    Parse(#[from] Box<figment::Error>),
}
