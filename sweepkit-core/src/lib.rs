//! # sweepkit-core: trainer extension registry for AutoML search
//!
//! Each supported trainer is exposed through a [`TrainerExtension`] that:
//! 1. **Declares** its tunable hyperparameters and their legal ranges
//! 2. **Builds** a ready-to-fit [`Estimator`] from a concrete assignment
//! 3. **Describes** the configured step as a serializable [`PipelineNode`]
//!
//! Multiclass trainers are either native or a one-versus-all wrapper around a
//! binary extension. The [`TrainerCatalog`] registers all of them and rebuilds
//! estimators from saved pipeline nodes.

pub mod catalog;
pub mod columns;
pub mod config;
pub mod error;
pub mod estimator;
pub mod extension;
pub mod options;
pub mod pipeline;
pub mod sweep;

pub use catalog::TrainerCatalog;
pub use columns::ColumnInformation;
pub use config::{CatalogConfig, SweepkitConfig, config_exists, load_config, load_config_file};
pub use error::{ConfigError, ExtensionError};
pub use estimator::{BinaryEstimator, BinaryTrainerKind, Estimator, OneVersusAll};
pub use extension::{TaskKind, TrainerContext, TrainerExtension, TrainerName, WeightColumnPolicy};
pub use pipeline::{NodeProperty, PipelineNode, PipelineNodeType};
pub use sweep::{Hyperparams, ParamDomain, ParamValue, SweepableParam};
