//! Hyperparameter sweep declarations and concrete assignments.

pub mod builders;
pub mod params;
pub mod value;

pub use params::{ParamDomain, SweepableParam, validate_assignment};
pub use value::{Hyperparams, ParamValue};
