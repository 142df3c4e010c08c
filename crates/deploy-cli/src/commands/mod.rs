//! Command implementations for deploy-cli

pub mod assemble;
pub mod resolve;

pub use assemble::run_assemble;
pub use resolve::{run_resolve, run_validate};
