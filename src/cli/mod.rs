//! Command-line interface module.

mod args;
pub mod check;
pub mod query;

pub use args::{Cli, Commands};
