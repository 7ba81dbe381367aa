//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

pub mod check;
pub mod completions;
pub mod schema;
pub mod utils;
pub mod validate;

pub use check::handle_check;
pub use completions::handle_completions;
pub use schema::handle_schema;
pub use validate::handle_validate;
