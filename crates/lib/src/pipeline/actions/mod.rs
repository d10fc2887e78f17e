//! Individual step implementations.
//!
//! - [`invoke`] - External program execution behind the [`ToolRunner`] trait
//! - [`stage`] - File removal, directory creation and artifact copies

pub mod invoke;
pub mod stage;

pub use invoke::{ProcessRunner, ToolRunner};
