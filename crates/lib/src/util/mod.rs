//! Shared utilities.
//!
//! Currently only test helpers: shell command builders and a recording tool runner.

#[cfg(test)]
pub mod testutil;
