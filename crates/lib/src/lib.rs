//! gdbuild-lib: Core types and logic for gdbuild
//!
//! This crate provides the pieces the `gdbuild` CLI drives:
//! - `HostSnapshot`: an immutable probe of the machine the driver runs on
//! - `BuildConfig`: one pipeline run's target, flags and derived suffixes
//! - `DirectorySet`: the sibling project directories the pipeline touches
//! - `pipeline`: the ordered build/dump/stage/package sequence
//! - `codegen`: build-time C++ source generators

pub mod codegen;
pub mod config;
pub mod consts;
pub mod layout;
pub mod pipeline;
pub mod platform;
pub mod util;
