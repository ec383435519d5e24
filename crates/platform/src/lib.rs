//! Platform detection and host abstractions for localca
//!
//! This crate provides the host-facing building blocks:
//! - OS and architecture model
//! - The `EnvironmentContext` captured once per run
//! - Default store/binary paths with environment overrides
//! - Executable lookup on PATH

mod error;
mod paths;
mod platform;
mod probe;

pub use error::PlatformError;
pub use paths::{BIN_ENV, LocalcaPaths, STORE_ENV};
pub use platform::{Arch, EnvironmentContext, Os};
pub use probe::{executable_exists, find_executable};
