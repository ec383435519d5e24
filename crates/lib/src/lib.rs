//! localca-lib: the idempotent local TLS bootstrap
//!
//! This crate provides the pieces the `localca` binary composes:
//! - `store`: the four-artifact certificate store and its completeness check
//! - `resolve`: maps the host platform to the bundled certificate tool binary
//! - `deps`: ensures the nss trust-store tooling browsers import from
//! - `ca`: drives the certificate tool through root install and leaf issuance
//! - `bootstrap`: the runner tying the state machine together

pub mod bootstrap;
pub mod ca;
pub mod consts;
pub mod deps;
pub mod resolve;
pub mod store;

pub use bootstrap::{BootstrapError, BootstrapOptions, BootstrapOutcome, run};
pub use store::CertStore;
