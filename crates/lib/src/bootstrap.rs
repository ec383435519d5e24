//! Bootstrap runner.
//!
//! Composes the full flow:
//!
//! 1. Check whether the certificate store is already complete
//! 2. Resolve the bundled certificate tool binary
//! 3. Ensure the nss trust-store tooling
//! 4. Provision the CA and leaf certificate, re-verifying at the end
//!
//! Resolution is ordered before the installer so that unsupported hosts
//! fail before any mutation.

use std::path::PathBuf;

use localca_platform::{EnvironmentContext, LocalcaPaths};
use thiserror::Error;
use tracing::info;

use crate::ca::{self, CaError, Mkcert};
use crate::deps::{self, DepsError};
use crate::resolve::{self, ResolveError};
use crate::store::CertStore;

/// Errors that can occur during a bootstrap run.
#[derive(Debug, Error)]
pub enum BootstrapError {
  #[error("resolution error: {0}")]
  Resolve(#[from] ResolveError),

  #[error("dependency error: {0}")]
  Deps(#[from] DepsError),

  #[error("provisioning error: {0}")]
  Ca(#[from] CaError),
}

/// What a bootstrap run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
  /// The store was already complete; nothing ran.
  AlreadyComplete,
  /// Dependencies, root CA and leaf certificate were provisioned.
  Provisioned,
}

/// Options for a bootstrap run.
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
  /// Store directory override (defaults to the platform store path).
  pub store_dir: Option<PathBuf>,
  /// Tool binary directory override (defaults to the platform bin path).
  pub bin_dir: Option<PathBuf>,
}

/// Run the idempotent bootstrap state machine.
pub fn run(
  ctx: &EnvironmentContext,
  options: &BootstrapOptions,
) -> Result<BootstrapOutcome, BootstrapError> {
  let store_dir = options
    .store_dir
    .clone()
    .unwrap_or_else(|| LocalcaPaths::store_path(ctx));
  let bin_dir = options
    .bin_dir
    .clone()
    .unwrap_or_else(|| LocalcaPaths::bin_path(ctx));

  let store = CertStore::new(store_dir);
  info!(store = %store.dir().display(), "starting bootstrap");

  if store.is_complete() {
    info!("certificate store already complete");
    return Ok(BootstrapOutcome::AlreadyComplete);
  }

  let tool = resolve::resolve_tool(ctx, &bin_dir)?;
  info!(binary = %tool.path.display(), version = tool.version, "resolved certificate tool");

  deps::ensure_nss(ctx)?;

  let mkcert = Mkcert::new(&tool.path, store.dir());
  ca::provision(&store, &mkcert)?;

  info!("bootstrap complete");
  Ok(BootstrapOutcome::Provisioned)
}
