//! Certificate tool binary resolution.

use std::path::{Path, PathBuf};

use localca_platform::{Arch, EnvironmentContext, Os};
use thiserror::Error;
use tracing::debug;

use crate::consts::{TOOL_NAME, TOOL_VERSION};

/// Errors that can occur while resolving the tool binary.
///
/// All of these are raised before any mutation happens elsewhere; a failed
/// resolution leaves the host untouched.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// OS outside {linux, darwin, windows}.
  #[error("unsupported platform: {0}")]
  UnsupportedPlatform(String),

  /// Architecture outside {arm, amd64}.
  #[error("unsupported architecture: {0}")]
  UnsupportedArchitecture(String),

  /// No tool binary at the computed path.
  #[error("no certificate tool binary for this platform at {path}")]
  MissingBinary { path: PathBuf },
}

/// The resolved certificate tool for this host.
///
/// Computed once per run, immutable thereafter.
#[derive(Debug, Clone)]
pub struct ToolBinary {
  pub os: Os,
  pub arch: Arch,
  pub version: &'static str,
  pub path: PathBuf,
}

/// File name of the bundled binary for an os/arch pair,
/// e.g. `mkcert-v1.4.4-linux-amd64`.
pub fn binary_name(os: Os, arch: Arch) -> String {
  let suffix = match os {
    Os::Windows => ".exe",
    Os::Linux | Os::Darwin => "",
  };
  format!("{TOOL_NAME}-{TOOL_VERSION}-{os}-{arch}{suffix}")
}

/// Resolve the tool binary for the host described by `ctx`.
///
/// Pure and deterministic: reads the filesystem, mutates nothing.
pub fn resolve_tool(ctx: &EnvironmentContext, bin_dir: &Path) -> Result<ToolBinary, ResolveError> {
  let os = Os::parse(&ctx.os).ok_or_else(|| ResolveError::UnsupportedPlatform(ctx.os.clone()))?;
  let arch =
    Arch::parse(&ctx.arch).ok_or_else(|| ResolveError::UnsupportedArchitecture(ctx.arch.clone()))?;

  let path = bin_dir.join(binary_name(os, arch));
  debug!(os = %os, arch = %arch, path = %path.display(), "computed tool binary path");

  if !path.is_file() {
    return Err(ResolveError::MissingBinary { path });
  }

  Ok(ToolBinary {
    os,
    arch,
    version: TOOL_VERSION,
    path,
  })
}
