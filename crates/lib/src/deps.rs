//! OS trust-store dependency installation.
//!
//! Browsers that use nss (Firefox everywhere, Chromium on Linux) only trust
//! the local root CA once `certutil` can register it, so the tooling has to
//! be present before the certificate tool runs. This module is the
//! idempotent state machine that makes that true.

use std::process::Command;

use localca_platform::{EnvironmentContext, Os, executable_exists};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while ensuring the nss tooling.
#[derive(Debug, Error)]
pub enum DepsError {
  /// No supported package manager is available on this host.
  #[error("no supported package manager found to install nss tooling")]
  NoPackageManagerFound,

  /// The package manager ran and failed.
  #[error("{manager} failed to install nss tooling (exit code {code:?})")]
  InstallFailed {
    manager: &'static str,
    code: Option<i32>,
  },

  /// MacPorts hosts are detected but installs are not wired up.
  #[error("MacPorts installs are not supported; run `sudo port install nss` manually")]
  MacPortsUnsupported,

  /// The package manager process could not be spawned at all.
  #[error("failed to spawn {manager}: {source}")]
  Spawn {
    manager: &'static str,
    #[source]
    source: std::io::Error,
  },
}

/// Closed set of package managers the installer knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
  Apt,
  Yum,
  Pacman,
  Brew,
  MacPorts,
}

impl PackageManager {
  /// Probe order on Linux hosts. First available wins.
  pub const LINUX: [PackageManager; 3] =
    [PackageManager::Apt, PackageManager::Yum, PackageManager::Pacman];

  /// Probe order on macOS hosts.
  pub const DARWIN: [PackageManager; 2] = [PackageManager::Brew, PackageManager::MacPorts];

  /// Executable probed on PATH to decide availability.
  pub const fn executable(&self) -> &'static str {
    match self {
      PackageManager::Apt => "apt-get",
      PackageManager::Yum => "yum",
      PackageManager::Pacman => "pacman",
      PackageManager::Brew => "brew",
      PackageManager::MacPorts => "port",
    }
  }

  pub fn is_available(&self) -> bool {
    executable_exists(self.executable())
  }

  /// First available manager out of `candidates`, in order.
  pub fn detect(candidates: &[PackageManager]) -> Option<PackageManager> {
    candidates.iter().copied().find(PackageManager::is_available)
  }

  /// Install the nss tooling package through this manager.
  ///
  /// Linux managers run under sudo; brew must not.
  pub fn install_nss(&self) -> Result<(), DepsError> {
    let mut cmd = match self {
      PackageManager::Apt => {
        let mut c = Command::new("sudo");
        c.args(["apt-get", "install", "-y", "libnss3-tools"]);
        // apt prompts unless the frontend is told otherwise; scoped to the child.
        c.env("DEBIAN_FRONTEND", "noninteractive");
        c
      }
      PackageManager::Yum => {
        let mut c = Command::new("sudo");
        c.args(["yum", "install", "-y", "nss-tools"]);
        c
      }
      PackageManager::Pacman => {
        let mut c = Command::new("sudo");
        c.args(["pacman", "-S", "--noconfirm", "nss"]);
        c
      }
      PackageManager::Brew => {
        let mut c = Command::new("brew");
        c.args(["install", "nss"]);
        c
      }
      PackageManager::MacPorts => return Err(DepsError::MacPortsUnsupported),
    };

    info!(manager = self.executable(), "installing nss tooling");
    run_install(&mut cmd, self.executable())
  }
}

fn run_install(cmd: &mut Command, manager: &'static str) -> Result<(), DepsError> {
  let output = cmd.output().map_err(|source| DepsError::Spawn { manager, source })?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
      warn!(manager, stderr = %stderr.trim(), "install command failed");
    }
    return Err(DepsError::InstallFailed {
      manager,
      code: output.status.code(),
    });
  }

  Ok(())
}

/// Whether brew already lists nss as installed.
///
/// A plain PATH probe is not enough here: brew keeps nss keg-only, so
/// `certutil` never appears on the default path even when installed.
fn brew_lists_nss() -> bool {
  Command::new("brew")
    .args(["list", "nss"])
    .output()
    .map(|output| output.status.success())
    .unwrap_or(false)
}

/// Ensure the nss trust-store tooling is present for this host.
///
/// Idempotent: a present dependency triggers zero mutating calls. Windows
/// (and anything unrecognized) has no nss step.
pub fn ensure_nss(ctx: &EnvironmentContext) -> Result<(), DepsError> {
  match Os::parse(&ctx.os) {
    Some(Os::Linux) => ensure_nss_linux(),
    Some(Os::Darwin) => ensure_nss_darwin(),
    _ => {
      debug!(os = %ctx.os, "no trust-store dependency step for this platform");
      Ok(())
    }
  }
}

fn ensure_nss_linux() -> Result<(), DepsError> {
  if executable_exists("certutil") {
    debug!("certutil already present, skipping install");
    return Ok(());
  }

  let manager =
    PackageManager::detect(&PackageManager::LINUX).ok_or(DepsError::NoPackageManagerFound)?;
  info!(manager = manager.executable(), "certutil missing");
  manager.install_nss()
}

fn ensure_nss_darwin() -> Result<(), DepsError> {
  match PackageManager::detect(&PackageManager::DARWIN) {
    Some(PackageManager::Brew) => {
      if brew_lists_nss() {
        debug!("brew already lists nss, skipping install");
        Ok(())
      } else {
        PackageManager::Brew.install_nss()
      }
    }
    Some(_) => Err(DepsError::MacPortsUnsupported),
    // TODO: bootstrap Homebrew itself when neither manager is present.
    None => Err(DepsError::NoPackageManagerFound),
  }
}
