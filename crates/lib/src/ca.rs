//! Certificate authority orchestration.
//!
//! The external certificate tool sits behind the [`CertTool`] capability
//! trait; [`provision`] drives it through store setup, root install and
//! leaf issuance, then re-checks the store. The completeness check, not
//! the tool's own exit status, is what decides success.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::consts::{CAROOT_ENV, LEAF_NAMES};
use crate::store::CertStore;

/// Failure of a single certificate tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
  #[error("certificate tool exited with code {code:?}")]
  Failed { code: Option<i32> },

  #[error("failed to spawn certificate tool: {0}")]
  Spawn(#[from] std::io::Error),
}

/// Errors that can occur during provisioning.
#[derive(Debug, Error)]
pub enum CaError {
  #[error("failed to create store directory {dir}: {source}")]
  StoreDir {
    dir: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The store is still incomplete after the full run.
  #[error("certificate store at {dir} is still incomplete after provisioning")]
  VerificationFailed { dir: PathBuf },
}

/// Capability surface of the external certificate tool.
pub trait CertTool {
  /// Create the root CA if needed and register it with the host trust
  /// stores. Assumed idempotent against an already-trusted root.
  fn install_root(&self) -> Result<(), ToolError>;

  /// Issue a leaf certificate covering `names`, written to the given paths.
  fn issue_leaf(&self, names: &[&str], cert: &Path, key: &Path) -> Result<(), ToolError>;
}

/// mkcert invoked as a subprocess, with `CAROOT` pointed at the store.
#[derive(Debug, Clone)]
pub struct Mkcert {
  binary: PathBuf,
  caroot: PathBuf,
}

impl Mkcert {
  pub fn new(binary: impl Into<PathBuf>, caroot: impl Into<PathBuf>) -> Self {
    Self {
      binary: binary.into(),
      caroot: caroot.into(),
    }
  }

  fn command(&self) -> Command {
    let mut cmd = Command::new(&self.binary);
    // The rest of the parent environment is inherited unchanged.
    cmd.env(CAROOT_ENV, &self.caroot);
    cmd
  }

  fn run(&self, cmd: &mut Command) -> Result<(), ToolError> {
    let output = cmd.output()?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if !stderr.is_empty() {
        debug!(stderr = %stderr.trim(), "certificate tool stderr");
      }
      return Err(ToolError::Failed {
        code: output.status.code(),
      });
    }

    Ok(())
  }
}

impl CertTool for Mkcert {
  fn install_root(&self) -> Result<(), ToolError> {
    info!(binary = %self.binary.display(), caroot = %self.caroot.display(), "installing root CA");
    let mut cmd = self.command();
    cmd.arg("-install");
    self.run(&mut cmd)
  }

  fn issue_leaf(&self, names: &[&str], cert: &Path, key: &Path) -> Result<(), ToolError> {
    info!(names = ?names, cert = %cert.display(), "issuing leaf certificate");
    let mut cmd = self.command();
    cmd.arg(format!("-key-file={}", key.display()));
    cmd.arg(format!("-cert-file={}", cert.display()));
    cmd.args(names);
    self.run(&mut cmd)
  }
}

/// Drive the full CA flow against `store`.
///
/// Tool invocation failures are logged and deferred rather than aborting:
/// control always reaches the final completeness check, which alone
/// decides the verdict.
pub fn provision<T: CertTool>(store: &CertStore, tool: &T) -> Result<(), CaError> {
  fs::create_dir_all(store.dir()).map_err(|source| CaError::StoreDir {
    dir: store.dir().to_path_buf(),
    source,
  })?;

  if let Err(error) = tool.install_root() {
    warn!(error = %error, "root CA install failed, deferring to verification");
  }

  if let Err(error) = tool.issue_leaf(&LEAF_NAMES, &store.leaf_cert(), &store.leaf_key()) {
    warn!(error = %error, "leaf issuance failed, deferring to verification");
  }

  if !store.is_complete() {
    return Err(CaError::VerificationFailed {
      dir: store.dir().to_path_buf(),
    });
  }

  info!(dir = %store.dir().display(), "certificate store complete");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::cell::RefCell;
  use tempfile::TempDir;

  /// Scripted stand-in for the external tool.
  ///
  /// Mirrors mkcert's observable behavior: root install creates the CA
  /// pair only when absent, leaf issuance writes the requested files.
  struct FakeTool {
    store: CertStore,
    fail_root: bool,
    fail_leaf: bool,
    calls: RefCell<Vec<&'static str>>,
  }

  impl FakeTool {
    fn new(store: &CertStore) -> Self {
      Self {
        store: store.clone(),
        fail_root: false,
        fail_leaf: false,
        calls: RefCell::new(Vec::new()),
      }
    }
  }

  impl CertTool for FakeTool {
    fn install_root(&self) -> Result<(), ToolError> {
      self.calls.borrow_mut().push("install_root");
      if self.fail_root {
        return Err(ToolError::Failed { code: Some(1) });
      }
      if !self.store.root_cert().exists() {
        std::fs::write(self.store.root_cert(), "root-cert").unwrap();
        std::fs::write(self.store.root_key(), "root-key").unwrap();
      }
      Ok(())
    }

    fn issue_leaf(&self, names: &[&str], cert: &Path, key: &Path) -> Result<(), ToolError> {
      self.calls.borrow_mut().push("issue_leaf");
      if self.fail_leaf {
        return Err(ToolError::Failed { code: Some(1) });
      }
      std::fs::write(cert, format!("leaf-cert for {}", names.join(","))).unwrap();
      std::fs::write(key, "leaf-key").unwrap();
      Ok(())
    }
  }

  #[test]
  fn provisions_an_empty_store() {
    let temp = TempDir::new().unwrap();
    let store = CertStore::new(temp.path().join("certs"));
    let tool = FakeTool::new(&store);

    provision(&store, &tool).unwrap();

    assert!(store.is_complete());
    assert_eq!(*tool.calls.borrow(), vec!["install_root", "issue_leaf"]);
  }

  #[test]
  fn creates_the_store_directory_if_absent() {
    let temp = TempDir::new().unwrap();
    let store = CertStore::new(temp.path().join("nested").join("certs"));
    let tool = FakeTool::new(&store);

    provision(&store, &tool).unwrap();

    assert!(store.dir().is_dir());
  }

  #[test]
  fn preserves_an_existing_root_pair() {
    let temp = TempDir::new().unwrap();
    let store = CertStore::new(temp.path());
    std::fs::write(store.root_cert(), "pre-existing-root").unwrap();
    std::fs::write(store.root_key(), "pre-existing-key").unwrap();

    let tool = FakeTool::new(&store);
    provision(&store, &tool).unwrap();

    // Root install runs again but must not destroy the existing CA.
    assert_eq!(*tool.calls.borrow(), vec!["install_root", "issue_leaf"]);
    assert_eq!(std::fs::read_to_string(store.root_cert()).unwrap(), "pre-existing-root");
    assert!(store.is_complete());
  }

  #[test]
  fn tool_failure_defers_to_verification() {
    let temp = TempDir::new().unwrap();
    let store = CertStore::new(temp.path());
    let mut tool = FakeTool::new(&store);
    tool.fail_root = true;

    let err = provision(&store, &tool).unwrap_err();

    // Leaf issuance still ran; the verdict came from the final check.
    assert_eq!(*tool.calls.borrow(), vec!["install_root", "issue_leaf"]);
    assert!(matches!(err, CaError::VerificationFailed { .. }));
  }

  #[test]
  fn failing_tool_passes_when_store_already_has_the_files() {
    let temp = TempDir::new().unwrap();
    let store = CertStore::new(temp.path());
    for path in store.artifacts() {
      std::fs::write(path, "already-there").unwrap();
    }

    let mut tool = FakeTool::new(&store);
    tool.fail_root = true;
    tool.fail_leaf = true;

    provision(&store, &tool).unwrap();
  }

  #[test]
  fn leaf_failure_alone_fails_verification() {
    let temp = TempDir::new().unwrap();
    let store = CertStore::new(temp.path());
    let mut tool = FakeTool::new(&store);
    tool.fail_leaf = true;

    let err = provision(&store, &tool).unwrap_err();
    assert!(matches!(err, CaError::VerificationFailed { .. }));
    assert!(store.root_cert().exists());
    assert!(!store.leaf_cert().exists());
  }
}
