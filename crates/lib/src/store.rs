//! Certificate store layout and completeness checking.

use std::path::{Path, PathBuf};

use crate::consts::{LEAF_CERT_FILE, LEAF_KEY_FILE, ROOT_CERT_FILE, ROOT_KEY_FILE};

/// The on-disk certificate set: a directory holding the root CA pair and
/// the loopback leaf pair.
///
/// The store is owned by the host filesystem; this crate only reads it and
/// creates files within it, never deletes it.
#[derive(Debug, Clone)]
pub struct CertStore {
  dir: PathBuf,
}

impl CertStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  pub fn root_cert(&self) -> PathBuf {
    self.dir.join(ROOT_CERT_FILE)
  }

  pub fn root_key(&self) -> PathBuf {
    self.dir.join(ROOT_KEY_FILE)
  }

  pub fn leaf_cert(&self) -> PathBuf {
    self.dir.join(LEAF_CERT_FILE)
  }

  pub fn leaf_key(&self) -> PathBuf {
    self.dir.join(LEAF_KEY_FILE)
  }

  /// All four artifact paths.
  pub fn artifacts(&self) -> [PathBuf; 4] {
    [self.root_cert(), self.root_key(), self.leaf_cert(), self.leaf_key()]
  }

  /// True iff every artifact exists.
  ///
  /// Contents are not inspected. A missing store directory simply reads as
  /// incomplete.
  pub fn is_complete(&self) -> bool {
    self.artifacts().iter().all(|path| path.exists())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn populate(store: &CertStore, names: &[&str]) {
    for name in names {
      std::fs::write(store.dir().join(name), "test-pem").unwrap();
    }
  }

  #[test]
  fn complete_with_all_four_artifacts() {
    let temp = TempDir::new().unwrap();
    let store = CertStore::new(temp.path());

    populate(&store, &[ROOT_CERT_FILE, ROOT_KEY_FILE, LEAF_CERT_FILE, LEAF_KEY_FILE]);

    assert!(store.is_complete());
  }

  #[test]
  fn incomplete_when_any_artifact_is_missing() {
    let all = [ROOT_CERT_FILE, ROOT_KEY_FILE, LEAF_CERT_FILE, LEAF_KEY_FILE];

    for missing in &all {
      let temp = TempDir::new().unwrap();
      let store = CertStore::new(temp.path());
      let present: Vec<&str> = all.iter().copied().filter(|name| name != missing).collect();
      populate(&store, &present);

      assert!(!store.is_complete(), "store should be incomplete without {missing}");
    }
  }

  #[test]
  fn missing_directory_reads_as_incomplete() {
    let store = CertStore::new("/nonexistent/localca/certs");
    assert!(!store.is_complete());
  }

  #[test]
  fn empty_directory_is_incomplete() {
    let temp = TempDir::new().unwrap();
    let store = CertStore::new(temp.path());
    assert!(!store.is_complete());
  }

  #[test]
  fn unrelated_files_do_not_count() {
    let temp = TempDir::new().unwrap();
    let store = CertStore::new(temp.path());
    populate(&store, &["example.org.pem", "example.org-key.pem"]);
    assert!(!store.is_complete());
  }

  #[test]
  fn artifact_paths_use_contract_names() {
    let store = CertStore::new("/certs");
    assert_eq!(store.root_cert(), PathBuf::from("/certs/rootCA.pem"));
    assert_eq!(store.root_key(), PathBuf::from("/certs/rootCA-key.pem"));
    assert_eq!(store.leaf_cert(), PathBuf::from("/certs/localhost.pem"));
    assert_eq!(store.leaf_key(), PathBuf::from("/certs/localhost-key.pem"));
  }
}
