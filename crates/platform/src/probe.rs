//! Executable lookup on PATH

use std::path::PathBuf;

/// Locate an executable on PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Whether an executable is available on PATH.
pub fn executable_exists(name: &str) -> bool {
    find_executable(name).is_some()
}
