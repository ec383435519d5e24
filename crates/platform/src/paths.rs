//! Default locations for the certificate store and bundled tool binaries

use std::path::PathBuf;

use crate::platform::EnvironmentContext;

/// Environment override for the certificate store directory.
pub const STORE_ENV: &str = "LOCALCA_STORE";

/// Environment override for the tool binary directory.
pub const BIN_ENV: &str = "LOCALCA_BIN";

/// Resolved store and binary directories for a run.
#[derive(Debug, Clone)]
pub struct LocalcaPaths {
    pub store_dir: PathBuf,
    pub bin_dir: PathBuf,
}

impl LocalcaPaths {
    /// Resolve both directories from the context, honoring env overrides.
    pub fn resolve(ctx: &EnvironmentContext) -> Self {
        Self {
            store_dir: Self::store_path(ctx),
            bin_dir: Self::bin_path(ctx),
        }
    }

    pub fn store_path(ctx: &EnvironmentContext) -> PathBuf {
        if let Ok(path) = std::env::var(STORE_ENV) {
            return PathBuf::from(path);
        }

        Self::default_store_path(ctx)
    }

    pub fn default_store_path(ctx: &EnvironmentContext) -> PathBuf {
        ctx.home_dir.join(".localca")
    }

    pub fn bin_path(ctx: &EnvironmentContext) -> PathBuf {
        if let Ok(path) = std::env::var(BIN_ENV) {
            return PathBuf::from(path);
        }

        Self::default_bin_path(ctx)
    }

    pub fn default_bin_path(ctx: &EnvironmentContext) -> PathBuf {
        ctx.home_dir.join(".localca").join("bin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use temp_env::with_vars;

    fn test_ctx() -> EnvironmentContext {
        EnvironmentContext::with_host("linux", "amd64", PathBuf::from("/home/tester"))
    }

    #[test]
    #[serial]
    fn env_vars_override_default_paths() {
        with_vars(
            [
                (STORE_ENV, Some("/custom/certs")),
                (BIN_ENV, Some("/custom/bin")),
            ],
            || {
                let paths = LocalcaPaths::resolve(&test_ctx());
                assert_eq!(paths.store_dir, PathBuf::from("/custom/certs"));
                assert_eq!(paths.bin_dir, PathBuf::from("/custom/bin"));
            },
        )
    }

    #[test]
    #[serial]
    fn defaults_live_under_home() {
        with_vars([(STORE_ENV, None::<&str>), (BIN_ENV, None::<&str>)], || {
            let paths = LocalcaPaths::resolve(&test_ctx());
            assert_eq!(paths.store_dir, PathBuf::from("/home/tester/.localca"));
            assert_eq!(paths.bin_dir, PathBuf::from("/home/tester/.localca/bin"));
        })
    }
}
