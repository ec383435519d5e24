//! Platform and architecture model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::error::PlatformError;

/// Operating system kinds the certificate tool ships binaries for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Darwin,
    Windows,
}

impl Os {
    /// Parse a raw OS token.
    ///
    /// Accepts the canonical binary-name tokens as well as the spelling
    /// `std::env::consts::OS` uses for macOS. Anything else is unsupported.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "linux" => Some(Os::Linux),
            "darwin" | "macos" => Some(Os::Darwin),
            "windows" => Some(Os::Windows),
            _ => None,
        }
    }

    /// Returns the OS name as used in tool binary names
    pub const fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Darwin => "darwin",
            Os::Windows => "windows",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CPU architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Arm,
    Amd64,
}

impl Arch {
    /// Parse a raw architecture token.
    ///
    /// Accepts the canonical binary-name tokens as well as the spellings
    /// `std::env::consts::ARCH` uses. Anything else is unsupported.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "arm" | "arm64" | "aarch64" => Some(Arch::Arm),
            "amd64" | "x86_64" => Some(Arch::Amd64),
            _ => None,
        }
    }

    /// Returns the architecture name as used in tool binary names
    pub const fn as_str(&self) -> &'static str {
        match self {
            Arch::Arm => "arm",
            Arch::Amd64 => "amd64",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ambient facts about the host, captured once per run.
///
/// Components receive this value explicitly; nothing reads process-wide
/// globals after construction. The os/arch fields keep the raw tokens so
/// that unsupported hosts surface as resolution errors instead of being
/// rejected at capture time.
#[derive(Debug, Clone, Serialize)]
pub struct EnvironmentContext {
    /// Raw OS token, `std::env::consts::OS` spelling.
    pub os: String,
    /// Raw architecture token, `std::env::consts::ARCH` spelling.
    pub arch: String,
    pub home_dir: PathBuf,
    pub hostname: String,
    pub username: String,
}

impl EnvironmentContext {
    /// Capture the current host environment.
    pub fn detect() -> Result<Self, PlatformError> {
        let home_dir = dirs::home_dir().ok_or(PlatformError::NoHomeDirectory)?;
        let ctx = Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            home_dir,
            hostname: whoami::fallible::hostname().unwrap_or_else(|_| "unknown".to_string()),
            username: whoami::username(),
        };
        tracing::debug!(os = %ctx.os, arch = %ctx.arch, "captured environment context");
        Ok(ctx)
    }

    /// Build a context with explicit os/arch tokens, for tests and tooling.
    pub fn with_host(os: &str, arch: &str, home_dir: PathBuf) -> Self {
        Self {
            os: os.to_string(),
            arch: arch.to_string(),
            home_dir,
            hostname: "unknown".to_string(),
            username: "unknown".to_string(),
        }
    }
}
