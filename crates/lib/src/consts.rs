//! Contract constants.
//!
//! The artifact file names are read by downstream consumers (a local HTTPS
//! server picks up `localhost.pem` / `localhost-key.pem` directly), so they
//! are part of the external interface and never derived.

/// Root CA certificate file name.
pub const ROOT_CERT_FILE: &str = "rootCA.pem";

/// Root CA private key file name.
pub const ROOT_KEY_FILE: &str = "rootCA-key.pem";

/// Leaf certificate file name.
pub const LEAF_CERT_FILE: &str = "localhost.pem";

/// Leaf private key file name.
pub const LEAF_KEY_FILE: &str = "localhost-key.pem";

/// Names the issued leaf certificate covers.
pub const LEAF_NAMES: [&str; 3] = ["localhost", "127.0.0.1", "::1"];

/// Environment variable the certificate tool reads to locate/create its CA.
pub const CAROOT_ENV: &str = "CAROOT";

/// Base name of the bundled certificate tool.
pub const TOOL_NAME: &str = "mkcert";

/// Pinned version of the bundled certificate tool binaries.
pub const TOOL_VERSION: &str = "v1.4.4";
