//! Crate-level error types for classdoc.

use std::path::PathBuf;

/// All errors in classdoc carry enough context to produce a useful diagnostic
/// without a debugger. Each variant names the file, entity, or reason for failure.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No indexed entity matches the requested name.
    #[error("unknown entity: `{name}`")]
    EntityNotFound {
        /// Qualified or short name that was looked up.
        name: String,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization failed.
    #[error("json serialize: {0}")]
    JsonSer(
        /// The wrapped serde_json error.
        #[from]
        serde_json::Error,
    ),

    /// Tree-sitter could not be set up for PHP parsing.
    #[error("parse failed: {}: {reason}", file.display())]
    ParseFailed {
        /// File that failed to parse.
        file: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// A rendered document could not be persisted.
    #[error("sink write failed: {}: {reason}", path.display())]
    SinkWrite {
        /// Destination path of the failed write.
        path: PathBuf,
        /// Description of the write failure.
        reason: String,
    },

    /// The configured source root does not exist on disk.
    #[error("source root not found: {}", path.display())]
    SourceRootNotFound {
        /// Path to the missing source root.
        path: PathBuf,
    },

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),
}
