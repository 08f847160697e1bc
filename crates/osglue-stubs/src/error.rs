//! Error types for stub generation and repair.

/// Errors arising from the stub pipeline.
///
/// Only `ToolUnavailable` is fatal to the CLI entry point; every other
/// variant is isolated to one document or one module and reported without
/// aborting the batch.
#[derive(Debug, thiserror::Error)]
pub enum StubError {
    /// A stub document could not be read.
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    /// A stub document could not be written back.
    #[error("failed to write {path}: {message}")]
    Write { path: String, message: String },

    /// A stub directory could not be listed.
    #[error("failed to list stub directory {path}: {message}")]
    ListDir { path: String, message: String },

    /// The external generation tool could not be made available.
    #[error("stub generation tool unavailable: {0}")]
    ToolUnavailable(String),

    /// A subprocess could not be spawned.
    #[error("failed to invoke {command}: {message}")]
    Spawn { command: String, message: String },
}

impl StubError {
    pub fn read(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.display().to_string(),
            message: message.into(),
        }
    }

    pub fn write(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::Write {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}
