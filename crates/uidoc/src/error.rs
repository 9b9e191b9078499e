use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for documentation operations.
pub type Result<T> = std::result::Result<T, DocgenError>;

/// Error variants for component documentation extraction.
#[derive(Debug, Error)]
pub enum DocgenError {
    /// Failed to read or access a source file.
    #[error("failed to read source '{path}': {error}")]
    Io {
        /// Path to the source file that caused the error.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        error: std::io::Error,
    },

    /// Parsing the source file with OXC failed.
    #[error("failed to parse source '{path}': {message}")]
    Parse {
        /// Path to the source file.
        path: PathBuf,
        /// Aggregated parser error message.
        message: String,
    },

    /// No resolver found a component definition in the file.
    #[error("no component definition found in '{path}'")]
    MissingDefinition {
        /// Path to the source file.
        path: PathBuf,
    },

    /// A single-definition resolver found more than one exported component.
    #[error("found {found} component definitions in '{path}' but the resolver allows {limit}")]
    MultipleDefinitions {
        /// Path to the source file.
        path: PathBuf,
        /// Number of definitions discovered when the limit was exceeded.
        found: usize,
        /// Configured definition limit.
        limit: usize,
    },
}

impl DocgenError {
    /// Helper to create a parse error from multiple diagnostic strings.
    pub fn parse_error(path: PathBuf, diagnostics: &[String]) -> Self {
        let message = diagnostics.join("; ");
        Self::Parse { path, message }
    }
}
