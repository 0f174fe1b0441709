//! Error types for the build pipeline.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building and packaging a source tree.
#[derive(Error, Debug)]
pub enum Error {
    /// Generic pipeline errors
    #[error("{0}")]
    GenericError(String),

    /// IO errors without additional context
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Filesystem operations wrapped with the failing stage's description
    #[error("{context} at {}: {source}", .path.display())]
    FileSystem {
        /// What the pipeline was doing
        context: String,
        /// Path the operation failed on
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// A child process could not be spawned
    #[error("failed to execute {command}: {error}")]
    CommandFailed {
        /// Command that failed
        command: String,
        /// Underlying IO error
        error: std::io::Error,
    },

    /// The external toolchain exited non-zero for a target
    #[error("build for {os}/{arch} failed ({status})\n{output}")]
    BuildFailed {
        /// Target operating system
        os: String,
        /// Target architecture
        arch: String,
        /// Exit status description
        status: String,
        /// Captured stdout and stderr of the toolchain, verbatim
        output: String,
    },

    /// No entry-point source file exists anywhere under the source tree
    #[error("{file} not found in source directory {}", .dir.display())]
    EntrypointNotFound {
        /// Conventional entry-point file name
        file: &'static str,
        /// Source tree that was searched
        dir: PathBuf,
    },

    /// The external build toolchain is not installed
    #[error("go toolchain not found on PATH; install Go to build packages")]
    ToolchainMissing,
}

/// Extension trait attaching stage context to filesystem results.
pub trait ErrorExt<T> {
    /// Wraps an IO error with a description of the failing stage and the
    /// path it failed on.
    fn fs_context(self, context: &str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, std::io::Error> {
    fn fs_context(self, context: &str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::FileSystem {
            context: context.to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::compiler::Error::GenericError(format!($($arg)*)).into())
    };
}
