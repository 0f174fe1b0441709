//! Error types for the compiler pipeline.
//!
//! This module defines the top-level error type returned to the CLI, wrapping
//! the layer-specific errors produced by the manifest loader and the build
//! pipeline.

use thiserror::Error;

/// Result type alias for compiler operations
pub type Result<T> = std::result::Result<T, CompilerError>;

/// Main error type for all compiler operations
#[derive(Error, Debug)]
pub enum CompilerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Package descriptor errors
    #[error("failed to load package configuration: {0}")]
    Manifest(#[from] crate::manifest::ManifestError),

    /// Build pipeline errors
    #[error("{0}")]
    Compiler(#[from] crate::compiler::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}
