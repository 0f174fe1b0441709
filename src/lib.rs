//! Cross-platform package compiler for the Quiver runtime.
//!
//! This library turns a Go source project into a distributable `.quiver`
//! archive: it validates the project's JSON package descriptor, cross-builds
//! the project for a matrix of target platforms via the external `go`
//! toolchain, stamps the descriptor with a traceability build number, and
//! bundles binaries, optional static assets, and the descriptor into a
//! single gzip-compressed archive.
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod compiler;
pub mod error;
pub mod manifest;

// Re-export commonly used types
pub use error::{CliError, CompilerError, Result};
