//! Build-and-package pipeline.
//!
//! # Overview
//!
//! The pipeline:
//! 1. Loads and validates the package descriptor via [`crate::manifest`]
//! 2. Injects a traceability build number
//! 3. Cross-builds the project for every [`Target`] through the external
//!    `go` toolchain, one target at a time
//! 4. Mirrors optional static assets into the workspace
//! 5. Persists the descriptor and serializes the workspace into a
//!    gzip-compressed `.quiver` archive
//!
//! # Module Organization
//!
//! - [`error`] - Pipeline error types and filesystem error context
//! - [`orchestrator`] - The [`Compiler`] state machine
//! - [`target`] - The platform target matrix
//! - `script` - Generated toolchain build scripts
//! - `toolchain` - External toolchain availability checking
//! - `archive` - Workspace serialization into the archive format
//! - `fs` - Recursive asset mirroring
//! - `checksum` - SHA-256 checksums for produced archives

mod archive;
mod checksum;
pub mod error;
mod fs;
mod orchestrator;
mod script;
mod target;
mod toolchain;

pub use error::{Error, ErrorExt, Result};
pub use orchestrator::{
    ARCHIVE_EXTENSION, ASSETS_DIR_NAME, Compiler, ENTRYPOINT_FILE_NAME, PackagedArtifact,
};
pub use target::Target;
