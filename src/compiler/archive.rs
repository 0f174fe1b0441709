//! Package archive assembly.
//!
//! Serializes a completed build workspace into the final `.quiver` file: a
//! gzip-compressed tar stream holding every workspace entry under its path
//! relative to the workspace root. Entry headers carry the relative path,
//! the entry type, and the permission bits; no other metadata is promised.

use super::error::{Error, ErrorExt, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::path::Path;
use walkdir::WalkDir;

/// Serializes the `source_dir` tree into a gzip-compressed tar archive at
/// `output_path`.
///
/// The tree is walked in lexical file-name order, excluding the root itself,
/// so archives built from identical trees list their entries identically.
pub async fn create_archive(source_dir: &Path, output_path: &Path) -> Result<()> {
    let source_dir = source_dir.to_path_buf();
    let output_path = output_path.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<()> {
        let file = std::fs::File::create(&output_path)
            .fs_context("creating archive file", &output_path)?;
        let encoder = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(encoder);

        for entry in WalkDir::new(&source_dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                Error::GenericError(format!("failed to walk {}: {e}", source_dir.display()))
            })?;

            let rel_path = entry.path().strip_prefix(&source_dir).map_err(|e| {
                Error::GenericError(format!("failed to relativize {:?}: {e}", entry.path()))
            })?;

            if entry.file_type().is_dir() {
                builder
                    .append_dir(rel_path, entry.path())
                    .fs_context("archiving directory", entry.path())?;
            } else {
                builder
                    .append_path_with_name(entry.path(), rel_path)
                    .fs_context("archiving file", entry.path())?;
            }
        }

        let encoder = builder
            .into_inner()
            .fs_context("finalizing archive", &output_path)?;
        encoder
            .finish()
            .fs_context("compressing archive", &output_path)?;

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Archive task panicked: {}", e)))?
}
