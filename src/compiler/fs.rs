//! File system utilities for packaging.
//!
//! Provides the recursive asset mirror used to bring a package's static
//! files into the build workspace with their permission bits intact.

use super::error::{Error, Result};
use crate::bail;
use std::io;
use std::path::Path;

/// Makes a symbolic link to a directory.
#[cfg(unix)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a directory.
#[cfg(windows)]
fn symlink_dir(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_dir(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(unix)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

/// Makes a symbolic link to a file.
#[cfg(windows)]
fn symlink_file(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(src, dst)
}

/// Recursively copies a directory from one path to another, creating any
/// parent directories of the destination path as necessary.
///
/// The destination becomes an exact structural mirror of the source: same
/// subdirectory tree, same file contents, and the same permission bits,
/// re-applied explicitly on every copied entry. Symlinks are preserved on
/// platforms that support them. Fails on the first entry that cannot be
/// read, written, or stat'ed; entries already copied are not rolled back.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        bail!("{from:?} does not exist");
    }
    if !from.is_dir() {
        bail!("{from:?} is not a directory");
    }

    // Clone paths for move into blocking closure
    let from = from.to_path_buf();
    let to = to.to_path_buf();

    // Offload blocking work to dedicated thread pool
    tokio::task::spawn_blocking(move || -> Result<()> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)?;
        }

        for entry in walkdir::WalkDir::new(&from).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                Error::GenericError(format!("failed to walk {}: {e}", from.display()))
            })?;
            debug_assert!(entry.path().starts_with(&from));
            let rel_path = entry.path().strip_prefix(&from).map_err(|e| {
                Error::GenericError(format!("failed to relativize {:?}: {e}", entry.path()))
            })?;
            let dest_path = to.join(rel_path);

            if entry.file_type().is_symlink() {
                let target = std::fs::read_link(entry.path())?;
                if entry.path().is_dir() {
                    symlink_dir(&target, &dest_path)?;
                } else {
                    symlink_file(&target, &dest_path)?;
                }
            } else if entry.file_type().is_dir() {
                std::fs::create_dir_all(&dest_path)?;
                mirror_permissions(entry.path(), &dest_path)?;
            } else {
                std::fs::copy(entry.path(), &dest_path)?;
                mirror_permissions(entry.path(), &dest_path)?;
            }
        }

        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Directory copy task panicked: {}", e)))?
}

/// Re-applies the source entry's permission bits on the destination.
///
/// Copies inherit the process umask otherwise, which would drop executable
/// bits on packaged assets.
fn mirror_permissions(src: &Path, dest: &Path) -> io::Result<()> {
    let metadata = std::fs::metadata(src)?;
    std::fs::set_permissions(dest, metadata.permissions())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;

    #[tokio::test]
    async fn mirrors_tree_and_contents() {
        let src = tempfile::tempdir().expect("tempdir");
        let dst = tempfile::tempdir().expect("tempdir");

        std::fs::create_dir_all(src.path().join("sub/inner")).expect("mkdir");
        std::fs::write(src.path().join("top.txt"), b"top").expect("write");
        std::fs::write(src.path().join("sub/inner/leaf.txt"), b"leaf").expect("write");

        let dest = dst.path().join("mirror");
        copy_dir(src.path(), &dest).await.expect("copies");

        assert_eq!(std::fs::read(dest.join("top.txt")).expect("read"), b"top");
        assert_eq!(
            std::fs::read(dest.join("sub/inner/leaf.txt")).expect("read"),
            b"leaf"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn preserves_executable_bits() {
        let src = tempfile::tempdir().expect("tempdir");
        let dst = tempfile::tempdir().expect("tempdir");

        let script = src.path().join("run.sh");
        std::fs::write(&script, b"#!/bin/sh\n").expect("write");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("chmod");

        let dest = dst.path().join("mirror");
        copy_dir(src.path(), &dest).await.expect("copies");

        let mode = std::fs::metadata(dest.join("run.sh"))
            .expect("stat")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[tokio::test]
    async fn rejects_missing_source() {
        let dst = tempfile::tempdir().expect("tempdir");
        let result = copy_dir(Path::new("/nonexistent/assets"), dst.path()).await;
        assert!(result.is_err());
    }
}
