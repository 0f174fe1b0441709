//! External toolchain detection.
//!
//! The compiler shells out to the Go toolchain for every target build.
//! Availability is checked once up front so a missing installation surfaces
//! as an actionable error instead of a raw process-spawn failure mid-run.

use std::sync::LazyLock;

/// Check if the `go` toolchain is available for target builds.
///
/// Cached result to avoid repeated subprocess calls during packaging.
pub static HAS_GO: LazyLock<bool> = LazyLock::new(|| match which::which("go") {
    Ok(path) => {
        log::debug!("Found go at: {}", path.display());

        match std::process::Command::new(&path).arg("version").output() {
            Ok(output) if output.status.success() => {
                let version = String::from_utf8_lossy(&output.stdout);
                log::info!("go toolchain available: {}", version.trim());
                true
            }
            Ok(output) => {
                log::warn!(
                    "go found at {} but the version check failed (exit code: {:?}). \
                         Stderr: {}",
                    path.display(),
                    output.status.code(),
                    String::from_utf8_lossy(&output.stderr)
                );
                false
            }
            Err(e) => {
                log::warn!(
                    "go found at {} but failed to execute: {}. \
                         Check file permissions.",
                    path.display(),
                    e
                );
                false
            }
        }
    }
    Err(e) => {
        log::debug!("go not found in PATH: {}", e);
        false
    }
});
