//! Build target matrix.
//!
//! A target is one (operating system, architecture) variant together with the
//! artifact name its binary gets inside the archive. The full matrix is a
//! fixed set of six targets; fast mode collapses it to the running host.

use std::env;

/// One platform build variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Operating system in the toolchain's vocabulary (`GOOS`)
    pub os: String,
    /// Architecture in the toolchain's vocabulary (`GOARCH`)
    pub arch: String,
    /// File name of the produced binary inside the archive
    pub artifact: String,
}

impl Target {
    fn new(os: &str, arch: &str, artifact: &str) -> Self {
        Self {
            os: os.to_string(),
            arch: arch.to_string(),
            artifact: artifact.to_string(),
        }
    }

    /// The fixed six-target matrix used for full builds, independent of the
    /// host the compiler runs on.
    pub fn default_matrix() -> Vec<Target> {
        vec![
            Target::new("windows", "amd64", "win-amd64.exe"),
            Target::new("windows", "386", "win-386.exe"),
            Target::new("linux", "amd64", "linux-amd64"),
            Target::new("linux", "386", "linux-386"),
            Target::new("darwin", "amd64", "darwin-amd64"),
            Target::new("darwin", "arm64", "darwin-arm64"),
        ]
    }

    /// The single target describing the machine the compiler is running on.
    ///
    /// Used in fast mode, where only a host-native binary is produced.
    pub fn host() -> Target {
        let os = toolchain_os(env::consts::OS);
        let arch = toolchain_arch(env::consts::ARCH);

        let artifact = if os == "windows" {
            format!("win-{arch}.exe")
        } else {
            format!("{os}-{arch}")
        };

        Target {
            os: os.to_string(),
            arch: arch.to_string(),
            artifact,
        }
    }

    /// Resolves the target list for a run: the host alone in fast mode, the
    /// full matrix otherwise.
    pub fn resolve(fast_mode: bool) -> Vec<Target> {
        if fast_mode {
            vec![Target::host()]
        } else {
            Target::default_matrix()
        }
    }
}

/// Maps Rust's OS names onto the toolchain's `GOOS` values.
fn toolchain_os(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        other => other,
    }
}

/// Maps Rust's architecture names onto the toolchain's `GOARCH` values.
fn toolchain_arch(arch: &str) -> &str {
    match arch {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_matrix_has_six_fixed_targets() {
        let matrix = Target::default_matrix();
        assert_eq!(matrix.len(), 6);

        let artifacts: Vec<&str> = matrix.iter().map(|t| t.artifact.as_str()).collect();
        assert_eq!(
            artifacts,
            [
                "win-amd64.exe",
                "win-386.exe",
                "linux-amd64",
                "linux-386",
                "darwin-amd64",
                "darwin-arm64",
            ]
        );
    }

    #[test]
    fn windows_targets_carry_exe_suffix() {
        for target in Target::default_matrix() {
            assert_eq!(target.os == "windows", target.artifact.ends_with(".exe"));
        }
    }

    #[test]
    fn fast_mode_resolves_to_the_host_alone() {
        let targets = Target::resolve(true);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0], Target::host());

        assert_eq!(Target::resolve(false).len(), 6);
    }

    #[test]
    fn host_target_speaks_the_toolchain_vocabulary() {
        let host = Target::host();
        assert_ne!(host.os, "macos");
        assert_ne!(host.arch, "x86_64");
        assert!(!host.artifact.is_empty());
    }
}
