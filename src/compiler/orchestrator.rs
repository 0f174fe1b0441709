//! Main pipeline orchestration and coordination.
//!
//! This module provides the [`Compiler`] orchestrator that sequences a
//! packaging run: manifest validation, build-number injection, per-target
//! builds through the external toolchain, asset copying, manifest
//! persistence, and final archive assembly.

use super::{
    archive, checksum,
    error::{Error, ErrorExt, Result},
    fs, script,
    target::Target,
    toolchain,
};
use crate::manifest::{DESCRIPTOR_FILE_NAME, Manifest};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Conventional entry-point file name the toolchain builds from.
pub const ENTRYPOINT_FILE_NAME: &str = "main.go";

/// Conventional static-asset subdirectory mirrored into the archive.
pub const ASSETS_DIR_NAME: &str = "public";

/// File extension of the produced archive.
pub const ARCHIVE_EXTENSION: &str = "quiver";

/// A successfully produced package archive.
#[derive(Debug, Clone)]
pub struct PackagedArtifact {
    /// Where the archive was written
    pub path: PathBuf,
    /// Build number injected into the packaged descriptor
    pub build_number: String,
    /// Archive size in bytes
    pub size: u64,
    /// Hex-encoded SHA-256 of the archive
    pub checksum: String,
}

/// Main pipeline orchestrator.
///
/// Owns one packaging run from source tree to `.quiver` archive. Every step
/// is strictly sequential; the first failure aborts the run, and no archive
/// is produced unless every step succeeded.
///
/// # Examples
///
/// ```no_run
/// use quiver_compiler::compiler::Compiler;
///
/// # async fn example() -> quiver_compiler::Result<()> {
/// let compiler = Compiler::new("./my-package", "./out/my-package.quiver", true);
/// let artifact = compiler.run().await?;
/// println!("created {}", artifact.path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Compiler {
    source_dir: PathBuf,
    output_file: PathBuf,
    targets: Vec<Target>,
    fast_mode: bool,
}

impl Compiler {
    /// Creates a compiler for one packaging run.
    ///
    /// # Arguments
    ///
    /// * `source_dir` - Directory containing the project to package
    /// * `output_file` - Path the finished archive is written to
    /// * `fast_mode` - Build only for the running host instead of the full
    ///   target matrix
    pub fn new(
        source_dir: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
        fast_mode: bool,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_file: output_file.into(),
            targets: Target::resolve(fast_mode),
            fast_mode,
        }
    }

    /// Targets this run will build, in build order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Whether this run builds for the host only.
    pub fn fast_mode(&self) -> bool {
        self.fast_mode
    }

    /// Executes the packaging run.
    ///
    /// Steps run in fixed order: validate the manifest, inject the build
    /// number, prepare the scoped workspace, locate the entry point, build
    /// every target sequentially, mirror static assets, persist the
    /// descriptor, and assemble the archive. The workspace is removed on
    /// every exit path; the output archive exists only on success.
    pub async fn run(&self) -> crate::error::Result<PackagedArtifact> {
        let mut manifest = Manifest::load(&self.source_dir)?;

        let build_number = manifest.assign_build_number();
        log::info!("Generated build number: {build_number}");

        // The TempDir guard removes the workspace when it drops, covering
        // every later failure path as well as success.
        let workspace = tempfile::Builder::new()
            .prefix("quiver-compiler-")
            .tempdir()
            .map_err(|source| Error::FileSystem {
                context: "creating build workspace".to_string(),
                path: std::env::temp_dir(),
                source,
            })?;

        let entrypoint = locate_entrypoint(&self.source_dir).await?;
        log::debug!("Entry point: {}", entrypoint.display());

        if !*toolchain::HAS_GO {
            return Err(Error::ToolchainMissing.into());
        }

        for target in &self.targets {
            self.build_target(workspace.path(), &entrypoint, target)
                .await?;
        }

        // The rendered script is a build tool, not package content; the
        // archive holds only binaries, assets, and the descriptor.
        let script_path = workspace.path().join(script::script_file_name());
        tokio::fs::remove_file(&script_path)
            .await
            .fs_context("removing build script", &script_path)?;

        let assets_dir = self.source_dir.join(ASSETS_DIR_NAME);
        if assets_dir.is_dir() {
            log::info!("Copying {ASSETS_DIR_NAME}/ assets");
            fs::copy_dir(&assets_dir, &workspace.path().join(ASSETS_DIR_NAME)).await?;
        }

        manifest
            .save(&workspace.path().join(DESCRIPTOR_FILE_NAME))
            .map_err(|e| {
                Error::GenericError(format!("failed to save updated package descriptor: {e}"))
            })?;

        if let Err(e) = archive::create_archive(workspace.path(), &self.output_file).await {
            // A failed assembly must not leave a partial archive behind.
            let _ = tokio::fs::remove_file(&self.output_file).await;
            return Err(e.into());
        }

        let size = tokio::fs::metadata(&self.output_file)
            .await
            .fs_context("reading archive metadata", &self.output_file)?
            .len();
        let checksum = checksum::calculate_sha256(&self.output_file).await?;

        Ok(PackagedArtifact {
            path: self.output_file.clone(),
            build_number,
            size,
            checksum,
        })
    }

    /// Builds one target by rendering its build script into the workspace
    /// and running it through the host shell.
    ///
    /// Waits synchronously for the toolchain to exit. A non-zero exit aborts
    /// the whole run with the captured process output attached.
    async fn build_target(
        &self,
        workspace: &Path,
        entrypoint: &Path,
        target: &Target,
    ) -> Result<()> {
        log::info!("Compiling for {}/{}...", target.os, target.arch);

        let entry_dir = entrypoint.parent().unwrap_or(&self.source_dir);
        let output_path = workspace.join(&target.artifact);
        let script_text = script::render_build_script(entry_dir, &output_path, target)?;

        let script_path = workspace.join(script::script_file_name());
        tokio::fs::write(&script_path, &script_text)
            .await
            .fs_context("writing build script", &script_path)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&script_path, std::fs::Permissions::from_mode(0o755))
                .await
                .fs_context("marking build script executable", &script_path)?;
        }

        let output = script::shell_command(&script_path)
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: script_path.display().to_string(),
                error,
            })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(Error::BuildFailed {
                os: target.os.clone(),
                arch: target.arch.clone(),
                status: output.status.to_string(),
                output: combined,
            });
        }

        log::debug!(
            "Built {}/{} into {}",
            target.os,
            target.arch,
            output_path.display()
        );
        Ok(())
    }
}

/// Finds the entry-point source file under `source_dir`.
///
/// Walks the tree in lexical file-name order and short-circuits on the first
/// match, so discovery does not depend on the filesystem's incidental
/// listing order.
async fn locate_entrypoint(source_dir: &Path) -> Result<PathBuf> {
    let dir = source_dir.to_path_buf();

    tokio::task::spawn_blocking(move || -> Result<PathBuf> {
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = entry
                .map_err(|e| Error::GenericError(format!("failed to walk {}: {e}", dir.display())))?;

            if entry.file_type().is_file()
                && entry.file_name() == OsStr::new(ENTRYPOINT_FILE_NAME)
            {
                return Ok(entry.into_path());
            }
        }

        Err(Error::EntrypointNotFound {
            file: ENTRYPOINT_FILE_NAME,
            dir,
        })
    })
    .await
    .map_err(|e| Error::GenericError(format!("Entry point search task panicked: {}", e)))?
}
