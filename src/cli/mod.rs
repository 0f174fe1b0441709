//! Command line interface for the quiver compiler.
//!
//! Parses the argument surface, resolves the output archive path from the
//! input directory's base name, and drives one packaging run.

mod args;

pub use args::Args;

use crate::compiler::{ARCHIVE_EXTENSION, Compiler};
use crate::error::{CliError, Result};
use chrono::Local;
use std::path::Path;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();

    println!(
        "Quiver Compiler - {} - {}",
        args.input.display(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    if let Err(reason) = args.validate() {
        return Err(CliError::InvalidArguments { reason }.into());
    }

    tokio::fs::create_dir_all(&args.output).await?;

    let package_name = package_base_name(&args.input)?;
    let output_file = args
        .output
        .join(format!("{package_name}.{ARCHIVE_EXTENSION}"));

    let compiler = Compiler::new(&args.input, &output_file, args.fast);
    let artifact = compiler.run().await?;

    println!("Successfully created {}", artifact.path.display());
    println!(
        "  build number {}, {} bytes, sha256 {}",
        artifact.build_number, artifact.size, artifact.checksum
    );
    if args.fast {
        println!("Note: Built in fast mode - package only works on current platform");
    }

    Ok(0)
}

/// Base name of the input directory, used to name the output archive.
///
/// Canonicalized first so invocations like `--input .` still resolve to the
/// project directory's real name.
fn package_base_name(input: &Path) -> Result<String> {
    let canonical = std::fs::canonicalize(input)?;

    canonical
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
        .ok_or_else(|| {
            CliError::InvalidArguments {
                reason: format!("cannot derive a package name from '{}'", input.display()),
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_is_named_after_the_input_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let project = dir.path().join("arrow-server");
        std::fs::create_dir(&project).expect("mkdir");

        let name = package_base_name(&project).expect("derives name");
        assert_eq!(name, "arrow-server");
    }
}
