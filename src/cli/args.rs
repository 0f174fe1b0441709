//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with proper
//! validation and error handling.

use clap::Parser;
use std::path::PathBuf;

/// Cross-platform package compiler for the Quiver runtime
#[derive(Parser, Debug)]
#[command(
    name = "quiver-compiler",
    version,
    about = "Cross-platform package compiler producing .quiver archives",
    long_about = "Compiles a Go project for a matrix of target platforms and packages the \
binaries, optional public/ assets, and the package descriptor into a single .quiver archive.

Usage:
  quiver-compiler --input ./my-package --output ./dist
  quiver-compiler --input ./my-package --output ./dist --fast

Exit code 0 = archive guaranteed to exist in the output directory."
)]
pub struct Args {
    /// Directory containing the Go project to compile
    #[arg(short, long, value_name = "DIR")]
    pub input: PathBuf,

    /// Directory where the output .quiver file will be placed
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Only compile for the current platform (faster)
    #[arg(long)]
    pub fast: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if !self.input.exists() {
            return Err(format!(
                "Input directory '{}' does not exist",
                self.input.display()
            ));
        }
        if !self.input.is_dir() {
            return Err(format!(
                "Input path '{}' is not a directory",
                self.input.display()
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_input_directory() {
        let args = Args {
            input: PathBuf::from("/nonexistent/source"),
            output: PathBuf::from("/tmp/out"),
            fast: false,
        };
        assert!(args.validate().is_err());
    }

    #[test]
    fn accepts_existing_input_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let args = Args {
            input: dir.path().to_path_buf(),
            output: PathBuf::from("/tmp/out"),
            fast: true,
        };
        assert!(args.validate().is_ok());
    }
}
