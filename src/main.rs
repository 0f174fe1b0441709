//! Quiver Compiler - cross-platform package compiler for the Quiver runtime.
//!
//! This binary compiles a Go project for multiple target platforms and
//! packages the binaries, static assets, and descriptor into a
//! distributable .quiver archive.

use std::process;

use quiver_compiler::cli;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
