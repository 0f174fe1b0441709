//! Build script generation.
//!
//! Each target build is expressed as a short generated script that changes
//! into the entry-point directory, selects the target via the toolchain's
//! `GOOS`/`GOARCH` environment variables, and invokes `go build` with an
//! explicit output path. Two equivalent templates exist, selected by the
//! host's command shell: POSIX `sh` and Windows batch.

use super::{
    error::{Error, Result},
    target::Target,
};
use handlebars::Handlebars;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::process::Command;

/// POSIX shell build template.
const SH_TEMPLATE: &str = r#"#!/bin/sh
cd "{{source_dir}}"
export GOOS={{target_os}}
export GOARCH={{target_arch}}
go build -o "{{output_path}}" .
"#;

/// Windows batch build template, semantically equivalent to the POSIX one.
const BATCH_TEMPLATE: &str = r#"@echo off
cd "{{source_dir}}"
set GOOS={{target_os}}
set GOARCH={{target_arch}}
go build -o "{{output_path}}" .
"#;

/// File name the rendered script is written under inside the workspace.
pub fn script_file_name() -> &'static str {
    if cfg!(windows) { "build.bat" } else { "build.sh" }
}

/// Renders the build script for one target.
///
/// # Arguments
/// - `source_dir` - Directory containing the entry-point source file
/// - `output_path` - Where the toolchain should place the built binary
/// - `target` - Target OS/architecture to select via the environment
pub fn render_build_script(
    source_dir: &Path,
    output_path: &Path,
    target: &Target,
) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);

    let mut data = BTreeMap::new();
    data.insert("source_dir", source_dir.display().to_string());
    data.insert("target_os", target.os.clone());
    data.insert("target_arch", target.arch.clone());
    data.insert("output_path", output_path.display().to_string());

    let template = if cfg!(windows) {
        BATCH_TEMPLATE
    } else {
        SH_TEMPLATE
    };

    handlebars
        .register_template_string("build", template)
        .map_err(|e| Error::GenericError(format!("failed to register build template: {e}")))?;

    handlebars
        .render("build", &data)
        .map_err(|e| Error::GenericError(format!("failed to render build script: {e}")))
}

/// Command that runs a rendered script through the host's shell.
pub fn shell_command(script_path: &Path) -> Command {
    let mut cmd = if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C");
        cmd
    } else {
        Command::new("/bin/sh")
    };
    cmd.arg(script_path);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_target() -> Target {
        Target::default_matrix().remove(2) // linux-amd64
    }

    #[test]
    fn script_sets_both_target_variables() {
        let script = render_build_script(
            Path::new("/src/demo"),
            Path::new("/tmp/work/linux-amd64"),
            &sample_target(),
        )
        .expect("renders");

        if cfg!(windows) {
            assert!(script.contains("set GOOS=linux"));
            assert!(script.contains("set GOARCH=amd64"));
        } else {
            assert!(script.starts_with("#!/bin/sh"));
            assert!(script.contains("export GOOS=linux"));
            assert!(script.contains("export GOARCH=amd64"));
        }
        assert!(script.contains(r#"cd "/src/demo""#));
        assert!(script.contains(r#"go build -o "/tmp/work/linux-amd64" ."#));
    }

    #[test]
    fn paths_are_not_html_escaped() {
        let script = render_build_script(
            Path::new("/src/a&b"),
            Path::new("/tmp/out"),
            &sample_target(),
        )
        .expect("renders");

        assert!(script.contains("a&b"));
        assert!(!script.contains("&amp;"));
    }
}
