//! Package descriptor loading, validation, and persistence.
//!
//! Every package ships a single JSON descriptor at the top level of its
//! source tree. The loader reads and parses it exactly once, validates the
//! required identity fields, and later writes the descriptor (with the
//! injected build number) back into the build workspace as `package.json`.

mod build_number;

pub use build_number::generate_build_number;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name the descriptor is persisted under inside the workspace and the
/// final archive.
pub const DESCRIPTOR_FILE_NAME: &str = "package.json";

/// Extension recognized when discovering the descriptor in a source tree.
const DESCRIPTOR_EXTENSION: &str = "json";

/// Errors produced while discovering, parsing, or validating a descriptor.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No descriptor file exists at the top level of the source tree
    #[error("no JSON package descriptor found in {}", .0.display())]
    NotFound(PathBuf),

    /// More than one descriptor candidate exists; the package must carry
    /// exactly one
    #[error("multiple JSON package descriptors found in {}: {}", .dir.display(), .candidates.join(", "))]
    Ambiguous {
        /// Directory that was scanned
        dir: PathBuf,
        /// Candidate file names, in lexical order
        candidates: Vec<String>,
    },

    /// Reading the source directory or descriptor file failed
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Path that failed to read
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// The descriptor is not well-formed JSON
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// Descriptor path
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// A required identity field is absent or empty
    #[error("missing required field '{field}' in {}", .path.display())]
    MissingField {
        /// Name of the missing field
        field: &'static str,
        /// Descriptor path
        path: PathBuf,
    },

    /// Serializing the descriptor for persistence failed
    #[error("failed to serialize package descriptor: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Writing the descriptor into the workspace failed
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Destination path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },
}

/// Network bridge limits advertised by a package.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct NetBridge {
    /// Maximum number of ports the host may allocate for the package
    #[serde(rename = "maxports", default, skip_serializing_if = "Option::is_none")]
    pub max_ports: Option<u32>,
}

/// Identity and versioning record for a package.
///
/// Required fields default to empty on deserialization so that their absence
/// is reported by [`Manifest::validate`] as a field-named error rather than a
/// generic parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    /// Canonical package URL
    #[serde(default)]
    pub url: String,

    /// Human-readable package name
    #[serde(default)]
    pub name: String,

    /// Package version string
    #[serde(default)]
    pub version: String,

    /// Package maintainers, at least one required
    #[serde(default)]
    pub maintainers: Vec<String>,

    /// Optional icon reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Optional network bridge limits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub netbridge: Option<NetBridge>,

    /// Traceability build number, absent until injected at package time
    #[serde(rename = "buildNumber", default, skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,
}

impl Manifest {
    /// Loads and validates the descriptor from the top level of `source_dir`.
    ///
    /// Discovery is a non-recursive scan for `*.json` regular files in
    /// lexical file-name order. Exactly one candidate must exist.
    pub fn load(source_dir: &Path) -> Result<Self, ManifestError> {
        let path = discover_descriptor(source_dir)?;

        let data = std::fs::read(&path).map_err(|source| ManifestError::Read {
            path: path.clone(),
            source,
        })?;

        let manifest: Manifest =
            serde_json::from_slice(&data).map_err(|source| ManifestError::Parse {
                path: path.clone(),
                source,
            })?;

        manifest.validate(&path)?;
        Ok(manifest)
    }

    /// Checks the required identity fields in fixed order: url, name,
    /// version, maintainers. The first absent or empty field fails the load.
    pub fn validate(&self, path: &Path) -> Result<(), ManifestError> {
        let missing = |field| ManifestError::MissingField {
            field,
            path: path.to_path_buf(),
        };

        if self.url.is_empty() {
            return Err(missing("url"));
        }
        if self.name.is_empty() {
            return Err(missing("name"));
        }
        if self.version.is_empty() {
            return Err(missing("version"));
        }
        if self.maintainers.is_empty() {
            return Err(missing("maintainers"));
        }
        Ok(())
    }

    /// Generates a build number and records it on the manifest.
    ///
    /// Called exactly once per packaging run.
    pub fn assign_build_number(&mut self) -> String {
        let number = generate_build_number();
        self.build_number = Some(number.clone());
        number
    }

    /// Persists the descriptor as indented JSON at `path`.
    pub fn save(&self, path: &Path) -> Result<(), ManifestError> {
        let data = serde_json::to_vec_pretty(self).map_err(ManifestError::Serialize)?;

        std::fs::write(path, data).map_err(|source| ManifestError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Locates the single JSON descriptor at the top level of `source_dir`.
///
/// Candidates are sorted by file name so discovery does not depend on the
/// filesystem's incidental listing order.
fn discover_descriptor(source_dir: &Path) -> Result<PathBuf, ManifestError> {
    let entries = std::fs::read_dir(source_dir).map_err(|source| ManifestError::Read {
        path: source_dir.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| ManifestError::Read {
            path: source_dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        let is_descriptor = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(DESCRIPTOR_EXTENSION));
        if is_descriptor {
            candidates.push(path);
        }
    }

    candidates.sort();

    match candidates.len() {
        0 => Err(ManifestError::NotFound(source_dir.to_path_buf())),
        1 => Ok(candidates.remove(0)),
        _ => Err(ManifestError::Ambiguous {
            dir: source_dir.to_path_buf(),
            candidates: candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_manifest() -> Manifest {
        Manifest {
            url: "rabbyte.dev/packages/demo".into(),
            name: "demo".into(),
            version: "1.0.0".into(),
            maintainers: vec!["dev@rabbyte.dev".into()],
            ..Default::default()
        }
    }

    #[test]
    fn validates_minimal_manifest() {
        let manifest = minimal_manifest();
        assert!(manifest.validate(Path::new("package.json")).is_ok());
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let path = Path::new("package.json");
        let cases: [(&str, Box<dyn Fn(&mut Manifest)>); 4] = [
            ("url", Box::new(|m| m.url.clear())),
            ("name", Box::new(|m| m.name.clear())),
            ("version", Box::new(|m| m.version.clear())),
            ("maintainers", Box::new(|m| m.maintainers.clear())),
        ];

        for (field, strip) in cases {
            let mut manifest = minimal_manifest();
            strip(&mut manifest);
            match manifest.validate(path) {
                Err(ManifestError::MissingField { field: reported, .. }) => {
                    assert_eq!(reported, field)
                }
                other => panic!("expected missing '{field}', got {other:?}"),
            }
        }
    }

    #[test]
    fn absent_fields_deserialize_to_empty() {
        let manifest: Manifest = serde_json::from_str("{}").expect("empty object parses");
        assert!(manifest.url.is_empty());
        assert!(manifest.maintainers.is_empty());
        assert!(manifest.build_number.is_none());
    }

    #[test]
    fn build_number_is_omitted_until_assigned() {
        let mut manifest = minimal_manifest();
        let before = serde_json::to_string(&manifest).expect("serializes");
        assert!(!before.contains("buildNumber"));

        let number = manifest.assign_build_number();
        let after = serde_json::to_string(&manifest).expect("serializes");
        assert!(after.contains(&format!("\"buildNumber\":\"{number}\"")));
    }

    #[test]
    fn netbridge_round_trips() {
        let input = r#"{
            "url": "rabbyte.dev/packages/demo",
            "name": "demo",
            "version": "1.0.0",
            "maintainers": ["dev@rabbyte.dev"],
            "netbridge": { "maxports": 4 }
        }"#;

        let manifest: Manifest = serde_json::from_str(input).expect("parses");
        assert_eq!(manifest.netbridge.and_then(|n| n.max_ports), Some(4));
    }

    #[test]
    fn discovery_requires_exactly_one_descriptor() {
        let dir = tempfile::tempdir().expect("tempdir");

        assert!(matches!(
            discover_descriptor(dir.path()),
            Err(ManifestError::NotFound(_))
        ));

        std::fs::write(dir.path().join("b.json"), "{}").expect("write");
        let found = discover_descriptor(dir.path()).expect("single candidate");
        assert_eq!(found.file_name().and_then(|n| n.to_str()), Some("b.json"));

        std::fs::write(dir.path().join("a.json"), "{}").expect("write");
        match discover_descriptor(dir.path()) {
            Err(ManifestError::Ambiguous { candidates, .. }) => {
                assert_eq!(candidates, vec!["a.json".to_string(), "b.json".to_string()])
            }
            other => panic!("expected ambiguity error, got {other:?}"),
        }
    }
}
