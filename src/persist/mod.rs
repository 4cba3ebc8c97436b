//! Persistence layer for variable values.
//!
//! Provides RON-based save/load of a name -> value snapshot. Values are stored
//! as the text the console would accept, so applying a snapshot goes through
//! the same parsing as a typed command line.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{CommandArgsRegistry, hash_name};

/// Default snapshot file name.
pub const DEFAULT_SNAPSHOT_FILE: &str = "console_vars.ron";

/// Serializable variable values, keyed by registered name.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ArgsSnapshot {
    /// Variable values (name -> console text).
    #[serde(default)]
    pub vars: BTreeMap<String, String>,
}

impl ArgsSnapshot {
    /// Create a new empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot from a RON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        ron::from_str(&contents).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save the snapshot to a RON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let path = path.as_ref();

        // Create parent directories if needed
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SnapshotError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        let contents = ron::ser::to_string_pretty(self, pretty)?;

        fs::write(path, contents).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load a snapshot from file, returning an empty one on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

/// Errors that can occur during snapshot operations.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error for '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error for '{}'", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("serialization error")]
    Serialize(#[from] ron::Error),
}

/// Capture every variable's current value.
pub fn snapshot(registry: &CommandArgsRegistry) -> ArgsSnapshot {
    ArgsSnapshot {
        vars: registry
            .vars()
            .map(|(name, var)| (name.to_string(), var.to_string()))
            .collect(),
    }
}

/// Assign snapshot values back by name.
///
/// Returns the number of values applied. Names that are not registered
/// variables are skipped.
pub fn apply_snapshot(snapshot: &ArgsSnapshot, registry: &mut CommandArgsRegistry) -> usize {
    let mut applied = 0;
    for (name, value) in &snapshot.vars {
        if registry.assign(hash_name(name), value) {
            debug!("Loaded convar: {} = \"{}\"", name, value);
            applied += 1;
        } else {
            warn!("Console: Snapshot names unknown variable '{}'", name);
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ArgTokenizer, RegistryBuilder};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn registry() -> CommandArgsRegistry {
        let mut builder = RegistryBuilder::new();
        builder.register_var("g_testInteger", 0);
        builder.register_var("g_EnableExtraLogging", false);
        builder.register_var("g_TestFloat", 0.0f32);
        builder.register_var("g_UserStringPrefix", "user");
        builder.register_cmd("SetPlayerPosition", |_: &mut ArgTokenizer| 1);
        builder.build()
    }

    #[test]
    fn test_snapshot_captures_vars_only() {
        let mut registry = registry();
        registry.execute("g_TestFloat 3.5");

        let snap = snapshot(&registry);
        assert_eq!(snap.vars.len(), 4);
        assert_eq!(snap.vars.get("g_TestFloat").map(String::as_str), Some("3.5"));
        assert_eq!(
            snap.vars.get("g_UserStringPrefix").map(String::as_str),
            Some("user")
        );
        assert!(!snap.vars.contains_key("SetPlayerPosition"));
    }

    #[test]
    fn test_snapshot_file_roundtrip() {
        let mut source = registry();
        source.execute("g_testInteger 12");
        source.execute("g_EnableExtraLogging");
        source.execute("g_UserStringPrefix line one\tand tab");

        let temp = NamedTempFile::new().unwrap();
        snapshot(&source).save(temp.path()).unwrap();

        let loaded = ArgsSnapshot::load(temp.path()).unwrap();
        let mut target = registry();
        assert_eq!(apply_snapshot(&loaded, &mut target), 4);
        assert_eq!(snapshot(&target), snapshot(&source));
        assert_eq!(
            target.get_str(hash_name("g_UserStringPrefix")),
            "line one\tand tab"
        );
    }

    #[test]
    fn test_apply_skips_unknown_and_commands() {
        let mut snap = ArgsSnapshot::new();
        snap.vars.insert("missing".into(), "1".into());
        snap.vars.insert("SetPlayerPosition".into(), "1 2 3".into());
        snap.vars.insert("G_TESTINTEGER".into(), "9".into());

        let mut registry = registry();
        assert_eq!(apply_snapshot(&snap, &mut registry), 1);
        assert_eq!(registry.get_int(hash_name("g_testInteger")), 9);
    }

    #[test]
    fn test_snapshot_load_missing() {
        let result = ArgsSnapshot::load("nonexistent_file.ron");
        assert!(matches!(result, Err(SnapshotError::Io { .. })));
        assert!(ArgsSnapshot::load_or_default("nonexistent_file.ron").vars.is_empty());
    }

    #[test]
    fn test_snapshot_parse_ron() {
        let ron_content = r#"(
    vars: {
        "g_TestFloat": "800",
        "g_EnableExtraLogging": "true",
    },
)"#;

        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(ron_content.as_bytes()).unwrap();
        temp.flush().unwrap();

        let snap = ArgsSnapshot::load(temp.path()).unwrap();
        let mut registry = registry();
        assert_eq!(apply_snapshot(&snap, &mut registry), 2);
        assert_eq!(registry.get_float(hash_name("g_TestFloat")), 800.0);
        assert!(registry.get_bool(hash_name("g_EnableExtraLogging")));
    }

    #[test]
    fn test_snapshot_parse_error() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"(vars: {").unwrap();
        temp.flush().unwrap();

        let result = ArgsSnapshot::load(temp.path());
        assert!(matches!(result, Err(SnapshotError::Parse { .. })));
    }
}
