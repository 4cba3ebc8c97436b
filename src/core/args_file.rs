//! Args-file ingestion and write-back.
//!
//! An args file is plain text with one command line per line. There is no
//! comment, quoting or continuation syntax. Empty lines are skipped and every
//! other line goes through [`CommandArgsRegistry::execute`] in order. Bytes
//! that are not UTF-8 are replaced with U+FFFD, so the rest of the file still
//! applies.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy::log::{info, warn};
use thiserror::Error;

use super::{CommandArgsRegistry, is_delimiter};

/// Errors that can occur while reading or writing an args file.
#[derive(Error, Debug)]
pub enum ArgsFileError {
    #[error("failed to read args file '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write args file '{}'", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Counts from one ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArgsFileSummary {
    /// Non-empty lines dispatched.
    pub lines: usize,
    /// Lines that returned a non-zero status.
    pub applied: usize,
}

/// Dispatch each non-empty line of `text` in order.
pub fn execute_lines(registry: &mut CommandArgsRegistry, text: &str) -> ArgsFileSummary {
    let mut summary = ArgsFileSummary::default();
    for line in text.lines().filter(|line| !line.is_empty()) {
        summary.lines += 1;
        if registry.execute(line) != 0 {
            summary.applied += 1;
        }
    }
    summary
}

/// Read an args file and dispatch its lines.
///
/// # Examples
///
/// ```no_run
/// use bevy_console_args::core::{RegistryBuilder, load_args_file};
///
/// let mut builder = RegistryBuilder::new();
/// builder.register_var("g_TestFloat", 0.0f32);
/// let mut registry = builder.build();
///
/// let summary = load_args_file(&mut registry, "args.txt")?;
/// println!("{} of {} lines applied", summary.applied, summary.lines);
/// # Ok::<(), bevy_console_args::core::ArgsFileError>(())
/// ```
pub fn load_args_file(
    registry: &mut CommandArgsRegistry,
    path: impl AsRef<Path>,
) -> Result<ArgsFileSummary, ArgsFileError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ArgsFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let text = String::from_utf8_lossy(&bytes);
    if let Cow::Owned(_) = text {
        warn!(
            "Console: '{}' is not valid UTF-8, replacing bad bytes",
            path.display()
        );
    }

    let summary = execute_lines(registry, &text);
    info!(
        "Console: Applied {} of {} lines from '{}'",
        summary.applied,
        summary.lines,
        path.display()
    );
    Ok(summary)
}

/// Ingest the args file named by the first argument after the program name.
///
/// Returns `Ok(None)` when no path was given.
pub fn setup_from_args<I, S>(
    registry: &mut CommandArgsRegistry,
    args: I,
) -> Result<Option<ArgsFileSummary>, ArgsFileError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<Path>,
{
    match args.into_iter().nth(1) {
        Some(path) => load_args_file(registry, path).map(Some),
        None => Ok(None),
    }
}

/// Write every variable as a `name value` line, sorted by name.
///
/// Loading the written file restores the same values. String values with a
/// line break or a leading delimiter cannot be replayed and are left out.
pub fn write_args_file(
    registry: &CommandArgsRegistry,
    path: impl AsRef<Path>,
) -> Result<(), ArgsFileError> {
    let path = path.as_ref();

    let mut vars: Vec<_> = registry.vars().collect();
    vars.sort_unstable_by_key(|(name, _)| *name);

    let mut contents = String::new();
    for (name, var) in vars {
        let value = var.to_string();
        if value.contains(['\n', '\r']) {
            warn!("Console: Not writing '{}', its value spans lines", name);
            continue;
        }
        if value.starts_with(is_delimiter) {
            warn!("Console: Not writing '{}', its value starts with a delimiter", name);
            continue;
        }
        contents.push_str(name);
        contents.push(' ');
        contents.push_str(&value);
        contents.push('\n');
    }

    fs::write(path, contents).map_err(|source| ArgsFileError::Write {
        path: path.to_path_buf(),
        source,
    })
}
