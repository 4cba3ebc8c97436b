//! Line dispatch.
//!
//! A line is `<name>` or `<name><delimiters><rest>`. The name runs from the
//! first byte to the first delimiter and is looked up by hash:
//!
//! - a command is invoked with `<rest>` (possibly empty)
//! - a boolean variable is set to `true` when nothing follows its name
//! - any variable followed by a delimiter is assigned the parsed `<rest>`
//!
//! `g_flag ` with a trailing space is an assignment of the empty text, which
//! parses to `false`. Unknown names do nothing. Each call is independent of
//! the previous one.

use bevy::log::debug;
use thiserror::Error;

use super::{CommandArgsRegistry, ConEntry, VarKind, hash_range, is_delimiter};

/// Successful outcome of a dispatched line.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// A command handler ran and returned `status`.
    Invoked { key: u32, name: String, status: i32 },
    /// A variable was written.
    VarSet {
        key: u32,
        name: String,
        old_value: String,
        new_value: String,
    },
}

impl Dispatch {
    /// The integer status of this outcome: the handler's status for commands,
    /// `1` for variable writes.
    pub fn status(&self) -> i32 {
        match self {
            Dispatch::Invoked { status, .. } => *status,
            Dispatch::VarSet { .. } => 1,
        }
    }

    /// The hash key of the entry that handled the line.
    pub fn key(&self) -> u32 {
        match self {
            Dispatch::Invoked { key, .. } | Dispatch::VarSet { key, .. } => *key,
        }
    }

    /// The registered name of the entry that handled the line.
    pub fn name(&self) -> &str {
        match self {
            Dispatch::Invoked { name, .. } | Dispatch::VarSet { name, .. } => name,
        }
    }
}

/// Why a line did nothing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecuteError {
    #[error("line does not start with a name")]
    MissingName,

    #[error("unknown command or variable: {name}")]
    UnknownName { name: String },

    #[error("{kind} variable '{name}' needs a value")]
    NotAFlag { name: String, kind: VarKind },
}

/// Split a line at its first delimiter.
///
/// The remainder has its leading delimiters skipped and is `None` when no
/// delimiter follows the name at all.
fn split_line(line: &str) -> (usize, Option<&str>) {
    match line.find(is_delimiter) {
        Some(end) => (end, Some(line[end..].trim_start_matches(is_delimiter))),
        None => (line.len(), None),
    }
}

impl CommandArgsRegistry {
    /// Dispatch one line, reporting what happened.
    ///
    /// # Examples
    ///
    /// ```
    /// use bevy_console_args::core::{Dispatch, ExecuteError, RegistryBuilder, hash_name};
    ///
    /// let mut builder = RegistryBuilder::new();
    /// builder.register_var("g_EnableExtraLogging", false);
    /// let mut registry = builder.build();
    ///
    /// let outcome = registry.try_execute("g_enableextralogging").unwrap();
    /// assert_eq!(
    ///     outcome,
    ///     Dispatch::VarSet {
    ///         key: hash_name("g_EnableExtraLogging"),
    ///         name: "g_EnableExtraLogging".into(),
    ///         old_value: "false".into(),
    ///         new_value: "true".into(),
    ///     }
    /// );
    ///
    /// assert!(matches!(
    ///     registry.try_execute("missing 1 2"),
    ///     Err(ExecuteError::UnknownName { .. })
    /// ));
    /// ```
    pub fn try_execute(&mut self, line: &str) -> Result<Dispatch, ExecuteError> {
        let (end, rest) = split_line(line);
        if end == 0 {
            return Err(ExecuteError::MissingName);
        }

        let name = &line[..end];
        let key = hash_range(line, 0..end);
        let Some((registered, entry)) = self.slot_mut(key) else {
            debug!("Console: Ignoring unknown name '{}'", name);
            return Err(ExecuteError::UnknownName { name: name.into() });
        };
        let registered = registered.to_owned();

        match entry {
            ConEntry::Cmd(cmd) => {
                let status = cmd.invoke(rest.unwrap_or_default());
                Ok(Dispatch::Invoked {
                    key,
                    name: registered,
                    status,
                })
            }
            ConEntry::Var(var) => {
                let old_value = var.to_string();
                if let Some(text) = rest {
                    var.assign(text);
                } else if !var.set_bool(true) {
                    debug!(
                        "Console: '{}' is a {} variable, ignoring bare flag",
                        registered,
                        var.kind()
                    );
                    return Err(ExecuteError::NotAFlag {
                        name: registered,
                        kind: var.kind(),
                    });
                }
                Ok(Dispatch::VarSet {
                    key,
                    name: registered,
                    old_value,
                    new_value: var.to_string(),
                })
            }
        }
    }

    /// Dispatch one line, returning a non-zero status on success and `0` when
    /// the line did nothing.
    pub fn execute(&mut self, line: &str) -> i32 {
        self.try_execute(line).map_or(0, |outcome| outcome.status())
    }
}
