//! Messages exchanged between the dispatch pipeline and the rest of the app.
//!
//! Input arrives as [`ConsoleInputEvent`] lines. Each dispatched line yields a
//! [`ConsoleOutputEvent`] carrying the structured outcome, and every variable
//! write also yields a [`ConVarChangedEvent`] keyed by the variable's hash.

use std::fmt;
use std::path::PathBuf;

use bevy::prelude::*;

use super::{ArgsFileSummary, Dispatch, ExecuteError};

/// One or more command lines to dispatch, separated by line breaks.
///
/// ```ignore
/// fn submit(mut input: MessageWriter<ConsoleInputEvent>) {
///     input.write("g_TestFloat 3.5".into());
/// }
/// ```
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ConsoleInputEvent(pub String);

impl From<&str> for ConsoleInputEvent {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

impl From<String> for ConsoleInputEvent {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Severity used when rendering a [`ConsoleOutputEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleOutputLevel {
    Info,
    Warn,
    Error,
    Command,
    Result,
}

/// What happened to a line, or to the startup args file.
#[derive(Message, Debug, Clone, PartialEq)]
pub enum ConsoleOutputEvent {
    /// A line queued for dispatch.
    Echo(String),
    /// A line that reached a registered entry.
    Dispatched(Dispatch),
    /// A line that did nothing.
    Rejected(ExecuteError),
    /// The startup args file was read and dispatched.
    ArgsFileApplied {
        path: PathBuf,
        summary: ArgsFileSummary,
    },
    /// The startup args file could not be read.
    ArgsFileFailed { path: PathBuf, reason: String },
}

impl ConsoleOutputEvent {
    pub fn level(&self) -> ConsoleOutputLevel {
        match self {
            Self::Echo(_) => ConsoleOutputLevel::Command,
            Self::Dispatched(Dispatch::VarSet { .. }) => ConsoleOutputLevel::Result,
            Self::Dispatched(outcome) if outcome.status() == 0 => ConsoleOutputLevel::Warn,
            Self::Dispatched(_) | Self::ArgsFileApplied { .. } => ConsoleOutputLevel::Info,
            Self::Rejected(_) | Self::ArgsFileFailed { .. } => ConsoleOutputLevel::Error,
        }
    }
}

impl fmt::Display for ConsoleOutputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Echo(line) => write!(f, "$ {}", line),
            Self::Dispatched(Dispatch::VarSet {
                name, new_value, ..
            }) => write!(f, "\"{}\" = \"{}\"", name, new_value),
            Self::Dispatched(Dispatch::Invoked { name, status: 0, .. }) => {
                write!(f, "{} failed", name)
            }
            Self::Dispatched(Dispatch::Invoked { name, status, .. }) => {
                write!(f, "{} returned {}", name, status)
            }
            Self::Rejected(err) => write!(f, "{}", err),
            Self::ArgsFileApplied { path, summary } => write!(
                f,
                "Applied {} of {} lines from '{}'",
                summary.applied,
                summary.lines,
                path.display()
            ),
            Self::ArgsFileFailed { reason, .. } => f.write_str(reason),
        }
    }
}

/// A variable written by a dispatched line.
///
/// ```ignore
/// const G_ENABLE_EXTRA_LOGGING: u32 = hash_name("g_EnableExtraLogging");
///
/// fn on_logging_change(mut changes: MessageReader<ConVarChangedEvent>) {
///     for change in changes.read().filter(|c| c.key == G_ENABLE_EXTRA_LOGGING) {
///         info!("Extra logging is now {}", change.new_value);
///     }
/// }
/// ```
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct ConVarChangedEvent {
    /// Hash of the variable's name, as used by the registry getters.
    pub key: u32,
    pub name: Box<str>,
    pub old_value: String,
    pub new_value: String,
}

impl ConVarChangedEvent {
    /// The change described by `outcome`, if it wrote a variable.
    pub fn from_dispatch(outcome: &Dispatch) -> Option<Self> {
        match outcome {
            Dispatch::VarSet {
                key,
                name,
                old_value,
                new_value,
            } => Some(Self {
                key: *key,
                name: name.as_str().into(),
                old_value: old_value.clone(),
                new_value: new_value.clone(),
            }),
            Dispatch::Invoked { .. } => None,
        }
    }

    /// Whether the written value differs from the previous one.
    pub fn changed(&self) -> bool {
        self.old_value != self.new_value
    }
}

/// Plugin that registers all console messages.
pub struct ConsoleEventsPlugin;

impl Plugin for ConsoleEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ConsoleInputEvent>()
            .add_message::<ConsoleOutputEvent>()
            .add_message::<ConVarChangedEvent>();
    }
}
