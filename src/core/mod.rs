//! Core console types with no `World` dependency.
//!
//! This module provides the fundamental building blocks:
//! - [`hash_name`] - Case-insensitive name hashing, usable in `const` items
//! - [`ConVar`] - Console variables holding one typed value
//! - [`ConCommand`] - Console commands driving an [`ArgTokenizer`]
//! - [`RegistryBuilder`] / [`CommandArgsRegistry`] - Hash-keyed entries
//! - [`CommandArgsRegistry::execute`] - Line dispatch
//! - Args-file ingestion and write-back
//! - Messages for communication between layers

mod args_file;
mod concommand;
mod convar;
mod dispatch;
mod events;
mod hash;
mod parse;
mod registry;
mod tokenizer;

pub use args_file::{
    ArgsFileError, ArgsFileSummary, execute_lines, load_args_file, setup_from_args,
    write_args_file,
};
pub use concommand::{CommandHandler, ConCommand};
pub use convar::{ConVar, VarKind, VarValue};
pub use dispatch::{Dispatch, ExecuteError};
pub use events::{
    ConVarChangedEvent, ConsoleEventsPlugin, ConsoleInputEvent, ConsoleOutputEvent,
    ConsoleOutputLevel,
};
pub use hash::{INVALID_HASH, hash_bytes, hash_name, hash_range};
pub use parse::{parse_bool, parse_float, parse_int};
pub use registry::{CommandArgsRegistry, ConEntry, RegistryBuilder};
pub use tokenizer::{ArgTokenizer, DEFAULT_DELIMITERS, is_delimiter};
