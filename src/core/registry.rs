//! Console registry for ConVars and ConCommands.
//!
//! Entries are keyed by the hash of their name. Declarations are collected
//! in a [`RegistryBuilder`], then frozen into a [`CommandArgsRegistry`] whose
//! set of entries never changes. Variable values stay mutable.
//!
//! The first registrant for a hash wins. A later name with the same hash,
//! whether a duplicate or a genuine collision, is rejected and logged.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use bevy::prelude::*;

use super::{ArgTokenizer, ConCommand, ConVar, INVALID_HASH, hash_name};

/// Entry type in the console registry.
#[derive(Debug)]
pub enum ConEntry {
    /// A console variable.
    Var(ConVar),
    /// A console command.
    Cmd(ConCommand),
}

impl ConEntry {
    /// Check if this is a variable.
    pub fn is_var(&self) -> bool {
        matches!(self, ConEntry::Var(_))
    }

    /// Check if this is a command.
    pub fn is_cmd(&self) -> bool {
        matches!(self, ConEntry::Cmd(_))
    }
}

/// A registered entry together with the name it was registered under.
#[derive(Debug)]
struct Slot {
    name: Box<str>,
    entry: ConEntry,
}

/// Collects variable and command declarations before dispatch begins.
///
/// # Examples
///
/// ```
/// use bevy_console_args::core::{ArgTokenizer, RegistryBuilder, hash_name};
///
/// let mut builder = RegistryBuilder::new();
/// let key = builder.register_var("g_TestFloat", 0.0f32);
/// assert_eq!(key, hash_name("g_testfloat"));
///
/// // Same name in a different case: rejected, first registrant kept
/// assert_eq!(builder.register_var("G_TESTFLOAT", 1), 0);
///
/// builder.register_cmd("noop", |_: &mut ArgTokenizer| 1);
/// let registry = builder.build();
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Resource, Default)]
pub struct RegistryBuilder {
    entries: HashMap<u32, Slot>,
}

impl RegistryBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variable.
    ///
    /// Returns the name's hash, or `0` if the name is empty or its hash is
    /// already taken.
    pub fn register_var(&mut self, name: &str, var: impl Into<ConVar>) -> u32 {
        self.insert(name, ConEntry::Var(var.into()))
    }

    /// Register a variable under a precomputed hash.
    ///
    /// The real hash of `name` is always used. A mismatching `expected_hash`
    /// is logged so stale constants are caught at startup.
    pub fn register_var_hashed(
        &mut self,
        name: &str,
        expected_hash: u32,
        var: impl Into<ConVar>,
    ) -> u32 {
        let hash = hash_name(name);
        if hash != expected_hash {
            warn!(
                "Console: Hash constant {:#010x} for '{}' is stale, actual hash is {:#010x}",
                expected_hash, name, hash
            );
        }
        self.register_var(name, var)
    }

    /// Register a command handler.
    ///
    /// Returns the name's hash, or `0` if the registration was rejected.
    pub fn register_cmd<F>(&mut self, name: &str, handler: F) -> u32
    where
        F: Fn(&mut ArgTokenizer<'_>) -> i32 + Send + Sync + 'static,
    {
        self.insert(name, ConEntry::Cmd(ConCommand::new(handler)))
    }

    /// Check if a hash is already taken.
    pub fn contains(&self, hash: u32) -> bool {
        self.entries.contains_key(&hash)
    }

    /// Get the number of declarations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freeze the declarations into a registry.
    pub fn build(self) -> CommandArgsRegistry {
        CommandArgsRegistry {
            entries: self.entries,
        }
    }

    fn insert(&mut self, name: &str, entry: ConEntry) -> u32 {
        let hash = hash_name(name);
        if hash == INVALID_HASH {
            warn!("Console: Cannot register '{}': name hashes to 0", name);
            return INVALID_HASH;
        }

        match self.entries.entry(hash) {
            Entry::Occupied(existing) => {
                warn!(
                    "Console: Ignoring '{}', hash {:#010x} is already registered by '{}'",
                    name,
                    hash,
                    existing.get().name
                );
                INVALID_HASH
            }
            Entry::Vacant(slot) => {
                slot.insert(Slot {
                    name: name.into(),
                    entry,
                });
                hash
            }
        }
    }
}

/// Frozen registry of console variables and commands.
///
/// Lookups never fail loudly: the typed getters return the zero value of
/// their type when the hash is unknown, names a command, or names a variable
/// of a different kind.
///
/// # Examples
///
/// ```
/// use bevy_console_args::core::{RegistryBuilder, hash_name};
///
/// const SV_GRAVITY: u32 = hash_name("sv_gravity");
///
/// let mut builder = RegistryBuilder::new();
/// builder.register_var("sv_gravity", 800.0f32);
/// let mut registry = builder.build();
///
/// assert_eq!(registry.get_float(SV_GRAVITY), 800.0);
/// assert_eq!(registry.execute("sv_gravity 1000"), 1);
/// assert_eq!(registry.get_float(SV_GRAVITY), 1000.0);
/// assert_eq!(registry.get_int(SV_GRAVITY), 0);
/// ```
#[derive(Resource, Default, Debug)]
pub struct CommandArgsRegistry {
    entries: HashMap<u32, Slot>,
}

impl CommandArgsRegistry {
    /// Get an entry by hash.
    pub fn lookup(&self, hash: u32) -> Option<&ConEntry> {
        self.entries.get(&hash).map(|slot| &slot.entry)
    }

    /// Get the registered name for a hash.
    pub fn name_of(&self, hash: u32) -> Option<&str> {
        self.entries.get(&hash).map(|slot| &*slot.name)
    }

    /// Check if an entry exists.
    pub fn contains(&self, hash: u32) -> bool {
        self.entries.contains_key(&hash)
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get a variable by hash.
    pub fn var(&self, hash: u32) -> Option<&ConVar> {
        match self.lookup(hash)? {
            ConEntry::Var(var) => Some(var),
            ConEntry::Cmd(_) => None,
        }
    }

    /// Get a mutable variable by hash.
    pub fn var_mut(&mut self, hash: u32) -> Option<&mut ConVar> {
        match self.entries.get_mut(&hash).map(|slot| &mut slot.entry)? {
            ConEntry::Var(var) => Some(var),
            ConEntry::Cmd(_) => None,
        }
    }

    /// Get an integer variable's value, or `0`.
    pub fn get_int(&self, hash: u32) -> i32 {
        self.var(hash).map_or(0, ConVar::get_int)
    }

    /// Get a float variable's value, or `0.0`.
    pub fn get_float(&self, hash: u32) -> f32 {
        self.var(hash).map_or(0.0, ConVar::get_float)
    }

    /// Get a boolean variable's value, or `false`.
    pub fn get_bool(&self, hash: u32) -> bool {
        self.var(hash).is_some_and(ConVar::get_bool)
    }

    /// Get a string variable's value, or `""`.
    pub fn get_str(&self, hash: u32) -> &str {
        self.var(hash).map_or("", ConVar::get_str)
    }

    /// Assign console text to a variable, parsed according to its kind.
    ///
    /// Returns `false` if the hash does not name a variable.
    pub fn assign(&mut self, hash: u32, text: &str) -> bool {
        self.var_mut(hash).is_some_and(|var| var.assign(text))
    }

    /// Iterate over all variables with their registered names.
    pub fn vars(&self) -> impl Iterator<Item = (&str, &ConVar)> {
        self.entries.values().filter_map(|slot| match &slot.entry {
            ConEntry::Var(var) => Some((&*slot.name, var)),
            ConEntry::Cmd(_) => None,
        })
    }

    /// Iterate over the registered names of all commands.
    pub fn cmds(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .filter(|slot| slot.entry.is_cmd())
            .map(|slot| &*slot.name)
    }

    /// Get the registered name and entry for a hash, mutably.
    pub(crate) fn slot_mut(&mut self, hash: u32) -> Option<(&str, &mut ConEntry)> {
        self.entries
            .get_mut(&hash)
            .map(|slot| (&*slot.name, &mut slot.entry))
    }
}
