//! Console variables and commands for Bevy, driven by text lines.
//!
//! Declare typed variables and command handlers while building the app,
//! then feed lines such as `g_EnableExtraLogging true` or
//! `SetPlayerPosition 1 2 3` from an args file, stdin or any system:
//!
//! - **ConVar**: Integer, float, boolean or string variable
//! - **ConCommand**: Handler receiving an [`ArgTokenizer`] over the rest of the line
//! - **CommandArgsRegistry**: Hash-keyed lookup, frozen before the first frame
//! - **Args file**: One command line per line, applied at startup
//!
//! The [`core`] module works without an `App` and is usable from plain `main`.
//!
//! # Features
//!
//! - `terminal`: stdin/stdout backend for headless apps
//! - `persist`: RON snapshots of variable values
//! - `full`: Enable persist
//!
//! # Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_console_args::prelude::*;
//!
//! const G_TEST_FLOAT: u32 = hash_name("g_TestFloat");
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(CommandArgsPlugin::with_args_file("args.txt"))
//!         .register_console_var("g_TestFloat", 0.0f32)
//!         .register_console_cmd("SetPlayerPosition", |args: &mut ArgTokenizer| {
//!             let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
//!             i32::from(args.next_vec3(&mut x, &mut y, &mut z))
//!         })
//!         .add_systems(Update, read_float)
//!         .run();
//! }
//!
//! fn read_float(registry: Res<CommandArgsRegistry>) {
//!     let value = registry.get_float(G_TEST_FLOAT);
//! }
//! ```

use std::path::PathBuf;

use bevy::prelude::*;

// Core module (no World dependency)
pub mod core;

// Terminal backend (feature-gated)
#[cfg(feature = "terminal")]
pub mod terminal;

// Persistence module (feature-gated)
#[cfg(feature = "persist")]
pub mod persist;

// Re-export core types at crate root for convenience
pub use crate::core::{
    ArgTokenizer, ArgsFileError, ArgsFileSummary, CommandArgsRegistry, CommandHandler,
    ConCommand, ConEntry, ConVar, ConVarChangedEvent, ConsoleEventsPlugin, ConsoleInputEvent,
    ConsoleOutputEvent, ConsoleOutputLevel, Dispatch, ExecuteError, RegistryBuilder, VarKind,
    VarValue, hash_name,
};

#[cfg(feature = "persist")]
pub use persist::{ArgsSnapshot, SnapshotError};

#[cfg(feature = "terminal")]
pub use terminal::{TerminalConfig, TerminalPlugin};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::core::{
        ArgTokenizer, CommandArgsRegistry, ConVar, ConVarChangedEvent, ConsoleInputEvent,
        ConsoleOutputEvent, ConsoleOutputLevel, Dispatch, ExecuteError, RegistryBuilder,
        hash_name,
    };
    pub use crate::{ArgsFilePath, CommandArgsAppExt, CommandArgsPlugin};
}

/// Main console plugin.
///
/// # Configuration
///
/// ```ignore
/// // No args file
/// CommandArgsPlugin::default()
///
/// // Args file from the first process argument
/// CommandArgsPlugin::from_env_args()
/// ```
#[derive(Default, Debug, Clone)]
pub struct CommandArgsPlugin {
    /// Args file applied during `Startup`.
    pub args_file: Option<PathBuf>,
}

impl CommandArgsPlugin {
    /// Apply the given args file at startup.
    pub fn with_args_file(path: impl Into<PathBuf>) -> Self {
        Self {
            args_file: Some(path.into()),
        }
    }

    /// Apply the args file named by the first process argument, if any.
    pub fn from_env_args() -> Self {
        Self {
            args_file: std::env::args_os().nth(1).map(PathBuf::from),
        }
    }
}

/// Resource holding the args file applied at startup.
#[derive(Resource, Debug, Clone, Default)]
pub struct ArgsFilePath(pub Option<PathBuf>);

impl Plugin for CommandArgsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RegistryBuilder>()
            .init_resource::<PendingCommands>()
            .insert_resource(ArgsFilePath(self.args_file.clone()))
            .add_plugins(core::ConsoleEventsPlugin);

        // Declarations are closed once the registry is frozen
        app.add_systems(PreStartup, freeze_registry)
            .add_systems(Startup, ingest_args_file);

        // Process console input (three-stage pipeline)
        // 1. queue_console_input: Read input messages, echo and queue lines
        // 2. execute_pending_commands: Dispatch queued lines
        // 3. send_pending_outputs: Write output and change messages
        app.add_systems(
            Update,
            (
                queue_console_input,
                execute_pending_commands,
                send_pending_outputs,
            )
                .chain(),
        );

        // Terminal backend (feature-gated)
        #[cfg(feature = "terminal")]
        {
            app.add_plugins(terminal::TerminalPlugin);
        }
    }
}

/// Declare console entries while building the [`App`].
///
/// Declarations made after the registry is frozen (in `PreStartup`) are
/// ignored with a warning.
pub trait CommandArgsAppExt {
    /// Declare a variable.
    fn register_console_var(&mut self, name: &str, var: impl Into<ConVar>) -> &mut Self;

    /// Declare a variable and check its precomputed hash.
    fn register_console_var_hashed(
        &mut self,
        name: &str,
        expected_hash: u32,
        var: impl Into<ConVar>,
    ) -> &mut Self;

    /// Declare a command handler.
    fn register_console_cmd<F>(&mut self, name: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut ArgTokenizer<'_>) -> i32 + Send + Sync + 'static;
}

impl CommandArgsAppExt for App {
    fn register_console_var(&mut self, name: &str, var: impl Into<ConVar>) -> &mut Self {
        declare(self, |builder| {
            builder.register_var(name, var);
        })
    }

    fn register_console_var_hashed(
        &mut self,
        name: &str,
        expected_hash: u32,
        var: impl Into<ConVar>,
    ) -> &mut Self {
        declare(self, |builder| {
            builder.register_var_hashed(name, expected_hash, var);
        })
    }

    fn register_console_cmd<F>(&mut self, name: &str, handler: F) -> &mut Self
    where
        F: Fn(&mut ArgTokenizer<'_>) -> i32 + Send + Sync + 'static,
    {
        declare(self, |builder| {
            builder.register_cmd(name, handler);
        })
    }
}

fn declare(app: &mut App, add: impl FnOnce(&mut RegistryBuilder)) -> &mut App {
    let world = app.world_mut();
    if world.contains_resource::<CommandArgsRegistry>() {
        warn!("Console: Registry is already frozen, ignoring declaration");
    } else {
        add(&mut *world.get_resource_or_insert_with(RegistryBuilder::default));
    }
    app
}

/// Exclusive system that turns the collected declarations into the registry.
fn freeze_registry(world: &mut World) {
    let registry = world
        .remove_resource::<RegistryBuilder>()
        .unwrap_or_default()
        .build();
    info!(
        "Console: Registered {} variables and commands",
        registry.len()
    );
    world.insert_resource(registry);
}

/// Apply the configured args file, if any.
fn ingest_args_file(
    path: Res<ArgsFilePath>,
    mut registry: ResMut<CommandArgsRegistry>,
    mut output_events: MessageWriter<ConsoleOutputEvent>,
) {
    let Some(path) = &path.0 else {
        return;
    };

    let output = match core::load_args_file(&mut registry, path) {
        Ok(summary) => ConsoleOutputEvent::ArgsFileApplied {
            path: path.clone(),
            summary,
        },
        Err(err) => {
            let cause = std::error::Error::source(&err)
                .map(|source| format!(": {}", source))
                .unwrap_or_default();
            error!("Console: {}{}", err, cause);
            ConsoleOutputEvent::ArgsFileFailed {
                path: path.clone(),
                reason: format!("{}{}", err, cause),
            }
        }
    };
    output_events.write(output);
}

/// Lines waiting for dispatch, and the messages produced by dispatching.
#[derive(Resource, Default)]
struct PendingCommands {
    queue: Vec<String>,
    outputs: Vec<ConsoleOutputEvent>,
    changes: Vec<ConVarChangedEvent>,
}

/// System that echoes input lines and queues them for dispatch.
fn queue_console_input(
    mut input_events: MessageReader<ConsoleInputEvent>,
    mut pending: ResMut<PendingCommands>,
) {
    for event in input_events.read() {
        for line in event.0.lines() {
            if line.trim_matches(core::is_delimiter).is_empty() {
                continue;
            }
            pending.outputs.push(ConsoleOutputEvent::Echo(line.to_string()));
            pending.queue.push(line.to_string());
        }
    }
}

/// System that dispatches queued lines against the registry.
fn execute_pending_commands(
    mut registry: ResMut<CommandArgsRegistry>,
    mut pending: ResMut<PendingCommands>,
) {
    let queue = std::mem::take(&mut pending.queue);

    for line in queue {
        let output = match registry.try_execute(&line) {
            Ok(outcome) => {
                pending
                    .changes
                    .extend(ConVarChangedEvent::from_dispatch(&outcome));
                ConsoleOutputEvent::Dispatched(outcome)
            }
            Err(err) => ConsoleOutputEvent::Rejected(err),
        };
        pending.outputs.push(output);
    }
}

/// System that sends queued output messages.
fn send_pending_outputs(
    mut pending: ResMut<PendingCommands>,
    mut output_events: MessageWriter<ConsoleOutputEvent>,
    mut change_events: MessageWriter<ConVarChangedEvent>,
) {
    for output in pending.outputs.drain(..) {
        output_events.write(output);
    }
    for change in pending.changes.drain(..) {
        change_events.write(change);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tempfile::NamedTempFile;

    use super::*;

    const TEST_VAR: u32 = hash_name("test_var");
    const TEST_FLAG: u32 = hash_name("test_flag");

    /// Lines pushed through `ConsoleInputEvent` on the next update.
    #[derive(Resource, Default)]
    struct TestInput(Vec<String>);

    /// Messages seen by the app.
    #[derive(Resource, Default)]
    struct TestCollected {
        outputs: Vec<ConsoleOutputEvent>,
        changes: Vec<ConVarChangedEvent>,
    }

    fn feed_input(mut input: ResMut<TestInput>, mut events: MessageWriter<ConsoleInputEvent>) {
        for line in input.0.drain(..) {
            events.write(ConsoleInputEvent(line));
        }
    }

    fn collect_messages(
        mut outputs: MessageReader<ConsoleOutputEvent>,
        mut changes: MessageReader<ConVarChangedEvent>,
        mut collected: ResMut<TestCollected>,
    ) {
        collected.outputs.extend(outputs.read().cloned());
        collected.changes.extend(changes.read().cloned());
    }

    fn test_app(plugin: CommandArgsPlugin) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(plugin);
        app.init_resource::<TestInput>()
            .init_resource::<TestCollected>()
            .add_systems(Update, feed_input.before(queue_console_input))
            .add_systems(Update, collect_messages.after(send_pending_outputs));
        app
    }

    fn submit(app: &mut App, line: &str) {
        app.world_mut()
            .resource_mut::<TestInput>()
            .0
            .push(line.to_string());
        app.update();
    }

    #[test]
    fn test_registry_frozen_at_startup() {
        let mut app = test_app(CommandArgsPlugin::default());
        app.register_console_var("test_var", 42)
            .register_console_var("test_flag", false);

        assert!(app.world().contains_resource::<RegistryBuilder>());
        app.update();

        assert!(!app.world().contains_resource::<RegistryBuilder>());
        let registry = app.world().resource::<CommandArgsRegistry>();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get_int(TEST_VAR), 42);
    }

    #[test]
    fn test_declarations_before_plugin() {
        let mut app = App::new();
        app.register_console_var("test_var", 1);
        app.add_plugins(MinimalPlugins)
            .add_plugins(CommandArgsPlugin::default());
        app.update();

        let registry = app.world().resource::<CommandArgsRegistry>();
        assert_eq!(registry.get_int(TEST_VAR), 1);
    }

    #[test]
    fn test_declaration_after_freeze_ignored() {
        let mut app = test_app(CommandArgsPlugin::default());
        app.update();

        app.register_console_var("test_var", 1);
        assert!(!app.world().contains_resource::<RegistryBuilder>());
        assert!(
            !app.world()
                .resource::<CommandArgsRegistry>()
                .contains(TEST_VAR)
        );
    }

    #[test]
    fn test_convar_set_via_input() {
        let mut app = test_app(CommandArgsPlugin::default());
        app.register_console_var("test_var", 42);
        app.update();

        submit(&mut app, "test_var 100");

        let registry = app.world().resource::<CommandArgsRegistry>();
        assert_eq!(registry.get_int(TEST_VAR), 100);

        let collected = app.world().resource::<TestCollected>();
        assert_eq!(collected.changes.len(), 1);
        assert_eq!(collected.changes[0].key, TEST_VAR);
        assert_eq!(&*collected.changes[0].name, "test_var");
        assert_eq!(collected.changes[0].old_value, "42");
        assert_eq!(collected.changes[0].new_value, "100");

        let levels: Vec<_> = collected.outputs.iter().map(|o| o.level()).collect();
        assert_eq!(
            levels,
            vec![ConsoleOutputLevel::Command, ConsoleOutputLevel::Result]
        );
        assert_eq!(collected.outputs[0].to_string(), "$ test_var 100");
        assert_eq!(collected.outputs[1].to_string(), "\"test_var\" = \"100\"");
    }

    #[test]
    fn test_bare_flag_via_input() {
        let mut app = test_app(CommandArgsPlugin::default());
        app.register_console_var("test_flag", false);
        app.update();

        submit(&mut app, "TEST_FLAG");
        assert!(
            app.world()
                .resource::<CommandArgsRegistry>()
                .get_bool(TEST_FLAG)
        );
    }

    #[test]
    fn test_command_execution() {
        let count = Arc::new(AtomicUsize::new(0));
        let sink = count.clone();

        let mut app = test_app(CommandArgsPlugin::default());
        app.register_console_cmd("test_cmd", move |args: &mut ArgTokenizer| {
            sink.fetch_add(args.count(), Ordering::Relaxed);
            1
        });
        app.update();

        submit(&mut app, "test_cmd arg1 arg2");
        assert_eq!(count.load(Ordering::Relaxed), 2);

        let collected = app.world().resource::<TestCollected>();
        let last = collected.outputs.last().unwrap();
        assert_eq!(last.level(), ConsoleOutputLevel::Info);
        assert_eq!(last.to_string(), "test_cmd returned 1");
    }

    #[test]
    fn test_multiple_lines_in_one_event() {
        let mut app = test_app(CommandArgsPlugin::default());
        app.register_console_var("test_var", 0)
            .register_console_var("test_flag", false);
        app.update();

        submit(&mut app, "test_var 5\n\ntest_flag\n");

        let registry = app.world().resource::<CommandArgsRegistry>();
        assert_eq!(registry.get_int(TEST_VAR), 5);
        assert!(registry.get_bool(TEST_FLAG));
        assert_eq!(app.world().resource::<TestCollected>().changes.len(), 2);
    }

    #[test]
    fn test_failures_reported() {
        let mut app = test_app(CommandArgsPlugin::default());
        app.register_console_var("test_var", 3)
            .register_console_cmd("fails", |_: &mut ArgTokenizer| 0);
        app.update();

        submit(&mut app, "missing 1 2 3");
        submit(&mut app, "test_var");
        submit(&mut app, "fails");
        submit(&mut app, " test_var 9");

        let collected = app.world().resource::<TestCollected>();
        let results: Vec<_> = collected
            .outputs
            .iter()
            .filter(|o| o.level() != ConsoleOutputLevel::Command)
            .map(|o| (o.level(), o.to_string()))
            .collect();
        assert_eq!(
            results,
            vec![
                (
                    ConsoleOutputLevel::Error,
                    "unknown command or variable: missing".to_string()
                ),
                (
                    ConsoleOutputLevel::Error,
                    "integer variable 'test_var' needs a value".to_string()
                ),
                (ConsoleOutputLevel::Warn, "fails failed".to_string()),
                (
                    ConsoleOutputLevel::Error,
                    "line does not start with a name".to_string()
                ),
            ]
        );
        assert!(collected.changes.is_empty());
        assert_eq!(
            app.world().resource::<CommandArgsRegistry>().get_int(TEST_VAR),
            3
        );
    }

    #[test]
    fn test_args_file_applied_at_startup() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "test_var 64").unwrap();
        writeln!(temp, "test_flag").unwrap();
        temp.flush().unwrap();

        let mut app = test_app(CommandArgsPlugin::with_args_file(temp.path()));
        app.register_console_var("test_var", 0)
            .register_console_var("test_flag", false);
        app.update();

        let registry = app.world().resource::<CommandArgsRegistry>();
        assert_eq!(registry.get_int(TEST_VAR), 64);
        assert!(registry.get_bool(TEST_FLAG));
    }

    #[test]
    fn test_missing_args_file_reported() {
        let mut app = test_app(CommandArgsPlugin::with_args_file("nonexistent_args.txt"));
        app.register_console_var("test_var", 7);
        app.update();

        assert_eq!(
            app.world().resource::<CommandArgsRegistry>().get_int(TEST_VAR),
            7
        );
        let collected = app.world().resource::<TestCollected>();
        assert_eq!(collected.outputs.len(), 1);
        assert!(matches!(
            collected.outputs[0],
            ConsoleOutputEvent::ArgsFileFailed { .. }
        ));
        assert_eq!(collected.outputs[0].level(), ConsoleOutputLevel::Error);
        assert!(collected.outputs[0].to_string().contains("nonexistent_args.txt"));
    }
}
