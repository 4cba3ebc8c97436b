//! Headless app reading command lines from stdin.
//!
//! ```text
//! cargo run --example terminal --features terminal -- path/to/args.txt
//! ```
//!
//! Then type lines such as `g_TestFloat 3.5` or `SetPlayerPosition 1 2 3`.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_console_args::TerminalConfig;
use bevy_console_args::prelude::*;

const G_TEST_FLOAT: u32 = hash_name("g_TestFloat");

/// Position set by `SetPlayerPosition`, applied to [`Player`] each frame.
#[derive(Resource, Default)]
struct RequestedPosition(std::sync::Arc<std::sync::Mutex<Option<Vec3>>>);

#[derive(Component, Default)]
struct Player(Vec3);

fn main() {
    let requested = RequestedPosition::default();
    let sink = requested.0.clone();

    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .add_plugins(CommandArgsPlugin::from_env_args())
        .insert_resource(TerminalConfig {
            colored: true,
            echo_commands: false,
        })
        .insert_resource(requested)
        .register_console_var("g_TestFloat", 0.0f32)
        .register_console_var("g_EnableExtraLogging", false)
        .register_console_cmd("SetPlayerPosition", move |args: &mut ArgTokenizer| {
            let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
            if !args.next_vec3(&mut x, &mut y, &mut z) {
                return 0;
            }
            if let Ok(mut slot) = sink.lock() {
                *slot = Some(Vec3::new(x, y, z));
            }
            1
        })
        .add_systems(Startup, spawn_player)
        .add_systems(Update, (move_player, log_changes))
        .run();
}

fn spawn_player(mut commands: Commands) {
    commands.spawn(Player::default());
}

fn move_player(requested: Res<RequestedPosition>, mut players: Query<&mut Player>) {
    let Some(position) = requested.0.lock().ok().and_then(|mut slot| slot.take()) else {
        return;
    };
    for mut player in &mut players {
        player.0 = position;
        info!("Player moved to {}", player.0);
    }
}

fn log_changes(mut changes: MessageReader<ConVarChangedEvent>) {
    for change in changes.read().filter(|change| change.changed()) {
        if change.key == G_TEST_FLOAT {
            info!("Test float is now {}", change.new_value);
        } else {
            info!(
                "{} changed from {} to {}",
                change.name, change.old_value, change.new_value
            );
        }
    }
}
