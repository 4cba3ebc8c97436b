//! Terminal backend for headless apps.
//!
//! Lines typed on stdin are dispatched like args-file lines, and every
//! [`ConsoleOutputEvent`] is printed to stdout.

use std::io::{self, BufRead, Write};
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use bevy::prelude::*;

use crate::core::{ConsoleInputEvent, ConsoleOutputEvent, ConsoleOutputLevel, is_delimiter};

/// Plugin that reads command lines from stdin and prints console output.
pub struct TerminalPlugin;

impl Plugin for TerminalPlugin {
    fn build(&self, app: &mut App) {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || read_stdin_lines(io::stdin().lock(), sender));

        app.insert_resource(StdinLines(Mutex::new(receiver)))
            .init_resource::<TerminalConfig>()
            .add_systems(Update, (forward_stdin_lines, print_console_output));
    }
}

/// Configuration for terminal output.
#[derive(Resource, Default, Debug, Clone)]
pub struct TerminalConfig {
    /// Color output by level with ANSI escape codes.
    pub colored: bool,
    /// Print `$ line` before each dispatched line.
    pub echo_commands: bool,
}

/// Lines read by the stdin thread, waiting for the next frame.
#[derive(Resource)]
struct StdinLines(Mutex<Receiver<String>>);

/// Forward non-blank lines from `input` until it ends or the app goes away.
fn read_stdin_lines(input: impl BufRead, sender: Sender<String>) {
    for bytes in input.split(b'\n') {
        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("Terminal: Stopped reading stdin: {}", err);
                return;
            }
        };
        let line = decode_line(&bytes);
        if line.trim_matches(is_delimiter).is_empty() {
            continue;
        }
        if sender.send(line).is_err() {
            return;
        }
    }
}

/// Strip a trailing CR and replace bytes that are not UTF-8.
fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

fn forward_stdin_lines(lines: Res<StdinLines>, mut input: MessageWriter<ConsoleInputEvent>) {
    let Ok(rx) = lines.0.lock() else {
        return;
    };
    for line in rx.try_iter() {
        input.write(ConsoleInputEvent(line));
    }
}

fn print_console_output(
    mut outputs: MessageReader<ConsoleOutputEvent>,
    config: Res<TerminalConfig>,
) {
    let mut stdout = io::stdout().lock();
    for output in outputs.read() {
        if matches!(output, ConsoleOutputEvent::Echo(_)) && !config.echo_commands {
            continue;
        }
        if writeln!(stdout, "{}", render(output, config.colored)).is_err() {
            return;
        }
    }
    stdout.flush().ok();
}

fn ansi_color(level: ConsoleOutputLevel) -> &'static str {
    match level {
        ConsoleOutputLevel::Info => "\x1b[0m",
        ConsoleOutputLevel::Warn => "\x1b[33m",
        ConsoleOutputLevel::Error => "\x1b[31m",
        ConsoleOutputLevel::Command => "\x1b[36m",
        ConsoleOutputLevel::Result => "\x1b[32m",
    }
}

fn render(output: &ConsoleOutputEvent, colored: bool) -> String {
    if colored {
        format!("{}{}\x1b[0m", ansi_color(output.level()), output)
    } else {
        output.to_string()
    }
}
