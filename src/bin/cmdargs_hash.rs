//! Prints console name hashes as Rust constants.
//!
//! ```text
//! $ cmdargs-hash g_TestFloat SetPlayerPosition
//! const G_TEST_FLOAT: u32 = 0xcbb8e8db; // "g_TestFloat"
//! const SET_PLAYER_POSITION: u32 = 0x13748f32; // "SetPlayerPosition"
//! ```

use std::process::ExitCode;

use bevy_console_args::core::{INVALID_HASH, hash_name};
use clap::Parser;

/// Hash console variable and command names.
#[derive(Parser, Debug)]
#[command(name = "cmdargs-hash")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Names to hash (case-insensitive)
    #[arg(value_name = "NAME", required = true)]
    names: Vec<String>,

    /// Print only the hex value for each name
    #[arg(long)]
    raw: bool,
}

/// Turn a console name into a SCREAMING_SNAKE_CASE identifier.
fn const_ident(name: &str) -> String {
    let mut ident = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if c.is_ascii_uppercase() && prev_lower {
                ident.push('_');
            }
            ident.push(c.to_ascii_uppercase());
            prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        } else {
            ident.push('_');
            prev_lower = false;
        }
    }
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

fn format_hash(name: &str, raw: bool) -> Option<String> {
    let hash = hash_name(name);
    if hash == INVALID_HASH {
        return None;
    }
    Some(if raw {
        format!("{:#010x}", hash)
    } else {
        format!(
            "const {}: u32 = {:#010x}; // {:?}",
            const_ident(name),
            hash,
            name
        )
    })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut status = ExitCode::SUCCESS;
    for name in &cli.names {
        match format_hash(name, cli.raw) {
            Some(line) => println!("{}", line),
            None => {
                eprintln!("error: '{}' hashes to 0 and cannot be registered", name);
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}
