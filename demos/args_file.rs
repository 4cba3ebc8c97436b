//! Registry-only usage without an `App`.
//!
//! ```text
//! cargo run --example args_file -- path/to/args.txt
//! ```
//!
//! Example args file:
//!
//! ```text
//! g_testInteger 5
//! g_EnableExtraLogging
//! g_TestFloat 3.5
//! g_UserStringPrefix admin
//! SetPerformanceTestPosition -a -pos 1 2 3 -file out.txt
//! ```

use std::error::Error;
use std::process::ExitCode;

use bevy_console_args::core::{
    ArgTokenizer, CommandArgsRegistry, RegistryBuilder, hash_name, setup_from_args,
};

const G_TEST_INTEGER: u32 = 0xf681f79d;
const G_ENABLE_EXTRA_LOGGING: u32 = 0xa40e0ea2;
const G_TEST_FLOAT: u32 = hash_name("g_TestFloat");
const G_USER_STRING_PREFIX: u32 = hash_name("g_UserStringPrefix");
const SET_PLAYER_POSITION: u32 = 0x13748f32;

/// `SetPlayerPosition x y z`
fn set_player_position(args: &mut ArgTokenizer) -> i32 {
    let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
    args.next_vec3(&mut x, &mut y, &mut z);
    println!(
        "SetPlayerPosition invoked with '{}': x = {} y = {} z = {}",
        args.input(),
        x,
        y,
        z
    );
    1
}

/// `SetPerformanceTestPosition [-pos x y z] [-a] [-file name]`, in any order.
fn set_performance_test_position(args: &mut ArgTokenizer) -> i32 {
    println!("SetPerformanceTestPosition invoked with '{}'", args.input());

    let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
    let mut flag = false;
    let mut file = "";
    while let Some(token) = args.next_token() {
        if args.compare_token(token, "-pos") {
            args.next_vec3(&mut x, &mut y, &mut z);
        } else if args.compare_token(token, "-a") {
            flag = true;
        } else if args.compare_token(token, "-file") {
            file = args.next_token().unwrap_or("");
        }
    }

    println!(
        "SetPerformanceTestPosition -pos x = {} y = {} z = {} -a {} -file {}",
        x, y, z, flag, file
    );
    1
}

fn build_registry() -> CommandArgsRegistry {
    let mut builder = RegistryBuilder::new();
    builder.register_var_hashed("g_testInteger", G_TEST_INTEGER, 0);
    builder.register_var_hashed("g_EnableExtraLogging", G_ENABLE_EXTRA_LOGGING, false);
    builder.register_var("g_TestFloat", 0.0f32);
    builder.register_var("g_UserStringPrefix", "user");

    let key = builder.register_cmd("SetPlayerPosition", set_player_position);
    debug_assert_eq!(key, SET_PLAYER_POSITION);
    builder.register_cmd("SetPerformanceTestPosition", set_performance_test_position);
    builder.build()
}

fn print_vars(registry: &CommandArgsRegistry) {
    println!("g_testInteger = {}", registry.get_int(G_TEST_INTEGER));
    println!(
        "g_EnableExtraLogging = {}",
        registry.get_bool(G_ENABLE_EXTRA_LOGGING)
    );
    println!("g_TestFloat = {}", registry.get_float(G_TEST_FLOAT));
    println!(
        "g_UserStringPrefix = {}",
        registry.get_str(G_USER_STRING_PREFIX)
    );
}

fn main() -> ExitCode {
    let mut registry = build_registry();

    println!("Variables before args file:");
    print_vars(&registry);

    match setup_from_args(&mut registry, std::env::args_os()) {
        Ok(Some(summary)) => println!("Applied {} of {} lines", summary.applied, summary.lines),
        Ok(None) => println!("No args file given"),
        Err(err) => {
            eprintln!("error: {}", err);
            if let Some(source) = err.source() {
                eprintln!("  caused by: {}", source);
            }
            return ExitCode::FAILURE;
        }
    }

    println!("Variables after args file:");
    print_vars(&registry);

    let line = format!("SetPlayerPosition {:.3} {:.3} {:.3}", 2.0, 5.0, 7.0);
    registry.execute(&line);
    ExitCode::SUCCESS
}
