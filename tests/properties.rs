use proptest::prelude::*;

use bevy_console_args::core::{
    ArgTokenizer, CommandArgsRegistry, DEFAULT_DELIMITERS, RegistryBuilder, hash_name, parse_bool,
    parse_float, parse_int,
};

fn registry() -> CommandArgsRegistry {
    let mut builder = RegistryBuilder::new();
    builder.register_var("g_testInteger", 0);
    builder.register_var("g_TestFloat", 0.0f32);
    builder.register_var("g_UserStringPrefix", "user");
    builder.register_var("g_EnableExtraLogging", true);
    builder.build()
}

fn delimiter_run() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(DEFAULT_DELIMITERS.to_vec()), 1..4)
        .prop_map(|chars| chars.into_iter().collect())
}

#[test]
fn empty_name_hashes_to_zero() {
    assert_eq!(hash_name(""), 0);
}

proptest! {
    /// Hashing ignores ASCII case.
    #[test]
    fn hash_is_case_insensitive(name in "\\PC*") {
        let hash = hash_name(&name);
        prop_assert_eq!(hash, hash_name(&name.to_ascii_lowercase()));
        prop_assert_eq!(hash, hash_name(&name.to_ascii_uppercase()));
    }
}

proptest! {
    /// Tokens come back in order, then the tokenizer stays exhausted.
    #[test]
    fn tokenizer_yields_tokens_in_order(
        tokens in prop::collection::vec("[a-zA-Z0-9.\\-_]{1,8}", 0..8),
        lead in delimiter_run(),
        seps in prop::collection::vec(delimiter_run(), 8),
    ) {
        let mut line = lead;
        for (token, sep) in tokens.iter().zip(&seps) {
            line.push_str(token);
            line.push_str(sep);
        }

        let mut args = ArgTokenizer::new(&line);
        for token in &tokens {
            prop_assert_eq!(args.next_token(), Some(token.as_str()));
        }
        prop_assert_eq!(args.next_token(), None);
        prop_assert_eq!(args.next_token(), None);
        prop_assert_eq!(args.input(), line.as_str());
    }
}

proptest! {
    /// Parsers never panic, whatever the input.
    #[test]
    fn parsers_accept_anything(text in "\\PC*") {
        let _ = parse_int(&text);
        let _ = parse_float(&text);
        let _ = parse_bool(&text);
    }

    #[test]
    fn parse_int_reads_any_i32(value in any::<i32>()) {
        prop_assert_eq!(parse_int(&value.to_string()), value);
    }
}

proptest! {
    /// `name value` followed by a typed get returns the parsed value.
    #[test]
    fn int_assignment_round_trips(value in any::<i32>()) {
        let mut registry = registry();
        prop_assert_eq!(registry.execute(&format!("G_TESTINTEGER {}", value)), 1);
        prop_assert_eq!(registry.get_int(hash_name("g_testInteger")), value);
    }

    #[test]
    fn float_assignment_round_trips(
        value in (-4_000_000i32..4_000_000).prop_map(|n| n as f32 / 4.0),
    ) {
        let mut registry = registry();
        prop_assert_eq!(registry.execute(&format!("g_TestFloat {}", value)), 1);
        prop_assert_eq!(registry.get_float(hash_name("g_TestFloat")), value);
    }

    #[test]
    fn string_assignment_keeps_text(text in "[a-zA-Z0-9]([a-zA-Z0-9 ]{0,16}[a-zA-Z0-9])?") {
        let mut registry = registry();
        prop_assert_eq!(registry.execute(&format!("g_UserStringPrefix {}", text)), 1);
        prop_assert_eq!(registry.get_str(hash_name("g_UserStringPrefix")), text.as_str());
    }

    /// A delimiter after a flag's name makes the line an assignment of the
    /// empty text, never a bare flag.
    #[test]
    fn trailing_delimiters_clear_flag(trailing in delimiter_run()) {
        let mut registry = registry();
        let key = hash_name("g_EnableExtraLogging");
        prop_assert_eq!(registry.execute(&format!("g_EnableExtraLogging{}", trailing)), 1);
        prop_assert!(!registry.get_bool(key));
        prop_assert_eq!(registry.execute("g_EnableExtraLogging"), 1);
        prop_assert!(registry.get_bool(key));
    }

    /// Lines naming nothing registered change nothing.
    #[test]
    fn unknown_lines_change_nothing(name in "x[a-z]{0,8}", rest in "[ -~]{0,16}") {
        let mut registry = registry();
        let before: Vec<_> = registry.vars().map(|(n, v)| (n.to_string(), v.clone())).collect();

        prop_assert_eq!(registry.execute(&format!("{} {}", name, rest)), 0);

        for (n, v) in before {
            prop_assert_eq!(registry.var(hash_name(&n)), Some(&v));
        }
    }
}
