use calc_lexer::{tokenize, tokenize_with_config, LexerConfig, StreamingLexer, Token, TokenKind};
use proptest::prelude::*;

#[allow(dead_code)]
fn init_test_logger() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

fn kinds_and_text(tokens: &[Token]) -> Vec<(TokenKind, String)> {
    tokens.iter().map(|t| (t.kind, t.text.clone())).collect()
}

fn operand() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..10_000).prop_map(|n| n.to_string()),
        (0u32..1000, 0u32..1000).prop_map(|(a, b)| format!("{a}.{b}")),
        (0u32..0xFFFF).prop_map(|n| format!("0x{n:X}")),
        (0u32..64).prop_map(|n| format!("0b{n:b}")),
        "[a-z]{1,6}",
    ]
}

fn operator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["+", "-", "*", "/", "%", "|", "&"])
}

fn spacing() -> impl Strategy<Value = String> {
    "[ \t]{0,3}"
}

/// Alternating operand/operator sequences joined with arbitrary spacing
fn spaced_expression() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    (operand(), prop::collection::vec((operator(), operand()), 0..8)).prop_flat_map(
        |(first, rest)| {
            let mut parts = vec![first];
            for (op, rhs) in rest {
                parts.push(op.to_string());
                parts.push(rhs);
            }
            let n = parts.len() + 1;
            (Just(parts), prop::collection::vec(spacing(), n))
        },
    )
}

fn join(parts: &[String], spaces: &[String]) -> String {
    let mut out = spaces[0].clone();
    for (part, space) in parts.iter().zip(&spaces[1..]) {
        out.push_str(part);
        out.push_str(space);
    }
    out
}

proptest! {
    #[test]
    fn whitespace_never_changes_kinds_or_text((parts, spaces) in spaced_expression()) {
        let tight = parts.join(" ");
        let loose = join(&parts, &spaces);
        prop_assert_eq!(
            kinds_and_text(&tokenize(&tight)),
            kinds_and_text(&tokenize(&loose))
        );
    }

    #[test]
    fn streaming_matches_synchronous(source in "[-+*/%|^&()0-9a-zA-Z.x $é]{0,48}") {
        let streamed: Vec<Token> = StreamingLexer::spawn(source.clone()).collect();
        prop_assert_eq!(streamed, tokenize(&source));
    }

    #[test]
    fn streaming_matches_synchronous_in_xor_mode(source in "[-+*/^()0-9a-z. ]{0,48}") {
        let config = LexerConfig { channel_capacity: 3, ..LexerConfig::xor() };
        let streamed: Vec<Token> = StreamingLexer::spawn_with_config(source.clone(), config).collect();
        prop_assert_eq!(streamed, tokenize_with_config(&source, config));
    }

    #[test]
    fn spans_are_ordered_and_in_bounds(source in "[-+*/()0-9a-z.x $]{0,48}") {
        let tokens = tokenize(&source);
        let mut last_end = 0;
        for token in &tokens {
            prop_assert!(token.start >= last_end);
            prop_assert!(token.start < token.end);
            prop_assert!(token.end <= source.len());
            last_end = token.end;
        }
    }
}

#[test]
fn test_long_expression_streams_in_order() {
    init_test_logger();
    let source = (0..500).map(|i| i.to_string()).collect::<Vec<_>>().join(" + ");
    let config = LexerConfig {
        channel_capacity: 8,
        ..LexerConfig::default()
    };
    let streamed: Vec<Token> = StreamingLexer::spawn_with_config(source.clone(), config).collect();
    assert_eq!(streamed.len(), 999);
    assert_eq!(streamed, tokenize(&source));
}
