use calc_lexer::{CaretMode, LexerConfig};
use calc_parser::{parse_source_with_config, parse_streaming};
use proptest::prelude::*;

fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[0-9]{1,4}",
        "[0-9]{1,3}\\.[0-9]{1,3}",
        "0x[0-9a-fA-F]{1,4}",
        "0b[01]{1,6}",
        "[a-z]{1,3}",
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        prop_oneof![
            (inner.clone(), "[-+*/%|&]", inner.clone())
                .prop_map(|(l, op, r)| format!("{l} {op} {r}")),
            inner.clone().prop_map(|e| format!("({e})")),
            ("(sqrt|sin|cos|tan|foo)", inner).prop_map(|(f, e)| format!("{f}({e})")),
        ]
    })
}

proptest! {
    #[test]
    fn streaming_and_sync_parses_agree(source in expression(), capacity in 1usize..8) {
        let config = LexerConfig { channel_capacity: capacity, caret: CaretMode::Exponent };
        prop_assert_eq!(
            parse_streaming(source.clone(), config),
            parse_source_with_config(&source, config)
        );
    }

    #[test]
    fn arbitrary_input_never_panics(source in "[ -~]{0,40}") {
        let output = parse_source_with_config(&source, LexerConfig::default());
        for diagnostic in &output.errors {
            prop_assert!(diagnostic.span.start <= diagnostic.span.end);
            prop_assert!(diagnostic.span.end <= source.len());
        }
    }
}
