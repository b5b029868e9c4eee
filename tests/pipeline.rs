use calc::{interpret, interpret_ast, EvalError, InterpretError, Interpreter, ParseErrorKind, Tree};
use calc_ast::{Function, LiteralKind, Node, Operator, OptimizedNode};
use calc_parser::parse_source;
use pretty_assertions::assert_eq;
use tests::init_test_logger;

fn int(text: &str) -> Node {
    Node::literal(LiteralKind::Int, text)
}

#[test]
fn precedence_shape_and_value() {
    init_test_logger();
    let tree = parse_source("1 + 2 * 3").tree.unwrap();
    assert_eq!(
        tree,
        Node::binary(Operator::Add, int("1"), Node::binary(Operator::Mult, int("2"), int("3")))
    );
    assert_eq!(interpret("1 + 2 * 3"), Ok(7.0));
    assert_eq!(interpret("(1 + 2) * 3"), Ok(9.0));
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(interpret("1 - 2 - 3"), Ok(-4.0));
    assert_eq!(interpret("100 / 10 / 5"), Ok(2.0));
}

#[test]
fn division_by_zero() {
    assert_eq!(
        interpret("1 / 0"),
        Err(vec![InterpretError::Eval(EvalError::DivisionByZero)])
    );
    assert_eq!(
        interpret("7 % (3 - 3)"),
        Err(vec![InterpretError::Eval(EvalError::DivisionByZero)])
    );
}

#[test]
fn undefined_variable_in_session() {
    let mut session = Interpreter::new("1 + a");
    assert_eq!(
        session.get_result(),
        Err(vec![InterpretError::Eval(EvalError::VariableNotDefined("a".into()))])
    );
}

#[test]
fn optimizing_with_variable_keeps_shape() {
    let mut session = Interpreter::new("1 + a");
    session.enable_optimizer().set_var("a", 41.0);
    assert_eq!(session.get_result(), Ok(42.0));
    assert_eq!(
        session.tree(),
        Some(&Tree::Optimized(OptimizedNode::operator(
            Operator::Add,
            OptimizedNode::Resolved(1.0),
            OptimizedNode::variable("a"),
        )))
    );
}

#[test]
fn optimizing_constants_matches_plain_value() {
    let source = "sqrt(0x51) * 2^3 - 0b101 % 3 + 7.5 / 2.5";
    let plain = interpret(source).unwrap();
    let mut session = Interpreter::new(source);
    session.enable_optimizer();
    assert_eq!(session.get_result(), Ok(plain));
    assert_eq!(session.tree(), Some(&Tree::Optimized(OptimizedNode::Resolved(plain))));
}

#[test]
fn missing_left_operand() {
    let tree = Node::operator(Operator::Add, None, Some(int("1")));
    assert_eq!(interpret_ast(&tree), Err(EvalError::MissingLeftChild));
    let tree = Node::function(Function::Cos, None);
    assert_eq!(interpret_ast(&tree), Err(EvalError::MissingLeftChild));
}

#[test]
fn bracket_recovery() {
    let unclosed = parse_source("(1");
    assert_eq!(unclosed.tree, parse_source("1").tree);
    assert_eq!(
        unclosed.errors.iter().map(|d| d.kind).collect::<Vec<_>>(),
        vec![ParseErrorKind::MissingClosingBracket]
    );

    let stray = parse_source("1)");
    assert_eq!(stray.tree, parse_source("1").tree);
    assert_eq!(
        stray.errors.iter().map(|d| d.kind).collect::<Vec<_>>(),
        vec![ParseErrorKind::UnexpectedClosingBracket]
    );
}

#[test]
fn functions() {
    assert_eq!(interpret("sqrt(9)"), Ok(3.0));
    assert_eq!(interpret("cos(0) + sin(0)"), Ok(1.0));
    assert!(interpret("sqrt(-4)").unwrap().is_nan());
}

#[test]
fn empty_expression() {
    assert_eq!(interpret(""), Ok(0.0));
}

#[test]
fn lexical_errors_surface_as_diagnostics() {
    let errors = interpret("2 * 3$").unwrap_err();
    let kinds: Vec<_> = errors
        .iter()
        .filter_map(|e| e.diagnostic().map(|d| d.kind))
        .collect();
    assert_eq!(kinds, vec![ParseErrorKind::InvalidCharacterInNumber]);
}

#[test]
fn deep_nesting_is_a_diagnostic() {
    let depth = 10_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let errors = interpret(&source).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].diagnostic().map(|d| d.kind),
        Some(ParseErrorKind::NestingTooDeep)
    );

    let mut session = Interpreter::new(format!("{}1{}", "sqrt(".repeat(depth), ")".repeat(depth)));
    session.use_streaming_lexer(true);
    assert!(session.get_result().is_err());
}
