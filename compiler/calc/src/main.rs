use calc::{render_snippet, CaretMode, InterpretError, Interpreter, LexerConfig};
use clap::{Parser, ValueEnum};
use log::{debug, LevelFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Caret {
    /// `2^10` is an exponential literal
    Exponent,
    /// `^` is the bitwise xor operator
    Xor,
}

impl From<Caret> for CaretMode {
    fn from(caret: Caret) -> Self {
        match caret {
            Caret::Exponent => CaretMode::Exponent,
            Caret::Xor => CaretMode::Xor,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "calc",
    version,
    about = "Evaluate an arithmetic expression",
    long_about = "calc lexes, parses and evaluates one arithmetic expression.\n\n\
        EXAMPLES:\n\
        \n  calc '1 + 2 * 3'                      Prints 7\n\
        \n  calc --var x=4 'sqrt(x) * 0x10'       Prints 32\n\
        \n  calc --caret xor '6 ^ 3'              Prints 5"
)]
struct Cli {
    /// The expression to evaluate
    #[arg(value_name = "EXPRESSION")]
    expression: String,

    /// Fold constant subtrees before evaluating
    #[arg(long)]
    optimize: bool,

    /// Lex on a separate thread while parsing
    #[arg(long)]
    streaming: bool,

    /// Meaning of '^'
    #[arg(long, value_enum, default_value_t = Caret::Exponent)]
    caret: Caret,

    /// Bind a variable, e.g. --var x=1.5 (repeatable)
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_binding)]
    vars: Vec<(String, f64)>,

    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_binding(arg: &str) -> Result<(String, f64), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(format!("invalid variable name '{name}'"));
    }
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for '{name}': {e}"))?;
    Ok((name.to_string(), value))
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> i32 {
    let config = LexerConfig {
        caret: cli.caret.into(),
        ..LexerConfig::default()
    };
    let mut session = Interpreter::with_config(cli.expression.as_str(), config);
    session.use_streaming_lexer(cli.streaming);
    if cli.optimize {
        session.enable_optimizer();
    }
    for (name, value) in cli.vars {
        session.set_var(name, value);
    }

    let result = session.get_result();
    if let Some(tree) = session.tree() {
        debug!("tree: {tree}");
    }
    for (name, value) in session.bindings().collect_bindings() {
        debug!("binding: {name} = {value}");
    }

    match result {
        Ok(value) => {
            println!("{value}");
            0
        }
        Err(errors) => {
            for error in &errors {
                match error {
                    InterpretError::Parse(diagnostic) => {
                        eprintln!("{}", render_snippet(diagnostic, &cli.expression))
                    }
                    InterpretError::Eval(err) => eprintln!("error: {err}"),
                }
            }
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    std::process::exit(run(cli));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_bindings() {
        let cli = Cli::try_parse_from([
            "calc",
            "--optimize",
            "--caret",
            "xor",
            "--var",
            "x=2",
            "--var",
            "y = -0.5",
            "-vv",
            "x ^ 1",
        ])
        .unwrap();
        assert!(cli.optimize);
        assert!(!cli.streaming);
        assert_eq!(cli.caret, Caret::Xor);
        assert_eq!(cli.vars, vec![("x".to_string(), 2.0), ("y".to_string(), -0.5)]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.expression, "x ^ 1");
    }

    #[test]
    fn rejects_malformed_bindings() {
        assert!(parse_binding("x").is_err());
        assert!(parse_binding("=1").is_err());
        assert!(parse_binding("x1=1").is_err());
        assert!(parse_binding("x=abc").is_err());
    }

    #[test]
    fn exit_codes() {
        let ok = Cli::try_parse_from(["calc", "--var", "a=3", "a * 2"]).unwrap();
        assert_eq!(run(ok), 0);
        let bad = Cli::try_parse_from(["calc", "1 / 0"]).unwrap();
        assert_eq!(run(bad), 1);
    }
}
