//! Stateful interpreter sessions.
//!
//! A session owns one expression, its bindings and the tree parsed from
//! it. The expression is parsed lazily on first use and the tree is reused
//! across evaluations, so rebinding variables never re-parses.

use std::fmt;

use calc_ast::visit::VariableCollector;
use calc_ast::{Node, OptimizedNode, Visitable};
use calc_eval::{optimize, Bindings, EvalError, Evaluate};
use calc_lexer::LexerConfig;
use calc_parser::{parse_source_with_config, parse_streaming, Diagnostic, ParseOutput};
use log::{debug, trace};

use crate::InterpretError;

/// The tree a session evaluates
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    Parsed(Node),
    Optimized(OptimizedNode),
}

impl Tree {
    pub fn is_optimized(&self) -> bool {
        matches!(self, Tree::Optimized(_))
    }
}

impl Evaluate for Tree {
    fn evaluate(&self, bindings: &Bindings) -> Result<f64, EvalError> {
        match self {
            Tree::Parsed(node) => node.evaluate(bindings),
            Tree::Optimized(node) => node.evaluate(bindings),
        }
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tree::Parsed(node) => write!(f, "{node}"),
            Tree::Optimized(node) => write!(f, "{node}"),
        }
    }
}

#[derive(Debug)]
struct Parsed {
    tree: Option<Tree>,
    errors: Vec<Diagnostic>,
    /// Distinct variable names in order of first appearance
    variables: Vec<String>,
}

impl From<ParseOutput> for Parsed {
    fn from(output: ParseOutput) -> Self {
        let mut variables = Vec::new();
        if let Some(node) = &output.tree {
            let mut collector = VariableCollector::new();
            // collecting never fails
            let _ = node.accept(&mut collector);
            for name in collector.names {
                if !variables.contains(&name) {
                    variables.push(name);
                }
            }
        }
        Parsed {
            tree: output.tree.map(Tree::Parsed),
            errors: output.errors,
            variables,
        }
    }
}

/// An interpreter session over one expression
#[derive(Debug)]
pub struct Interpreter {
    expression: String,
    config: LexerConfig,
    streaming: bool,
    optimize: bool,
    bindings: Bindings,
    parsed: Option<Parsed>,
}

impl Interpreter {
    pub fn new(expression: impl Into<String>) -> Self {
        Self::with_config(expression, LexerConfig::default())
    }

    pub fn with_config(expression: impl Into<String>, config: LexerConfig) -> Self {
        Self {
            expression: expression.into(),
            config,
            streaming: false,
            optimize: false,
            bindings: Bindings::new(),
            parsed: None,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Replace the expression. The next evaluation parses it afresh;
    /// bindings and settings are kept.
    pub fn set_expression(&mut self, expression: impl Into<String>) -> &mut Self {
        self.expression = expression.into();
        self.parsed = None;
        self
    }

    /// Insert or overwrite a binding
    pub fn set_var(&mut self, name: impl Into<String>, value: f64) -> &mut Self {
        self.bindings.insert(name, value);
        self
    }

    pub fn remove_var(&mut self, name: &str) -> Option<f64> {
        self.bindings.remove(name)
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Fold constant subtrees before the next evaluation. Calling this
    /// again has no further effect.
    pub fn enable_optimizer(&mut self) -> &mut Self {
        self.optimize = true;
        self
    }

    /// Lex on a separate thread while parsing
    pub fn use_streaming_lexer(&mut self, streaming: bool) -> &mut Self {
        self.streaming = streaming;
        self
    }

    /// Parse the expression if that has not happened yet and return the
    /// parse diagnostics.
    pub fn parse(&mut self) -> &[Diagnostic] {
        &self.ensure_parsed().errors
    }

    /// The cached tree, `None` before parsing or for an empty expression
    pub fn tree(&self) -> Option<&Tree> {
        self.parsed.as_ref().and_then(|parsed| parsed.tree.as_ref())
    }

    /// Variable names the expression references, in order of first use
    pub fn variables(&mut self) -> &[String] {
        &self.ensure_parsed().variables
    }

    /// Evaluate the expression against the current bindings.
    ///
    /// Parses on first use and optimizes once if the optimizer is enabled.
    /// Parse diagnostics are returned all together; evaluation stops at
    /// the first error.
    pub fn get_result(&mut self) -> Result<f64, Vec<InterpretError>> {
        let Interpreter {
            expression,
            config,
            streaming,
            optimize: optimize_enabled,
            bindings,
            parsed,
        } = self;
        let parsed = parsed.get_or_insert_with(|| parse_expression(expression, *config, *streaming));
        if !parsed.errors.is_empty() {
            return Err(parsed.errors.iter().cloned().map(InterpretError::from).collect());
        }

        if *optimize_enabled {
            if let Some(Tree::Parsed(node)) = &parsed.tree {
                let folded = optimize(Some(node)).map_err(|e| vec![InterpretError::from(e)])?;
                if let Some(folded) = folded {
                    debug!("optimized tree: {folded}");
                    parsed.tree = Some(Tree::Optimized(folded));
                }
            }
        }

        let result = calc_eval::evaluate(parsed.tree.as_ref(), bindings)
            .map_err(|e| vec![InterpretError::from(e)]);
        trace!("{expression} => {result:?}");
        result
    }

    fn ensure_parsed(&mut self) -> &mut Parsed {
        let (expression, config, streaming) = (&self.expression, self.config, self.streaming);
        self.parsed
            .get_or_insert_with(|| parse_expression(expression, config, streaming))
    }
}

fn parse_expression(expression: &str, config: LexerConfig, streaming: bool) -> Parsed {
    let output = if streaming {
        parse_streaming(expression, config)
    } else {
        parse_source_with_config(expression, config)
    };
    debug!(
        "parsed '{}' with {} diagnostics",
        expression,
        output.errors.len()
    );
    Parsed::from(output)
}
