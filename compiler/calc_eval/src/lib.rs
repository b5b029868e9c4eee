//! Evaluation for calc expression trees.
//!
//! Provides variable [`Bindings`], the tree-walking [`Evaluator`] and the
//! constant-folding [`Optimizer`]. Both walks share the operator semantics
//! in [`ops`].

pub mod env;
mod error;
pub mod evaluator;
pub mod ops;
pub mod optimizer;

pub use env::Bindings;
pub use error::EvalError;
pub use evaluator::{evaluate, Evaluate, Evaluator};
pub use optimizer::{optimize, Optimizer};
