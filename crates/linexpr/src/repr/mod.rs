//! Expression tree intermediate representation.
//!
//! A translated model is a single [`Expr`] tree. Leaves are input
//! references and constants; [`LinearCombination`] nodes hold the model
//! parameters; [`UnaryFunc`] nodes layer operators on top; a
//! [`ClassifierOutput`] may wrap the root to record which output it
//! represents.
//!
//! ```text
//! Classifier(Probability)
//!   └── VecSumNormalize
//!         └── Sigmoid
//!               └── Linear(coef, intercept)
//!                     └── Input("x")
//! ```
//!
//! Trees carry no evaluation logic. Renderers walk them with ordinary
//! pattern matching.

mod expr;
pub mod ops;

pub use expr::{
    ClassifierOutput, Constant, DEFAULT_INPUT, Expr, Identifier, Inputs, LinearCombination,
    OutputMode, ShapeError, UnaryFunc, Weights,
};
pub use ops::{OPERATORS, OpInfo, OpKind, UnaryOp};
