//! Test utilities.
//!
//! [`denote`] gives the reference meaning of a tree for concrete inputs.
//! Integration tests and downstream renderers use it to check that the
//! trees they produce or consume compute the expected numbers.

mod denote;

pub use denote::{Bindings, DenoteError, Value, denote};
