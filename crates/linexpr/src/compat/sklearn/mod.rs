//! scikit-learn model translation.
//!
//! Turns fitted logistic regression parameters into [`Expr`](crate::repr::Expr)
//! trees, either directly from coefficient arrays ([`logreg_binary`],
//! [`logreg_multiclass`]) or from a JSON export of the estimator
//! ([`LogisticRegression`]).
//!
//! Method names are validated by the output selector ([`Method`] parsing and
//! [`OutputSelector::select`]); the multiclass strategy is validated by the
//! logistic translator before any tree is built.

mod classifier;
mod convert;
mod error;
mod json;
mod linear;
mod logistic;

pub use classifier::{Classifier, Method, OutputSelector, classifier};
pub use error::TranslateError;
pub use json::LogisticRegression;
pub use linear::linear_model;
pub use logistic::{
    MultiClass, logreg_binary, logreg_binary_with, logreg_multiclass, logreg_multiclass_named,
    logreg_multiclass_with,
};
