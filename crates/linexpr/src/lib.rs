//! linexpr: fitted linear classifiers as expression trees.
//!
//! Translates the learned parameters of logistic regression models into a
//! backend-independent expression tree that renderers can turn into SQL,
//! spreadsheet formulas, or plain arithmetic.
//!
//! # Key Types
//!
//! - [`Expr`] - Expression tree node
//! - [`UnaryOp`] - Operators layered over the decision function
//! - [`Method`] / [`MultiClass`] - Requested output and multiclass strategy
//! - [`TranslateConfig`] - Configuration builder
//!
//! # Translating
//!
//! ```
//! use linexpr::compat::sklearn::{logreg_binary, Method};
//! use ndarray::array;
//!
//! let tree = logreg_binary(array![1.0, -2.0], 0.5, "x", Method::Predict).unwrap();
//! assert_eq!(tree.to_string(), "Step(1.0*x[0] - 2.0*x[1] + 0.5)");
//! ```
//!
//! Models exported to JSON can be loaded with
//! [`compat::sklearn::LogisticRegression`].

// Re-export approx traits for users who want to compare denoted values
pub use approx;

pub mod compat;
pub mod config;
pub mod repr;
pub mod testing;

// =============================================================================
// Convenience Re-exports
// =============================================================================

// Tree types
pub use repr::{Expr, Inputs, OutputMode, UnaryOp};

// Translation
pub use compat::sklearn::{LogisticRegression, Method, MultiClass, TranslateError};

// Configuration
pub use config::{ConfigError, TranslateConfig};
