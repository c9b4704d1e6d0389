//! Translators for models from other libraries.
//!
//! - [`sklearn`]: scikit-learn linear classifiers

pub mod sklearn;
