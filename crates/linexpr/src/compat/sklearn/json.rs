//! JSON export of a fitted sklearn `LogisticRegression`.
//!
//! The format mirrors the estimator's fitted attributes:
//!
//! ```json
//! {
//!   "coef": [[0.5, -1.25], [1.0, 0.0], [-0.3, 2.0]],
//!   "intercept": [0.1, -0.2, 0.05],
//!   "classes": [0, 1, 2],
//!   "multi_class": "multinomial",
//!   "solver": "lbfgs"
//! }
//! ```
//!
//! A binary model has a single coefficient row and a single intercept.

use serde::{Deserialize, Serialize};

use super::TranslateError;

fn default_multi_class() -> String {
    "auto".to_string()
}

fn default_solver() -> String {
    "lbfgs".to_string()
}

/// Fitted parameters of a logistic regression (`coef_`, `intercept_`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// One row per class; a single row for binary models.
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    /// Class labels in `coef` row order; `predict` yields an index into them.
    #[serde(default)]
    pub classes: Option<Vec<serde_json::Value>>,
    /// `"ovr"`, `"multinomial"` or `"auto"`.
    #[serde(default = "default_multi_class")]
    pub multi_class: String,
    /// Needed to resolve `multi_class = "auto"`.
    #[serde(default = "default_solver")]
    pub solver: String,
}

impl LogisticRegression {
    /// Parse the JSON export.
    pub fn from_json(text: &str) -> Result<Self, TranslateError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read the JSON export from any reader.
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, TranslateError> {
        Ok(serde_json::from_reader(reader)?)
    }
}
