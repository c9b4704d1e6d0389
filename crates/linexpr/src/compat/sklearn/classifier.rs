//! Classifier output selection.
//!
//! Translators build a probability-bearing expression and hand it to an
//! [`OutputSelector`] together with the requested [`Method`]. The selector
//! decides the final shape of the tree and is the only place where method
//! names are validated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TranslateError;
use crate::repr::{Expr, OutputMode, UnaryOp};

/// sklearn estimator method whose output a tree emulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Raw decision scores, no probability semantics.
    DecisionFunction,
    /// Predicted class.
    Predict,
    /// Probability of class 1 (binary) or per-class probabilities.
    ///
    /// For binary models this is a single probability, not the two-column
    /// output sklearn returns.
    #[default]
    PredictProba,
    /// Natural log of [`PredictProba`](Self::PredictProba).
    PredictLogProba,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DecisionFunction => "decision_function",
            Self::Predict => "predict",
            Self::PredictProba => "predict_proba",
            Self::PredictLogProba => "predict_log_proba",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "decision_function" => Ok(Self::DecisionFunction),
            "predict" => Ok(Self::Predict),
            "predict_proba" => Ok(Self::PredictProba),
            "predict_log_proba" => Ok(Self::PredictLogProba),
            other => Err(TranslateError::InvalidMethod(other.to_string())),
        }
    }
}

/// Wraps a probability expression into the output a method asks for.
pub trait OutputSelector {
    fn select(&self, probs: Expr, method: Method) -> Result<Expr, TranslateError>;
}

/// Default selector.
///
/// | method              | result                                  |
/// |---------------------|-----------------------------------------|
/// | `predict_proba`     | `Classifier(Probability, probs)`        |
/// | `predict_log_proba` | `Classifier(LogProbability, Log(probs))`|
/// | `predict`           | `Classifier(Label, ArgMax(probs))`      |
/// | `decision_function` | error                                   |
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier;

impl OutputSelector for Classifier {
    fn select(&self, probs: Expr, method: Method) -> Result<Expr, TranslateError> {
        let out = match method {
            Method::PredictProba => Expr::classifier(OutputMode::Probability, probs),
            Method::PredictLogProba => {
                Expr::classifier(OutputMode::LogProbability, Expr::unary(UnaryOp::Log, probs))
            }
            Method::Predict => Expr::classifier(OutputMode::Label, Expr::unary(UnaryOp::ArgMax, probs)),
            Method::DecisionFunction => {
                return Err(TranslateError::InvalidMethod(method.to_string()));
            }
        };
        Ok(out)
    }
}

/// Select `method`'s output with the default [`Classifier`].
pub fn classifier(probs: Expr, method: Method) -> Result<Expr, TranslateError> {
    Classifier.select(probs, method)
}
