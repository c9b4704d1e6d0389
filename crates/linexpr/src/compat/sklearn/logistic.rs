//! Logistic regression translators.
//!
//! # Tree shapes
//!
//! | model      | method              | tree                                                |
//! |------------|---------------------|-----------------------------------------------------|
//! | binary     | `decision_function` | `Linear`                                            |
//! | binary     | `predict`           | `Step(Linear)`                                      |
//! | binary     | `predict_proba`     | `Classifier(Sigmoid(Linear))`                       |
//! | multiclass | `decision_function` | `Linear`                                            |
//! | multiclass | `predict`           | `ArgMax(Linear)`                                    |
//! | ovr        | `predict_proba`     | `Classifier(VecSumNormalize(Sigmoid(Linear)))`      |
//! | multinomial| `predict_proba`     | `Classifier(SKLearnSoftmax(Linear))`                |
//!
//! `predict_log_proba` adds a `Log` under the classifier wrapper.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use super::classifier::{Classifier, Method, OutputSelector};
use super::linear::linear_model;
use super::TranslateError;
use crate::repr::{Expr, Inputs, UnaryOp, Weights};

/// Cross-class normalization used by a multiclass logistic regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MultiClass {
    /// One-vs-rest: independent sigmoids, renormalized to sum to one.
    Ovr,
    /// Joint softmax over the raw class scores.
    Multinomial,
}

impl MultiClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ovr => "ovr",
            Self::Multinomial => "multinomial",
        }
    }
}

impl fmt::Display for MultiClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MultiClass {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ovr" => Ok(Self::Ovr),
            "multinomial" => Ok(Self::Multinomial),
            other => Err(TranslateError::InvalidMultiClass(other.to_string())),
        }
    }
}

/// Binary logistic regression.
///
/// `predict_proba` yields the probability of class 1 only.
pub fn logreg_binary(
    coef: Array1<f64>,
    intercept: f64,
    inputs: impl Into<Inputs>,
    method: Method,
) -> Result<Expr, TranslateError> {
    logreg_binary_with(&Classifier, coef, intercept, inputs, method)
}

/// [`logreg_binary`] with an explicit output selector.
pub fn logreg_binary_with<S: OutputSelector + ?Sized>(
    selector: &S,
    coef: Array1<f64>,
    intercept: f64,
    inputs: impl Into<Inputs>,
    method: Method,
) -> Result<Expr, TranslateError> {
    tracing::debug!(n_features = coef.len(), %method, "translating binary logistic regression");

    let decision = linear_model(Weights::vector(coef, intercept), inputs)?;

    match method {
        Method::DecisionFunction => Ok(decision),
        Method::Predict => Ok(Expr::unary(UnaryOp::Step, decision)),
        _ => selector.select(Expr::unary(UnaryOp::Sigmoid, decision), method),
    }
}

/// Multiclass logistic regression.
///
/// `coef` has one row per class; `intercept` one entry per class. Use
/// [`Inputs::default()`] for the canonical input name.
pub fn logreg_multiclass(
    coef: Array2<f64>,
    intercept: Array1<f64>,
    inputs: impl Into<Inputs>,
    method: Method,
    multi_class: MultiClass,
) -> Result<Expr, TranslateError> {
    logreg_multiclass_with(&Classifier, coef, intercept, inputs, method, multi_class)
}

/// [`logreg_multiclass`] with an explicit output selector.
pub fn logreg_multiclass_with<S: OutputSelector + ?Sized>(
    selector: &S,
    coef: Array2<f64>,
    intercept: Array1<f64>,
    inputs: impl Into<Inputs>,
    method: Method,
    multi_class: MultiClass,
) -> Result<Expr, TranslateError> {
    translate_multiclass(selector, coef, intercept, inputs, method, || Ok(multi_class))
}

/// [`logreg_multiclass_with`] taking the strategy by its sklearn name.
///
/// The name is only consulted for `predict_proba` and `predict_log_proba`.
/// There an unknown strategy fails before the selector is called.
pub fn logreg_multiclass_named<S: OutputSelector + ?Sized>(
    selector: &S,
    coef: Array2<f64>,
    intercept: Array1<f64>,
    inputs: impl Into<Inputs>,
    method: Method,
    multi_class: &str,
) -> Result<Expr, TranslateError> {
    translate_multiclass(selector, coef, intercept, inputs, method, || multi_class.parse())
}

/// Shared multiclass path. `multi_class` is resolved only when a
/// probability vector is needed.
pub(super) fn translate_multiclass<S: OutputSelector + ?Sized>(
    selector: &S,
    coef: Array2<f64>,
    intercept: Array1<f64>,
    inputs: impl Into<Inputs>,
    method: Method,
    multi_class: impl FnOnce() -> Result<MultiClass, TranslateError>,
) -> Result<Expr, TranslateError> {
    tracing::debug!(
        n_classes = coef.nrows(),
        n_features = coef.ncols(),
        %method,
        "translating multiclass logistic regression"
    );

    let decision = linear_model(Weights::matrix(coef, intercept), inputs)?;

    let probs = match method {
        Method::DecisionFunction => return Ok(decision),
        Method::Predict => return Ok(Expr::unary(UnaryOp::ArgMax, decision)),
        _ => {
            let multi_class = multi_class()?;
            tracing::debug!(%multi_class, "normalizing class scores");
            match multi_class {
                MultiClass::Ovr => Expr::unary(
                    UnaryOp::VecSumNormalize,
                    Expr::unary(UnaryOp::Sigmoid, decision),
                ),
                MultiClass::Multinomial => Expr::unary(UnaryOp::SklearnSoftmax, decision),
            }
        }
    };

    selector.select(probs, method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repr::OutputMode;
    use ndarray::array;
    use rstest::rstest;

    fn binary(method: Method) -> Expr {
        logreg_binary(array![1.0, -2.0], 0.5, "x", method).unwrap()
    }

    fn multiclass(method: Method, multi_class: MultiClass) -> Expr {
        logreg_multiclass(
            array![[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]],
            array![0.0, 0.1, -0.1],
            Inputs::default(),
            method,
            multi_class,
        )
        .unwrap()
    }

    #[test]
    fn binary_decision_function_is_bare_linear() {
        let expr = binary(Method::DecisionFunction);
        assert!(expr.as_linear().is_some());
        assert_eq!(expr.to_string(), "1.0*x[0] - 2.0*x[1] + 0.5");
    }

    #[test]
    fn binary_predict_steps_the_decision() {
        let expr = binary(Method::Predict);
        let step = expr.as_unary().unwrap();
        assert_eq!(step.op(), UnaryOp::Step);
        assert_eq!(step.arg(), &binary(Method::DecisionFunction));
        assert_eq!(expr.to_string(), "Step(1.0*x[0] - 2.0*x[1] + 0.5)");
    }

    #[test]
    fn binary_proba_is_sigmoid_probability() {
        let expr = binary(Method::PredictProba);
        assert_eq!(expr.as_classifier().unwrap().mode(), OutputMode::Probability);
        assert_eq!(expr.op_chain(), vec![UnaryOp::Sigmoid]);
        assert_eq!(expr.innermost(), &binary(Method::DecisionFunction));
    }

    #[test]
    fn binary_log_proba() {
        let expr = binary(Method::PredictLogProba);
        assert_eq!(expr.as_classifier().unwrap().mode(), OutputMode::LogProbability);
        assert_eq!(expr.op_chain(), vec![UnaryOp::Log, UnaryOp::Sigmoid]);
    }

    #[test]
    fn multiclass_decision_and_predict() {
        let decision = multiclass(Method::DecisionFunction, MultiClass::Ovr);
        assert!(decision.as_linear().unwrap().is_vector());

        let predict = multiclass(Method::Predict, MultiClass::Ovr);
        let argmax = predict.as_unary().unwrap();
        assert_eq!(argmax.op(), UnaryOp::ArgMax);
        assert_eq!(argmax.arg(), &decision);
    }

    #[test]
    fn multiclass_proba_chains() {
        let ovr = multiclass(Method::PredictProba, MultiClass::Ovr);
        assert_eq!(ovr.op_chain(), vec![UnaryOp::VecSumNormalize, UnaryOp::Sigmoid]);

        let multinomial = multiclass(Method::PredictProba, MultiClass::Multinomial);
        assert_eq!(multinomial.op_chain(), vec![UnaryOp::SklearnSoftmax]);

        assert_ne!(ovr, multinomial);
    }

    #[test]
    fn multiclass_log_proba() {
        let expr = multiclass(Method::PredictLogProba, MultiClass::Multinomial);
        assert_eq!(expr.op_chain(), vec![UnaryOp::Log, UnaryOp::SklearnSoftmax]);
    }

    #[test]
    fn parse_multi_class() {
        assert_eq!("ovr".parse::<MultiClass>().unwrap(), MultiClass::Ovr);
        assert_eq!("multinomial".parse::<MultiClass>().unwrap(), MultiClass::Multinomial);
        let err = "bogus".parse::<MultiClass>().unwrap_err();
        assert_eq!(err.to_string(), "invalid value of the multi_class argument: bogus");
    }

    #[rstest]
    #[case(Method::DecisionFunction)]
    #[case(Method::Predict)]
    fn named_strategy_unused_without_probabilities(#[case] method: Method) {
        let expr = logreg_multiclass_named(
            &Classifier,
            array![[1.0], [2.0]],
            array![0.0, 0.0],
            "x",
            method,
            "bogus",
        )
        .unwrap();
        assert_eq!(expr.innermost(), &multiclass_decision_2x1());
    }

    #[rstest]
    #[case(Method::PredictProba)]
    #[case(Method::PredictLogProba)]
    fn named_strategy_checked_for_probabilities(#[case] method: Method) {
        let result = logreg_multiclass_named(
            &Classifier,
            array![[1.0], [2.0]],
            array![0.0, 0.0],
            "x",
            method,
            "bogus",
        );
        assert!(matches!(result, Err(TranslateError::InvalidMultiClass(v)) if v == "bogus"));
    }

    #[test]
    fn named_strategy_parses_known_names() {
        let expr = logreg_multiclass_named(
            &Classifier,
            array![[1.0], [2.0]],
            array![0.0, 0.0],
            "x",
            Method::PredictProba,
            "multinomial",
        )
        .unwrap();
        assert_eq!(expr.op_chain(), vec![UnaryOp::SklearnSoftmax]);
    }

    fn multiclass_decision_2x1() -> Expr {
        linear_model(Weights::matrix(array![[1.0], [2.0]], array![0.0, 0.0]), "x").unwrap()
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let result = logreg_multiclass(
            array![[1.0], [2.0]],
            array![0.0],
            "x",
            Method::PredictProba,
            MultiClass::Ovr,
        );
        assert!(matches!(result, Err(TranslateError::Shape(_))));
    }
}
