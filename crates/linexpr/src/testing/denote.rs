//! Reference denotation of expression trees.
//!
//! Computes what a tree means for concrete inputs, so tests can check the
//! numbers a renderer should reproduce. Operator semantics:
//!
//! - `Step`: `1` if `x > 0`, else `0`
//! - `Sigmoid`: clamps to `[-500, 500]` before exponentiating
//! - `ArgMax`: first index wins on ties
//! - `SKLearnSoftmax`: subtracts the max before exponentiating

use std::collections::HashMap;

use approx::AbsDiffEq;
use ndarray::{Array1, ArrayView1};

use crate::repr::{Constant, Expr, UnaryOp, Weights};

/// Concrete value of a (sub)tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Vector(Array1<f64>),
}

impl Value {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Vector(_) => None,
        }
    }

    pub fn as_vector(&self) -> Option<ArrayView1<'_, f64>> {
        match self {
            Self::Vector(v) => Some(v.view()),
            Self::Scalar(_) => None,
        }
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        match self {
            Self::Scalar(v) => Self::Scalar(f(v)),
            Self::Vector(v) => Self::Vector(v.mapv(f)),
        }
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Scalar(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Self::Vector(Array1::from(v))
    }
}

impl From<Array1<f64>> for Value {
    fn from(v: Array1<f64>) -> Self {
        Self::Vector(v)
    }
}

impl AbsDiffEq for Value {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a.abs_diff_eq(b, epsilon),
            (Self::Vector(a), Self::Vector(b)) => a.abs_diff_eq(b, epsilon),
            _ => false,
        }
    }
}

/// Values bound to input names.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    values: HashMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing any previous value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}

/// Why a tree could not be denoted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DenoteError {
    #[error("input {0:?} is not bound")]
    Unbound(String),
    #[error("{op} expects a vector argument")]
    ExpectedVector { op: &'static str },
    #[error("linear combination expects {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
    #[error("{op} of an empty vector")]
    EmptyVector { op: &'static str },
}

/// Compute the value `expr` denotes under `bindings`.
pub fn denote(expr: &Expr, bindings: &Bindings) -> Result<Value, DenoteError> {
    match expr {
        Expr::Input(id) => bindings
            .get(id.name())
            .cloned()
            .ok_or_else(|| DenoteError::Unbound(id.name().to_string())),
        Expr::Const(Constant::Scalar(v)) => Ok(Value::Scalar(*v)),
        Expr::Const(Constant::Vector(v)) => Ok(Value::Vector(v.clone())),
        Expr::Linear(linear) => {
            let input = match denote(linear.input(), bindings)? {
                Value::Vector(v) => v,
                Value::Scalar(v) => Array1::from(vec![v]),
            };
            let expected = linear.weights().n_features();
            if input.len() != expected {
                return Err(DenoteError::FeatureCount {
                    expected,
                    actual: input.len(),
                });
            }
            Ok(match linear.weights() {
                Weights::Vector { coef, intercept } => Value::Scalar(coef.dot(&input) + intercept),
                Weights::Matrix { coef, intercept } => Value::Vector(coef.dot(&input) + intercept),
            })
        }
        Expr::Unary(func) => apply(func.op(), denote(func.arg(), bindings)?),
        Expr::Classifier(output) => denote(output.expr(), bindings),
    }
}

fn apply(op: UnaryOp, value: Value) -> Result<Value, DenoteError> {
    match op {
        UnaryOp::Step => Ok(value.map(|x| if x > 0.0 { 1.0 } else { 0.0 })),
        UnaryOp::Sigmoid => Ok(value.map(sigmoid)),
        UnaryOp::Log => Ok(value.map(f64::ln)),
        UnaryOp::ArgMax => {
            let v = vector_arg(op, value)?;
            Ok(Value::Scalar(argmax(v.view()) as f64))
        }
        UnaryOp::VecSumNormalize => {
            let mut v = vector_arg(op, value)?;
            let sum = v.sum();
            v.mapv_inplace(|x| x / sum);
            Ok(Value::Vector(v))
        }
        UnaryOp::SklearnSoftmax => {
            let mut v = vector_arg(op, value)?;
            softmax_inplace(v.as_slice_mut().ok_or(DenoteError::ExpectedVector { op: op.name() })?);
            Ok(Value::Vector(v))
        }
    }
}

/// Non-empty vector argument of a vector operator.
fn vector_arg(op: UnaryOp, value: Value) -> Result<Array1<f64>, DenoteError> {
    match value {
        Value::Vector(v) if v.is_empty() => Err(DenoteError::EmptyVector { op: op.name() }),
        Value::Vector(v) => Ok(v),
        Value::Scalar(_) => Err(DenoteError::ExpectedVector { op: op.name() }),
    }
}

/// Index of the first maximum.
fn argmax(values: ArrayView1<'_, f64>) -> usize {
    let mut best = 0;
    for (idx, &x) in values.iter().enumerate() {
        if x > values[best] {
            best = idx;
        }
    }
    best
}

/// Numerically stable sigmoid.
/// Clamps input to [-500, 500] to prevent overflow.
#[inline]
fn sigmoid(x: f64) -> f64 {
    let clamped = x.clamp(-500.0, 500.0);
    if clamped >= 0.0 {
        1.0 / (1.0 + (-clamped).exp())
    } else {
        let e = clamped.exp();
        e / (1.0 + e)
    }
}

/// Numerically stable softmax in-place.
/// Subtracts max before exponentiating to avoid overflow.
#[inline]
fn softmax_inplace(row: &mut [f64]) {
    let max = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    let mut sum = 0.0;
    for x in row.iter_mut() {
        *x = (*x - max).exp();
        sum += *x;
    }

    if sum > 0.0 {
        for x in row.iter_mut() {
            *x /= sum;
        }
    }
}
