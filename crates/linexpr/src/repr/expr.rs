//! Expression tree node types.

use std::fmt;

use ndarray::{Array1, Array2, ArrayView1};

use super::ops::UnaryOp;

/// Name of the input vector used when the caller does not supply one.
pub const DEFAULT_INPUT: &str = "x";

// =============================================================================
// Errors
// =============================================================================

/// Inconsistent linear model parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("coefficients must not be empty")]
    Empty,
    #[error("coefficient matrix has {rows} rows but intercept has {intercept} entries")]
    InterceptLength { rows: usize, intercept: usize },
}

// =============================================================================
// Leaves
// =============================================================================

/// Reference to a named symbolic input (scalar or vector).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Constant {
    Scalar(f64),
    Vector(Array1<f64>),
}

// =============================================================================
// Linear combination
// =============================================================================

/// Coefficients and intercept of an affine map.
#[derive(Debug, Clone, PartialEq)]
pub enum Weights {
    /// `coef . x + intercept`, producing a scalar.
    Vector { coef: Array1<f64>, intercept: f64 },
    /// `coef . x + intercept` with one row per output, producing a vector.
    ///
    /// Shape of `coef` is `[n_outputs, n_features]`.
    Matrix {
        coef: Array2<f64>,
        intercept: Array1<f64>,
    },
}

impl Weights {
    pub fn vector(coef: impl Into<Array1<f64>>, intercept: f64) -> Self {
        Self::Vector {
            coef: coef.into(),
            intercept,
        }
    }

    pub fn matrix(coef: Array2<f64>, intercept: impl Into<Array1<f64>>) -> Self {
        Self::Matrix {
            coef,
            intercept: intercept.into(),
        }
    }

    /// Number of input features the coefficients expect.
    pub fn n_features(&self) -> usize {
        match self {
            Self::Vector { coef, .. } => coef.len(),
            Self::Matrix { coef, .. } => coef.ncols(),
        }
    }

    /// Number of output components (1 for the scalar form).
    pub fn n_outputs(&self) -> usize {
        match self {
            Self::Vector { .. } => 1,
            Self::Matrix { coef, .. } => coef.nrows(),
        }
    }

    fn validate(&self) -> Result<(), ShapeError> {
        match self {
            Self::Vector { coef, .. } => {
                if coef.is_empty() {
                    return Err(ShapeError::Empty);
                }
            }
            Self::Matrix { coef, intercept } => {
                if coef.is_empty() {
                    return Err(ShapeError::Empty);
                }
                if coef.nrows() != intercept.len() {
                    return Err(ShapeError::InterceptLength {
                        rows: coef.nrows(),
                        intercept: intercept.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Affine map over an input expression.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearCombination {
    weights: Weights,
    input: Box<Expr>,
}

impl LinearCombination {
    /// Combine weights with an input expression.
    ///
    /// Only the weights are checked against each other; whether the input
    /// has `n_features` components is left to the renderer.
    pub fn new(weights: Weights, input: Expr) -> Result<Self, ShapeError> {
        weights.validate()?;
        Ok(Self {
            weights,
            input: Box::new(input),
        })
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn input(&self) -> &Expr {
        &self.input
    }

    /// True if the combination yields one score per output row.
    pub fn is_vector(&self) -> bool {
        matches!(self.weights, Weights::Matrix { .. })
    }
}

// =============================================================================
// Operators and outputs
// =============================================================================

/// Named operator applied to a single argument.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryFunc {
    op: UnaryOp,
    arg: Box<Expr>,
}

impl UnaryFunc {
    pub fn new(op: UnaryOp, arg: Expr) -> Self {
        Self {
            op,
            arg: Box::new(arg),
        }
    }

    pub fn op(&self) -> UnaryOp {
        self.op
    }

    pub fn arg(&self) -> &Expr {
        &self.arg
    }
}

/// Output semantics of a classifier tree root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputMode {
    /// Probability (binary: of class 1; multiclass: per-class vector).
    Probability,
    /// Natural log of [`Probability`](Self::Probability).
    LogProbability,
    /// Predicted class index.
    Label,
}

/// Root wrapper recording which output a classifier tree represents.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierOutput {
    mode: OutputMode,
    expr: Box<Expr>,
}

impl ClassifierOutput {
    pub fn new(mode: OutputMode, expr: Expr) -> Self {
        Self {
            mode,
            expr: Box::new(expr),
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

// =============================================================================
// Expr
// =============================================================================

/// A node of the expression tree.
///
/// Trees are immutable values: children are owned through `Box`, fields are
/// private, and nothing refers back to a parent. Cloning a tree deep-copies
/// it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Input(Identifier),
    Const(Constant),
    Linear(LinearCombination),
    Unary(UnaryFunc),
    Classifier(ClassifierOutput),
}

impl Expr {
    pub fn input(name: impl Into<String>) -> Self {
        Self::Input(Identifier::new(name))
    }

    pub fn scalar(value: f64) -> Self {
        Self::Const(Constant::Scalar(value))
    }

    pub fn vector(values: impl Into<Array1<f64>>) -> Self {
        Self::Const(Constant::Vector(values.into()))
    }

    pub fn unary(op: UnaryOp, arg: Expr) -> Self {
        Self::Unary(UnaryFunc::new(op, arg))
    }

    pub fn classifier(mode: OutputMode, expr: Expr) -> Self {
        Self::Classifier(ClassifierOutput::new(mode, expr))
    }

    pub fn as_linear(&self) -> Option<&LinearCombination> {
        match self {
            Self::Linear(linear) => Some(linear),
            _ => None,
        }
    }

    pub fn as_unary(&self) -> Option<&UnaryFunc> {
        match self {
            Self::Unary(func) => Some(func),
            _ => None,
        }
    }

    pub fn as_classifier(&self) -> Option<&ClassifierOutput> {
        match self {
            Self::Classifier(output) => Some(output),
            _ => None,
        }
    }

    /// Operators from the root inwards, skipping a classifier wrapper.
    ///
    /// Stops at the first node that is not a unary application.
    pub fn op_chain(&self) -> Vec<UnaryOp> {
        let mut ops = Vec::new();
        let mut cur = match self {
            Self::Classifier(output) => output.expr(),
            other => other,
        };
        while let Self::Unary(func) = cur {
            ops.push(func.op());
            cur = func.arg();
        }
        ops
    }

    /// Innermost non-operator node below any classifier wrapper and unary chain.
    pub fn innermost(&self) -> &Expr {
        match self {
            Self::Classifier(output) => output.expr().innermost(),
            Self::Unary(func) => func.arg().innermost(),
            other => other,
        }
    }
}

/// Base of a linear combination: a variable name or any vector expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Inputs {
    Named(String),
    Expr(Expr),
}

impl Inputs {
    pub fn into_expr(self) -> Expr {
        match self {
            Self::Named(name) => Expr::input(name),
            Self::Expr(expr) => expr,
        }
    }
}

impl Default for Inputs {
    fn default() -> Self {
        Self::Named(DEFAULT_INPUT.to_string())
    }
}

impl From<&str> for Inputs {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for Inputs {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<Expr> for Inputs {
    fn from(expr: Expr) -> Self {
        Self::Expr(expr)
    }
}

// =============================================================================
// Display
// =============================================================================

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input(id) => f.write_str(id.name()),
            Self::Const(Constant::Scalar(v)) => write!(f, "{v:?}"),
            Self::Const(Constant::Vector(values)) => write_list(f, values.view()),
            Self::Linear(linear) => fmt::Display::fmt(linear, f),
            Self::Unary(func) => write!(f, "{}({})", func.op(), func.arg()),
            Self::Classifier(output) => fmt::Display::fmt(output.expr(), f),
        }
    }
}

impl fmt::Display for LinearCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let input = match self.input() {
            Expr::Input(id) => id.name().to_string(),
            other => format!("({other})"),
        };
        match self.weights() {
            Weights::Vector { coef, intercept } => write_affine(f, &input, coef.view(), *intercept),
            Weights::Matrix { coef, intercept } => {
                f.write_str("[")?;
                for (i, (row, b)) in coef.rows().into_iter().zip(intercept.iter()).enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write_affine(f, &input, row, *b)?;
                }
                f.write_str("]")
            }
        }
    }
}

fn write_affine(
    f: &mut fmt::Formatter<'_>,
    input: &str,
    coef: ArrayView1<'_, f64>,
    intercept: f64,
) -> fmt::Result {
    for (i, &c) in coef.iter().enumerate() {
        if i == 0 {
            write!(f, "{c:?}*{input}[{i}]")?;
        } else if c.is_sign_negative() {
            write!(f, " - {:?}*{input}[{i}]", -c)?;
        } else {
            write!(f, " + {c:?}*{input}[{i}]")?;
        }
    }
    if intercept.is_sign_negative() {
        write!(f, " - {:?}", -intercept)
    } else {
        write!(f, " + {intercept:?}")
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: ArrayView1<'_, f64>) -> fmt::Result {
    f.write_str("[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v:?}")?;
    }
    f.write_str("]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn linear(weights: Weights) -> Expr {
        Expr::Linear(LinearCombination::new(weights, Expr::input("x")).unwrap())
    }

    #[test]
    fn vector_weights_shape() {
        let w = Weights::vector(array![1.0, 2.0, 3.0], 0.0);
        assert_eq!(w.n_features(), 3);
        assert_eq!(w.n_outputs(), 1);
    }

    #[test]
    fn matrix_weights_shape() {
        let w = Weights::matrix(array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]], array![0.0, 0.0, 0.0]);
        assert_eq!(w.n_features(), 2);
        assert_eq!(w.n_outputs(), 3);
    }

    #[test]
    fn rejects_empty_coefficients() {
        let err = LinearCombination::new(Weights::vector(Vec::<f64>::new(), 1.0), Expr::input("x"));
        assert_eq!(err.unwrap_err(), ShapeError::Empty);
    }

    #[test]
    fn rejects_intercept_length_mismatch() {
        let w = Weights::matrix(array![[1.0], [2.0]], array![0.0, 0.0, 0.0]);
        let err = LinearCombination::new(w, Expr::input("x")).unwrap_err();
        assert_eq!(err, ShapeError::InterceptLength { rows: 2, intercept: 3 });
        assert!(err.to_string().contains("2 rows"));
    }

    #[test]
    fn display_vector_combination() {
        let expr = linear(Weights::vector(array![1.0, -2.0], 0.5));
        assert_eq!(expr.to_string(), "1.0*x[0] - 2.0*x[1] + 0.5");
    }

    #[test]
    fn display_negative_intercept() {
        let expr = linear(Weights::vector(array![0.25], -1.5));
        assert_eq!(expr.to_string(), "0.25*x[0] - 1.5");
    }

    #[test]
    fn display_matrix_combination() {
        let expr = linear(Weights::matrix(array![[1.0, 2.0], [-1.0, 0.5]], array![0.0, 1.0]));
        assert_eq!(expr.to_string(), "[1.0*x[0] + 2.0*x[1] + 0.0; -1.0*x[0] + 0.5*x[1] + 1.0]");
    }

    #[test]
    fn display_expression_input_is_parenthesized() {
        let input = Expr::unary(UnaryOp::Sigmoid, Expr::input("z"));
        let expr = Expr::Linear(
            LinearCombination::new(Weights::vector(array![2.0], 0.0), input).unwrap(),
        );
        assert_eq!(expr.to_string(), "2.0*(Sigmoid(z))[0] + 0.0");
    }

    #[test]
    fn display_unary_and_classifier() {
        let expr = Expr::classifier(
            OutputMode::Probability,
            Expr::unary(UnaryOp::Sigmoid, Expr::input("s")),
        );
        assert_eq!(expr.to_string(), "Sigmoid(s)");
        assert_eq!(Expr::vector(array![1.0, 2.5]).to_string(), "[1.0, 2.5]");
    }

    #[test]
    fn op_chain_skips_classifier_wrapper() {
        let inner = linear(Weights::vector(array![1.0], 0.0));
        let expr = Expr::classifier(
            OutputMode::LogProbability,
            Expr::unary(UnaryOp::Log, Expr::unary(UnaryOp::Sigmoid, inner.clone())),
        );
        assert_eq!(expr.op_chain(), vec![UnaryOp::Log, UnaryOp::Sigmoid]);
        assert_eq!(expr.innermost(), &inner);
    }

    #[test]
    fn inputs_conversions() {
        assert_eq!(Inputs::default().into_expr(), Expr::input(DEFAULT_INPUT));
        assert_eq!(Inputs::from("features").into_expr(), Expr::input("features"));
        let e = Expr::vector(array![1.0]);
        assert_eq!(Inputs::from(e.clone()).into_expr(), e);
    }

    #[test]
    fn expr_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Expr>();
    }
}
