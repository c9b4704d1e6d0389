//! Decision function of linear models.

use crate::repr::{Expr, Inputs, LinearCombination, ShapeError, Weights};

/// Build `coef . inputs + intercept`.
///
/// `Weights::Vector` yields a scalar score, `Weights::Matrix` one score per
/// row. A named input becomes an [`Expr::Input`]; an expression is used as
/// the input vector directly.
pub fn linear_model(weights: Weights, inputs: impl Into<Inputs>) -> Result<Expr, ShapeError> {
    let input = inputs.into().into_expr();
    Ok(Expr::Linear(LinearCombination::new(weights, input)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn named_input() {
        let expr = linear_model(Weights::vector(array![1.0, 2.0], 3.0), "x").unwrap();
        let linear = expr.as_linear().unwrap();
        assert_eq!(linear.input(), &Expr::input("x"));
        assert!(!linear.is_vector());
    }

    #[test]
    fn expression_input() {
        let input = Expr::vector(array![0.5, 0.5]);
        let expr = linear_model(
            Weights::matrix(array![[1.0, 0.0], [0.0, 1.0]], array![0.0, 0.0]),
            input.clone(),
        )
        .unwrap();
        let linear = expr.as_linear().unwrap();
        assert_eq!(linear.input(), &input);
        assert!(linear.is_vector());
    }

    #[test]
    fn shape_errors_propagate() {
        let result = linear_model(Weights::matrix(array![[1.0, 2.0]], array![0.0, 1.0]), "x");
        assert!(matches!(result, Err(ShapeError::InterceptLength { rows: 1, intercept: 2 })));
    }
}
