//! Unary operator tags.
//!
//! Every operator that can appear in an [`Expr::Unary`](super::Expr::Unary)
//! node is listed in the static [`OPERATORS`] table. The table is built at
//! compile time and never mutated, so lookups by name are safe from any
//! thread without synchronization.

use std::fmt;

/// Operator applied by a [`UnaryFunc`](super::UnaryFunc) node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Threshold at zero: `x > 0 -> 1`, otherwise `0`.
    Step,
    /// Logistic sigmoid: `1 / (1 + exp(-x))`.
    Sigmoid,
    /// Natural logarithm.
    Log,
    /// Index of the largest component. First index wins on ties.
    ArgMax,
    /// Divide each component by the sum of all components.
    VecSumNormalize,
    /// Exponentiate then normalize, as sklearn's `softmax`.
    SklearnSoftmax,
}

/// How an operator maps the shape of its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    /// Applied to each component independently; shape is preserved.
    Pointwise,
    /// Vector in, vector of the same length out.
    VectorToVector,
    /// Vector in, scalar out.
    VectorToScalar,
}

/// Registry entry for a unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpInfo {
    pub op: UnaryOp,
    /// Canonical name, used by renderers and by [`UnaryOp::lookup`].
    pub name: &'static str,
    pub kind: OpKind,
}

/// All known unary operators, in declaration order.
pub static OPERATORS: [OpInfo; 6] = [
    OpInfo {
        op: UnaryOp::Step,
        name: "Step",
        kind: OpKind::Pointwise,
    },
    OpInfo {
        op: UnaryOp::Sigmoid,
        name: "Sigmoid",
        kind: OpKind::Pointwise,
    },
    OpInfo {
        op: UnaryOp::Log,
        name: "Log",
        kind: OpKind::Pointwise,
    },
    OpInfo {
        op: UnaryOp::ArgMax,
        name: "ArgMax",
        kind: OpKind::VectorToScalar,
    },
    OpInfo {
        op: UnaryOp::VecSumNormalize,
        name: "VecSumNormalize",
        kind: OpKind::VectorToVector,
    },
    OpInfo {
        op: UnaryOp::SklearnSoftmax,
        name: "SKLearnSoftmax",
        kind: OpKind::VectorToVector,
    },
];

impl UnaryOp {
    /// Registry entry for this operator.
    pub fn info(self) -> &'static OpInfo {
        // Table order matches declaration order.
        &OPERATORS[self as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    #[inline]
    pub fn kind(self) -> OpKind {
        self.info().kind
    }

    /// Look up an operator by its canonical name.
    pub fn lookup(name: &str) -> Option<UnaryOp> {
        OPERATORS.iter().find(|info| info.name == name).map(|info| info.op)
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_matches_declaration() {
        for (idx, info) in OPERATORS.iter().enumerate() {
            assert_eq!(info.op as usize, idx, "{} is out of place", info.name);
        }
    }

    #[test]
    fn lookup_roundtrips_every_name() {
        for info in &OPERATORS {
            assert_eq!(UnaryOp::lookup(info.name), Some(info.op));
        }
    }

    #[test]
    fn lookup_unknown_name() {
        assert_eq!(UnaryOp::lookup("Softmax"), None);
        assert_eq!(UnaryOp::lookup("sigmoid"), None);
    }

    #[test]
    fn softmax_uses_sklearn_name() {
        assert_eq!(UnaryOp::SklearnSoftmax.name(), "SKLearnSoftmax");
        assert_eq!(UnaryOp::SklearnSoftmax.to_string(), "SKLearnSoftmax");
    }

    #[test]
    fn kinds() {
        assert_eq!(UnaryOp::Step.kind(), OpKind::Pointwise);
        assert_eq!(UnaryOp::ArgMax.kind(), OpKind::VectorToScalar);
        assert_eq!(UnaryOp::VecSumNormalize.kind(), OpKind::VectorToVector);
    }
}
