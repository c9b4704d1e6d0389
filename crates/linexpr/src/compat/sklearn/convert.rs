//! Conversion from the sklearn JSON export to expression trees.

use ndarray::{Array1, Array2};

use super::classifier::{Classifier, Method, OutputSelector};
use super::json::LogisticRegression;
use super::logistic::{MultiClass, logreg_binary_with, translate_multiclass};
use super::TranslateError;
use crate::config::TranslateConfig;
use crate::repr::Expr;

impl LogisticRegression {
    /// Number of classes (2 for a single coefficient row).
    pub fn n_classes(&self) -> usize {
        match self.coef.len() {
            1 => 2,
            n => n,
        }
    }

    pub fn is_binary(&self) -> bool {
        self.coef.len() == 1
    }

    /// Number of input features.
    pub fn n_features(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }

    /// Strategy actually used by the fitted model.
    ///
    /// `"auto"` follows sklearn: one-vs-rest for the `liblinear` solver and
    /// for binary models, multinomial otherwise.
    pub fn resolve_multi_class(&self) -> Result<MultiClass, TranslateError> {
        match self.multi_class.as_str() {
            "auto" if self.solver == "liblinear" || self.is_binary() => Ok(MultiClass::Ovr),
            "auto" => Ok(MultiClass::Multinomial),
            other => other.parse(),
        }
    }

    /// Label of the class at `index`, as exported in `classes`.
    ///
    /// `predict` trees denote a class index; this maps it back to the label
    /// sklearn would return.
    pub fn class_label(&self, index: usize) -> Option<&serde_json::Value> {
        self.classes.as_ref()?.get(index)
    }

    /// Translate with the default [`Classifier`] selector.
    ///
    /// `predict` yields a class index into `classes`, not the label itself;
    /// see [`class_label`](Self::class_label).
    pub fn to_expr(&self, config: &TranslateConfig) -> Result<Expr, TranslateError> {
        self.to_expr_with(&Classifier, config)
    }

    /// Translate into the tree for `config.method`.
    ///
    /// `multi_class` is only consulted for `predict_proba` and
    /// `predict_log_proba`. A binary multinomial model scores the pair
    /// `[-d, d]` with a softmax, which is `sigmoid(2d)`, so its weights are
    /// doubled on that path.
    pub fn to_expr_with<S: OutputSelector + ?Sized>(
        &self,
        selector: &S,
        config: &TranslateConfig,
    ) -> Result<Expr, TranslateError> {
        if self.is_binary() {
            tracing::debug!(n_features = self.n_features(), "dispatching to binary translator");
            let (mut coef, mut intercept) = self.binary_params()?;
            let proba = matches!(config.method, Method::PredictProba | Method::PredictLogProba);
            if proba && self.resolve_multi_class()? == MultiClass::Multinomial {
                coef *= 2.0;
                intercept *= 2.0;
            }
            return logreg_binary_with(selector, coef, intercept, config.inputs.as_str(), config.method);
        }

        tracing::debug!(n_classes = self.n_classes(), "dispatching to multiclass translator");
        let (coef, intercept) = self.multiclass_params()?;
        translate_multiclass(
            selector,
            coef,
            intercept,
            config.inputs.as_str(),
            config.method,
            || self.resolve_multi_class(),
        )
    }

    fn binary_params(&self) -> Result<(Array1<f64>, f64), TranslateError> {
        match (self.coef.as_slice(), self.intercept.as_slice()) {
            ([row], [b]) => Ok((Array1::from(row.clone()), *b)),
            (_, intercept) => Err(TranslateError::InvalidModel(format!(
                "binary model needs 1 intercept, got {}",
                intercept.len()
            ))),
        }
    }

    fn multiclass_params(&self) -> Result<(Array2<f64>, Array1<f64>), TranslateError> {
        let n_rows = self.coef.len();
        let n_cols = self.n_features();
        if n_rows == 0 {
            return Err(TranslateError::InvalidModel("model has no coefficient rows".into()));
        }
        if let Some((idx, row)) = self.coef.iter().enumerate().find(|(_, row)| row.len() != n_cols) {
            return Err(TranslateError::InvalidModel(format!(
                "coefficient row {idx} has {} entries, expected {n_cols}",
                row.len()
            )));
        }
        if self.intercept.len() != n_rows {
            return Err(TranslateError::InvalidModel(format!(
                "{n_rows} coefficient rows but {} intercepts",
                self.intercept.len()
            )));
        }

        let flat: Vec<f64> = self.coef.iter().flatten().copied().collect();
        let coef = Array2::from_shape_vec((n_rows, n_cols), flat)
            .map_err(|e| TranslateError::InvalidModel(e.to_string()))?;
        Ok((coef, Array1::from(self.intercept.clone())))
    }
}
