use crate::repr::ShapeError;

/// Error type for translating sklearn models into expression trees.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("invalid value of the multi_class argument: {0}")]
    InvalidMultiClass(String),
    #[error("invalid method: {0}")]
    InvalidMethod(String),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("invalid model: {0}")]
    InvalidModel(String),
    #[error("failed to parse model JSON: {0}")]
    Json(#[from] serde_json::Error),
}
