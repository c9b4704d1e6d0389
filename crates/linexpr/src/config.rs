//! Translation settings with builder pattern.
//!
//! [`TranslateConfig`] selects which estimator output a tree emulates and
//! what the input vector is called. It uses the `bon` crate for the builder
//! and validates on `build()`.
//!
//! # Example
//!
//! ```
//! use linexpr::config::TranslateConfig;
//! use linexpr::compat::sklearn::Method;
//!
//! // predict_proba over `x`
//! let config = TranslateConfig::builder().build().unwrap();
//!
//! let config = TranslateConfig::builder()
//!     .method(Method::PredictLogProba)
//!     .inputs("features")
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;

use crate::compat::sklearn::Method;
use crate::repr::DEFAULT_INPUT;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Input name is empty or not an identifier.
    InvalidInputName(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInputName(name) => {
                write!(f, "inputs must be an identifier, got {:?}", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// TranslateConfig
// =============================================================================

/// Settings for translating a fitted model into an expression tree.
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
pub struct TranslateConfig {
    /// Estimator output to emulate. Default: `predict_proba`.
    #[builder(default)]
    pub method: Method,

    /// Name of the input vector variable. Default: `x`.
    #[builder(default = DEFAULT_INPUT.to_string(), into)]
    pub inputs: String,
}

impl<S: translate_config_builder::IsComplete> TranslateConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInputName`] unless `inputs` matches
    /// `[A-Za-z_][A-Za-z0-9_]*`.
    pub fn build(self) -> Result<TranslateConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl TranslateConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let mut chars = self.inputs.chars();
        let valid = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        };
        if !valid {
            return Err(ConfigError::InvalidInputName(self.inputs.clone()));
        }
        Ok(())
    }
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self::builder().build().expect("default config is valid")
    }
}

// =============================================================================
// Tests
// =============================================================================
