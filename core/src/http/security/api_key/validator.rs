//! Validator facade over the configured strategy.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::config::ApiKeySettings;
use super::error::{ValidationError, ValidationResult};
use super::factory::StrategyFactory;
use super::identity::Identity;
use super::strategy::ApiKeyValidationStrategy;

/// Validates keys with the strategy named by `settings.strategy_type`.
///
/// The strategy is resolved once, when the validator is built, and kept for
/// the validator's lifetime.
///
/// # Example
///
/// ```
/// use actix_apikey_core::http::security::api_key::{
///     ApiKeySettings, ApiKeyValidator, StrategyFactory,
/// };
///
/// let settings = ApiKeySettings::default().api_keys(vec!["key123".into()]);
/// let factory = StrategyFactory::with_default_strategy(&settings);
/// let validator = ApiKeyValidator::new(&factory, &settings);
///
/// assert!(validator.is_valid("key123").is_ok());
/// assert!(validator.is_valid("key999").is_err());
/// ```
#[derive(Clone)]
pub struct ApiKeyValidator {
    strategy: Arc<dyn ApiKeyValidationStrategy>,
}

impl ApiKeyValidator {
    /// Resolves the configured strategy through `factory`.
    pub fn new(factory: &StrategyFactory, settings: &ApiKeySettings) -> Self {
        ApiKeyValidator {
            strategy: factory.create(Some(&settings.strategy_type)),
        }
    }

    /// Builds a validator backed by the built-in strategy only.
    pub fn from_settings(settings: &ApiKeySettings) -> Self {
        Self::new(&StrategyFactory::with_default_strategy(settings), settings)
    }

    /// Returns the resolved strategy.
    pub fn get_strategy(&self) -> &Arc<dyn ApiKeyValidationStrategy> {
        &self.strategy
    }

    /// Checks `api_key` with the strategy's `is_valid`.
    pub fn is_valid(&self, api_key: &str) -> ValidationResult<bool> {
        contain(|| self.strategy.is_valid(api_key))
    }

    /// Validates `api_key` and builds the caller's [`Identity`].
    pub fn validate_and_get_info(&self, api_key: &str) -> ValidationResult<Identity> {
        let info = contain(|| self.strategy.validate_and_get_info(api_key))?;
        Ok(Identity::from_info(api_key, &info))
    }
}

impl std::fmt::Debug for ApiKeyValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyValidator").finish_non_exhaustive()
    }
}

// A panicking strategy is reported as a generic failure.
fn contain<T>(f: impl FnOnce() -> ValidationResult<T>) -> ValidationResult<T> {
    panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or(Err(ValidationError::GenericFailure))
}
