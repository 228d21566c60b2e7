//! Validation strategy trait and registry.

use std::sync::Arc;

use super::error::ValidationResult;
use super::info::ApiKeyInfo;

/// A pluggable algorithm that decides whether a raw key is valid.
///
/// Implement this trait to plug in custom backends (remote services, caches,
/// signed tokens). Strategies are selected by [`name`](Self::name),
/// case-insensitively, so names must be unique within a registry.
///
/// Both operations must be free of side effects on the request and must
/// report failures through [`ValidationResult`] rather than panicking.
///
/// # Example
///
/// ```
/// use actix_apikey_core::http::security::api_key::{
///     ApiKeyInfo, ApiKeyValidationStrategy, ValidationError, ValidationResult,
/// };
///
/// struct PrefixStrategy;
///
/// impl ApiKeyValidationStrategy for PrefixStrategy {
///     fn name(&self) -> &str {
///         "prefix"
///     }
///
///     fn is_valid(&self, api_key: &str) -> ValidationResult<bool> {
///         if api_key.starts_with("sk_live_") {
///             Ok(true)
///         } else {
///             Err(ValidationError::Validation)
///         }
///     }
///
///     fn validate_and_get_info(&self, api_key: &str) -> ValidationResult<ApiKeyInfo> {
///         self.is_valid(api_key)?;
///         Ok(ApiKeyInfo::new(api_key).owner("live-service"))
///     }
/// }
/// ```
pub trait ApiKeyValidationStrategy: Send + Sync {
    /// Name used to select this strategy.
    fn name(&self) -> &str;

    /// Cheap existence or format check.
    fn is_valid(&self, api_key: &str) -> ValidationResult<bool>;

    /// Full check that also yields the key's identity attributes.
    fn validate_and_get_info(&self, api_key: &str) -> ValidationResult<ApiKeyInfo>;
}

/// Ordered set of strategies assembled at startup.
///
/// # Example
///
/// ```
/// use actix_apikey_core::http::security::api_key::{
///     ApiKeySettings, DefaultApiKeyStrategy, StrategyRegistry,
/// };
///
/// let settings = ApiKeySettings::default().api_keys(vec!["key123".into()]);
/// let registry = StrategyRegistry::new()
///     .with_strategy(DefaultApiKeyStrategy::new(settings.default_strategy.clone()));
///
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct StrategyRegistry {
    strategies: Vec<Arc<dyn ApiKeyValidationStrategy>>,
}

impl StrategyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a strategy.
    pub fn with_strategy<S: ApiKeyValidationStrategy + 'static>(self, strategy: S) -> Self {
        self.with_shared_strategy(Arc::new(strategy))
    }

    /// Adds an already shared strategy.
    pub fn with_shared_strategy(mut self, strategy: Arc<dyn ApiKeyValidationStrategy>) -> Self {
        self.strategies.push(strategy);
        self
    }

    /// Returns the number of registered strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if no strategy is registered.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub(crate) fn into_strategies(self) -> Vec<Arc<dyn ApiKeyValidationStrategy>> {
        self.strategies
    }
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyRegistry")
            .field("len", &self.strategies.len())
            .finish()
    }
}
