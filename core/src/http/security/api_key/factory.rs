//! Strategy selection by name.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use super::config::ApiKeySettings;
use super::default_strategy::DefaultApiKeyStrategy;
use super::error::StrategyRegistryError;
use super::strategy::{ApiKeyValidationStrategy, StrategyRegistry};
use super::DEFAULT_STRATEGY_NAME;

/// Resolves a strategy by name, falling back to the `default` strategy.
///
/// The factory is built once at startup from a [`StrategyRegistry`]. Building
/// fails unless exactly one strategy is named `default` (case-insensitive),
/// so [`create`](Self::create) always has something to return.
///
/// # Example
///
/// ```
/// use actix_apikey_core::http::security::api_key::{
///     ApiKeySettings, DefaultApiKeyStrategy, StrategyFactory, StrategyRegistry,
/// };
///
/// let settings = ApiKeySettings::default();
/// let registry = StrategyRegistry::new()
///     .with_strategy(DefaultApiKeyStrategy::new(settings.default_strategy.clone()));
/// let factory = StrategyFactory::new(registry, &settings).unwrap();
///
/// assert_eq!(factory.create(Some("DEFAULT")).name(), "default");
/// assert_eq!(factory.create(Some("missing")).name(), "default");
/// ```
pub struct StrategyFactory {
    strategies: Vec<Arc<dyn ApiKeyValidationStrategy>>,
    default_strategy: Arc<dyn ApiKeyValidationStrategy>,
    suppress_fallback_logging: bool,
}

impl StrategyFactory {
    /// Builds the factory, checking that exactly one strategy is named `default`.
    pub fn new(
        registry: StrategyRegistry,
        settings: &ApiKeySettings,
    ) -> Result<Self, StrategyRegistryError> {
        let strategies = registry.into_strategies();

        let mut defaults = strategies
            .iter()
            .filter(|s| has_name(s.as_ref(), DEFAULT_STRATEGY_NAME));
        let default_strategy = defaults
            .next()
            .cloned()
            .ok_or(StrategyRegistryError::MissingDefaultStrategy)?;
        if defaults.next().is_some() {
            return Err(StrategyRegistryError::DuplicateDefaultStrategy);
        }

        Ok(StrategyFactory {
            strategies,
            default_strategy,
            suppress_fallback_logging: settings.suppress_fallback_logging,
        })
    }

    /// Builds a factory holding only the built-in [`DefaultApiKeyStrategy`].
    pub fn with_default_strategy(settings: &ApiKeySettings) -> Self {
        let default_strategy: Arc<dyn ApiKeyValidationStrategy> = Arc::new(
            DefaultApiKeyStrategy::new(settings.default_strategy.clone()),
        );
        StrategyFactory {
            strategies: vec![default_strategy.clone()],
            default_strategy,
            suppress_fallback_logging: settings.suppress_fallback_logging,
        }
    }

    /// Returns the strategy named `name`, or the default one.
    ///
    /// Never fails. Each fallback emits exactly one log record unless
    /// `suppress_fallback_logging` is set.
    pub fn create(&self, name: Option<&str>) -> Arc<dyn ApiKeyValidationStrategy> {
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name,
            None => {
                if !self.suppress_fallback_logging {
                    tracing::warn!(
                        "No strategy type configured. Falling back to the default strategy."
                    );
                }
                return self.default_strategy.clone();
            }
        };

        match panic::catch_unwind(AssertUnwindSafe(|| self.find(name))) {
            Ok(Some(strategy)) => strategy,
            Ok(None) => {
                if !self.suppress_fallback_logging {
                    tracing::warn!(
                        strategy = name,
                        "No strategy found for name '{}'. Falling back to the default strategy.",
                        name
                    );
                }
                self.default_strategy.clone()
            }
            Err(_) => {
                if !self.suppress_fallback_logging {
                    tracing::error!(
                        strategy = name,
                        "Failed to resolve strategy '{}'. Falling back to the default strategy.",
                        name
                    );
                }
                self.default_strategy.clone()
            }
        }
    }

    /// Returns the `default` strategy.
    pub fn get_default_strategy(&self) -> Arc<dyn ApiKeyValidationStrategy> {
        self.default_strategy.clone()
    }

    /// Returns the number of registered strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns true if no strategy is registered.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    fn find(&self, name: &str) -> Option<Arc<dyn ApiKeyValidationStrategy>> {
        self.strategies
            .iter()
            .find(|s| s.name().eq_ignore_ascii_case(name))
            .cloned()
    }
}

impl std::fmt::Debug for StrategyFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyFactory")
            .field("strategies", &self.strategies.len())
            .field("suppress_fallback_logging", &self.suppress_fallback_logging)
            .finish()
    }
}

// A strategy whose name panics is never treated as a match.
fn has_name(strategy: &dyn ApiKeyValidationStrategy, name: &str) -> bool {
    panic::catch_unwind(AssertUnwindSafe(|| strategy.name().eq_ignore_ascii_case(name)))
        .unwrap_or(false)
}
