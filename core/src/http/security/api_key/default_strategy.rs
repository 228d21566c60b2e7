//! Built-in `default` validation strategy.

use base64::prelude::*;

use super::config::DefaultStrategyOptions;
use super::error::{ValidationError, ValidationResult};
use super::info::ApiKeyInfo;
use super::strategy::ApiKeyValidationStrategy;
use super::DEFAULT_STRATEGY_NAME;

/// Strategy registered under the name `default`.
///
/// - `is_valid` accepts exactly the keys listed in
///   [`DefaultStrategyOptions::api_keys`].
/// - `validate_and_get_info` treats the key as base64 of a UTF-8 JSON
///   document shaped like [`ApiKeyInfo`], for example
///   `{"key":"12345","owner":"SystemA","roles":["Admin"],"scopes":["read"]}`.
///   With `require_listed_key`, the raw key must also pass `is_valid`.
#[derive(Debug, Clone, Default)]
pub struct DefaultApiKeyStrategy {
    options: DefaultStrategyOptions,
}

impl DefaultApiKeyStrategy {
    pub fn new(options: DefaultStrategyOptions) -> Self {
        Self { options }
    }

    /// Returns the configured options.
    pub fn get_options(&self) -> &DefaultStrategyOptions {
        &self.options
    }

    fn decode(api_key: &str) -> ValidationResult<ApiKeyInfo> {
        let bytes = BASE64_STANDARD
            .decode(api_key.trim())
            .map_err(|_| ValidationError::Validation)?;
        let json = String::from_utf8(bytes).map_err(|_| ValidationError::Validation)?;

        serde_json::from_str::<Option<ApiKeyInfo>>(&json)
            .map_err(|_| ValidationError::Validation)?
            .ok_or(ValidationError::Validation)
    }
}

impl ApiKeyValidationStrategy for DefaultApiKeyStrategy {
    fn name(&self) -> &str {
        DEFAULT_STRATEGY_NAME
    }

    fn is_valid(&self, api_key: &str) -> ValidationResult<bool> {
        if api_key.trim().is_empty() {
            return Err(ValidationError::Validation);
        }

        if self.options.api_keys.iter().any(|k| k == api_key) {
            Ok(true)
        } else {
            Err(ValidationError::Validation)
        }
    }

    fn validate_and_get_info(&self, api_key: &str) -> ValidationResult<ApiKeyInfo> {
        if api_key.trim().is_empty() {
            return Err(ValidationError::Validation);
        }

        if self.options.require_listed_key {
            self.is_valid(api_key)?;
        }

        Self::decode(api_key)
    }
}
