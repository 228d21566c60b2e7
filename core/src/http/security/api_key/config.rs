//! API Key configuration.
//!
//! Settings are plain `serde` structs so they can come from anywhere; the
//! [`ApiKeySettings::load`] helper layers an optional `config/apikey` file and
//! `APIKEY__*` environment variables with the `config` crate.

use serde::Deserialize;

use super::{API_KEY_HEADER_NAME, DEFAULT_REALM, DEFAULT_STRATEGY_NAME};

/// Default message written in the body of 401 responses.
pub const DEFAULT_ERROR_MESSAGE: &str = "An API key is required to access this resource. \
     Include it in the X-API-Key header or the Authorization header as: ApiKey <your-key>";

/// Global settings shared by every API key adapter.
///
/// # Example
///
/// ```
/// use actix_apikey_core::http::security::api_key::ApiKeySettings;
///
/// let settings = ApiKeySettings::default()
///     .header_name("X-Service-Key")
///     .api_keys(vec!["key123".into()]);
///
/// assert_eq!(settings.header_name, "X-Service-Key");
/// assert_eq!(settings.strategy_type, "default");
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiKeySettings {
    /// Header carrying the API key.
    pub header_name: String,
    /// Name of the validation strategy selected when the validator is built.
    pub strategy_type: String,
    /// Silences the factory's fallback warnings and errors.
    pub suppress_fallback_logging: bool,
    /// Realm advertised in the `WWW-Authenticate` challenge.
    pub realm: String,
    /// Message written in the body of 401 responses.
    pub error_message: String,
    /// Options of the built-in `default` strategy.
    pub default_strategy: DefaultStrategyOptions,
}

/// Options of the built-in [`DefaultApiKeyStrategy`](super::DefaultApiKeyStrategy).
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DefaultStrategyOptions {
    /// Exact key strings accepted by `is_valid`.
    pub api_keys: Vec<String>,
    /// Requires a decoded key to also be in `api_keys`.
    pub require_listed_key: bool,
}

impl Default for ApiKeySettings {
    fn default() -> Self {
        Self {
            header_name: API_KEY_HEADER_NAME.to_string(),
            strategy_type: DEFAULT_STRATEGY_NAME.to_string(),
            suppress_fallback_logging: false,
            realm: DEFAULT_REALM.to_string(),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
            default_strategy: DefaultStrategyOptions::default(),
        }
    }
}

impl ApiKeySettings {
    /// Creates settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads settings from `config/apikey.*` (optional) and `APIKEY__*`
    /// environment variables.
    ///
    /// Lists such as `APIKEY__DEFAULT_STRATEGY__API_KEYS` are comma-separated.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/apikey").required(false))
            .add_source(Self::environment())
            .build()?;

        Self::from_config(&config)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("APIKEY")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("default_strategy.api_keys")
            .try_parsing(true)
    }

    /// Deserializes settings from an already built configuration.
    pub fn from_config(config: &config::Config) -> Result<Self, config::ConfigError> {
        config.clone().try_deserialize()
    }

    /// Sets the header carrying the API key.
    pub fn header_name(mut self, name: impl Into<String>) -> Self {
        self.header_name = name.into();
        self
    }

    /// Sets the strategy selected by the validator.
    pub fn strategy_type(mut self, name: impl Into<String>) -> Self {
        self.strategy_type = name.into();
        self
    }

    /// Sets whether fallback logging is suppressed.
    pub fn suppress_fallback_logging(mut self, suppress: bool) -> Self {
        self.suppress_fallback_logging = suppress;
        self
    }

    /// Sets the realm for authentication challenges.
    pub fn realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = realm.into();
        self
    }

    /// Sets the 401 response message.
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = message.into();
        self
    }

    /// Sets the keys accepted by the default strategy.
    pub fn api_keys(mut self, keys: Vec<String>) -> Self {
        self.default_strategy.api_keys = keys;
        self
    }

    /// Sets whether decoded keys must also be listed.
    pub fn require_listed_key(mut self, require: bool) -> Self {
        self.default_strategy.require_listed_key = require;
        self
    }
}
