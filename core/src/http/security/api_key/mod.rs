//! API Key Authentication for Actix Web.
//!
//! # Overview
//!
//! Clients present a pre-shared key with each request. The key is read from a
//! configurable header (`X-API-Key` by default) or from
//! `Authorization: ApiKey <key>`, then checked by a pluggable validation
//! strategy selected by name.
//!
//! # Building Blocks
//!
//! - [`HeaderResolver`] decides which header carries the key.
//! - [`KeyExtractor`] pulls the candidate key out of the request.
//! - [`ApiKeyValidationStrategy`] implementations decide whether a key is
//!   valid. The built-in [`DefaultApiKeyStrategy`] is registered as `default`.
//! - [`StrategyFactory`] resolves a strategy by name and falls back to
//!   `default`.
//! - [`ApiKeyValidator`] wraps the configured strategy and produces an
//!   [`Identity`].
//! - [`ApiKeyGate`] is the adapter core shared by the middleware, the
//!   `#[api_key]` macro and the extractors.
//!
//! # Usage
//!
//! ```ignore
//! use actix_apikey::http::security::api_key::{
//!     ApiKeyGate, ApiKeySettings, ApiKeyValidator, DefaultApiKeyStrategy,
//!     StrategyFactory, StrategyRegistry,
//! };
//! use actix_apikey::http::security::middleware::ApiKeyTransform;
//!
//! let settings = ApiKeySettings::load()?;
//! let registry = StrategyRegistry::new()
//!     .with_strategy(DefaultApiKeyStrategy::new(settings.default_strategy.clone()))
//!     .with_strategy(MyRemoteStrategy::new());
//! let factory = StrategyFactory::new(registry, &settings)?;
//! let validator = ApiKeyValidator::new(&factory, &settings);
//! let gate = ApiKeyGate::new(validator, settings).authenticate();
//!
//! App::new()
//!     .wrap(ApiKeyTransform::new(gate.clone()).permit("^/health$"))
//!     .app_data(web::Data::new(gate))
//!     .service(my_api_endpoint)
//! ```
//!
//! # Wire Format of the Default Strategy
//!
//! `is_valid` accepts the keys listed in `default_strategy.api_keys`.
//! `validate_and_get_info` expects base64 of a UTF-8 JSON document:
//!
//! ```text
//! {"key":"12345","owner":"SystemA","roles":["Admin"],"scopes":["read"]}
//! ```
//!
//! # Security Considerations
//!
//! 1. **Use HTTPS** - API keys are transmitted in plaintext
//! 2. **Rotate keys** - Implement key rotation policies
//! 3. **Limit scope** - Use roles and scopes to restrict key capabilities

mod config;
mod default_strategy;
mod error;
mod extractor;
mod factory;
mod gate;
mod header;
mod identity;
mod info;
mod strategy;
mod validator;


pub use config::{ApiKeySettings, DefaultStrategyOptions, DEFAULT_ERROR_MESSAGE};
pub use default_strategy::DefaultApiKeyStrategy;
pub use error::{ApiKeyError, StrategyRegistryError, ValidationError, ValidationResult};
pub use extractor::{extract_candidate_key, KeyExtractor, AUTHORIZATION};
pub use factory::StrategyFactory;
pub use gate::{guard_request, ApiKeyGate, GateMode, Outcome, Requirements};
pub use header::{ApiKeyHeader, HeaderResolver, HeaderSource};
pub use identity::{Claim, ClaimType, Identity, AUTHENTICATION_TYPE};
pub use info::{ApiKeyInfo, UNKNOWN_OWNER};
pub use strategy::{ApiKeyValidationStrategy, StrategyRegistry};
pub use validator::ApiKeyValidator;

/// Header read when nothing else is configured.
pub const API_KEY_HEADER_NAME: &str = "X-API-Key";

/// `Authorization` scheme accepted as a fallback.
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Name of the strategy used when no other matches.
pub const DEFAULT_STRATEGY_NAME: &str = "default";

/// Realm advertised when none is configured.
pub const DEFAULT_REALM: &str = "Application";
