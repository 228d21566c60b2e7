//! API key security for Actix Web.
//!
//! # Module Structure
//!
//! - `api_key` - Key extraction, validation strategies and the adapter core
//! - `middleware` - API key middleware (ApiKeyTransform)
//! - `extractor` - Actix Web extractors (AuthenticatedKey, OptionalKey)

pub mod api_key;
pub mod extractor;
pub mod middleware;

// Re-exports for convenience
pub use api_key::{
    ApiKeyError, ApiKeyGate, ApiKeyHeader, ApiKeyInfo, ApiKeySettings, ApiKeyValidationStrategy,
    ApiKeyValidator, DefaultApiKeyStrategy, GateMode, Identity, Outcome, Requirements,
    StrategyFactory, StrategyRegistry, ValidationError, ValidationResult,
};
pub use extractor::{AuthenticatedKey, OptionalKey, SecurityExt};
pub use middleware::{AllowAnonymous, ApiKeyTransform};
