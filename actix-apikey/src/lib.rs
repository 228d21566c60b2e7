//! # Actix API Key
//!
//! Pluggable API key authentication for Actix Web.
//!
//! This crate provides a unified API combining:
//! - `actix-apikey-core`: Key extraction, validation strategies, middleware and extractors
//! - `actix-apikey-codegen`: The `#[api_key]` procedural macro
//!
//! ## Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! actix-web = "4"
//! actix-apikey = "0.1"
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use actix_web::{get, web, App, HttpServer, HttpResponse, Responder};
//! use actix_apikey::api_key;
//! use actix_apikey::http::security::{
//!     ApiKeyGate, ApiKeySettings, ApiKeyTransform, AuthenticatedKey,
//! };
//!
//! #[api_key(role = "Admin")]
//! #[get("/admin")]
//! async fn admin() -> impl Responder {
//!     HttpResponse::Ok().body("Welcome, Admin!")
//! }
//!
//! #[get("/me")]
//! async fn me(key: AuthenticatedKey) -> impl Responder {
//!     HttpResponse::Ok().body(format!("Hello, {}!", key.get_name()))
//! }
//!
//! let gate = ApiKeyGate::from_settings(ApiKeySettings::load()?).authenticate();
//!
//! App::new()
//!     .app_data(web::Data::new(gate.clone()))
//!     .service(admin)
//!     .service(web::scope("/api").wrap(ApiKeyTransform::new(gate)).service(me))
//! ```
//!
//! ## Features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `macros` | Yes | The `#[api_key]` attribute |
//!
//! ## Modules
//!
//! The main functionality is available through the `http` module:
//!
//! - [`http::security`] - Validation, middleware and extractors
//! - [`http::error`] - Error types

// Re-export everything from actix-apikey-core
pub use actix_apikey_core::*;

// Re-export procedural macros when the "macros" feature is enabled
#[cfg(feature = "macros")]
pub use actix_apikey_codegen::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use actix_apikey_core::http::security::{
        ApiKeyGate, ApiKeySettings, ApiKeyTransform, ApiKeyValidationStrategy, ApiKeyValidator,
        AuthenticatedKey, Identity, OptionalKey, SecurityExt, StrategyFactory, StrategyRegistry,
    };

    #[cfg(feature = "macros")]
    pub use actix_apikey_codegen::api_key;
}
