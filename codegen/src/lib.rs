//! Procedural macros for per-handler API key checks.
//!
//! # Usage
//!
//! ```ignore
//! use actix_apikey::api_key;
//! use actix_apikey::http::security::AuthenticatedKey;
//! use actix_web::{get, HttpResponse, Responder};
//!
//! // Any valid key
//! #[api_key]
//! #[get("/reports")]
//! async fn reports() -> impl Responder {
//!     HttpResponse::Ok().body("Reports")
//! }
//!
//! // Role check, identity bound to `key`
//! #[api_key(role = "Admin")]
//! #[get("/admin")]
//! async fn admin(key: AuthenticatedKey) -> impl Responder {
//!     HttpResponse::Ok().body(format!("Admin area for {}", key.get_name()))
//! }
//! ```
//!
//! The handler needs `web::Data<ApiKeyGate>` registered as application data.

use proc_macro::TokenStream;

// Internal modules
mod api_key;
mod helpers;

/// Per-handler API key check.
///
/// # Arguments
///
/// | Argument | Meaning |
/// |----------|---------|
/// | `header = "X-Custom"` | Read the key from this header, overriding routes and settings |
/// | `role = "A"` / `roles = ["A", "B"]` | Require any of the roles |
/// | `scope = "read"` / `scopes = ["read", "write"]` | Require any of the scopes |
///
/// Arguments combine with commas: `#[api_key(header = "X-Admin-Key", roles = ["Admin"])]`.
///
/// # Behavior
///
/// - Injects an `HttpRequest` parameter and runs `api_key::guard_request`
///   before the handler body.
/// - A parameter of type `AuthenticatedKey` is filled from the validated
///   identity instead of being extracted.
/// - Missing or invalid keys produce `401 Unauthorized` with a
///   `WWW-Authenticate: ApiKey` challenge. Unmet roles or scopes produce
///   `403 Forbidden`.
/// - The handler's return type becomes `Result<T, actix_web::Error>`.
///
/// # Usage
/// ```ignore
/// #[api_key(header = "X-Report-Key", scope = "reports:read")]
/// #[get("/reports")]
/// async fn reports(key: AuthenticatedKey) -> impl Responder {
///     HttpResponse::Ok().body(format!("Reports for {}", key.get_name()))
/// }
/// ```
#[proc_macro_attribute]
pub fn api_key(attrs: TokenStream, input: TokenStream) -> TokenStream {
    api_key::api_key_impl(attrs, input)
}
