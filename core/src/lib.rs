//! Core of `actix-apikey`: API key validation, middleware and extractors
//! for Actix Web.
//!
//! Most users depend on the `actix-apikey` facade crate instead, which also
//! re-exports the `#[api_key]` attribute.

pub mod http;
