//! API Key error types.
//!
//! Two layers of errors live here:
//! - [`ValidationError`] is what strategies and the validator return. It never
//!   carries HTTP semantics.
//! - [`ApiKeyError`] is what adapters (middleware, macro, extractors) reject a
//!   request with, and knows how to render itself as a response.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use derive_more::{Display, Error};

use super::DEFAULT_REALM;

/// Failure kinds produced by validation strategies.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The key is blank, undecodable, unparseable, or unknown to the strategy.
    #[display("API key validation failed")]
    Validation,

    /// The strategy failed for a reason unrelated to the key itself.
    #[display("API key validation could not be completed")]
    GenericFailure,
}

/// Result of a strategy or validator call.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors raised while assembling the strategy set.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum StrategyRegistryError {
    /// No registered strategy is named `default`.
    #[display("no strategy named 'default' is registered")]
    MissingDefaultStrategy,

    /// More than one registered strategy is named `default`.
    #[display("more than one strategy is named 'default'")]
    DuplicateDefaultStrategy,
}

/// Errors that can occur during API key authentication.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ApiKeyError {
    /// No API key was found in the request.
    #[display("Unauthorized: API key not provided")]
    Missing,

    /// The API key was rejected by the validation strategy.
    #[display("Unauthorized: invalid API key")]
    Invalid,

    /// The API key doesn't carry the required roles or scopes.
    #[display("Forbidden: insufficient API key permissions")]
    InsufficientPermissions,

    /// No `ApiKeyGate` was registered as application data.
    #[display("API key authentication is not configured")]
    NotConfigured,
}

impl ApiKeyError {
    /// Builds the response for this error using the given realm and message.
    ///
    /// 401 responses carry `WWW-Authenticate: ApiKey realm="...", charset="UTF-8"`.
    pub fn challenge_response(&self, realm: &str, message: &str) -> HttpResponse {
        let status = self.status_code();
        let mut builder = HttpResponse::build(status);

        if status == StatusCode::UNAUTHORIZED {
            let realm = if realm.trim().is_empty() {
                DEFAULT_REALM
            } else {
                realm
            };
            let challenge = format!("ApiKey realm=\"{}\", charset=\"UTF-8\"", realm);
            if let Ok(value) = HeaderValue::from_str(&challenge) {
                builder.insert_header((header::WWW_AUTHENTICATE, value));
            }
        }

        let error = match status {
            StatusCode::UNAUTHORIZED => "Unauthorized",
            StatusCode::FORBIDDEN => "Forbidden",
            _ => "Internal Server Error",
        };

        builder.json(serde_json::json!({
            "error": error,
            "message": message,
        }))
    }
}

impl ResponseError for ApiKeyError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiKeyError::Missing | ApiKeyError::Invalid => StatusCode::UNAUTHORIZED,
            ApiKeyError::InsufficientPermissions => StatusCode::FORBIDDEN,
            ApiKeyError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        self.challenge_response(DEFAULT_REALM, &self.to_string())
    }
}
