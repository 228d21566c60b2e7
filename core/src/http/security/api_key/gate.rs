//! Shared request check used by every integration style.
//!
//! The middleware, the `#[api_key]` macro and the extractors all funnel into
//! [`ApiKeyGate::on_request`], which resolves the header, extracts the
//! candidate key, runs the validator and returns an [`Outcome`].

use std::sync::Arc;

use actix_web::error::InternalError;
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};

use super::config::{ApiKeySettings, DEFAULT_ERROR_MESSAGE};
use super::error::{ApiKeyError, ValidationError};
use super::extractor::KeyExtractor;
use super::header::{ApiKeyHeader, HeaderResolver, HeaderSource};
use super::identity::Identity;
use super::validator::ApiKeyValidator;

/// How much work the gate does per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateMode {
    /// Key presence plus `is_valid`. No identity is produced.
    #[default]
    Authorize,
    /// Full `validate_and_get_info`. The identity is attached to the request.
    Authenticate,
}

/// Result of checking one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Let the request through, with the identity in `Authenticate` mode.
    Continue(Option<Identity>),
    /// Stop the request with the given error.
    Reject(ApiKeyError),
}

impl Outcome {
    pub fn is_continue(&self) -> bool {
        matches!(self, Outcome::Continue(_))
    }
}

/// Role and scope requirements.
///
/// Each list uses any-of semantics. An empty list is always satisfied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirements {
    authenticated: bool,
    roles: Vec<String>,
    scopes: Vec<String>,
}

impl Requirements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a full identity even without roles or scopes.
    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }

    /// Requires any of the given roles.
    pub fn roles<S: AsRef<str>>(mut self, roles: &[S]) -> Self {
        self.roles = roles.iter().map(|r| r.as_ref().to_string()).collect();
        self
    }

    /// Requires any of the given scopes.
    pub fn scopes<S: AsRef<str>>(mut self, scopes: &[S]) -> Self {
        self.scopes = scopes.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Returns true when the request must be checked in `Authenticate` mode.
    pub fn needs_identity(&self) -> bool {
        self.authenticated || !self.roles.is_empty() || !self.scopes.is_empty()
    }

    /// Checks the requirements against an identity.
    pub fn is_satisfied_by(&self, identity: &Identity) -> bool {
        let roles_ok = self.roles.is_empty() || self.roles.iter().any(|r| identity.has_role(r));
        let scopes_ok =
            self.scopes.is_empty() || self.scopes.iter().any(|s| identity.has_scope(s));
        roles_ok && scopes_ok
    }
}

/// Adapter core shared by middleware, macro and extractors.
///
/// # Example
///
/// ```
/// use actix_apikey_core::http::security::api_key::{
///     ApiKeyGate, ApiKeySettings, Outcome,
/// };
///
/// let gate = ApiKeyGate::from_settings(
///     ApiKeySettings::default().api_keys(vec!["key123".into()]),
/// );
///
/// let headers = [("X-API-Key", "key123")];
/// assert!(gate.on_request(&headers, None, None).is_continue());
///
/// let headers = [("X-API-Key", "key999")];
/// assert!(!gate.on_request(&headers, None, None).is_continue());
/// ```
#[derive(Debug, Clone)]
pub struct ApiKeyGate {
    validator: Arc<ApiKeyValidator>,
    settings: Arc<ApiKeySettings>,
    extractor: KeyExtractor,
    mode: GateMode,
}

impl ApiKeyGate {
    pub fn new(validator: ApiKeyValidator, settings: ApiKeySettings) -> Self {
        ApiKeyGate {
            validator: Arc::new(validator),
            settings: Arc::new(settings),
            extractor: KeyExtractor::default(),
            mode: GateMode::default(),
        }
    }

    /// Builds a gate backed by the built-in strategy only.
    pub fn from_settings(settings: ApiKeySettings) -> Self {
        let validator = ApiKeyValidator::from_settings(&settings);
        Self::new(validator, settings)
    }

    /// Sets the gate mode.
    pub fn mode(mut self, mode: GateMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for `mode(GateMode::Authenticate)`.
    pub fn authenticate(self) -> Self {
        self.mode(GateMode::Authenticate)
    }

    /// Accepts a different `Authorization` scheme than `ApiKey`.
    pub fn extractor(mut self, extractor: KeyExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn get_mode(&self) -> GateMode {
        self.mode
    }

    pub fn get_settings(&self) -> &ApiKeySettings {
        &self.settings
    }

    pub fn get_validator(&self) -> &ApiKeyValidator {
        &self.validator
    }

    /// Checks a request without role or scope requirements.
    pub fn on_request<H>(
        &self,
        headers: &H,
        route: Option<&ApiKeyHeader>,
        override_header: Option<&str>,
    ) -> Outcome
    where
        H: HeaderSource + ?Sized,
    {
        self.on_request_with(headers, route, override_header, &Requirements::default())
    }

    /// Checks a request. Requirements needing an identity force `Authenticate` mode.
    pub fn on_request_with<H>(
        &self,
        headers: &H,
        route: Option<&ApiKeyHeader>,
        override_header: Option<&str>,
        requirements: &Requirements,
    ) -> Outcome
    where
        H: HeaderSource + ?Sized,
    {
        let header_name = HeaderResolver::resolve(route, Some(&self.settings), override_header);

        let key = match self.extractor.extract(headers, header_name) {
            Some(key) => key,
            None => {
                tracing::debug!(header = header_name, "Rejected request: no API key provided");
                return Outcome::Reject(ApiKeyError::Missing);
            }
        };

        let mode = if requirements.needs_identity() {
            GateMode::Authenticate
        } else {
            self.mode
        };

        let verdict = match mode {
            GateMode::Authorize => match self.validator.is_valid(&key) {
                Ok(true) => Ok(None),
                Ok(false) => Err(ValidationError::Validation),
                Err(e) => Err(e),
            },
            GateMode::Authenticate => self.validator.validate_and_get_info(&key).map(Some),
        };

        match verdict {
            Ok(Some(identity)) if !requirements.is_satisfied_by(&identity) => {
                tracing::debug!(
                    header = header_name,
                    owner = identity.get_name(),
                    "Rejected request: API key lacks the required roles or scopes"
                );
                Outcome::Reject(ApiKeyError::InsufficientPermissions)
            }
            Ok(identity) => Outcome::Continue(identity),
            Err(ValidationError::GenericFailure) => {
                tracing::warn!(
                    header = header_name,
                    key_prefix = %key_prefix(&key),
                    "API key validation could not be completed"
                );
                Outcome::Reject(ApiKeyError::Invalid)
            }
            Err(ValidationError::Validation) => {
                tracing::debug!(
                    header = header_name,
                    key_prefix = %key_prefix(&key),
                    "Rejected request: invalid API key"
                );
                Outcome::Reject(ApiKeyError::Invalid)
            }
        }
    }

    /// Renders the response for a rejected request.
    pub fn challenge(&self, error: &ApiKeyError) -> HttpResponse {
        let message = match error {
            ApiKeyError::Missing | ApiKeyError::Invalid => {
                if self.settings.error_message.trim().is_empty() {
                    DEFAULT_ERROR_MESSAGE.to_string()
                } else {
                    self.settings.error_message.clone()
                }
            }
            other => other.to_string(),
        };
        error.challenge_response(&self.settings.realm, &message)
    }

    /// Wraps a rejection into an actix error carrying the challenge response.
    pub fn reject(&self, error: ApiKeyError) -> actix_web::Error {
        let response = self.challenge(&error);
        InternalError::from_response(error, response).into()
    }
}

fn key_prefix(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{}...", prefix)
}

/// Checks a request from inside a handler.
///
/// Used by the `#[api_key]` attribute. Looks up `web::Data<ApiKeyGate>`,
/// honours a resource-level [`ApiKeyHeader`], stores the identity in the
/// request extensions and returns it.
pub fn guard_request(
    req: &HttpRequest,
    header: Option<&str>,
    requirements: &Requirements,
) -> Result<Option<Identity>, actix_web::Error> {
    let gate = req
        .app_data::<web::Data<ApiKeyGate>>()
        .ok_or(ApiKeyError::NotConfigured)?;
    let route = req.app_data::<ApiKeyHeader>();

    match gate.on_request_with(req.headers(), route, header, requirements) {
        Outcome::Continue(identity) => {
            if let Some(identity) = &identity {
                req.extensions_mut().insert(identity.clone());
            }
            Ok(identity)
        }
        Outcome::Reject(error) => Err(gate.reject(error)),
    }
}
