//! Extractors for accessing the API key identity in handlers.

use std::future::{ready, Ready};
use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};

use crate::http::error::AuthError;
use crate::http::security::api_key::{ApiKeyError, ApiKeyGate, Identity};

/// Extractor for the identity of an authenticated API key.
///
/// The identity is attached by [`ApiKeyTransform`](super::ApiKeyTransform)
/// in `Authenticate` mode, or by the `#[api_key]` attribute.
///
/// # Usage
/// ```ignore
/// use actix_apikey_core::http::security::AuthenticatedKey;
///
/// async fn handler(key: AuthenticatedKey) -> impl Responder {
///     format!("Hello, {}!", key.get_name())
/// }
/// ```
///
/// # Errors
/// Returns `401 Unauthorized` if no identity is attached. The response uses
/// the registered [`ApiKeyGate`]'s challenge when one is available.
#[derive(Debug, Clone)]
pub struct AuthenticatedKey(Identity);

impl AuthenticatedKey {
    pub fn new(identity: Identity) -> Self {
        AuthenticatedKey(identity)
    }

    /// Returns the inner Identity.
    pub fn into_inner(self) -> Identity {
        self.0
    }

    /// Fails with `403 Forbidden` unless the key has one of `roles`.
    pub fn require_any_role(&self, roles: &[&str]) -> Result<(), AuthError> {
        if self.0.has_any_role(roles) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }

    /// Fails with `403 Forbidden` unless the key has one of `scopes`.
    pub fn require_any_scope(&self, scopes: &[&str]) -> Result<(), AuthError> {
        if self.0.has_any_scope(scopes) {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

impl Deref for AuthenticatedKey {
    type Target = Identity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for AuthenticatedKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if let Some(identity) = req.extensions().get::<Identity>().cloned() {
            return ready(Ok(AuthenticatedKey(identity)));
        }

        let error = match req.app_data::<web::Data<ApiKeyGate>>() {
            Some(gate) => gate.reject(ApiKeyError::Missing),
            None => AuthError::Unauthorized.into(),
        };
        ready(Err(error))
    }
}

/// Optional extractor for the API key identity.
///
/// Returns `None` if no identity is attached instead of an error.
#[derive(Debug, Clone)]
pub struct OptionalKey(Option<Identity>);

impl OptionalKey {
    /// Returns the inner Option<Identity>.
    pub fn into_inner(self) -> Option<Identity> {
        self.0
    }

    /// Returns true if an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.0.is_some()
    }
}

impl Deref for OptionalKey {
    type Target = Option<Identity>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for OptionalKey {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let identity = req.extensions().get::<Identity>().cloned();
        ready(Ok(OptionalKey(identity)))
    }
}

/// Extension trait for HttpRequest to inspect the API key identity.
pub trait SecurityExt {
    /// Returns a clone of the identity if present.
    fn get_identity(&self) -> Option<Identity>;

    /// Returns true if an identity is attached.
    fn is_authenticated(&self) -> bool;

    /// Checks if the identity has the specified role.
    fn has_role(&self, role: &str) -> bool;

    /// Checks if the identity has any of the specified roles.
    fn has_any_role(&self, roles: &[&str]) -> bool;

    /// Checks if the identity has the specified scope.
    fn has_scope(&self, scope: &str) -> bool;

    /// Checks if the identity has any of the specified scopes.
    fn has_any_scope(&self, scopes: &[&str]) -> bool;
}

impl SecurityExt for HttpRequest {
    fn get_identity(&self) -> Option<Identity> {
        self.extensions().get::<Identity>().cloned()
    }

    fn is_authenticated(&self) -> bool {
        self.extensions().get::<Identity>().is_some()
    }

    fn has_role(&self, role: &str) -> bool {
        self.extensions()
            .get::<Identity>()
            .is_some_and(|i| i.has_role(role))
    }

    fn has_any_role(&self, roles: &[&str]) -> bool {
        self.extensions()
            .get::<Identity>()
            .is_some_and(|i| i.has_any_role(roles))
    }

    fn has_scope(&self, scope: &str) -> bool {
        self.extensions()
            .get::<Identity>()
            .is_some_and(|i| i.has_scope(scope))
    }

    fn has_any_scope(&self, scopes: &[&str]) -> bool {
        self.extensions()
            .get::<Identity>()
            .is_some_and(|i| i.has_any_scope(scopes))
    }
}
