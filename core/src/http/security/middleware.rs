//! API key middleware for Actix Web.
//!
//! Wraps an application, scope or resource and rejects requests that do not
//! carry a valid API key before they reach the handler.

use std::rc::Rc;

use actix_service::{Service, Transform};
use actix_web::body::EitherBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use regex::Regex;

use crate::http::security::api_key::{ApiKeyGate, ApiKeyHeader, Outcome, Requirements};

/// Marks a resource or scope as reachable without an API key.
///
/// Only visible to the middleware when it wraps the same scope or resource,
/// since application-level middleware runs before routing. Use
/// [`ApiKeyTransform::permit`] for application-level exemptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAnonymous;

#[derive(Clone)]
struct MiddlewareConfig {
    gate: ApiKeyGate,
    header: Option<String>,
    route_headers: Vec<(Regex, ApiKeyHeader)>,
    permitted: Vec<Regex>,
    requirements: Requirements,
}

impl MiddlewareConfig {
    fn is_permitted(&self, req: &ServiceRequest) -> bool {
        req.app_data::<AllowAnonymous>().is_some()
            || self.permitted.iter().any(|re| re.is_match(req.path()))
    }

    fn route_header(&self, req: &ServiceRequest) -> Option<ApiKeyHeader> {
        self.route_headers
            .iter()
            .find(|(re, _)| re.is_match(req.path()))
            .map(|(_, header)| header.clone())
            .or_else(|| req.app_data::<ApiKeyHeader>().cloned())
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "Ignoring invalid route pattern");
            None
        }
    }
}

/// API key middleware factory.
///
/// # Example
/// ```ignore
/// let gate = ApiKeyGate::from_settings(ApiKeySettings::load()?);
///
/// App::new().wrap(
///     ApiKeyTransform::new(gate)
///         .route_header("^/reports", "X-Report-Key")
///         .permit("^/health$")
/// )
/// ```
pub struct ApiKeyTransform {
    config: MiddlewareConfig,
}

impl ApiKeyTransform {
    pub fn new(gate: ApiKeyGate) -> Self {
        ApiKeyTransform {
            config: MiddlewareConfig {
                gate,
                header: None,
                route_headers: Vec::new(),
                permitted: Vec::new(),
                requirements: Requirements::default(),
            },
        }
    }

    /// Reads the key from `name` for every request, overriding routes and settings.
    pub fn header(mut self, name: impl Into<String>) -> Self {
        self.config.header = Some(name.into());
        self
    }

    /// Reads the key from `header_name` on paths matching `pattern`.
    ///
    /// The first matching pattern wins. Invalid patterns are logged and ignored.
    pub fn route_header(mut self, pattern: &str, header_name: impl Into<String>) -> Self {
        if let Some(re) = compile(pattern) {
            let header = ApiKeyHeader::new(header_name);
            self.config.route_headers.push((re, header));
        }
        self
    }

    /// Lets paths matching `pattern` through without a key.
    pub fn permit(mut self, pattern: &str) -> Self {
        if let Some(re) = compile(pattern) {
            self.config.permitted.push(re);
        }
        self
    }

    /// Requires every request to carry one of the given roles or scopes.
    pub fn require(mut self, requirements: Requirements) -> Self {
        self.config.requirements = requirements;
        self
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyTransform
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ApiKeyService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ApiKeyService {
            config: Rc::new(self.config.clone()),
            service: Rc::new(service),
        })
    }
}

/// API key middleware service.
pub struct ApiKeyService<S> {
    config: Rc<MiddlewareConfig>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let config = &self.config;

        if config.is_permitted(&req) {
            let fut = self.service.call(req);
            return Box::pin(async move { Ok(fut.await?.map_into_left_body()) });
        }

        let route = config.route_header(&req);
        let outcome = config.gate.on_request_with(
            req.headers(),
            route.as_ref(),
            config.header.as_deref(),
            &config.requirements,
        );

        match outcome {
            Outcome::Continue(identity) => {
                // Makes the identity available to the AuthenticatedKey extractor
                if let Some(identity) = identity {
                    req.extensions_mut().insert(identity);
                }
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Outcome::Reject(error) => {
                let response = config.gate.challenge(&error);
                Box::pin(ok(req.into_response(response).map_into_right_body()))
            }
        }
    }
}
