//! Header name resolution and the request header view.

use actix_web::http::header::HeaderMap;

use super::config::ApiKeySettings;
use super::API_KEY_HEADER_NAME;

/// Read-only, case-insensitive view over a request's headers.
///
/// Only the first value of a repeated header is visible. Values that are not
/// visible ASCII are reported as absent.
pub trait HeaderSource {
    /// Returns the first value of the named header.
    fn header(&self, name: &str) -> Option<&str>;
}

impl HeaderSource for HeaderMap {
    fn header(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.to_str().ok())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> HeaderSource for [(K, V)] {
    fn header(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.as_ref().eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_ref())
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> HeaderSource for [(K, V); N] {
    fn header(&self, name: &str) -> Option<&str> {
        self.as_slice().header(name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> HeaderSource for Vec<(K, V)> {
    fn header(&self, name: &str) -> Option<&str> {
        self.as_slice().header(name)
    }
}

/// Per-route header override.
///
/// Register it as resource data to make a single route read its key from a
/// different header:
///
/// ```ignore
/// web::resource("/reports")
///     .app_data(ApiKeyHeader::new("X-Report-Key"))
///     .route(web::get().to(reports))
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKeyHeader {
    header_name: String,
}

impl ApiKeyHeader {
    /// Creates a route-level header override.
    pub fn new(header_name: impl Into<String>) -> Self {
        Self {
            header_name: header_name.into(),
        }
    }

    /// Returns the overriding header name.
    pub fn get_header_name(&self) -> &str {
        &self.header_name
    }
}

/// Decides which header carries the API key.
pub struct HeaderResolver;

impl HeaderResolver {
    /// Resolves the header name. The first non-blank candidate wins:
    /// explicit override, route metadata, settings, then `X-API-Key`.
    pub fn resolve<'a>(
        route: Option<&'a ApiKeyHeader>,
        settings: Option<&'a ApiKeySettings>,
        override_header: Option<&'a str>,
    ) -> &'a str {
        override_header
            .and_then(non_blank)
            .or_else(|| route.and_then(|r| non_blank(r.get_header_name())))
            .or_else(|| settings.and_then(|s| non_blank(&s.header_name)))
            .unwrap_or(API_KEY_HEADER_NAME)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
