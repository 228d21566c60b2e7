//! Candidate key extraction.

use std::sync::OnceLock;

use regex::Regex;

use super::header::HeaderSource;
use super::API_KEY_SCHEME;

/// Standard header used for the `ApiKey <value>` fallback.
pub const AUTHORIZATION: &str = "Authorization";

/// Pulls the candidate API key out of a request's headers.
///
/// The named header is checked first. When it is missing or blank, the
/// `Authorization` header is parsed as `<scheme> <parameter>` and the
/// parameter is returned when the scheme matches (case-insensitively).
///
/// # Example
///
/// ```
/// use actix_apikey_core::http::security::api_key::KeyExtractor;
///
/// let headers = [("Authorization", "ApiKey sk_live_abc123")];
/// let key = KeyExtractor::default().extract(&headers, "X-API-Key");
/// assert_eq!(key.as_deref(), Some("sk_live_abc123"));
/// ```
#[derive(Debug, Clone)]
pub struct KeyExtractor {
    scheme: String,
}

impl Default for KeyExtractor {
    fn default() -> Self {
        Self {
            scheme: API_KEY_SCHEME.to_string(),
        }
    }
}

impl KeyExtractor {
    /// Creates an extractor accepting a custom `Authorization` scheme.
    pub fn with_scheme(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
        }
    }

    /// Returns the accepted `Authorization` scheme.
    pub fn get_scheme(&self) -> &str {
        &self.scheme
    }

    /// Extracts the candidate key, or `None` when the request carries none.
    pub fn extract<H>(&self, headers: &H, header_name: &str) -> Option<String>
    where
        H: HeaderSource + ?Sized,
    {
        if let Some(value) = headers.header(header_name) {
            if !value.trim().is_empty() {
                return Some(value.to_string());
            }
        }

        let authorization = headers.header(AUTHORIZATION)?;
        let (scheme, parameter) = parse_credentials(authorization)?;
        if scheme.eq_ignore_ascii_case(&self.scheme) {
            parameter.map(String::from)
        } else {
            None
        }
    }
}

/// Extracts the candidate key using the `ApiKey` scheme.
pub fn extract_candidate_key<H>(headers: &H, header_name: &str) -> Option<String>
where
    H: HeaderSource + ?Sized,
{
    KeyExtractor::default().extract(headers, header_name)
}

/// Splits an `Authorization` value into its scheme token and optional parameter.
///
/// Returns `None` when the value does not start with a valid token.
fn parse_credentials(value: &str) -> Option<(&str, Option<&str>)> {
    static CREDENTIALS: OnceLock<Option<Regex>> = OnceLock::new();
    let re = CREDENTIALS
        .get_or_init(|| {
            Regex::new(r"^\s*([!#$%&'*+.^_`|~0-9A-Za-z-]+)(?:\s+(\S.*?))?\s*$").ok()
        })
        .as_ref()?;

    let captures = re.captures(value)?;
    let scheme = captures.get(1)?.as_str();
    let parameter = captures.get(2).map(|m| m.as_str());
    Some((scheme, parameter))
}
