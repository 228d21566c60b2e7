//! Identity built from a validated API key.

use std::fmt;

use super::info::ApiKeyInfo;

/// Authentication type reported by identities built from API keys.
pub const AUTHENTICATION_TYPE: &str = "ApiKeyScheme";

/// Kind of a single [`Claim`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimType {
    /// The key owner.
    Name,
    /// The raw key as presented by the client.
    ApiKey,
    /// A role granted to the key.
    Role,
    /// A scope granted to the key.
    Scope,
}

impl ClaimType {
    /// Returns the conventional claim name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimType::Name => "name",
            ClaimType::ApiKey => "ApiKey",
            ClaimType::Role => "role",
            ClaimType::Scope => "scope",
        }
    }
}

/// A typed statement about the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    claim_type: ClaimType,
    value: String,
}

impl Claim {
    pub fn new(claim_type: ClaimType, value: impl Into<String>) -> Self {
        Claim {
            claim_type,
            value: value.into(),
        }
    }

    pub fn get_type(&self) -> ClaimType {
        self.claim_type
    }

    pub fn get_value(&self) -> &str {
        &self.value
    }
}

/// Claims principal of a request authenticated by API key.
///
/// Holds one name claim, one key claim, and any number of role and scope
/// claims. Identities are built per request and never modified afterwards.
///
/// # Example
/// ```
/// use actix_apikey_core::http::security::api_key::{ApiKeyInfo, Identity};
///
/// let info = ApiKeyInfo::new("12345")
///     .owner("SystemA")
///     .roles(vec!["Admin".into(), "User".into()])
///     .scopes(vec!["read".into()]);
/// let identity = Identity::from_info("raw-key", &info);
///
/// assert_eq!(identity.get_name(), "SystemA");
/// assert_eq!(identity.get_api_key(), "raw-key");
/// assert!(identity.has_role("Admin"));
/// assert!(identity.has_scope("read"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    claims: Vec<Claim>,
}

impl Identity {
    /// Builds the identity for `raw_key` from decoded key information.
    pub fn from_info(raw_key: &str, info: &ApiKeyInfo) -> Self {
        let mut claims = Vec::with_capacity(2 + info.get_roles().len() + info.get_scopes().len());
        claims.push(Claim::new(ClaimType::Name, info.get_owner()));
        claims.push(Claim::new(ClaimType::ApiKey, raw_key));
        claims.extend(
            info.get_roles()
                .iter()
                .map(|role| Claim::new(ClaimType::Role, role.as_str())),
        );
        claims.extend(
            info.get_scopes()
                .iter()
                .map(|scope| Claim::new(ClaimType::Scope, scope.as_str())),
        );
        Identity { claims }
    }

    /// Returns the authentication type.
    pub fn get_authentication_type(&self) -> &'static str {
        AUTHENTICATION_TYPE
    }

    /// Returns all claims in insertion order.
    pub fn get_claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Returns the values of every claim of the given type.
    pub fn find_all(&self, claim_type: ClaimType) -> impl Iterator<Item = &str> {
        self.claims
            .iter()
            .filter(move |c| c.claim_type == claim_type)
            .map(|c| c.get_value())
    }

    fn find_first(&self, claim_type: ClaimType) -> &str {
        self.find_all(claim_type).next().unwrap_or_default()
    }

    /// Returns the owner name.
    pub fn get_name(&self) -> &str {
        self.find_first(ClaimType::Name)
    }

    /// Returns the raw API key.
    pub fn get_api_key(&self) -> &str {
        self.find_first(ClaimType::ApiKey)
    }

    /// Returns the roles.
    pub fn get_roles(&self) -> Vec<&str> {
        self.find_all(ClaimType::Role).collect()
    }

    /// Returns the scopes.
    pub fn get_scopes(&self) -> Vec<&str> {
        self.find_all(ClaimType::Scope).collect()
    }

    /// Checks if the identity has a specific role.
    pub fn has_role(&self, role: &str) -> bool {
        self.find_all(ClaimType::Role).any(|r| r == role)
    }

    /// Checks if the identity has ANY of the specified roles (OR logic).
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }

    /// Checks if the identity has ALL of the specified roles (AND logic).
    pub fn has_all_roles(&self, roles: &[&str]) -> bool {
        roles.iter().all(|role| self.has_role(role))
    }

    /// Checks if the identity has a specific scope.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.find_all(ClaimType::Scope).any(|s| s == scope)
    }

    /// Checks if the identity has ANY of the specified scopes (OR logic).
    pub fn has_any_scope(&self, scopes: &[&str]) -> bool {
        scopes.iter().any(|scope| self.has_scope(scope))
    }

    /// Checks if the identity has ALL of the specified scopes (AND logic).
    pub fn has_all_scopes(&self, scopes: &[&str]) -> bool {
        scopes.iter().all(|scope| self.has_scope(scope))
    }
}

// Never includes the raw key.
impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Identity {{ name: {}, roles: {:?}, scopes: {:?} }}",
            self.get_name(),
            self.get_roles(),
            self.get_scopes()
        )
    }
}
