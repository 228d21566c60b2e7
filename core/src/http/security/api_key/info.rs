//! API Key information model.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Owner reported when a key does not name one.
pub const UNKNOWN_OWNER: &str = "Unknown";

/// Identity attributes carried by (or looked up for) an API key.
///
/// # Example
///
/// ```
/// use actix_apikey_core::http::security::api_key::ApiKeyInfo;
///
/// let info = ApiKeyInfo::new("12345")
///     .owner("SystemA")
///     .roles(vec!["Admin".into()])
///     .scopes(vec!["read".into()]);
///
/// assert_eq!(info.get_owner(), "SystemA");
/// assert!(info.has_scope("read"));
/// ```
///
/// Property names are matched case-insensitively when deserializing; missing
/// or `null` fields take their defaults and unknown properties are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiKeyInfo {
    key: String,
    owner: String,
    roles: Vec<String>,
    scopes: Vec<String>,
}

impl ApiKeyInfo {
    /// Creates info for the given key, owned by `"Unknown"`, with no roles or scopes.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            owner: UNKNOWN_OWNER.to_string(),
            roles: Vec::new(),
            scopes: Vec::new(),
        }
    }

    /// Sets the owner. A blank owner is stored as `"Unknown"`.
    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        let owner = owner.into();
        self.owner = if owner.trim().is_empty() {
            UNKNOWN_OWNER.to_string()
        } else {
            owner
        };
        self
    }

    /// Sets the roles.
    pub fn roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    /// Sets the scopes.
    pub fn scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Returns the key identifier.
    pub fn get_key(&self) -> &str {
        &self.key
    }

    /// Returns the owner.
    pub fn get_owner(&self) -> &str {
        &self.owner
    }

    /// Returns the roles.
    pub fn get_roles(&self) -> &[String] {
        &self.roles
    }

    /// Returns the scopes.
    pub fn get_scopes(&self) -> &[String] {
        &self.scopes
    }

    /// Checks if the key has a specific role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Checks if the key has a specific scope.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

#[derive(Clone, Copy)]
enum Field {
    Key,
    Owner,
    Roles,
    Scopes,
}

impl Field {
    fn lookup(name: &str) -> Option<Field> {
        [
            ("key", Field::Key),
            ("owner", Field::Owner),
            ("roles", Field::Roles),
            ("scopes", Field::Scopes),
        ]
        .into_iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, field)| field)
    }
}

struct ApiKeyInfoVisitor;

impl<'de> Visitor<'de> for ApiKeyInfoVisitor {
    type Value = ApiKeyInfo;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an API key information object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<ApiKeyInfo, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut info = ApiKeyInfo::new("");

        while let Some(name) = map.next_key::<String>()? {
            match Field::lookup(&name) {
                Some(Field::Key) => {
                    info.key = map.next_value::<Option<String>>()?.unwrap_or_default();
                }
                Some(Field::Owner) => {
                    let owner = map.next_value::<Option<String>>()?.unwrap_or_default();
                    info = info.owner(owner);
                }
                Some(Field::Roles) => {
                    info.roles = map.next_value::<Option<Vec<String>>>()?.unwrap_or_default();
                }
                Some(Field::Scopes) => {
                    info.scopes = map.next_value::<Option<Vec<String>>>()?.unwrap_or_default();
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(info)
    }
}

impl<'de> Deserialize<'de> for ApiKeyInfo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ApiKeyInfoVisitor)
    }
}
