use serde::{Deserialize, Serialize};

/// Cookie SameSite policy as browsers spell it on the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// One cookie name/value pair with its optional attributes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub same_site: Option<SameSite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioritas: Option<String>,
}

impl Cookie {
    /// Create a plain name/value cookie with no attributes
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            http_only: None,
            secure: None,
            same_site: None,
            prioritas: None,
        }
    }
}

/// One shareable unit of credential data
///
/// An entry is immutable after creation; its only lifecycle transitions are
/// manual deletion and expiry once `created_at` falls behind the TTL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Creation-timestamp-derived identity, unique per entry
    pub id: i64,
    /// Display label for the site this entry belongs to
    pub website: String,
    pub cookies: Vec<Cookie>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Milliseconds since epoch; sole basis for expiry
    pub created_at: i64,
}

impl Entry {
    /// Whether this entry carries a username/password pair (or either half)
    pub fn has_credentials(&self) -> bool {
        self.username.as_deref().is_some_and(|u| !u.is_empty())
            || self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

/// Payload for a publish action, before identity and timestamp assignment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewEntry {
    pub website: String,
    pub cookies: Vec<Cookie>,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// The single persisted JSON document wrapping all entries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageData {
    #[serde(default)]
    pub entries: Vec<Entry>,
}
