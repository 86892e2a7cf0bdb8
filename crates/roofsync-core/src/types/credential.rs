//! Access credential and remote version token.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque bearer token for the remote document store.
///
/// The token is never printed: `Debug` and `Display` both redact it. Use
/// [`Credential::expose`] at the single point where it goes on the wire.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token. Surrounding whitespace is trimmed; a blank token yields
    /// `None`, since an empty credential is the same as no credential.
    pub fn new<S: AsRef<str>>(token: S) -> Option<Self> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw token.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// A short masked form for display, e.g. `ghp_…9xQz`.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 8 {
            return "…".to_string();
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Opaque version token of the remote document (the blob sha).
///
/// It changes on every successful write, even when the content is
/// unchanged, and is the only concurrency signal the store offers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionToken(String);

impl VersionToken {
    /// Wrap a token as returned by the store.
    pub fn new<S: Into<String>>(token: S) -> Self {
        Self(token.into())
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
