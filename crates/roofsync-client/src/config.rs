//! Remote document configuration.

use std::time::Duration;

use roofsync_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Default document path inside the repository.
pub const DEFAULT_DOCUMENT_PATH: &str = "data/properties.json";

/// Default commit message for pushes.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Sync: Update property data";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How a write chooses the version it overwrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Re-read the current version right before writing and overwrite it,
    /// whatever the caller last observed.
    #[default]
    LastWriterWins,
    /// Send the caller's last observed version; the store refuses the write
    /// if the document moved on.
    RejectStale,
}

/// Where the synchronized document lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// API base URL, without trailing slash.
    pub api_base: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Document path inside the repository.
    pub path: String,
    /// Commit message used for every push.
    pub commit_message: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Write policy.
    pub write_policy: WritePolicy,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            owner: String::new(),
            repo: String::new(),
            path: DEFAULT_DOCUMENT_PATH.to_string(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("roofsync/", env!("CARGO_PKG_VERSION")).to_string(),
            write_policy: WritePolicy::default(),
        }
    }
}

impl RemoteConfig {
    /// A default configuration for `owner/repo`.
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            ..Self::default()
        }
    }

    /// Point the client at a different API base (test servers, GitHub
    /// Enterprise).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Use a different document path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Use a different write policy.
    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    /// Use a different per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Check that every field needed to address the document is present.
    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            return Err(Error::config("remote.api_base must not be empty"));
        }
        if self.owner.trim().is_empty() {
            return Err(Error::config("remote.owner must not be empty"));
        }
        if self.repo.trim().is_empty() {
            return Err(Error::config("remote.repo must not be empty"));
        }
        let path = self.path.trim_matches('/');
        if path.is_empty() {
            return Err(Error::config("remote.path must not be empty"));
        }
        if path.split('/').any(|segment| segment.is_empty() || segment == "..") {
            return Err(Error::config(format!(
                "remote.path '{}' is not a plain repository path",
                self.path
            )));
        }
        Ok(())
    }

    /// Full URL of the document in the contents API.
    pub fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base.trim_end_matches('/'),
            self.owner.trim(),
            self.repo.trim(),
            self.path.trim_matches('/')
        )
    }
}
