//! GitHub contents API client.
//!
//! The repository file at `RemoteConfig::path` holds the whole property
//! collection as a JSON array. The blob `sha` is the version token.
//!
//! - Fetch: `GET .../contents/{path}` returns an envelope with base64
//!   `content` and `sha`. Files over 1 MB come back with `encoding: "none"`
//!   and no content, in which case the raw media type is requested.
//! - Write: `PUT .../contents/{path}` with `{message, content, sha}` where
//!   `content` is base64 of the UTF-8 JSON. The `sha` sent depends on the
//!   [`WritePolicy`].

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use roofsync_core::{Credential, PropertyCollection, VersionToken};
use serde::{Deserialize, Serialize};

use crate::config::{RemoteConfig, WritePolicy};
use crate::document::{DocumentStore, RemoteDocument};
use crate::error::RemoteError;

/// Media type for the JSON envelope.
const JSON_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Media type for the raw file body.
const RAW_MEDIA_TYPE: &str = "application/vnd.github.v3.raw";

/// Metadata and (usually) content of a repository file.
#[derive(Debug, Deserialize)]
struct ContentsEnvelope {
    sha: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    encoding: Option<String>,
    #[serde(default)]
    size: u64,
}

impl ContentsEnvelope {
    fn needs_raw_fetch(&self) -> bool {
        self.encoding.as_deref() == Some("none") || (self.content.is_empty() && self.size > 0)
    }
}

#[derive(Debug, Serialize)]
struct WriteRequest<'a> {
    message: &'a str,
    content: String,
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    content: WrittenContent,
}

#[derive(Debug, Deserialize)]
struct WrittenContent {
    sha: String,
}

/// [`DocumentStore`] over the GitHub contents API.
#[derive(Debug, Clone)]
pub struct ContentsClient {
    config: RemoteConfig,
    url: String,
    http: reqwest::Client,
}

impl ContentsClient {
    /// Build a client. Fails if the configuration cannot address a document
    /// or the HTTP client cannot be created.
    pub fn new(config: RemoteConfig) -> crate::Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        let url = config.contents_url();
        Ok(Self { config, url, http })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Document URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn get(&self, credential: &Credential, media_type: &str) -> reqwest::RequestBuilder {
        self.http
            .get(&self.url)
            .header(AUTHORIZATION, format!("token {}", credential.expose()))
            .header(ACCEPT, media_type)
    }

    async fn fetch_envelope(&self, credential: &Credential) -> Result<ContentsEnvelope, RemoteError> {
        let response = self
            .get(credential, JSON_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| send_error("GET", e))?;
        let response = check_status(response, "GET")?;

        response.json::<ContentsEnvelope>().await.map_err(|e| {
            RemoteError::transport_with_source("remote response is not a file envelope", e)
        })
    }

    async fn fetch_raw(&self, credential: &Credential) -> Result<Vec<u8>, RemoteError> {
        tracing::debug!(url = %self.url, "document too large for envelope; fetching raw");
        let response = self
            .get(credential, RAW_MEDIA_TYPE)
            .send()
            .await
            .map_err(|e| send_error("GET", e))?;
        let response = check_status(response, "GET")?;

        let body = response
            .bytes()
            .await
            .map_err(|e| RemoteError::transport_with_source("failed to read raw document", e))?;
        Ok(body.to_vec())
    }

    /// The sha to send with a write, per the configured policy.
    async fn resolve_write_base(
        &self,
        credential: &Credential,
        base_version: Option<&VersionToken>,
    ) -> Result<Option<VersionToken>, RemoteError> {
        match self.config.write_policy {
            WritePolicy::RejectStale => Ok(base_version.cloned()),
            WritePolicy::LastWriterWins => match self.fetch_envelope(credential).await {
                Ok(envelope) => Ok(Some(VersionToken::new(envelope.sha))),
                Err(RemoteError::NotFound) => Ok(None),
                Err(e) => Err(e),
            },
        }
    }
}

#[async_trait]
impl DocumentStore for ContentsClient {
    async fn fetch_document(&self, credential: &Credential) -> Result<RemoteDocument, RemoteError> {
        let envelope = self.fetch_envelope(credential).await?;

        let bytes = if envelope.needs_raw_fetch() {
            self.fetch_raw(credential).await?
        } else {
            decode_content(&envelope.content)?
        };

        let content = PropertyCollection::from_json_slice(&bytes).map_err(|e| {
            RemoteError::transport_with_source("remote document is not a valid property array", e)
        })?;

        tracing::debug!(
            url = %self.url,
            version = %envelope.sha,
            properties = content.len(),
            "fetched remote document"
        );
        Ok(RemoteDocument {
            content,
            version: VersionToken::new(envelope.sha),
        })
    }

    async fn write_document(
        &self,
        credential: &Credential,
        content: &PropertyCollection,
        base_version: Option<&VersionToken>,
    ) -> Result<VersionToken, RemoteError> {
        let base = self.resolve_write_base(credential, base_version).await?;

        let json = content.to_json_pretty().map_err(|e| {
            RemoteError::transport_with_source("failed to encode property collection", e)
        })?;
        let body = WriteRequest {
            message: &self.config.commit_message,
            content: STANDARD.encode(json.as_bytes()),
            sha: base.as_ref().map(VersionToken::as_str),
        };

        let response = self
            .http
            .put(&self.url)
            .header(AUTHORIZATION, format!("token {}", credential.expose()))
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .json(&body)
            .send()
            .await
            .map_err(|e| send_error("PUT", e))?;

        let response = match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(RemoteError::transport(
                    "PUT returned 404; check remote.owner and remote.repo",
                ));
            }
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                tracing::warn!(
                    url = %self.url,
                    base = base.as_ref().map(VersionToken::as_str).unwrap_or("none"),
                    "remote rejected write against a stale version"
                );
                return Err(RemoteError::Conflict);
            }
            _ => check_status(response, "PUT")?,
        };

        let written: WriteResponse = response.json().await.map_err(|e| {
            RemoteError::transport_with_source("write response did not include a version", e)
        })?;

        tracing::info!(
            url = %self.url,
            version = %written.content.sha,
            properties = content.len(),
            "wrote remote document"
        );
        Ok(VersionToken::new(written.content.sha))
    }
}

/// Map a status to success or exactly one [`RemoteError`].
fn check_status(response: reqwest::Response, method: &str) -> Result<reqwest::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    match status {
        StatusCode::NOT_FOUND => Err(RemoteError::NotFound),
        StatusCode::UNAUTHORIZED => Err(RemoteError::Unauthorized),
        _ => Err(RemoteError::transport(format!(
            "{method} returned unexpected status {status}"
        ))),
    }
}

fn send_error(method: &str, error: reqwest::Error) -> RemoteError {
    let message = if error.is_timeout() {
        format!("{method} timed out")
    } else if error.is_connect() {
        format!("{method} could not connect")
    } else {
        format!("{method} failed")
    };
    RemoteError::transport_with_source(message, error)
}

/// Decode the envelope's base64 content. GitHub wraps it at 60 columns.
fn decode_content(content: &str) -> Result<Vec<u8>, RemoteError> {
    let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(compact)
        .map_err(|e| RemoteError::transport_with_source("remote content is not valid base64", e))
}
