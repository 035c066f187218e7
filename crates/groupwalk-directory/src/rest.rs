//! Admin SDK REST backend.
//!
//! Client for a Google Workspace style Admin Directory `groups.list`
//! endpoint: `GET {base}/admin/directory/v1/groups` filtered by `userKey`,
//! optionally scoped by `domain`, continued by `pageToken`. Credentials stay
//! behind [`TokenSource`]; OAuth flows are not this crate's concern.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::{DirectoryError, DirectoryResult};
use crate::MembershipPage;

const DEFAULT_API_BASE: &str = "https://admin.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 200;

/// Configuration for the Admin SDK client.
#[derive(Debug, Clone)]
pub struct AdminDirectoryConfig {
    /// Base URL of the Admin SDK, overridable for tests.
    pub api_base: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `maxResults` sent with every listing.
    pub page_size: u32,
}

impl Default for AdminDirectoryConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Supplies a bearer token for each directory request.
///
/// The credential boundary: service-account impersonation, refresh and
/// caching all live behind this trait.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Returns a token valid for an immediate request.
    async fn token(&self) -> DirectoryResult<String>;
}

/// Token source serving one fixed token, for tests and pre-acquired
/// credentials.
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn token(&self) -> DirectoryResult<String> {
        Ok(self.token.clone())
    }
}

/// REST client for the Admin SDK `groups.list` endpoint.
pub struct AdminDirectory {
    client: Client,
    config: AdminDirectoryConfig,
    tokens: Arc<dyn TokenSource>,
}

impl AdminDirectory {
    /// Creates a client with the default configuration.
    pub fn new(tokens: Arc<dyn TokenSource>) -> DirectoryResult<Self> {
        Self::with_config(tokens, AdminDirectoryConfig::default())
    }

    /// Creates a client with custom configuration.
    pub fn with_config(
        tokens: Arc<dyn TokenSource>,
        config: AdminDirectoryConfig,
    ) -> DirectoryResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| DirectoryError::Http {
                message: format!("failed to build http client: {error}"),
            })?;

        Ok(Self {
            client,
            config,
            tokens,
        })
    }

    /// Lists the groups `member_key` belongs to directly, one page at a
    /// time.
    ///
    /// No retries; a failed call is the caller's problem. A 404 maps to
    /// [`DirectoryError::MemberNotFound`], any other non-success status to
    /// [`DirectoryError::Api`] with the response body as the message.
    pub async fn list_groups(
        &self,
        domain: &str,
        member_key: &str,
        page_token: Option<&str>,
    ) -> DirectoryResult<MembershipPage> {
        let token = self.tokens.token().await?;

        let mut request = self
            .client
            .get(format!("{}/admin/directory/v1/groups", self.config.api_base))
            .bearer_auth(token)
            .query(&[("userKey", member_key)])
            .query(&[("maxResults", self.config.page_size)]);
        if !domain.is_empty() {
            request = request.query(&[("domain", domain)]);
        }
        if let Some(page_token) = page_token.filter(|token| !token.is_empty()) {
            request = request.query(&[("pageToken", page_token)]);
        }

        let response = request.send().await.map_err(|error| DirectoryError::Http {
            message: error.to_string(),
        })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DirectoryError::MemberNotFound {
                member_key: member_key.to_string(),
            });
        }
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_string());
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GroupsListResponse =
            response
                .json()
                .await
                .map_err(|error| DirectoryError::InvalidResponse {
                    message: error.to_string(),
                })?;

        let page = MembershipPage {
            groups: body
                .groups
                .unwrap_or_default()
                .into_iter()
                .map(|group| group.email)
                .collect(),
            next_page_token: body.next_page_token,
        };
        debug!(
            member_key,
            groups = page.groups.len(),
            has_next = page.next_page_token.is_some(),
            "listed directory groups"
        );
        Ok(page)
    }
}

/// Wire shape of a `groups.list` answer. Fields this client never reads are
/// ignored by serde.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupsListResponse {
    /// Absent entirely when the member belongs to no groups.
    groups: Option<Vec<ApiGroup>>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiGroup {
    /// The group's address, the identifier everything downstream keys on.
    email: String,
}
