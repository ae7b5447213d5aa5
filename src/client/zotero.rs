//! Zotero Web API v3 client.
//!
//! The [`ZoteroHttpClient`] issues exactly one request per trait call. It
//! keeps the quick-search parameters set through
//! [`ZoteroClient::add_parameters`] until the next `top` request, mirroring
//! how the façade's search operation is sequenced.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};
use url::Url;

use crate::config::LibraryConfig;
use crate::model::{Collection, CreateResponse, Item, ItemTemplate, Tag};

use super::http_client::build_http_client;
use super::{ClientError, ZoteroClient};

/// Default Zotero API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.zotero.org";

const API_VERSION: &str = "3";

/// Production [`ZoteroClient`] backed by `reqwest`.
pub struct ZoteroHttpClient {
    client: Client,
    base_url: Url,
    config: LibraryConfig,
    pending: Vec<(String, String)>,
}

impl ZoteroHttpClient {
    /// Creates a client for the library described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if HTTP client construction fails.
    #[tracing::instrument(skip_all, fields(library_id = %config.library_id, library_type = %config.library_type))]
    pub fn new(config: LibraryConfig) -> Result<Self, ClientError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] for an unparsable URL and
    /// [`ClientError::ClientBuild`] if HTTP client construction fails.
    #[tracing::instrument(skip_all, fields(library_id = %config.library_id, base_url))]
    pub fn with_base_url(config: LibraryConfig, base_url: &str) -> Result<Self, ClientError> {
        let parsed = Url::parse(base_url).map_err(|source| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            source,
        })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_string(),
                source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
            });
        }

        let client = build_http_client()?;
        debug!(base_url = %parsed, "Zotero client ready");

        Ok(Self {
            client,
            base_url: parsed,
            config,
            pending: Vec::new(),
        })
    }

    /// Query parameters waiting for the next `top` request.
    #[must_use]
    pub fn pending_parameters(&self) -> &[(String, String)] {
        &self.pending
    }

    fn library_path(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.config.library_prefix())
    }

    fn url(&self, path: &str, params: &[(String, String)]) -> Url {
        let mut url = self.base_url.clone();
        let base_path = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base_path}{path}"));
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("Zotero-API-Version", API_VERSION)
            .header("Zotero-API-Key", self.config.api_key.as_str())
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request
            .send()
            .await
            .map_err(|source| ClientError::Network {
                endpoint: endpoint.to_string(),
                source,
            })?;

        if let Some(version) = response.headers().get("last-modified-version") {
            debug!(library_version = ?version, "Zotero library version");
        }
        if let Some(backoff) = response.headers().get("backoff") {
            debug!(backoff = ?backoff, "Zotero asked clients to back off");
        }

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(text) => text,
                Err(error) => {
                    debug!(error = %error, %endpoint, "Failed to read Zotero error body");
                    String::new()
                }
            };
            debug!(status = status.as_u16(), %endpoint, "Zotero API error");
            return Err(ClientError::http_status(endpoint, status.as_u16(), &body));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T, ClientError> {
        let url = self.url(path, params);
        debug!(api_url = %url, "Calling Zotero API");
        let response = self.send(path, self.request(Method::GET, url)).await?;
        decode(path, response).await
    }
}

async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response) -> Result<T, ClientError> {
    let body = response
        .text()
        .await
        .map_err(|source| ClientError::Network {
            endpoint: endpoint.to_string(),
            source,
        })?;
    serde_json::from_str(&body).map_err(|source| ClientError::Decode {
        endpoint: endpoint.to_string(),
        source,
    })
}

fn limit_param(limit: u32) -> (String, String) {
    ("limit".to_string(), limit.to_string())
}

fn encode_key(key: &str) -> String {
    urlencoding::encode(key).into_owned()
}

fn write_token() -> String {
    format!("{:032x}", rand::random::<u128>())
}

impl std::fmt::Debug for ZoteroHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoteroHttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("config", &self.config)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ZoteroClient for ZoteroHttpClient {
    #[tracing::instrument(skip(self))]
    async fn top(&mut self, limit: u32) -> Result<Vec<Item>, ClientError> {
        let mut params = vec![limit_param(limit)];
        params.append(&mut self.pending);
        let path = self.library_path("/items/top");
        self.get_json(&path, &params).await
    }

    #[tracing::instrument(skip(self))]
    async fn collections_top(&self, limit: Option<u32>) -> Result<Vec<Collection>, ClientError> {
        let params: Vec<(String, String)> = limit.map(limit_param).into_iter().collect();
        let path = self.library_path("/collections/top");
        self.get_json(&path, &params).await
    }

    fn add_parameters(&mut self, q: &str, qmode: &str) {
        debug!(q, qmode, "Setting quick-search parameters");
        self.pending.retain(|(name, _)| name != "q" && name != "qmode");
        self.pending.push(("q".to_string(), q.to_string()));
        self.pending.push(("qmode".to_string(), qmode.to_string()));
    }

    #[tracing::instrument(skip(self))]
    async fn tags(&self, limit: u32) -> Result<Vec<Tag>, ClientError> {
        let path = self.library_path("/tags");
        self.get_json(&path, &[limit_param(limit)]).await
    }

    #[tracing::instrument(skip(self))]
    async fn collection_items(&self, key: &str, limit: u32) -> Result<Vec<Item>, ClientError> {
        let path = self.library_path(&format!("/collections/{}/items", encode_key(key)));
        self.get_json(&path, &[limit_param(limit)]).await
    }

    #[tracing::instrument(skip(self))]
    async fn collection(&self, key: &str) -> Result<Collection, ClientError> {
        let path = self.library_path(&format!("/collections/{}", encode_key(key)));
        self.get_json(&path, &[]).await
    }

    #[tracing::instrument(skip(self))]
    async fn item(&self, key: &str) -> Result<Item, ClientError> {
        let path = self.library_path(&format!("/items/{}", encode_key(key)));
        self.get_json(&path, &[]).await
    }

    #[tracing::instrument(skip(self))]
    async fn item_template(&self, item_type: &str) -> Result<ItemTemplate, ClientError> {
        let params = [("itemType".to_string(), item_type.to_string())];
        self.get_json("/items/new", &params).await
    }

    #[tracing::instrument(skip(self, items), fields(count = items.len()))]
    async fn create_items(&self, items: Vec<ItemTemplate>) -> Result<CreateResponse, ClientError> {
        let path = self.library_path("/items");
        let url = self.url(&path, &[]);
        let request = self
            .request(Method::POST, url)
            .header("Zotero-Write-Token", write_token())
            .json(&items);
        let response = self.send(&path, request).await?;
        let created: CreateResponse = decode(&path, response).await?;
        info!(
            succeeded = created.success.len(),
            failed = created.failed.len(),
            "Zotero create request finished"
        );
        Ok(created)
    }

    #[tracing::instrument(skip(self, item), fields(key = %item.key, version = item.data.version))]
    async fn update_item(&self, item: &Item) -> Result<(), ClientError> {
        let path = self.library_path(&format!("/items/{}", encode_key(&item.key)));
        let url = self.url(&path, &[]);
        let request = self.request(Method::PUT, url).json(&item.data);
        self.send(&path, request).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, item), fields(key = %item.key, version = item.version))]
    async fn delete_item(&self, item: &Item) -> Result<(), ClientError> {
        let path = self.library_path(&format!("/items/{}", encode_key(&item.key)));
        let url = self.url(&path, &[]);
        let request = self
            .request(Method::PATCH, url)
            .header("If-Unmodified-Since-Version", item.version.to_string())
            .json(&json!({ "deleted": 1 }));
        self.send(&path, request).await?;
        Ok(())
    }
}
