//! Zotero Web API client capability.
//!
//! # Architecture
//!
//! - [`ZoteroClient`] - Async trait exposing exactly the operations the
//!   [`Library`](crate::library::Library) façade consumes
//! - [`ZoteroHttpClient`] - Production implementation over the Zotero Web API v3
//! - [`ClientError`] - Errors surfaced by client implementations
//!
//! The façade takes any `ZoteroClient`, so tests substitute a recording fake
//! instead of patching a global constructor.

mod error;
mod http_client;
mod zotero;

pub use error::ClientError;
pub use zotero::{DEFAULT_BASE_URL, ZoteroHttpClient};

use async_trait::async_trait;

use crate::model::{Collection, CreateResponse, Item, ItemTemplate, Tag};

/// The remote-service operations the façade relies on.
///
/// Each method maps to one API request. Implementations add no retries,
/// pagination or caching.
///
/// # Object Safety
///
/// This trait uses `async_trait` so the returned futures are `Send` and the
/// trait stays object-safe.
#[async_trait]
pub trait ZoteroClient: Send + Sync {
    /// Lists top-level items. Consumes any parameters set with
    /// [`add_parameters`](Self::add_parameters).
    async fn top(&mut self, limit: u32) -> Result<Vec<Item>, ClientError>;

    /// Lists top-level collections, all of them when `limit` is `None`.
    async fn collections_top(&self, limit: Option<u32>) -> Result<Vec<Collection>, ClientError>;

    /// Sets the quick-search parameters for the next [`top`](Self::top) call.
    fn add_parameters(&mut self, q: &str, qmode: &str);

    /// Lists tags in the library.
    async fn tags(&self, limit: u32) -> Result<Vec<Tag>, ClientError>;

    /// Lists items in a collection.
    async fn collection_items(&self, key: &str, limit: u32) -> Result<Vec<Item>, ClientError>;

    /// Fetches one collection.
    async fn collection(&self, key: &str) -> Result<Collection, ClientError>;

    /// Fetches one item.
    async fn item(&self, key: &str) -> Result<Item, ClientError>;

    /// Fetches a blank item of the given type.
    async fn item_template(&self, item_type: &str) -> Result<ItemTemplate, ClientError>;

    /// Creates items in one batch request.
    async fn create_items(&self, items: Vec<ItemTemplate>) -> Result<CreateResponse, ClientError>;

    /// Replaces an item's data with `item.data`.
    async fn update_item(&self, item: &Item) -> Result<(), ClientError>;

    /// Moves an item to the trash.
    async fn delete_item(&self, item: &Item) -> Result<(), ClientError>;
}
