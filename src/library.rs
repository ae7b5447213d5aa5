//! Read/write operation façade over a Zotero client.
//!
//! [`Library`] exposes the fixed set of walkthrough operations. Each one
//! issues the documented client call(s) and hands back the client's response
//! unmodified, except creation, which picks the new key out of the success
//! map. Remote failures propagate as [`ClientError`] untouched. Nothing in
//! here prints or prompts.
//!
//! # Tag update race
//!
//! [`Library::add_example_tag`] is a plain read-modify-write: it re-fetches
//! the item, appends one tag and pushes the whole item back. There is no
//! compare-and-swap, so a concurrent writer can overwrite the change (or have
//! its own change overwritten).

use std::collections::BTreeMap;

use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::client::{ClientError, ZoteroClient, ZoteroHttpClient};
use crate::config::LibraryConfig;
use crate::model::{Collection, Item, Tag};

/// Number of items returned by [`Library::recent_items`].
pub const RECENT_ITEMS_LIMIT: u32 = 5;
/// Number of items returned by [`Library::search`].
pub const SEARCH_LIMIT: u32 = 10;
/// Number of tags returned by [`Library::tags`].
pub const TAGS_LIMIT: u32 = 10;
/// Number of items returned by [`Library::collection_items`].
pub const COLLECTION_ITEMS_LIMIT: u32 = 5;

/// Search term used when none is given.
pub const DEFAULT_SEARCH_TERM: &str = "medicine";
/// Quick-search mode matching title, creator and year.
pub const SEARCH_QMODE: &str = "titleCreatorYear";

/// Tag appended by [`Library::add_example_tag`].
pub const EXAMPLE_TAG: &str = "pyzotero-voorbeeld";
/// Item type of the example item.
pub const EXAMPLE_ITEM_TYPE: &str = "book";
pub const EXAMPLE_TITLE: &str = "Voorbeeld Boek via Pyzotero";
pub const EXAMPLE_AUTHOR_FIRST_NAME: &str = "Jan";
pub const EXAMPLE_AUTHOR_LAST_NAME: &str = "Jansen";
pub const EXAMPLE_DATE: &str = "2025";
pub const EXAMPLE_ABSTRACT: &str = "Dit item is aangemaakt via het pyzotero voorbeeld-script.";

/// Items of one collection together with the collection they came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionListing {
    /// The resolved collection; `None` when the library has no collections.
    pub collection: Option<Collection>,
    pub items: Vec<Item>,
}

impl CollectionListing {
    /// Display name of the resolved collection.
    #[must_use]
    pub fn collection_name(&self) -> Option<&str> {
        self.collection.as_ref().map(Collection::name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of [`Library::create_example_item`].
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    /// The server assigned a key to the new item.
    Created { key: String },
    /// Nothing was created; `failed` holds the server's failure map.
    Failed { failed: BTreeMap<String, Value> },
}

impl CreateOutcome {
    /// The new item key, if creation succeeded.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Created { key } => Some(key),
            Self::Failed { .. } => None,
        }
    }
}

/// The walkthrough façade, generic over the client it delegates to.
#[derive(Debug)]
pub struct Library<C> {
    client: C,
}

impl Library<ZoteroHttpClient> {
    /// Connects to the Zotero Web API with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the HTTP client cannot be built.
    pub fn connect(config: LibraryConfig) -> Result<Self, ClientError> {
        Ok(Self::new(ZoteroHttpClient::new(config)?))
    }
}

impl<C: ZoteroClient> Library<C> {
    /// Wraps an existing client.
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// The wrapped client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Unwraps the façade, returning the client.
    pub fn into_client(self) -> C {
        self.client
    }

    /// Fetches the most recent top-level items.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged.
    pub async fn recent_items(&mut self) -> Result<Vec<Item>, ClientError> {
        debug!(limit = RECENT_ITEMS_LIMIT, "Fetching recent items");
        self.client.top(RECENT_ITEMS_LIMIT).await
    }

    /// Lists every top-level collection.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged.
    pub async fn top_collections(&self) -> Result<Vec<Collection>, ClientError> {
        debug!("Listing top-level collections");
        self.client.collections_top(None).await
    }

    /// Quick-searches top-level items by title, creator and year.
    ///
    /// The term is passed through unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged.
    pub async fn search(&mut self, term: &str) -> Result<Vec<Item>, ClientError> {
        debug!(term, "Searching items");
        self.client.add_parameters(term, SEARCH_QMODE);
        self.client.top(SEARCH_LIMIT).await
    }

    /// Lists the library's tags.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged.
    pub async fn tags(&self) -> Result<Vec<Tag>, ClientError> {
        debug!(limit = TAGS_LIMIT, "Listing tags");
        self.client.tags(TAGS_LIMIT).await
    }

    /// Lists items of a collection.
    ///
    /// Without a key (or with an empty one) the first top-level collection is
    /// used. A library with no collections yields an empty listing and no
    /// item request is made.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged.
    pub async fn collection_items(
        &self,
        collection_key: Option<&str>,
    ) -> Result<CollectionListing, ClientError> {
        let key = match collection_key.filter(|key| !key.is_empty()) {
            Some(key) => key.to_string(),
            None => {
                let first = self.client.collections_top(Some(1)).await?;
                let Some(first) = first.into_iter().next() else {
                    debug!("Library has no collections");
                    return Ok(CollectionListing::default());
                };
                first.data.key
            }
        };

        debug!(collection = %key, limit = COLLECTION_ITEMS_LIMIT, "Listing collection items");
        let items = self
            .client
            .collection_items(&key, COLLECTION_ITEMS_LIMIT)
            .await?;
        let collection = self.client.collection(&key).await?;

        Ok(CollectionListing {
            collection: Some(collection),
            items,
        })
    }

    /// Creates one example book item.
    ///
    /// An empty success map (or one without index `"0"`) counts as total
    /// failure; partial success is not considered since the batch holds a
    /// single item.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged. A creation rejected by the
    /// server is not an error; it is reported as [`CreateOutcome::Failed`].
    pub async fn create_example_item(&self) -> Result<CreateOutcome, ClientError> {
        let mut template = self.client.item_template(EXAMPLE_ITEM_TYPE).await?;
        template.insert("title".to_string(), json!(EXAMPLE_TITLE));
        template.insert(
            "creators".to_string(),
            json!([{
                "creatorType": "author",
                "firstName": EXAMPLE_AUTHOR_FIRST_NAME,
                "lastName": EXAMPLE_AUTHOR_LAST_NAME,
            }]),
        );
        template.insert("date".to_string(), json!(EXAMPLE_DATE));
        template.insert("abstractNote".to_string(), json!(EXAMPLE_ABSTRACT));

        let mut response = self.client.create_items(vec![template]).await?;

        match response.success.remove("0") {
            Some(key) => {
                info!(%key, "Example item created");
                Ok(CreateOutcome::Created { key })
            }
            None => {
                warn!(failed = ?response.failed, "Example item was not created");
                Ok(CreateOutcome::Failed {
                    failed: response.failed,
                })
            }
        }
    }

    /// Appends [`EXAMPLE_TAG`] to an item's tags and pushes the item back.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged.
    pub async fn add_example_tag(&self, item_key: &str) -> Result<(), ClientError> {
        let mut item = self.client.item(item_key).await?;
        item.data.tags.push(Tag::new(EXAMPLE_TAG));
        self.client.update_item(&item).await?;
        info!(key = item_key, tag = EXAMPLE_TAG, "Tag added");
        Ok(())
    }

    /// Moves an item to the trash.
    ///
    /// # Errors
    ///
    /// Propagates the client's error unchanged.
    pub async fn delete_item(&self, item_key: &str) -> Result<(), ClientError> {
        let item = self.client.item(item_key).await?;
        self.client.delete_item(&item).await?;
        info!(key = item_key, "Item moved to trash");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_outcome_key() {
        let created = CreateOutcome::Created {
            key: "NEW123".to_string(),
        };
        assert_eq!(created.key(), Some("NEW123"));

        let failed = CreateOutcome::Failed {
            failed: BTreeMap::new(),
        };
        assert_eq!(failed.key(), None);
    }

    #[test]
    fn test_empty_listing_has_no_name() {
        let listing = CollectionListing::default();
        assert!(listing.is_empty());
        assert_eq!(listing.collection_name(), None);
    }
}
