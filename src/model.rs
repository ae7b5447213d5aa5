//! Zotero Web API entities.
//!
//! The façade only reads a handful of fields from these types, but items are
//! pushed back to the server whole after a tag edit, so every type keeps the
//! fields it does not model in a flattened `extra` map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A mutable blank item shape as returned by the template endpoint.
pub type ItemTemplate = Map<String, Value>;

/// A library item (book, journal article, note, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable item key.
    pub key: String,
    /// Library version at which the item was last modified.
    #[serde(default)]
    pub version: u64,
    /// Editable item fields.
    pub data: ItemData,
    /// Links, meta, library and other read-only envelope fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Item {
    /// Returns the item title, if the item type has one. An empty title is
    /// still a title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.data.title.as_deref()
    }
}

/// The editable `data` object of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    pub key: String,
    #[serde(default)]
    pub version: u64,
    pub item_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A collection (folder) in the library hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub key: String,
    #[serde(default)]
    pub version: u64,
    pub data: CollectionData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<CollectionMeta>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Collection {
    /// Display name of the collection.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Number of items in the collection.
    ///
    /// Read from `data.numItems` when present, otherwise from `meta.numItems`
    /// (where the live API reports it).
    #[must_use]
    pub fn num_items(&self) -> u64 {
        self.data
            .num_items
            .or_else(|| self.meta.as_ref().and_then(|meta| meta.num_items))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionData {
    pub key: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_items: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_items: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A tag as attached to an item or listed by the tags endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub tag: String,
    /// 0 for manual tags, 1 for automatic ones. Omitted on manual tags.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<u8>,
}

impl Tag {
    /// Creates a manual tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            kind: None,
        }
    }
}

/// Response body of a multi-object write.
///
/// Keys of every map are positional indexes (as strings) into the submitted
/// batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateResponse {
    /// Index to newly assigned item key.
    #[serde(default)]
    pub success: BTreeMap<String, String>,
    /// Index to full created object.
    #[serde(default)]
    pub successful: BTreeMap<String, Value>,
    #[serde(default)]
    pub unchanged: BTreeMap<String, Value>,
    /// Index to failure detail (`{"key", "code", "message"}`).
    #[serde(default)]
    pub failed: BTreeMap<String, Value>,
}
