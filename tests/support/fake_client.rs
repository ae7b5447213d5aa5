//! Recording in-memory [`ZoteroClient`] with the fixture library used across tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use zotero_examples_core::{
    ClientError, Collection, CreateResponse, Item, ItemTemplate, Tag, ZoteroClient,
};

/// One recorded client call with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Top { limit: u32 },
    CollectionsTop { limit: Option<u32> },
    AddParameters { q: String, qmode: String },
    Tags { limit: u32 },
    CollectionItems { key: String, limit: u32 },
    Collection { key: String },
    Item { key: String },
    ItemTemplate { item_type: String },
    CreateItems { items: Vec<ItemTemplate> },
    UpdateItem { item: Item },
    DeleteItem { item: Item },
}

/// Fake client answering from fixed data and recording every call.
#[derive(Debug)]
pub struct FakeClient {
    pub items: Vec<Item>,
    pub collections: Vec<Collection>,
    pub tags: Vec<Tag>,
    pub template: ItemTemplate,
    pub create_response: CreateResponse,
    calls: Mutex<Vec<Call>>,
}

impl FakeClient {
    /// Two items, one collection, two tags and a successful creation.
    pub fn with_fixtures() -> Self {
        Self {
            items: fake_items(),
            collections: fake_collections(),
            tags: vec![Tag::new("machine-learning"), Tag::new("python")],
            template: fake_template(),
            create_response: fake_create_success(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Same fixtures, but the library has no collections.
    pub fn without_collections() -> Self {
        Self {
            collections: Vec::new(),
            ..Self::with_fixtures()
        }
    }

    /// Same fixtures, but creation is rejected by the server.
    pub fn with_failed_creation() -> Self {
        let mut failed = BTreeMap::new();
        failed.insert(
            "0".to_string(),
            json!({"key": "", "code": 400, "message": "Invalid itemType 'boek'"}),
        );
        Self {
            create_response: CreateResponse {
                failed,
                ..CreateResponse::default()
            },
            ..Self::with_fixtures()
        }
    }

    /// Same fixtures, answering creation with the given response.
    pub fn with_create_response(create_response: CreateResponse) -> Self {
        Self {
            create_response,
            ..Self::with_fixtures()
        }
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn find_item(&self, key: &str) -> Result<Item, ClientError> {
        self.items
            .iter()
            .find(|item| item.key == key)
            .cloned()
            .ok_or_else(|| ClientError::http_status(&format!("/users/12345/items/{key}"), 404, ""))
    }
}

#[async_trait]
impl ZoteroClient for FakeClient {
    async fn top(&mut self, limit: u32) -> Result<Vec<Item>, ClientError> {
        self.record(Call::Top { limit });
        Ok(self.items.clone())
    }

    async fn collections_top(&self, limit: Option<u32>) -> Result<Vec<Collection>, ClientError> {
        self.record(Call::CollectionsTop { limit });
        let take = limit.map_or(usize::MAX, |limit| limit as usize);
        Ok(self.collections.iter().take(take).cloned().collect())
    }

    fn add_parameters(&mut self, q: &str, qmode: &str) {
        self.record(Call::AddParameters {
            q: q.to_string(),
            qmode: qmode.to_string(),
        });
    }

    async fn tags(&self, limit: u32) -> Result<Vec<Tag>, ClientError> {
        self.record(Call::Tags { limit });
        Ok(self.tags.clone())
    }

    async fn collection_items(&self, key: &str, limit: u32) -> Result<Vec<Item>, ClientError> {
        self.record(Call::CollectionItems {
            key: key.to_string(),
            limit,
        });
        Ok(self.items.clone())
    }

    async fn collection(&self, key: &str) -> Result<Collection, ClientError> {
        self.record(Call::Collection {
            key: key.to_string(),
        });
        self.collections
            .iter()
            .find(|collection| collection.key == key)
            .cloned()
            .ok_or_else(|| {
                ClientError::http_status(&format!("/users/12345/collections/{key}"), 404, "")
            })
    }

    async fn item(&self, key: &str) -> Result<Item, ClientError> {
        self.record(Call::Item {
            key: key.to_string(),
        });
        self.find_item(key)
    }

    async fn item_template(&self, item_type: &str) -> Result<ItemTemplate, ClientError> {
        self.record(Call::ItemTemplate {
            item_type: item_type.to_string(),
        });
        Ok(self.template.clone())
    }

    async fn create_items(&self, items: Vec<ItemTemplate>) -> Result<CreateResponse, ClientError> {
        self.record(Call::CreateItems { items });
        Ok(self.create_response.clone())
    }

    async fn update_item(&self, item: &Item) -> Result<(), ClientError> {
        self.record(Call::UpdateItem { item: item.clone() });
        Ok(())
    }

    async fn delete_item(&self, item: &Item) -> Result<(), ClientError> {
        self.record(Call::DeleteItem { item: item.clone() });
        Ok(())
    }
}

pub fn fake_items() -> Vec<Item> {
    serde_json::from_value(json!([
        {
            "key": "ABC123",
            "version": 1,
            "data": {
                "key": "ABC123",
                "itemType": "journalArticle",
                "title": "Test Article One",
                "tags": [],
                "version": 1
            }
        },
        {
            "key": "DEF456",
            "version": 2,
            "data": {
                "key": "DEF456",
                "itemType": "book",
                "title": "Test Book Two",
                "tags": [{"tag": "existing"}],
                "version": 2
            }
        },
        {
            "key": "NEW123",
            "version": 3,
            "data": {
                "key": "NEW123",
                "itemType": "book",
                "title": "Voorbeeld Boek via Pyzotero",
                "tags": [],
                "version": 3
            }
        }
    ]))
    .unwrap()
}

pub fn fake_collections() -> Vec<Collection> {
    serde_json::from_value(json!([
        {
            "key": "COL001",
            "data": {"key": "COL001", "name": "Mijn Collectie", "numItems": 5}
        }
    ]))
    .unwrap()
}

pub fn fake_template() -> ItemTemplate {
    json!({
        "itemType": "book",
        "title": "",
        "creators": [{"creatorType": "author", "firstName": "", "lastName": ""}],
        "date": "",
        "abstractNote": "",
        "tags": []
    })
    .as_object()
    .unwrap()
    .clone()
}

pub fn fake_create_success() -> CreateResponse {
    serde_json::from_value(json!({
        "success": {"0": "NEW123"},
        "successful": {"0": {"key": "NEW123"}},
        "failed": {},
        "unchanged": {}
    }))
    .unwrap()
}
