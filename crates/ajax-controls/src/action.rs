//! Action Wire Types
//!
//! Request and result bodies exchanged with the storefront endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::ActionError;

/// Body key used when an endpoint does not name its own
pub const DEFAULT_ID_KEY: &str = "itemId";

/// What a single gesture asks the server to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub item_id: String,
    pub quantity: Option<u32>,
}

impl ActionRequest {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            quantity: None,
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

/// A POST endpoint and the body key its handler reads the item id from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub path: String,
    #[serde(default = "default_id_key")]
    pub id_key: String,
}

fn default_id_key() -> String {
    DEFAULT_ID_KEY.to_string()
}

impl Endpoint {
    pub fn new(path: impl Into<String>, id_key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            id_key: id_key.into(),
        }
    }

    /// Endpoint that reads the item id from `itemId`
    pub fn at(path: impl Into<String>) -> Self {
        Self::new(path, DEFAULT_ID_KEY)
    }

    /// JSON body for `request`
    pub fn body(&self, request: &ActionRequest) -> Value {
        let mut body = Map::new();
        body.insert(self.id_key.clone(), Value::String(request.item_id.clone()));
        if let Some(quantity) = request.quantity {
            body.insert("quantity".to_string(), Value::from(quantity));
        }
        Value::Object(body)
    }
}

/// Server reply. Accepts both the camelCase names and the storefront backend's snake_case ones.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, alias = "cart_count")]
    pub updated_count: Option<u64>,
    #[serde(default, alias = "cart_total", deserialize_with = "text_or_number")]
    pub updated_total: Option<String>,
    #[serde(default, alias = "item_total", deserialize_with = "text_or_number")]
    pub item_total: Option<String>,
    /// Wishlist membership after a toggle
    #[serde(default)]
    pub added: Option<bool>,
}

/// Currency amounts arrive as strings from Django's `str(Decimal)`, sometimes as bare numbers.
fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

impl ActionResult {
    /// Parse a raw response body
    pub fn from_body(body: &str) -> Result<Self, ActionError> {
        serde_json::from_str(body).map_err(|e| ActionError::Malformed(e.to_string()))
    }

    /// Turn `success: false` into [`ActionError::Rejected`]
    pub fn accepted(self) -> Result<Self, ActionError> {
        if self.success {
            Ok(self)
        } else {
            Err(ActionError::Rejected(self.message))
        }
    }
}

/// Which value of an [`ActionResult`] a display target shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultField {
    Count,
    Total,
    ItemTotal,
}

impl ResultField {
    pub fn read(&self, result: &ActionResult) -> Option<String> {
        match self {
            ResultField::Count => result.updated_count.map(|count| count.to_string()),
            ResultField::Total => result.updated_total.clone(),
            ResultField::ItemTotal => result.item_total.clone(),
        }
    }
}
