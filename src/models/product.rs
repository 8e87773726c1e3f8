use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Number;
use uuid::Uuid;

/// Mapping from category name to the number of products in it.
pub type CategoryCounts = BTreeMap<String, usize>;

/// A product record as stored and returned by the API.
///
/// Field names are camelCase on the wire (`inStock`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server-generated identifier, unique within the store
    pub id: String,
    pub name: String,
    pub description: String,
    /// Kept as the JSON number the client sent so `500` stays `500`
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}

impl Product {
    /// Build a record from a validated payload with a freshly generated id.
    pub fn new(input: ProductInput) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), input)
    }

    /// Build a record from a validated payload with a caller-chosen id.
    pub fn with_id(id: impl Into<String>, input: ProductInput) -> Self {
        Self {
            id: id.into(),
            name: input.name,
            description: input.description,
            price: input.price,
            category: input.category,
            in_stock: input.in_stock,
        }
    }

    /// Merge every field of a validated payload into this record, keeping the id.
    pub fn merge(&mut self, input: ProductInput) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.category = input.category;
        self.in_stock = input.in_stock;
    }
}

/// A product payload that passed validation.
///
/// Never carries an id: identifiers are always assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Number,
    pub category: String,
    pub in_stock: bool,
}
