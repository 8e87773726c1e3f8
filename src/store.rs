//! In-memory product store.
//!
//! The store is a plain ordered `Vec` with no interior locking. It is owned
//! by [`AppState`](crate::state::AppState) behind a single `RwLock`, so a
//! mutation always runs to completion before another request sees the data.

use serde_json::Number;

use crate::models::{CategoryCounts, Pagination, Product, ProductFilter, ProductInput};

/// Ordered, in-memory collection of product records.
///
/// Invariant: no two records share an `id`.
#[derive(Debug, Default)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the single sample record served at first start.
    pub fn with_sample_data() -> Self {
        let mut store = Self::new();
        store.append(Product::with_id(
            "1",
            ProductInput {
                name: "Laptop".to_string(),
                description: "High-performance laptop".to_string(),
                price: Number::from(1000),
                category: "electronics".to_string(),
                in_stock: true,
            },
        ));
        store
    }

    /// Add a record at the end of the collection.
    ///
    /// Returns `false` and leaves the store untouched if the id is taken.
    pub fn append(&mut self, product: Product) -> bool {
        if self.find_by_id(&product.id).is_some() {
            return false;
        }
        self.products.push(product);
        true
    }

    /// Create a record with a freshly generated, unused id.
    pub fn create(&mut self, input: ProductInput) -> Product {
        loop {
            let product = Product::new(input.clone());
            if self.find_by_id(&product.id).is_none() {
                self.products.push(product.clone());
                return product;
            }
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Merge a validated payload into the record with `id`.
    ///
    /// Returns the merged record, or `None` if no record has that id.
    pub fn replace(&mut self, id: &str, input: ProductInput) -> Option<Product> {
        let product = self.products.iter_mut().find(|p| p.id == id)?;
        product.merge(input);
        Some(product.clone())
    }

    /// Remove the record with `id`, returning it, or `None` if absent.
    pub fn remove(&mut self, id: &str) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(index))
    }

    /// Every record, in insertion order.
    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Filter the collection, then cut out one page.
    pub fn query(&self, filter: &ProductFilter, page: Pagination) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(p))
            .skip(page.offset())
            .take(page.take())
            .cloned()
            .collect()
    }

    /// Count records per category (exact, case-sensitive category names).
    pub fn category_counts(&self) -> CategoryCounts {
        let mut counts = CategoryCounts::new();
        for product in &self.products {
            *counts.entry(product.category.clone()).or_insert(0) += 1;
        }
        counts
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn input(name: &str, category: &str) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: format!("{name} description"),
            price: Number::from(10),
            category: category.to_string(),
            in_stock: true,
        }
    }

    #[test]
    fn test_sample_data() {
        let store = ProductStore::with_sample_data();
        assert_eq!(store.len(), 1);
        let laptop = store.find_by_id("1").unwrap();
        assert_eq!(laptop.name, "Laptop");
        assert_eq!(laptop.category, "electronics");
    }

    #[test]
    fn test_create_appends_with_unique_id() {
        let mut store = ProductStore::with_sample_data();
        let a = store.create(input("Phone", "electronics"));
        let b = store.create(input("Phone", "electronics"));

        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 3);
        assert_eq!(store.list().last().unwrap().id, b.id);
        assert_eq!(store.find_by_id(&a.id), Some(&a));
    }

    #[test]
    fn test_append_rejects_duplicate_id() {
        let mut store = ProductStore::with_sample_data();
        assert!(!store.append(Product::with_id("1", input("Clone", "x"))));
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_id("1").unwrap().name, "Laptop");
    }

    #[test]
    fn test_replace_merges_fields() {
        let mut store = ProductStore::with_sample_data();
        let updated = store.replace("1", input("Ultrabook", "computers")).unwrap();

        assert_eq!(updated.id, "1");
        assert_eq!(updated.name, "Ultrabook");
        assert_eq!(store.find_by_id("1"), Some(&updated));
    }

    #[test]
    fn test_replace_missing() {
        let mut store = ProductStore::new();
        assert!(store.replace("nope", input("x", "y")).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove() {
        let mut store = ProductStore::with_sample_data();
        assert_eq!(store.remove("1").unwrap().name, "Laptop");
        assert!(store.remove("1").is_none());
        assert!(store.find_by_id("1").is_none());
    }

    #[test]
    fn test_query_filters_then_paginates() {
        let mut store = ProductStore::new();
        for i in 0..15 {
            store.create(input(&format!("Phone {i}"), "electronics"));
        }
        store.create(input("Novel", "books"));

        let filter = ProductFilter::new(Some("Electronics"), None);
        let first = store.query(&filter, Pagination::default());
        let second = store.query(&filter, Pagination::new(2, 10).unwrap());
        let beyond = store.query(&filter, Pagination::new(3, 10).unwrap());

        assert_eq!(first.len(), 10);
        assert_eq!(second.len(), 5);
        assert!(beyond.is_empty());
        assert_eq!(first.first().unwrap().name, "Phone 0");
        assert_eq!(second.first().unwrap().name, "Phone 10");
    }

    #[test]
    fn test_category_counts_sum_to_len() {
        let mut store = ProductStore::with_sample_data();
        store.create(input("Phone", "electronics"));
        store.create(input("Novel", "books"));
        store.create(input("Atlas", "Books"));

        let counts = store.category_counts();
        assert_eq!(counts.get("electronics"), Some(&2));
        assert_eq!(counts.get("books"), Some(&1));
        assert_eq!(counts.get("Books"), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), store.len());
    }
}
