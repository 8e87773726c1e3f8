use serde::Deserialize;

use super::Product;

/// Default page number for the collection endpoint.
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size for the collection endpoint.
pub const DEFAULT_LIMIT: u64 = 10;

/// Raw query string of `GET /api/products`.
///
/// Everything is kept as text so that bad `page`/`limit` values reach
/// validation instead of being rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Filters applied to the collection before pagination (AND semantics).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProductFilter {
    /// Lower-cased category; matched by case-insensitive equality
    category: Option<String>,
    /// Lower-cased search term; matched as a substring of the name
    search: Option<String>,
}

impl ProductFilter {
    /// Build a filter; empty strings mean "no filter".
    pub fn new(category: Option<&str>, search: Option<&str>) -> Self {
        let normalize = |s: Option<&str>| s.filter(|v| !v.is_empty()).map(str::to_lowercase);
        Self {
            category: normalize(category),
            search: normalize(search),
        }
    }

    pub fn from_query(query: &ListProductsQuery) -> Self {
        Self::new(query.category.as_deref(), query.search.as_deref())
    }

    /// Check whether a product passes every configured filter.
    pub fn matches(&self, product: &Product) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|c| product.category.to_lowercase() == *c);
        let search_ok = self
            .search
            .as_ref()
            .is_none_or(|s| product.name.to_lowercase().contains(s.as_str()));
        category_ok && search_ok
    }
}

/// A bounds-checked page request (1-indexed page, positive limit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Pagination {
    /// Create a page request. Returns `None` when `page` or `limit` is zero.
    pub fn new(page: u64, limit: u64) -> Option<Self> {
        (page >= 1 && limit >= 1).then_some(Self { page, limit })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of records to skip. Saturates instead of overflowing.
    pub fn offset(&self) -> usize {
        let offset = (self.page - 1).saturating_mul(self.limit);
        usize::try_from(offset).unwrap_or(usize::MAX)
    }

    /// Number of records to take.
    pub fn take(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(usize::MAX)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}
