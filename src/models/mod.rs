mod product;
mod query;

pub use product::{CategoryCounts, Product, ProductInput};
pub use query::{DEFAULT_LIMIT, DEFAULT_PAGE, ListProductsQuery, Pagination, ProductFilter};
