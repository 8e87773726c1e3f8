pub mod products;
mod root;

pub use products::{
    category_count, create_product, delete_product, get_product, list_products, update_product,
};
pub use root::{WELCOME_MESSAGE, method_not_allowed, route_not_found, welcome};
