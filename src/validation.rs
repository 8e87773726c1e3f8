use serde_json::Value;

use crate::error::{AppError, AppResult, INVALID_PAGINATION};
use crate::models::{DEFAULT_LIMIT, DEFAULT_PAGE, ListProductsQuery, Pagination, ProductInput};

// =============================================================================
// Product Payload
// =============================================================================

/// Validate a product payload and extract its fields.
///
/// Rules:
/// - `name`, `description`, `category` must be non-empty strings
/// - `price` must be a JSON number
/// - `inStock` must be a JSON boolean
///
/// Every failure maps to the same generic validation error; the offending
/// field is not reported. Unknown keys (including `id`) are ignored.
pub fn validate_product(payload: &Value) -> AppResult<ProductInput> {
    let name = required_string(payload, "name")?;
    let description = required_string(payload, "description")?;

    let price = match payload.get("price") {
        Some(Value::Number(n)) => n.clone(),
        _ => return Err(AppError::invalid_product()),
    };

    let category = required_string(payload, "category")?;

    let in_stock = payload
        .get("inStock")
        .and_then(Value::as_bool)
        .ok_or_else(AppError::invalid_product)?;

    Ok(ProductInput {
        name,
        description,
        price,
        category,
        in_stock,
    })
}

fn required_string(payload: &Value, field: &str) -> AppResult<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(AppError::invalid_product)
}

// =============================================================================
// Pagination
// =============================================================================

/// Parse and bounds-check `page`/`limit` from the collection query string.
///
/// Missing or empty values take the defaults (page 1, limit 10). Present
/// values must be positive integers and `limit` may not exceed `max_limit`.
pub fn parse_pagination(query: &ListProductsQuery, max_limit: u64) -> AppResult<Pagination> {
    let page = parse_positive(query.page.as_deref(), DEFAULT_PAGE)?;
    let limit = parse_positive(query.limit.as_deref(), DEFAULT_LIMIT)?;

    if limit > max_limit {
        return Err(invalid_pagination());
    }

    Pagination::new(page, limit).ok_or_else(invalid_pagination)
}

fn parse_positive(raw: Option<&str>, default: u64) -> AppResult<u64> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default),
        Some(s) => s
            .parse::<u64>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(invalid_pagination),
    }
}

fn invalid_pagination() -> AppError {
    AppError::Validation(INVALID_PAGINATION.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid() -> Value {
        json!({
            "name": "Phone",
            "description": "d",
            "price": 500,
            "category": "electronics",
            "inStock": true
        })
    }

    fn assert_invalid(payload: Value) {
        let err = validate_product(&payload).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == "Invalid product data"));
    }

    #[test]
    fn test_valid_payload() {
        let input = validate_product(&valid()).unwrap();
        assert_eq!(input.name, "Phone");
        assert_eq!(input.price.as_i64(), Some(500));
        assert!(input.in_stock);
    }

    #[test]
    fn test_fractional_and_negative_prices_accepted() {
        let mut payload = valid();
        payload["price"] = json!(-12.5);
        assert!(validate_product(&payload).is_ok());
    }

    #[test]
    fn test_id_in_payload_is_ignored() {
        let mut payload = valid();
        payload["id"] = json!("attacker-chosen");
        assert!(validate_product(&payload).is_ok());
    }

    #[test]
    fn test_missing_fields() {
        for field in ["name", "description", "price", "category", "inStock"] {
            let mut payload = valid();
            payload.as_object_mut().unwrap().remove(field);
            assert_invalid(payload);
        }
    }

    #[test]
    fn test_empty_strings() {
        for field in ["name", "description", "category"] {
            let mut payload = valid();
            payload[field] = json!("");
            assert_invalid(payload);
        }
    }

    #[test]
    fn test_wrong_types() {
        let mut payload = valid();
        payload["price"] = json!("500");
        assert_invalid(payload);

        let mut payload = valid();
        payload["inStock"] = json!("true");
        assert_invalid(payload);

        let mut payload = valid();
        payload["name"] = json!(42);
        assert_invalid(payload);
    }

    #[test]
    fn test_non_object_payloads() {
        assert_invalid(json!(null));
        assert_invalid(json!([]));
        assert_invalid(json!("Phone"));
    }

    fn query(page: Option<&str>, limit: Option<&str>) -> ListProductsQuery {
        ListProductsQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_pagination_defaults() {
        let p = parse_pagination(&query(None, None), 100).unwrap();
        assert_eq!((p.page(), p.limit()), (1, 10));

        let p = parse_pagination(&query(Some(""), Some(" ")), 100).unwrap();
        assert_eq!((p.page(), p.limit()), (1, 10));
    }

    #[test]
    fn test_pagination_explicit_values() {
        let p = parse_pagination(&query(Some("2"), Some("25")), 100).unwrap();
        assert_eq!((p.page(), p.limit()), (2, 25));
    }

    #[test]
    fn test_pagination_rejects_bad_values() {
        for (page, limit) in [
            (Some("0"), None),
            (Some("-1"), None),
            (Some("abc"), None),
            (None, Some("0")),
            (None, Some("1.5")),
            (None, Some("101")),
        ] {
            let err = parse_pagination(&query(page, limit), 100).unwrap_err();
            assert!(err.to_string().contains("Invalid pagination parameters"));
        }
    }
}
