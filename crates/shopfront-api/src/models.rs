//! Wire types for the storefront catalog API.
//!
//! Field names follow the backend's camelCase JSON. Every entity keeps an
//! `extra` map so fields we don't model survive a read-modify-write cycle.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Page size used when a caller asks for a page without naming a limit.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ── ProductId ───────────────────────────────────────────────────────

/// Product identifier.
///
/// json-server hands out numeric ids for seeded data and string ids for
/// records created through the API, so both shapes are accepted. Two ids are
/// equal when their string forms are, so `7` equals `"7"` but not `"07"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Numeric(u64),
    Text(String),
}

impl ProductId {
    /// The numeric value of this id, if its string form is a plain
    /// decimal number (no sign, no leading zeros).
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Numeric(n) => Some(*n),
            Self::Text(s) => canonical_number(s),
        }
    }
}

fn canonical_number(s: &str) -> Option<u64> {
    s.parse::<u64>().ok().filter(|n| n.to_string() == s)
}

impl PartialEq for ProductId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Numeric(n), Self::Text(s)) | (Self::Text(s), Self::Numeric(n)) => {
                canonical_number(s) == Some(*n)
            }
        }
    }
}

impl Eq for ProductId {}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl FromStr for ProductId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<u64> for ProductId {
    fn from(n: u64) -> Self {
        Self::Numeric(n)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        match canonical_number(&s) {
            Some(n) => Self::Numeric(n),
            None => Self::Text(s),
        }
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self::from(s.to_owned())
    }
}

// ── Products ────────────────────────────────────────────────────────

/// A catalog product — from `GET /products` and `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Soft-delete marker used by the admin screens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    /// Catch-all for additional fields not modeled above.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Product {
    /// Price after applying `discount_percentage`, rounded to cents.
    pub fn discounted_price(&self) -> f64 {
        let discounted = self.price * (1.0 - self.discount_percentage / 100.0);
        (discounted * 100.0).round() / 100.0
    }
}

/// Create payload — a product without an id (the server assigns one).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Result of an unfiltered product fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductList {
    pub products: Vec<Product>,
}

/// Result of a filtered / paginated product fetch.
///
/// `total_items` is the server-side match count, independent of how many
/// products this page carries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total_items: u64,
}

// ── Categories & brands ─────────────────────────────────────────────

/// Product category — from `GET /categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Machine name, matched against `Product::category`.
    pub value: String,
    /// Display name.
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Product brand — from `GET /brands`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    /// Machine name, matched against `Product::brand`.
    pub value: String,
    /// Display name.
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

// ── Query specs ─────────────────────────────────────────────────────

/// Multi-valued category / brand selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub brand: Vec<String>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_empty() && self.brand.is_empty()
    }

    /// Query pairs, repeating the key for each selected value.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.category
            .iter()
            .map(|c| ("category", c.clone()))
            .chain(self.brand.iter().map(|b| ("brand", b.clone())))
            .collect()
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort key and direction (`_sort` / `_order`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("_sort", self.field.clone()),
            ("_order", self.order.as_str().to_owned()),
        ]
    }
}

/// 1-based page selection (`_page` / `_limit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Pagination {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("_page", self.page.to_string()),
            ("_limit", self.limit.to_string()),
        ]
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_id_accepts_numbers_and_strings() {
        let n: ProductId = serde_json::from_value(json!(7)).unwrap();
        let s: ProductId = serde_json::from_value(json!("a1b2")).unwrap();
        assert_eq!(n, ProductId::Numeric(7));
        assert_eq!(s, ProductId::Text("a1b2".into()));
    }

    #[test]
    fn numeric_and_decimal_string_ids_are_equal() {
        assert_eq!(ProductId::Numeric(7), ProductId::Text("7".into()));
        assert_ne!(ProductId::Numeric(7), ProductId::Text("x7".into()));
    }

    #[test]
    fn padded_numeric_strings_are_distinct_ids() {
        let seven = ProductId::Text("7".into());
        let padded = ProductId::Text("07".into());
        assert_eq!(seven, ProductId::Numeric(7));
        assert_ne!(padded, ProductId::Numeric(7));
        assert_ne!(seven, padded);
        assert_eq!(padded.as_number(), None);
        assert_eq!(ProductId::Text("+7".into()).as_number(), None);
    }

    #[test]
    fn product_id_from_str_prefers_numbers() {
        let id: ProductId = "42".parse().unwrap();
        assert!(matches!(id, ProductId::Numeric(42)));
        let id: ProductId = "abc".parse().unwrap();
        assert_eq!(id.to_string(), "abc");
        let id: ProductId = "007".parse().unwrap();
        assert!(matches!(id, ProductId::Text(ref s) if s == "007"));
    }

    #[test]
    fn sparse_product_fills_defaults_and_keeps_extra() {
        let product: Product = serde_json::from_value(json!({
            "id": 7,
            "name": "X",
            "discountPercentage": 12.5
        }))
        .unwrap();
        assert_eq!(product.id, ProductId::Numeric(7));
        assert!(product.title.is_empty());
        assert!((product.discount_percentage - 12.5).abs() < f64::EPSILON);
        assert_eq!(product.extra.get("name"), Some(&json!("X")));
    }

    #[test]
    fn product_serializes_camel_case_without_deleted() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "title": "Phone",
            "discountPercentage": 10.0
        }))
        .unwrap();
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["discountPercentage"], json!(10.0));
        assert!(value.get("deleted").is_none());
    }

    #[test]
    fn discounted_price_rounds_to_cents() {
        let product: Product = serde_json::from_value(json!({
            "id": 1,
            "price": 549,
            "discountPercentage": 12.96
        }))
        .unwrap();
        assert!((product.discounted_price() - 477.85).abs() < 1e-9);
    }

    #[test]
    fn filter_repeats_keys_per_value() {
        let filter = ProductFilter {
            category: vec!["smartphones".into(), "laptops".into()],
            brand: vec!["Apple".into()],
        };
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("category", "smartphones".to_owned()),
                ("category", "laptops".to_owned()),
                ("brand", "Apple".to_owned()),
            ]
        );
    }

    #[test]
    fn default_pagination_is_first_page() {
        let p = Pagination::default();
        assert_eq!(p.page, 1);
        assert_eq!(p.limit, DEFAULT_PAGE_SIZE);
    }
}
