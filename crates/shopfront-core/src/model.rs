// ── Catalog domain model ──
//
// The storefront API speaks the same shapes the store keeps, so the wire
// types are the domain types. Re-exported here so consumers depend on
// `shopfront-core` alone.

pub use shopfront_api::models::{
    Brand, Category, DEFAULT_PAGE_SIZE, NewProduct, Pagination, Product, ProductFilter, ProductId,
    ProductList, ProductPage, SortOrder, SortSpec,
};
