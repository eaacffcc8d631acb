// shopfront-api: Async Rust client for the storefront catalog REST API.

pub mod client;
pub mod error;
pub mod models;
pub mod products;
pub mod taxonomy;
pub mod transport;

pub use client::CatalogClient;
pub use error::Error;
pub use models::{
    Brand, Category, NewProduct, Pagination, Product, ProductFilter, ProductId, ProductList,
    ProductPage, SortOrder, SortSpec,
};
pub use transport::{TlsMode, TransportConfig};
