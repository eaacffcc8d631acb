//! Observable catalog state between `shopfront-api` and UI consumers.
//!
//! - **[`Catalog`]** — Facade owning the API client and the store. Each of
//!   the seven catalog intents is available as an `async fn` that awaits
//!   completion, or through [`Catalog::dispatch()`] which marks the store as
//!   loading immediately and finishes the call on a spawned tokio task.
//!
//! - **[`CatalogStore`]** — The single "product" slice. Holds a
//!   [`CatalogState`] snapshot in a `tokio::sync::watch` channel and mutates
//!   it only through [`Transition`]s applied by the pure [`reduce`] function.
//!
//! - **[`StateStream`]** — Subscription handle vended by the store, exposing
//!   `current()` / `latest()` / `changed()` or a `Stream` of snapshots.
//!
//! - **Domain model** ([`model`]) — `Product`, `Category`, `Brand` and the
//!   filter / sort / pagination specs, shared with the API crate.

pub mod catalog;
pub mod config;
pub mod error;
pub mod intent;
pub mod model;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use catalog::Catalog;
pub use config::{CatalogConfig, TlsVerification};
pub use error::CoreError;
pub use intent::{Fulfillment, Intent, IntentKind};
pub use store::{CatalogState, CatalogStore, IntentError, Status, Transition, reduce};
pub use stream::StateStream;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Brand, Category, NewProduct, Pagination, Product, ProductFilter, ProductId, ProductList,
    ProductPage, SortOrder, SortSpec,
};
