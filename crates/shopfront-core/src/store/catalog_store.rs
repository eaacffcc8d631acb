// ── Catalog store ──
//
// Owns the single `CatalogState` snapshot. Transitions are applied with
// `watch::Sender::send_modify`, so every subscriber observes whole
// snapshots and never a half-applied merge.

use tokio::sync::watch;
use tracing::{debug, warn};

use super::reducer::{Transition, reduce};
use super::state::{CatalogState, IntentError, Status};
use crate::model::{Brand, Category, Product};
use crate::stream::StateStream;

/// Observable store for the "product" slice.
pub struct CatalogStore {
    state: watch::Sender<CatalogState>,
}

impl CatalogStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(CatalogState::default());
        Self { state }
    }

    /// Apply one transition to the snapshot and notify subscribers.
    pub fn apply(&self, transition: Transition) {
        match &transition {
            Transition::Pending(kind) => debug!(intent = %kind, "pending"),
            Transition::Fulfilled(f) => debug!(intent = %f.kind(), "fulfilled"),
            Transition::Rejected { intent, message } => {
                warn!(intent = %intent, error = %message, "rejected");
            }
            Transition::ClearSelectedProduct | Transition::ClearError => {}
        }
        self.state.send_modify(|state| reduce(state, transition));
    }

    /// Read the snapshot through a closure without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&CatalogState) -> R) -> R {
        f(&self.state.borrow())
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn snapshot(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    pub fn all_products(&self) -> Vec<Product> {
        self.read(|s| s.products.clone())
    }

    pub fn total_items(&self) -> u64 {
        self.read(|s| s.total_items)
    }

    pub fn brands(&self) -> Vec<Brand> {
        self.read(|s| s.brands.clone())
    }

    pub fn categories(&self) -> Vec<Category> {
        self.read(|s| s.categories.clone())
    }

    pub fn selected_product(&self) -> Option<Product> {
        self.read(|s| s.selected_product.clone())
    }

    pub fn status(&self) -> Status {
        self.read(|s| s.status)
    }

    pub fn error(&self) -> Option<IntentError> {
        self.read(|s| s.error.clone())
    }

    // ── Synchronous actions ──────────────────────────────────────────

    pub fn clear_selected_product(&self) {
        self.apply(Transition::ClearSelectedProduct);
    }

    pub fn clear_error(&self) {
        self.apply(Transition::ClearError);
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.state.subscribe())
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
