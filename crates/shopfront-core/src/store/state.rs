use serde::Serialize;

use crate::intent::IntentKind;
use crate::model::{Brand, Category, Product};

/// Request status of the catalog slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    /// At least one intent is outstanding.
    Loading,
    /// The last intent to settle was rejected and nothing else is in flight.
    Failed,
}

/// The most recent rejection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentError {
    pub intent: IntentKind,
    pub message: String,
}

/// Snapshot of the "product" slice.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub status: Status,
    /// Match count reported by the last filtered fetch.
    pub total_items: u64,
    pub selected_product: Option<Product>,
    pub error: Option<IntentError>,
    #[serde(skip)]
    pub(crate) in_flight: usize,
}

impl CatalogState {
    /// Intents started and not yet settled.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }
}
