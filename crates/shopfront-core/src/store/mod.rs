// ── Catalog store ──
//
// One owned snapshot, mutated only through reducer transitions and
// broadcast to subscribers via a `watch` channel.

mod catalog_store;
mod reducer;
mod state;

pub use catalog_store::CatalogStore;
pub use reducer::{Transition, reduce};
pub use state::{CatalogState, IntentError, Status};
