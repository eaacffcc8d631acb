// ── Reducer ──
//
// Pure state transitions. Every mutation of `CatalogState` goes through
// `reduce`, which the store applies inside a single `send_modify`.

use tracing::warn;

use super::state::{CatalogState, IntentError, Status};
use crate::intent::{Fulfillment, IntentKind};

/// One reducer step.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// An intent has started.
    Pending(IntentKind),
    /// An intent finished with a result to merge.
    Fulfilled(Fulfillment),
    /// An intent failed; data is left untouched.
    Rejected { intent: IntentKind, message: String },
    ClearSelectedProduct,
    ClearError,
}

/// Apply `transition` to `state`.
pub fn reduce(state: &mut CatalogState, transition: Transition) {
    match transition {
        Transition::Pending(_) => {
            state.in_flight += 1;
            state.status = Status::Loading;
        }
        Transition::Fulfilled(fulfillment) => {
            state.in_flight = state.in_flight.saturating_sub(1);
            merge(state, fulfillment);
            state.error = None;
            if state.in_flight == 0 {
                state.status = Status::Idle;
            }
        }
        Transition::Rejected { intent, message } => {
            state.in_flight = state.in_flight.saturating_sub(1);
            state.error = Some(IntentError { intent, message });
            if state.in_flight == 0 {
                state.status = Status::Failed;
            }
        }
        Transition::ClearSelectedProduct => {
            state.selected_product = None;
        }
        Transition::ClearError => {
            state.error = None;
            if state.status == Status::Failed {
                state.status = Status::Idle;
            }
        }
    }
}

fn merge(state: &mut CatalogState, fulfillment: Fulfillment) {
    match fulfillment {
        Fulfillment::AllProducts(list) => {
            state.products = list.products;
        }
        Fulfillment::FilteredProducts(page) => {
            state.products = page.products;
            state.total_items = page.total_items;
        }
        Fulfillment::Categories(categories) => {
            state.categories = categories;
        }
        Fulfillment::Brands(brands) => {
            state.brands = brands;
        }
        Fulfillment::ProductById(product) => {
            state.selected_product = Some(product);
        }
        Fulfillment::ProductCreated(product) => {
            state.products.push(product);
        }
        Fulfillment::ProductUpdated(product) => {
            match state.products.iter_mut().find(|p| p.id == product.id) {
                Some(slot) => *slot = product.clone(),
                None => warn!(id = %product.id, "updated product is not in the loaded list"),
            }
            state.selected_product = Some(product);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{Brand, Category, Product, ProductId, ProductList, ProductPage};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn product(id: u64, title: &str) -> Product {
        serde_json::from_value(json!({ "id": id, "title": title })).unwrap()
    }

    fn loaded(products: Vec<Product>) -> CatalogState {
        CatalogState {
            products,
            ..CatalogState::default()
        }
    }

    fn fulfill(state: &mut CatalogState, fulfillment: Fulfillment) {
        reduce(state, Transition::Pending(fulfillment.kind()));
        reduce(state, Transition::Fulfilled(fulfillment));
    }

    #[test]
    fn initial_state_is_empty_and_idle() {
        let state = CatalogState::default();
        assert!(state.products.is_empty());
        assert!(state.categories.is_empty());
        assert!(state.brands.is_empty());
        assert_eq!(state.status, Status::Idle);
        assert_eq!(state.total_items, 0);
        assert!(state.selected_product.is_none());
        assert!(state.error.is_none());
        assert_eq!(state.in_flight(), 0);
    }

    #[test]
    fn pending_sets_loading() {
        let mut state = CatalogState::default();
        reduce(&mut state, Transition::Pending(IntentKind::LoadBrands));
        assert_eq!(state.status, Status::Loading);
        assert_eq!(state.in_flight(), 1);
    }

    #[test]
    fn all_products_replace_list() {
        let mut state = loaded(vec![product(9, "old")]);
        let (a, b) = (product(1, "a"), product(2, "b"));
        fulfill(
            &mut state,
            Fulfillment::AllProducts(ProductList {
                products: vec![a.clone(), b.clone()],
            }),
        );
        assert_eq!(state.products, vec![a, b]);
        assert_eq!(state.status, Status::Idle);
    }

    #[test]
    fn filtered_products_set_total_independently() {
        let mut state = CatalogState::default();
        fulfill(
            &mut state,
            Fulfillment::FilteredProducts(ProductPage {
                products: vec![product(1, "a")],
                total_items: 5,
            }),
        );
        assert_eq!(state.products.len(), 1);
        assert_eq!(state.total_items, 5);
    }

    #[test]
    fn taxonomy_lists_replace_wholesale() {
        let mut state = CatalogState::default();
        let category: Category =
            serde_json::from_value(json!({"value": "laptops", "label": "Laptops"})).unwrap();
        let brand: Brand = serde_json::from_value(json!({"value": "apple"})).unwrap();
        fulfill(&mut state, Fulfillment::Categories(vec![category.clone()]));
        fulfill(&mut state, Fulfillment::Brands(vec![brand.clone()]));
        assert_eq!(state.categories, vec![category]);
        assert_eq!(state.brands, vec![brand]);
    }

    #[test]
    fn create_appends_exactly_one() {
        let mut state = loaded(vec![product(1, "a"), product(2, "b")]);
        let created = product(3, "c");
        fulfill(&mut state, Fulfillment::ProductCreated(created.clone()));
        assert_eq!(state.products.len(), 3);
        assert_eq!(state.products.last(), Some(&created));
        assert!(state.selected_product.is_none());
    }

    #[test]
    fn update_replaces_matching_element_in_place() {
        let mut state = loaded(vec![product(1, "a"), product(2, "b"), product(3, "c")]);
        let updated = product(2, "B");
        fulfill(&mut state, Fulfillment::ProductUpdated(updated.clone()));
        assert_eq!(
            state.products,
            vec![product(1, "a"), updated.clone(), product(3, "c")]
        );
        assert_eq!(state.selected_product, Some(updated));
    }

    #[test]
    fn update_matches_numeric_id_against_string_id() {
        let mut state = loaded(vec![product(4, "a")]);
        let mut updated = product(4, "A");
        updated.id = ProductId::Text("4".into());
        fulfill(&mut state, Fulfillment::ProductUpdated(updated));
        assert_eq!(state.products[0].title, "A");
    }

    #[test]
    fn update_without_match_leaves_list_unchanged() {
        let before = vec![product(1, "a")];
        let mut state = loaded(before.clone());
        let updated = product(99, "ghost");
        fulfill(&mut state, Fulfillment::ProductUpdated(updated.clone()));
        assert_eq!(state.products, before);
        assert_eq!(state.selected_product, Some(updated));
    }

    #[test]
    fn clear_selected_product_touches_nothing_else() {
        let mut state = loaded(vec![product(1, "a")]);
        state.selected_product = Some(product(1, "a"));
        state.total_items = 12;
        let mut expected = state.clone();
        expected.selected_product = None;

        reduce(&mut state, Transition::ClearSelectedProduct);
        assert_eq!(state, expected);

        reduce(&mut state, Transition::ClearSelectedProduct);
        assert_eq!(state, expected);
    }

    #[test]
    fn fetch_by_id_scenario() {
        let mut state = CatalogState::default();
        reduce(&mut state, Transition::Pending(IntentKind::LoadProductById));
        assert_eq!(state.status, Status::Loading);

        reduce(
            &mut state,
            Transition::Fulfilled(Fulfillment::ProductById(product(7, "X"))),
        );
        assert_eq!(state.status, Status::Idle);
        let selected = state.selected_product.unwrap();
        assert_eq!(selected.id, ProductId::Numeric(7));
        assert_eq!(selected.title, "X");
    }

    #[test]
    fn rejection_keeps_data_and_records_error() {
        let mut state = loaded(vec![product(1, "a")]);
        state.total_items = 3;
        reduce(&mut state, Transition::Pending(IntentKind::LoadAllProducts));
        reduce(
            &mut state,
            Transition::Rejected {
                intent: IntentKind::LoadAllProducts,
                message: "connection refused".into(),
            },
        );

        assert_eq!(state.products, vec![product(1, "a")]);
        assert_eq!(state.total_items, 3);
        assert_eq!(state.status, Status::Failed);
        let error = state.error.clone().unwrap();
        assert_eq!(error.intent, IntentKind::LoadAllProducts);
        assert_eq!(error.message, "connection refused");
    }

    #[test]
    fn status_stays_loading_while_any_intent_is_outstanding() {
        let mut state = CatalogState::default();
        reduce(&mut state, Transition::Pending(IntentKind::LoadCategories));
        reduce(&mut state, Transition::Pending(IntentKind::LoadBrands));

        reduce(
            &mut state,
            Transition::Fulfilled(Fulfillment::Brands(Vec::new())),
        );
        assert_eq!(state.status, Status::Loading);

        reduce(
            &mut state,
            Transition::Rejected {
                intent: IntentKind::LoadCategories,
                message: "boom".into(),
            },
        );
        assert_eq!(state.status, Status::Failed);
        assert_eq!(state.in_flight(), 0);
    }

    #[test]
    fn rejection_under_outstanding_intent_stays_loading() {
        let mut state = CatalogState::default();
        reduce(&mut state, Transition::Pending(IntentKind::LoadCategories));
        reduce(&mut state, Transition::Pending(IntentKind::LoadBrands));
        reduce(
            &mut state,
            Transition::Rejected {
                intent: IntentKind::LoadCategories,
                message: "boom".into(),
            },
        );
        assert_eq!(state.status, Status::Loading);

        reduce(
            &mut state,
            Transition::Fulfilled(Fulfillment::Brands(Vec::new())),
        );
        assert_eq!(state.status, Status::Idle);
        assert!(state.error.is_none());
    }

    #[test]
    fn clear_error_returns_failed_to_idle() {
        let mut state = CatalogState::default();
        reduce(&mut state, Transition::Pending(IntentKind::LoadBrands));
        reduce(
            &mut state,
            Transition::Rejected {
                intent: IntentKind::LoadBrands,
                message: "boom".into(),
            },
        );
        reduce(&mut state, Transition::ClearError);
        assert!(state.error.is_none());
        assert_eq!(state.status, Status::Idle);
    }

    #[test]
    fn clear_error_does_not_interrupt_loading() {
        let mut state = CatalogState::default();
        reduce(&mut state, Transition::Pending(IntentKind::LoadBrands));
        reduce(&mut state, Transition::ClearError);
        assert_eq!(state.status, Status::Loading);
    }
}
