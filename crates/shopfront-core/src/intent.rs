// ── Catalog intents ──
//
// An intent names one asynchronous catalog operation together with its
// input. The store records its pending transition before the request goes
// out and merges the `Fulfillment` (or records the rejection) afterwards.

use serde::Serialize;
use strum::{Display, EnumIter, IntoStaticStr};

use crate::model::{
    Brand, Category, NewProduct, Pagination, Product, ProductFilter, ProductId, ProductList,
    ProductPage, SortSpec,
};

/// A catalog operation with its input.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    LoadAllProducts,
    /// Every part is optional and passed through unvalidated.
    LoadProductsByFilters {
        filter: ProductFilter,
        sort: Option<SortSpec>,
        pagination: Option<Pagination>,
    },
    LoadCategories,
    LoadBrands,
    LoadProductById {
        id: ProductId,
    },
    CreateProduct(NewProduct),
    /// Must carry the id of the product being replaced.
    UpdateProduct(Product),
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::LoadAllProducts => IntentKind::LoadAllProducts,
            Self::LoadProductsByFilters { .. } => IntentKind::LoadProductsByFilters,
            Self::LoadCategories => IntentKind::LoadCategories,
            Self::LoadBrands => IntentKind::LoadBrands,
            Self::LoadProductById { .. } => IntentKind::LoadProductById,
            Self::CreateProduct(_) => IntentKind::CreateProduct,
            Self::UpdateProduct(_) => IntentKind::UpdateProduct,
        }
    }
}

/// Input-free name of an intent, used in logs and recorded errors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    #[strum(to_string = "product/load_all_products")]
    LoadAllProducts,
    #[strum(to_string = "product/load_products_by_filters")]
    LoadProductsByFilters,
    #[strum(to_string = "product/load_categories")]
    LoadCategories,
    #[strum(to_string = "product/load_brands")]
    LoadBrands,
    #[strum(to_string = "product/load_product_by_id")]
    LoadProductById,
    #[strum(to_string = "product/create_product")]
    CreateProduct,
    #[strum(to_string = "product/update_product")]
    UpdateProduct,
}

/// The successful result of an intent, ready to be merged into the state.
#[derive(Debug, Clone, PartialEq)]
pub enum Fulfillment {
    AllProducts(ProductList),
    FilteredProducts(ProductPage),
    Categories(Vec<Category>),
    Brands(Vec<Brand>),
    ProductById(Product),
    ProductCreated(Product),
    ProductUpdated(Product),
}

impl Fulfillment {
    pub fn kind(&self) -> IntentKind {
        match self {
            Self::AllProducts(_) => IntentKind::LoadAllProducts,
            Self::FilteredProducts(_) => IntentKind::LoadProductsByFilters,
            Self::Categories(_) => IntentKind::LoadCategories,
            Self::Brands(_) => IntentKind::LoadBrands,
            Self::ProductById(_) => IntentKind::LoadProductById,
            Self::ProductCreated(_) => IntentKind::CreateProduct,
            Self::ProductUpdated(_) => IntentKind::UpdateProduct,
        }
    }

    /// The single product carried by id-fetch, create and update results.
    pub fn into_product(self) -> Option<Product> {
        match self {
            Self::ProductById(p) | Self::ProductCreated(p) | Self::ProductUpdated(p) => Some(p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn kinds_display_with_slice_prefix() {
        for kind in IntentKind::iter() {
            assert!(kind.to_string().starts_with("product/"), "{kind:?}");
        }
        assert_eq!(
            IntentKind::LoadProductById.to_string(),
            "product/load_product_by_id"
        );
    }

    #[test]
    fn intent_and_fulfillment_kinds_agree() {
        let intent = Intent::LoadBrands;
        let fulfillment = Fulfillment::Brands(Vec::new());
        assert_eq!(intent.kind(), fulfillment.kind());
    }

    #[test]
    fn list_results_carry_no_single_product() {
        assert!(Fulfillment::Categories(Vec::new()).into_product().is_none());
    }
}
