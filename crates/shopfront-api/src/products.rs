// Product endpoints
//
// Listing (plain and filtered/paginated), single fetch, create, and
// partial update under `/products`.

use serde::Deserialize;
use tracing::debug;

use crate::client::{CatalogClient, total_count};
use crate::error::Error;
use crate::models::{
    NewProduct, Pagination, Product, ProductFilter, ProductId, ProductList, ProductPage, SortSpec,
};

/// Accepted list body shapes: a bare array (json-server) or an envelope
/// carrying the products and, optionally, the total.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductsBody {
    List(Vec<Product>),
    Envelope {
        products: Vec<Product>,
        #[serde(default, rename = "totalItems", alias = "total")]
        total_items: Option<u64>,
    },
}

impl ProductsBody {
    fn into_parts(self) -> (Vec<Product>, Option<u64>) {
        match self {
            Self::List(products) => (products, None),
            Self::Envelope {
                products,
                total_items,
            } => (products, total_items),
        }
    }
}

impl CatalogClient {
    /// Fetch the full product list.
    ///
    /// `GET /products`
    pub async fn fetch_all_products(&self) -> Result<ProductList, Error> {
        debug!("fetching all products");
        let body: ProductsBody = self.get(&["products"]).await?;
        let (products, _) = body.into_parts();
        Ok(ProductList { products })
    }

    /// Fetch one page of products matching a filter.
    ///
    /// `GET /products?category=..&brand=..&_sort=..&_order=..&_page=..&_limit=..`
    ///
    /// The total comes from the `X-Total-Count` header, then from the body
    /// envelope, and falls back to the number of products returned.
    pub async fn fetch_products_by_filters(
        &self,
        filter: &ProductFilter,
        sort: Option<&SortSpec>,
        pagination: Option<&Pagination>,
    ) -> Result<ProductPage, Error> {
        let mut params = filter.query_pairs();
        if let Some(sort) = sort {
            params.extend(sort.query_pairs());
        }
        if let Some(pagination) = pagination {
            params.extend(pagination.query_pairs());
        }
        debug!(?filter, ?sort, ?pagination, "fetching filtered products");

        let (headers, body): (_, ProductsBody) = self.get_with_params(&["products"], &params).await?;
        let (products, body_total) = body.into_parts();

        let total_items = total_count(&headers)
            .or(body_total)
            .unwrap_or(products.len() as u64);

        Ok(ProductPage {
            products,
            total_items,
        })
    }

    /// Fetch a single product.
    ///
    /// `GET /products/{id}`
    pub async fn fetch_product_by_id(&self, id: &ProductId) -> Result<Product, Error> {
        debug!(%id, "fetching product");
        self.get(&["products", &id.to_string()]).await
    }

    /// Create a product; the server assigns the id.
    ///
    /// `POST /products`
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, Error> {
        debug!(title = %product.title, "creating product");
        self.post(&["products"], product).await
    }

    /// Update a product in place, keyed by its id.
    ///
    /// `PATCH /products/{id}`
    pub async fn update_product(&self, product: &Product) -> Result<Product, Error> {
        debug!(id = %product.id, "updating product");
        self.patch(&["products", &product.id.to_string()], product)
            .await
    }
}
