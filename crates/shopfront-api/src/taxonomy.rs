// Category and brand endpoints
//
// Both are flat, unpaginated lists used to build filter menus.

use tracing::debug;

use crate::client::CatalogClient;
use crate::error::Error;
use crate::models::{Brand, Category};

impl CatalogClient {
    /// List every product category.
    ///
    /// `GET /categories`
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, Error> {
        debug!("fetching categories");
        self.get(&["categories"]).await
    }

    /// List every brand.
    ///
    /// `GET /brands`
    pub async fn fetch_brands(&self) -> Result<Vec<Brand>, Error> {
        debug!("fetching brands");
        self.get(&["brands"]).await
    }
}
