// ── Catalog facade ──
//
// Owns the API client and the store. Every intent runs the same cycle:
// pending transition, API call, then a fulfilled or rejected transition.
// Concurrent intents are neither de-duplicated nor cancelled. An intent
// whose future is dropped before it settles is rejected as cancelled.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::debug;

use shopfront_api::CatalogClient;
use shopfront_api::transport::{TlsMode, TransportConfig};

use crate::config::{CatalogConfig, TlsVerification};
use crate::error::CoreError;
use crate::intent::{Fulfillment, Intent, IntentKind};
use crate::model::{
    Brand, Category, NewProduct, Pagination, Product, ProductFilter, ProductId, ProductList,
    ProductPage, SortSpec,
};
use crate::store::{CatalogState, CatalogStore, IntentError, Status, Transition};
use crate::stream::StateStream;

/// Entry point for consumers.
///
/// Cheaply cloneable via `Arc<CatalogInner>`; clones share one store.
#[derive(Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

struct CatalogInner {
    config: CatalogConfig,
    store: CatalogStore,
    client: CatalogClient,
}

impl Catalog {
    /// Build a catalog and its HTTP client from `config`.
    pub fn new(config: CatalogConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = CatalogClient::new(config.api_url.as_str(), &transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Build a catalog around an existing client.
    pub fn with_client(config: CatalogConfig, client: CatalogClient) -> Self {
        Self {
            inner: Arc::new(CatalogInner {
                config,
                store: CatalogStore::new(),
                client,
            }),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    pub fn store(&self) -> &CatalogStore {
        &self.inner.store
    }

    // ── Intent execution ─────────────────────────────────────────────

    /// Run `intent` to completion, returning its result.
    ///
    /// The store is marked loading before the request goes out and
    /// settles (fulfilled or rejected) before this returns. Dropping the
    /// returned future early settles the intent as rejected.
    pub async fn execute(&self, intent: Intent) -> Result<Fulfillment, CoreError> {
        let pending = PendingIntent::start(&self.inner, intent.kind());
        self.complete(pending, intent).await
    }

    /// Start `intent` on a spawned task.
    ///
    /// The pending transition is applied before this returns, so the store
    /// already reports [`Status::Loading`]. Must be called from within a
    /// tokio runtime.
    pub fn dispatch(&self, intent: Intent) -> JoinHandle<Result<Fulfillment, CoreError>> {
        let pending = PendingIntent::start(&self.inner, intent.kind());
        let catalog = self.clone();
        tokio::spawn(async move { catalog.complete(pending, intent).await })
    }

    async fn complete(
        &self,
        pending: PendingIntent,
        intent: Intent,
    ) -> Result<Fulfillment, CoreError> {
        match self.call(intent).await {
            Ok(fulfillment) => {
                pending.settle(Transition::Fulfilled(fulfillment.clone()));
                Ok(fulfillment)
            }
            Err(e) => {
                let intent = pending.kind;
                pending.settle(Transition::Rejected {
                    intent,
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn call(&self, intent: Intent) -> Result<Fulfillment, CoreError> {
        let client = &self.inner.client;
        debug!(intent = %intent.kind(), "calling catalog API");
        let fulfillment = match intent {
            Intent::LoadAllProducts => Fulfillment::AllProducts(client.fetch_all_products().await?),
            Intent::LoadProductsByFilters {
                filter,
                sort,
                pagination,
            } => Fulfillment::FilteredProducts(
                client
                    .fetch_products_by_filters(&filter, sort.as_ref(), pagination.as_ref())
                    .await?,
            ),
            Intent::LoadCategories => Fulfillment::Categories(client.fetch_categories().await?),
            Intent::LoadBrands => Fulfillment::Brands(client.fetch_brands().await?),
            Intent::LoadProductById { id } => {
                ensure_id(&id)?;
                let product = client
                    .fetch_product_by_id(&id)
                    .await
                    .map_err(|e| product_error(e, &id))?;
                Fulfillment::ProductById(product)
            }
            Intent::CreateProduct(new) => {
                Fulfillment::ProductCreated(client.create_product(&new).await?)
            }
            Intent::UpdateProduct(product) => {
                ensure_id(&product.id)?;
                let updated = client
                    .update_product(&product)
                    .await
                    .map_err(|e| product_error(e, &product.id))?;
                Fulfillment::ProductUpdated(updated)
            }
        };
        Ok(fulfillment)
    }

    // ── Named intents ────────────────────────────────────────────────

    pub async fn load_all_products(&self) -> Result<ProductList, CoreError> {
        match self.execute(Intent::LoadAllProducts).await? {
            Fulfillment::AllProducts(list) => Ok(list),
            other => Err(mismatch(&other)),
        }
    }

    pub async fn load_products_by_filters(
        &self,
        filter: ProductFilter,
        sort: Option<SortSpec>,
        pagination: Option<Pagination>,
    ) -> Result<ProductPage, CoreError> {
        let intent = Intent::LoadProductsByFilters {
            filter,
            sort,
            pagination,
        };
        match self.execute(intent).await? {
            Fulfillment::FilteredProducts(page) => Ok(page),
            other => Err(mismatch(&other)),
        }
    }

    pub async fn load_categories(&self) -> Result<Vec<Category>, CoreError> {
        match self.execute(Intent::LoadCategories).await? {
            Fulfillment::Categories(categories) => Ok(categories),
            other => Err(mismatch(&other)),
        }
    }

    pub async fn load_brands(&self) -> Result<Vec<Brand>, CoreError> {
        match self.execute(Intent::LoadBrands).await? {
            Fulfillment::Brands(brands) => Ok(brands),
            other => Err(mismatch(&other)),
        }
    }

    pub async fn load_product_by_id(&self, id: impl Into<ProductId>) -> Result<Product, CoreError> {
        let fulfillment = self.execute(Intent::LoadProductById { id: id.into() }).await?;
        single_product(fulfillment)
    }

    pub async fn create_product(&self, product: NewProduct) -> Result<Product, CoreError> {
        single_product(self.execute(Intent::CreateProduct(product)).await?)
    }

    pub async fn update_product(&self, product: Product) -> Result<Product, CoreError> {
        single_product(self.execute(Intent::UpdateProduct(product)).await?)
    }

    // ── Synchronous actions ──────────────────────────────────────────

    pub fn clear_selected_product(&self) {
        self.inner.store.clear_selected_product();
    }

    pub fn clear_error(&self) {
        self.inner.store.clear_error();
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn snapshot(&self) -> CatalogState {
        self.inner.store.snapshot()
    }

    pub fn all_products(&self) -> Vec<Product> {
        self.inner.store.all_products()
    }

    pub fn total_items(&self) -> u64 {
        self.inner.store.total_items()
    }

    pub fn brands(&self) -> Vec<Brand> {
        self.inner.store.brands()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.inner.store.categories()
    }

    pub fn selected_product(&self) -> Option<Product> {
        self.inner.store.selected_product()
    }

    pub fn status(&self) -> Status {
        self.inner.store.status()
    }

    pub fn error(&self) -> Option<IntentError> {
        self.inner.store.error()
    }

    pub fn subscribe(&self) -> StateStream {
        self.inner.store.subscribe()
    }
}

// ── In-flight tracking ───────────────────────────────────────────────

const CANCELLED: &str = "cancelled";

/// One outstanding intent. Applies the pending transition on creation and
/// exactly one settling transition: the one passed to [`settle`], or a
/// cancellation rejection if it is dropped unsettled.
///
/// [`settle`]: PendingIntent::settle
struct PendingIntent {
    inner: Arc<CatalogInner>,
    kind: IntentKind,
    settled: bool,
}

impl PendingIntent {
    fn start(inner: &Arc<CatalogInner>, kind: IntentKind) -> Self {
        inner.store.apply(Transition::Pending(kind));
        Self {
            inner: Arc::clone(inner),
            kind,
            settled: false,
        }
    }

    fn settle(mut self, transition: Transition) {
        self.settled = true;
        self.inner.store.apply(transition);
    }
}

impl Drop for PendingIntent {
    fn drop(&mut self) {
        if !self.settled {
            debug!(intent = %self.kind, "intent dropped before completing");
            self.inner.store.apply(Transition::Rejected {
                intent: self.kind,
                message: CANCELLED.into(),
            });
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────

fn ensure_id(id: &ProductId) -> Result<(), CoreError> {
    match id {
        ProductId::Text(s) if s.trim().is_empty() => Err(CoreError::ValidationFailed {
            message: "product id must not be empty".into(),
        }),
        ProductId::Text(s) if s == "." || s == ".." => Err(CoreError::ValidationFailed {
            message: format!("'{s}' is not a valid product id"),
        }),
        _ => Ok(()),
    }
}

fn product_error(err: shopfront_api::Error, id: &ProductId) -> CoreError {
    if err.is_not_found() {
        CoreError::ProductNotFound {
            identifier: id.to_string(),
        }
    } else {
        err.into()
    }
}

fn single_product(fulfillment: Fulfillment) -> Result<Product, CoreError> {
    let kind = fulfillment.kind();
    fulfillment
        .into_product()
        .ok_or_else(|| CoreError::Internal(format!("{kind} produced no product")))
}

fn mismatch(fulfillment: &Fulfillment) -> CoreError {
    CoreError::Internal(format!("unexpected result for {}", fulfillment.kind()))
}

fn build_transport(config: &CatalogConfig) -> TransportConfig {
    TransportConfig {
        tls: match &config.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        },
        timeout: config.timeout,
    }
}
