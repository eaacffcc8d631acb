//! Product command handlers.

use tabled::Tabled;

use shopfront_core::{
    Catalog, NewProduct, Pagination, Product, ProductFilter, ProductId, SortOrder, SortSpec,
    model::DEFAULT_PAGE_SIZE,
};

use crate::cli::{GlobalOpts, ProductsArgs, ProductsCommand, SearchArgs, SortDirection};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Brand")]
    brand: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Discount")]
    discount: String,
    #[tabled(rename = "Stock")]
    stock: i64,
    #[tabled(rename = "Rating")]
    rating: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id.to_string(),
            title: p.title.clone(),
            brand: p.brand.clone(),
            category: p.category.clone(),
            price: format!("{:.2}", p.price),
            discount: format!("{:.1}%", p.discount_percentage),
            stock: p.stock,
            rating: format!("{:.2}", p.rating),
        }
    }
}

fn detail(p: &Product) -> String {
    let dash = |s: &str| if s.is_empty() { "-".to_owned() } else { s.to_owned() };
    let mut lines = vec![
        format!("ID:          {}", p.id),
        format!("Title:       {}", dash(&p.title)),
        format!("Brand:       {}", dash(&p.brand)),
        format!("Category:    {}", dash(&p.category)),
        format!("Price:       {:.2}", p.price),
        format!(
            "Discount:    {:.1}% (now {:.2})",
            p.discount_percentage,
            p.discounted_price()
        ),
        format!("Stock:       {}", p.stock),
        format!("Rating:      {:.2}", p.rating),
    ];
    if p.deleted == Some(true) {
        lines.push("Deleted:     yes".into());
    }
    if !p.description.is_empty() {
        lines.push(format!("Description: {}", p.description));
    }
    if !p.images.is_empty() {
        lines.push(format!("Images:      {}", p.images.len()));
    }
    lines.join("\n")
}

fn render_products(products: &[Product], global: &GlobalOpts) {
    let out = output::render_list(
        &global.output,
        products,
        |p| ProductRow::from(p),
        |p| p.id.to_string(),
    );
    output::print_output(&out, global.quiet);
}

fn render_product(product: &Product, global: &GlobalOpts) {
    let out = output::render_single(&global.output, product, detail, |p| p.id.to_string());
    output::print_output(&out, global.quiet);
}

// ── Query building ──────────────────────────────────────────────────

fn search_query(args: SearchArgs) -> (ProductFilter, Option<SortSpec>, Option<Pagination>) {
    let filter = ProductFilter {
        category: args.category,
        brand: args.brand,
    };
    let order = match args.order {
        SortDirection::Asc => SortOrder::Asc,
        SortDirection::Desc => SortOrder::Desc,
    };
    let sort = args.sort.map(|field| SortSpec::new(field, order));
    let pagination = match (args.page, args.limit) {
        (None, None) => None,
        (page, limit) => Some(Pagination {
            page: page.unwrap_or(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE),
        }),
    };
    (filter, sort, pagination)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    catalog: &Catalog,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProductsCommand::List => {
            catalog.load_all_products().await?;
            render_products(&catalog.all_products(), global);
            Ok(())
        }

        ProductsCommand::Search(args) => {
            let (filter, sort, pagination) = search_query(args);
            let page_no = pagination.map(|p| p.page);
            catalog
                .load_products_by_filters(filter, sort, pagination)
                .await?;
            let products = catalog.all_products();
            render_products(&products, global);
            let mut summary = format!(
                "{} of {} matching products",
                products.len(),
                catalog.total_items()
            );
            if let Some(page) = page_no {
                summary.push_str(&format!(" (page {page})"));
            }
            output::note(global, &summary);
            Ok(())
        }

        ProductsCommand::Get { id } => {
            let product = catalog.load_product_by_id(ProductId::from(id)).await?;
            render_product(&product, global);
            Ok(())
        }

        ProductsCommand::Create { from_file } => {
            let value = util::read_json_file(&from_file)?;
            let new: NewProduct = serde_json::from_value(value)?;
            let created = catalog.create_product(new).await?;
            output::success(global, &format!("Product {} created", created.id));
            render_product(&created, global);
            Ok(())
        }

        ProductsCommand::Update { id, from_file } => {
            let patch = util::read_json_file(&from_file)?;
            let current = catalog.load_product_by_id(ProductId::from(id)).await?;
            let merged = util::merge_object(serde_json::to_value(&current)?, patch)?;
            let product: Product = serde_json::from_value(merged)?;
            let updated = catalog.update_product(product).await?;
            output::success(global, &format!("Product {} updated", updated.id));
            render_product(&updated, global);
            Ok(())
        }
    }
}
