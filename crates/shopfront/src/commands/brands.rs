//! Brand command handlers.

use tabled::Tabled;

use shopfront_core::{Brand, Catalog};

use crate::cli::{BrandsArgs, GlobalOpts, TaxonomyCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct BrandRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Label")]
    label: String,
}

impl From<&Brand> for BrandRow {
    fn from(b: &Brand) -> Self {
        Self {
            value: b.value.clone(),
            label: b.label.clone(),
        }
    }
}

pub async fn handle(
    catalog: &Catalog,
    args: BrandsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TaxonomyCommand::List => {
            catalog.load_brands().await?;
            let out = output::render_list(
                &global.output,
                &catalog.brands(),
                |b| BrandRow::from(b),
                |b| b.value.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
