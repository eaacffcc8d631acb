//! Category command handlers.

use tabled::Tabled;

use shopfront_core::{Catalog, Category};

use crate::cli::{CategoriesArgs, GlobalOpts, TaxonomyCommand};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Label")]
    label: String,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            value: c.value.clone(),
            label: c.label.clone(),
        }
    }
}

pub async fn handle(
    catalog: &Catalog,
    args: CategoriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        TaxonomyCommand::List => {
            catalog.load_categories().await?;
            let out = output::render_list(
                &global.output,
                &catalog.categories(),
                |c| CategoryRow::from(c),
                |c| c.value.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
