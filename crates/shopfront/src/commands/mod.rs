//! Command dispatch: bridges CLI args -> catalog intents -> output formatting.

pub mod brands;
pub mod categories;
pub mod config_cmd;
pub mod products;
pub mod util;

use shopfront_core::Catalog;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, catalog: &Catalog, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Products(args) => products::handle(catalog, args, global).await,
        Command::Categories(args) => categories::handle(catalog, args, global).await,
        Command::Brands(args) => brands::handle(catalog, args, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "handled before connecting to the catalog API".into(),
        }),
    }
}
