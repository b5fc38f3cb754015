//! Catalog command implementation

use crate::cli::output::{format_catalog_json, format_catalog_table, CatalogView};
use crate::cli::serve::load_config_file;
use crate::cli::CatalogArgs;
use crate::context::AdvisorContext;

/// Handle `build-advisor catalog`
pub fn handle_catalog(args: &CatalogArgs) -> Result<String, Box<dyn std::error::Error>> {
    let mut config = load_config_file(&args.config)?;
    if let Some(ref dir) = args.catalog_dir {
        config.catalog.dir = dir.clone();
    }

    let context = AdvisorContext::load(&config.catalog.dir)?;
    let views = CatalogView::collect(&context);

    if args.json {
        Ok(format_catalog_json(&views)?)
    } else {
        Ok(format_catalog_table(&views))
    }
}
