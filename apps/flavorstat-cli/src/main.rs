use std::env;
use std::io::{self, IsTerminal};

use anyhow::Context;
use flavorstat_core::config::Config;
use flavorstat_data::{DatasetBuilder, IngredientCatalog};
use flavorstat_session::{ChartFile, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// Optional first argument seeds the ingredient prompt.
fn parse_args() -> Option<String> {
    let mut args = env::args();
    let prog = args.next().unwrap_or_else(|| "flavorstat".to_string());
    let seed = args.next();
    if matches!(seed.as_deref(), Some("-h" | "--help")) {
        println!("Usage: {} [ingredient]", prog);
        println!("Example: {} 'bread crumb'", prog);
        std::process::exit(0);
    }
    seed
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let seed = parse_args();
    let config = Config::load().context("loading configuration")?;
    let settings = config.settings()?;

    let catalog_path = settings.dataset.catalog_path();
    let catalog = IngredientCatalog::load_with_columns(&catalog_path, &settings.dataset.catalog_name_column, &settings.dataset.catalog_id_column)?;
    info!(entries = catalog.len(), path = %catalog_path.display(), "loaded ingredient catalog");

    let stdin = io::stdin();
    let mut session = Session::new(&catalog, DatasetBuilder::new(settings.dataset), ChartFile::new(settings.plot), stdin.lock(), io::stdout())
        .with_progress(io::stderr().is_terminal());
    session.run(seed.as_deref())?;
    Ok(())
}
