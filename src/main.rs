use std::path::PathBuf;

use clap::Parser;
use storefront::config::Config;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Overrides SHOP_CATALOG_URL
    #[arg(long)]
    catalog_url: Option<String>,

    /// Overrides SHOP_STORAGE_DIR
    #[arg(long)]
    storage_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    storefront::init_tracing();

    let mut config = Config::load()?;
    if let Some(catalog_url) = args.catalog_url {
        config.catalog_url = catalog_url;
    }
    if let Some(storage_dir) = args.storage_dir {
        config.storage_dir = storage_dir;
    }

    storefront::start(config).await?;

    Ok(())
}
