use anyhow::Context;
use tracing::info;

use gatelink::config::{get_config, init_config};
use gatelink::runtime;
use gatelink::storage::StorageFactory;
use gatelink::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_config();
    let config = get_config();

    // Keep the guard alive so buffered log writes are flushed on exit.
    let _log_guard = init_logging(&config);

    let storage = StorageFactory::create()
        .await
        .context("failed to initialize storage backend")?;
    info!("Using storage backend: {}", storage.info().backend);

    runtime::server::run_server(storage).await
}
