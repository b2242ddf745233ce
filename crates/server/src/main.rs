use anyhow::Context;

use cartsync_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cartsync_observability::init();

    let config = ServerConfig::from_env();
    let seed = config.load_seed()?;
    tracing::info!(
        inventory = seed.inventory.len(),
        cart = seed.cart.len(),
        "seed loaded"
    );

    let app = cartsync_server::app::build_app(seed);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
