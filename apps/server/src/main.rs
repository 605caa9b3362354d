//! GameHub dev server entry point.

mod config;

use tracing_subscriber::EnvFilter;

use gamehub_dev_server::DevServer;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "starting GameHub dev server"
    );

    let config = config::from_env()?;
    tracing::info!(port = config.port, root = %config.root.display(), "configuration loaded");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let server = DevServer::new(config);

        let stopper = std::sync::Arc::clone(&server);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                stopper.shutdown();
            }
        });

        server.run().await
    })?;

    tracing::info!("server shut down cleanly");
    Ok(())
}
