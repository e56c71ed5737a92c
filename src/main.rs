use clap::Parser;
use std::sync::Arc;
use tool_directory::core::ConfigProvider;
use tool_directory::server;
use tool_directory::utils::logger;
use tool_directory::{Catalog, CliConfig, LocalSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(cli.verbose, cli.log_json);

    tracing::info!("🚀 Starting tool-directory");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // Loaded once, before binding; an unreadable file leaves the catalog empty.
    let catalog = Arc::new(Catalog::load(&LocalSource::new(config.data_path())));
    if catalog.is_empty() {
        tracing::warn!("Catalog is empty; every listing will return no tools");
    }

    let app = server::build_app(catalog, &config);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        "📡 Listening on http://{}{}",
        listener.local_addr()?,
        config.api_prefix()
    );

    server::serve(listener, app, shutdown_signal()).await?;
    tracing::info!("👋 Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
