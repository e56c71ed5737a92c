use clap::Parser;
use std::path::Path;
use tool_directory::utils::{logger, validation::Validate};
use tool_directory::{ExportConfig, SitemapExporter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ExportConfig::parse();

    logger::init_cli_logger(config.verbose);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let domain = config.domain.clone().unwrap_or_default();
    let exporter = SitemapExporter::new(&config.api_url, domain);

    match exporter.export(Path::new(&config.output)).await {
        Ok(count) => {
            println!("✅ Sitemap generated successfully!");
            println!("📁 {} URLs written to {}", count, config.output);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Sitemap export failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
