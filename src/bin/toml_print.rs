use clap::Parser;
use gallery_print::core::capacity::{resolve_capacity, resolve_layout};
use gallery_print::core::partition::{partition, sort_square_first};
use gallery_print::core::selection::Selection;
use gallery_print::core::ConfigProvider;
use gallery_print::utils::error::ErrorSeverity;
use gallery_print::utils::{logger, validation::Validate};
use gallery_print::{CatalogClient, ExportEngine, LocalStorage, PrintPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-print")]
#[command(about = "Gallery print export driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "gallery-print.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the double-sided setting from config
    #[arg(long)]
    double_sided: Option<bool>,

    /// Dry run - show the page plan without writing a document
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based print export");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Some(double_sided) = args.double_sided {
        config.layout.double_sided = Some(double_sided);
        tracing::info!("🔧 Double-sided overridden to: {}", double_sided);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No document will be written");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = PrintPipeline::new(storage, config);
    let engine = ExportEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            println!("✅ Print document ready: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    let settings = config.export_settings();
    println!("📋 Configuration Summary:");
    println!("  Catalog: {}", config.catalog_endpoint());
    println!(
        "  Codes: {}/{}/<slug-or-id>",
        settings.site_origin, settings.collection_route
    );
    println!("  Page size: {}", settings.page_size);
    println!(
        "  Layout: {} ({} per page)",
        settings.layout,
        resolve_capacity(&settings.page_size, &settings.layout)
    );
    println!("  Theme: {}", settings.theme);
    println!("  Double-sided: {}", settings.double_sided);
    println!(
        "  Output: {}/{}",
        config.output_path(),
        settings.output_file
    );

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    let settings = config.export_settings();
    let catalog = CatalogClient::new(config.catalog_endpoint());
    let mut items = catalog.fetch_items().await?;

    if !settings.selected_ids.is_empty() {
        items = Selection::from_ids(settings.selected_ids.iter().cloned()).apply(items);
    }

    let layout = resolve_layout(&settings.layout);
    if layout.is_leaflet() {
        sort_square_first(&mut items);
    }
    let pages = partition(&items, layout.items_per_page());

    println!("🔍 Page plan:");
    for page in &pages {
        let ids: Vec<&str> = page.items.iter().map(|i| i.id.as_str()).collect();
        println!("  Page {}: {}", page.number, ids.join(", "));
    }

    let missing_codes = items.iter().filter(|i| !i.has_persisted_code()).count();
    println!();
    println!(
        "📊 {} items on {} pages, {} codes to generate",
        items.len(),
        pages.len(),
        missing_codes
    );
    println!("✅ Dry run complete.");

    Ok(())
}
