use clap::{Args, Parser, Subcommand};
use gallery_print::app::codes::CodeGenerator;
use gallery_print::app::dedupe;
use gallery_print::core::duplicates::write_report_csv;
use gallery_print::utils::error::{ErrorSeverity, PrintError};
use gallery_print::utils::{logger, validation};
use gallery_print::utils::validation::Validate;
use gallery_print::{CatalogClient, CliConfig, ExportEngine, LocalStorage, PrintPipeline};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "gallery-print")]
#[command(about = "Print labels and leaflets for the gallery catalog and tidy duplicate artworks")]
struct Cli {
    #[arg(long, global = true, help = "Enable verbose output")]
    verbose: bool,

    #[arg(long, global = true, help = "Log as JSON lines")]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a printable HTML document of labels or leaflets
    Export(CliConfig),
    /// Generate and store codes for items that do not have one yet
    Codes(CodesArgs),
    /// Report duplicate artworks and optionally delete all but the oldest
    Duplicates(DuplicatesArgs),
}

#[derive(Args, Debug)]
struct CodesArgs {
    #[arg(long, default_value = "http://localhost:3000/api/artworks")]
    catalog_endpoint: String,

    #[arg(long, default_value = "http://localhost:3000")]
    site_origin: String,

    #[arg(long, default_value = "artworks")]
    collection_route: String,

    #[arg(long, default_value = "./public")]
    output_path: String,

    #[arg(long, default_value = "100")]
    throttle_ms: u64,

    #[arg(long = "id", help = "Only generate codes for these item ids (repeatable)")]
    ids: Vec<String>,
}

#[derive(Args, Debug)]
struct DuplicatesArgs {
    #[arg(long, default_value = "http://localhost:3000/api/artworks")]
    catalog_endpoint: String,

    #[arg(long, help = "Write the duplicate report as CSV to this path")]
    report: Option<String>,

    #[arg(long, help = "Delete every duplicate except the oldest of each set")]
    delete: bool,

    #[arg(long, help = "Confirm the deletion; without it --delete only lists")]
    yes: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let result = match cli.command {
        Command::Export(config) => run_export(config).await,
        Command::Codes(args) => run_codes(args).await,
        Command::Duplicates(args) => run_duplicates(args).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
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

    Ok(())
}

async fn run_export(config: CliConfig) -> Result<(), PrintError> {
    config.validate()?;
    tracing::debug!("Export config: {:?}", config);

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = PrintPipeline::new(storage, config);
    let engine = ExportEngine::new(pipeline);

    let output_path = engine.run().await?;
    println!("✅ Print document ready: {}", output_path);
    println!("🖨  Open it in a browser and print to paper or PDF");
    Ok(())
}

async fn run_codes(args: CodesArgs) -> Result<(), PrintError> {
    validation::validate_url("catalog_endpoint", &args.catalog_endpoint)?;
    validation::validate_url("site_origin", &args.site_origin)?;
    validation::validate_route_segment("collection_route", &args.collection_route)?;
    validation::validate_path("output_path", &args.output_path)?;

    let catalog = CatalogClient::new(&args.catalog_endpoint);
    let storage = LocalStorage::new(args.output_path.clone());

    let generator = CodeGenerator {
        catalog: &catalog,
        storage: &storage,
        site_origin: &args.site_origin,
        collection_route: &args.collection_route,
        throttle: Duration::from_millis(args.throttle_ms),
    };
    let summary = if args.ids.is_empty() {
        let items = catalog.fetch_items().await?;
        generator.generate_missing(&items).await
    } else {
        generator.generate_for_ids(&args.ids).await
    };

    println!("✅ {}", summary.summary());
    for id in &summary.not_found {
        println!("   not found: {}", id);
    }
    for (id, reason) in &summary.failed {
        println!("   failed: {} ({})", id, reason);
    }
    Ok(())
}

async fn run_duplicates(args: DuplicatesArgs) -> Result<(), PrintError> {
    validation::validate_url("catalog_endpoint", &args.catalog_endpoint)?;

    let catalog = CatalogClient::new(&args.catalog_endpoint);
    let report = dedupe::scan(&catalog).await?;

    for set in &report.sets {
        let Some(original) = set.original() else {
            continue;
        };
        println!(
            "📎 \"{}\": keep {} ({}), {} duplicate(s)",
            original.name,
            original.id,
            original
                .created_at
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| "undated".to_string()),
            set.duplicates().len()
        );
        for item in set.duplicates() {
            println!("    - {} {}", item.id, item.name);
        }
    }

    if let Some(path) = &args.report {
        let file = std::fs::File::create(path)?;
        write_report_csv(&report.sets, file)?;
        println!("📁 Report saved to: {}", path);
    }

    if !args.delete || report.selected.is_empty() {
        println!("{} duplicate(s) found", report.selected.len());
        return Ok(());
    }

    if !args.yes {
        println!(
            "⚠️  {} item(s) would be deleted; re-run with --yes to confirm",
            report.selected.len()
        );
        return Ok(());
    }

    let (outcome, refreshed) = dedupe::delete_duplicates(&catalog, &report).await?;
    println!("🗑  {}", outcome.summary());
    for (id, reason) in &outcome.failed {
        println!("   failed: {} ({})", id, reason);
    }
    if !outcome.is_complete_success() {
        eprintln!("❌ Some deletions did not go through; the list below is reloaded from the catalog");
    }
    println!("{} duplicate(s) remain", refreshed.selected.len());
    Ok(())
}
