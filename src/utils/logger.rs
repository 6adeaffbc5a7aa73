use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// HTTP client internals are only interesting when something is badly wrong.
const QUIET_DEPENDENCIES: &str = "hyper=warn,hyper_util=warn,reqwest=warn";

fn default_directives(verbose: bool) -> String {
    let own = if verbose { "debug" } else { "info" };
    format!("gallery_print={},warn,{}", own, QUIET_DEPENDENCIES)
}

fn env_or_default(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

/// Logs go to stderr so stdout stays clean for summaries and page plans.
pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_or_default(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// JSON lines on stderr, for runs driven by a scheduler that ships logs elsewhere.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(env_or_default(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .json()
                .with_current_span(false),
        )
        .init();
}
