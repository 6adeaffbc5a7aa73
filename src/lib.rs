pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::catalog_api::CatalogClient;
pub use app::pipelines::print_pipeline::PrintPipeline;
pub use config::cli::LocalStorage;
pub use config::toml_config::TomlConfig;
pub use crate::core::engine::ExportEngine;
pub use utils::error::{PrintError, Result};
