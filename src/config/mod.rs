pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::settings::ExportSettings;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, clap::Args)]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:3000/api/artworks")]
    pub catalog_endpoint: String,

    #[arg(long, default_value = "http://localhost:3000")]
    pub site_origin: String,

    #[arg(long, default_value = "artworks")]
    pub collection_route: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "print.html")]
    pub output_file: String,

    #[arg(long, default_value = "A4", help = "A3, A4, A5 or custom:<w>x<h> in mm")]
    pub page_size: String,

    #[arg(
        long,
        default_value = "image-beside-text",
        help = "image-beside-text, image-above-text, labels-<1|2|4|6> or cut-sheet"
    )]
    pub layout: String,

    #[arg(long, default_value = "default", help = "default, minimal or dark")]
    pub theme: String,

    #[arg(long, help = "Follow every front page with an image-only back page")]
    pub double_sided: bool,

    #[arg(long, default_value = "£")]
    pub currency: char,

    #[arg(long, value_delimiter = ',', help = "Item ids to export; all items when empty")]
    pub select: Vec<String>,

    #[arg(long, default_value = "100", help = "Pause between code generations")]
    pub throttle_ms: u64,

    #[arg(long, help = "Download images into the document")]
    pub embed_images: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn catalog_endpoint(&self) -> &str {
        &self.catalog_endpoint
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            site_origin: self.site_origin.clone(),
            collection_route: self.collection_route.clone(),
            page_size: self.page_size.clone(),
            layout: self.layout.clone(),
            theme: self.theme.clone(),
            double_sided: self.double_sided,
            currency_glyph: self.currency,
            selected_ids: self.select.clone(),
            throttle_ms: self.throttle_ms,
            embed_images: self.embed_images,
            output_file: self.output_file.clone(),
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("catalog_endpoint", &self.catalog_endpoint)?;
        validation::validate_url("site_origin", &self.site_origin)?;
        validation::validate_route_segment("collection_route", &self.collection_route)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_path("output_file", &self.output_file)?;
        Ok(())
    }
}
