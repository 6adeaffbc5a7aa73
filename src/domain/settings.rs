use serde::{Deserialize, Serialize};

pub const DEFAULT_COLLECTION_ROUTE: &str = "artworks";
pub const DEFAULT_CURRENCY_GLYPH: char = '£';
pub const DEFAULT_THROTTLE_MS: u64 = 100;
pub const DEFAULT_OUTPUT_FILE: &str = "print.html";

/// Everything an export run needs besides the catalog itself.
///
/// Layout, page size and theme stay as raw keys; unknown keys are resolved
/// to defaults where they are used rather than rejected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub site_origin: String,
    pub collection_route: String,
    pub page_size: String,
    pub layout: String,
    pub theme: String,
    pub double_sided: bool,
    pub currency_glyph: char,
    pub selected_ids: Vec<String>,
    pub throttle_ms: u64,
    pub embed_images: bool,
    pub output_file: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            site_origin: "http://localhost:3000".to_string(),
            collection_route: DEFAULT_COLLECTION_ROUTE.to_string(),
            page_size: "A4".to_string(),
            layout: "image-beside-text".to_string(),
            theme: "default".to_string(),
            double_sided: false,
            currency_glyph: DEFAULT_CURRENCY_GLYPH,
            selected_ids: Vec::new(),
            throttle_ms: DEFAULT_THROTTLE_MS,
            embed_images: false,
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}
