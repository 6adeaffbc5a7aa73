use crate::core::ConfigProvider;
use crate::domain::settings::{
    ExportSettings, DEFAULT_COLLECTION_ROUTE, DEFAULT_CURRENCY_GLYPH, DEFAULT_OUTPUT_FILE,
    DEFAULT_THROTTLE_MS,
};
use crate::utils::error::{PrintError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    pub output: OutputConfig,
    pub selection: Option<SelectionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub site_origin: String,
    pub collection_route: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    pub page_size: Option<String>,
    pub variant: Option<String>,
    pub theme: Option<String>,
    pub double_sided: Option<bool>,
    pub currency: Option<char>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub file: Option<String>,
    pub embed_images: Option<bool>,
    pub throttle_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub ids: Vec<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PrintError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PrintError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PrintError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("catalog.endpoint", &self.catalog.endpoint)?;
        validation::validate_url("catalog.site_origin", &self.catalog.site_origin)?;
        if let Some(route) = &self.catalog.collection_route {
            validation::validate_route_segment("catalog.collection_route", route)?;
        }
        validation::validate_path("output.path", &self.output.path)?;
        if let Some(file) = &self.output.file {
            validation::validate_path("output.file", file)?;
        }
        Ok(())
    }

    pub fn selected_ids(&self) -> &[String] {
        self.selection
            .as_ref()
            .map(|s| s.ids.as_slice())
            .unwrap_or(&[])
    }
}

impl ConfigProvider for TomlConfig {
    fn catalog_endpoint(&self) -> &str {
        &self.catalog.endpoint
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn export_settings(&self) -> ExportSettings {
        let defaults = ExportSettings::default();
        ExportSettings {
            site_origin: self.catalog.site_origin.clone(),
            collection_route: self
                .catalog
                .collection_route
                .clone()
                .unwrap_or_else(|| DEFAULT_COLLECTION_ROUTE.to_string()),
            page_size: self.layout.page_size.clone().unwrap_or(defaults.page_size),
            layout: self.layout.variant.clone().unwrap_or(defaults.layout),
            theme: self.layout.theme.clone().unwrap_or(defaults.theme),
            double_sided: self.layout.double_sided.unwrap_or(false),
            currency_glyph: self.layout.currency.unwrap_or(DEFAULT_CURRENCY_GLYPH),
            selected_ids: self.selected_ids().to_vec(),
            throttle_ms: self.output.throttle_ms.unwrap_or(DEFAULT_THROTTLE_MS),
            embed_images: self.output.embed_images.unwrap_or(false),
            output_file: self
                .output
                .file
                .clone()
                .unwrap_or_else(|| DEFAULT_OUTPUT_FILE.to_string()),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
