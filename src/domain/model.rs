use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One catalog record as the print tooling sees it.
///
/// Records are owned by the catalog API; the export flow only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintableItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(default)]
    pub dimensions: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub local_image_path: Option<String>,
    #[serde(default)]
    pub original_image_url: Option<String>,
    #[serde(default)]
    pub qr_code_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PrintableItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            artist: String::new(),
            price: String::new(),
            dimensions: None,
            slug: None,
            local_image_path: None,
            original_image_url: None,
            qr_code_url: None,
            created_at: None,
        }
    }

    /// The path segment used in printed URLs: the slug when present, else the id.
    pub fn route_key(&self) -> &str {
        match self.slug.as_deref().map(str::trim) {
            Some(slug) if !slug.is_empty() => slug,
            _ => &self.id,
        }
    }

    pub fn has_persisted_code(&self) -> bool {
        self.qr_code_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}

/// A contiguous slice of the item sequence destined for one physical page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub number: usize,
    pub items: Vec<PrintableItem>,
}

/// Scannable code for one item.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeImage {
    /// Reference stored on the catalog record.
    Persisted(String),
    /// Inline SVG markup generated for this render.
    Generated(String),
    /// Generation failed or has not happened yet; rendered as a placeholder.
    Pending(String),
}

impl CodeImage {
    pub fn is_pending(&self) -> bool {
        matches!(self, CodeImage::Pending(_))
    }
}

/// A rendered page: the front markup plus the image-only back markup.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub number: usize,
    pub item_count: usize,
    pub front_html: String,
    pub back_html: String,
}

/// Final HTML handed to the browser print dialog.
#[derive(Debug, Clone)]
pub struct PrintDocument {
    pub html: String,
    pub page_count: usize,
    pub break_count: usize,
    pub item_count: usize,
    pub pending_codes: usize,
}
