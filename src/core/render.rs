use crate::core::capacity::LayoutMode;
use crate::core::codes::PLACEHOLDER_CAPTION;
use crate::domain::model::{CodeImage, Page, PrintableItem, RenderedPage};
use std::collections::HashMap;
use std::fmt::Write as _;

pub const PRICE_ON_APPLICATION: &str = "POA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Default,
    Minimal,
    Dark,
}

impl Theme {
    /// Unknown names render with the default theme.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "minimal" => Theme::Minimal,
            "dark" => Theme::Dark,
            _ => Theme::Default,
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Default => "theme-default",
            Theme::Minimal => "theme-minimal",
            Theme::Dark => "theme-dark",
        }
    }
}

/// Prefixes the currency glyph unless the price already carries it, is "POA" or is blank.
pub fn format_price(price: &str, glyph: char) -> String {
    if price.trim().is_empty() || price.starts_with(glyph) || price == PRICE_ON_APPLICATION {
        price.to_string()
    } else {
        format!("{}{}", glyph, price)
    }
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Turns a stored reference into something a browser can load from a local file.
/// Site-relative paths are anchored on the site origin.
pub fn resolve_asset_url(origin: &str, reference: &str) -> String {
    let reference = reference.trim();
    if reference.starts_with("http://")
        || reference.starts_with("https://")
        || reference.starts_with("data:")
    {
        reference.to_string()
    } else {
        format!(
            "{}/{}",
            origin.trim_end_matches('/'),
            reference.trim_start_matches('/')
        )
    }
}

/// Per-item inputs that are resolved before rendering.
#[derive(Debug, Clone)]
pub struct ItemAssets {
    pub code: CodeImage,
    /// Image source: an embedded data URI or an absolute URL.
    pub image_src: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ItemRenderer {
    pub theme: Theme,
    pub layout: LayoutMode,
    pub currency_glyph: char,
    pub site_origin: String,
}

impl ItemRenderer {
    pub fn new(theme: Theme, layout: LayoutMode, currency_glyph: char, site_origin: &str) -> Self {
        Self {
            theme,
            layout,
            currency_glyph,
            site_origin: site_origin.to_string(),
        }
    }

    /// Default image source for an item: its local path, else its original URL.
    pub fn image_source(&self, item: &PrintableItem) -> Option<String> {
        item.local_image_path
            .as_deref()
            .or(item.original_image_url.as_deref())
            .filter(|s| !s.trim().is_empty())
            .map(|s| resolve_asset_url(&self.site_origin, s))
    }

    pub fn render_front(&self, item: &PrintableItem, assets: &ItemAssets) -> String {
        let mut html = String::new();
        let _ = write!(
            html,
            r#"<article class="item {}" data-id="{}">"#,
            self.theme.css_class(),
            escape_html(&item.id)
        );

        if self.layout.is_leaflet() {
            html.push_str(&self.render_image(item, assets.image_src.as_deref()));
        }

        html.push_str(&self.render_code(&assets.code));

        let _ = write!(
            html,
            r#"<div class="meta"><h2 class="name">{}</h2><p class="artist">{}</p><p class="price">{}</p></div>"#,
            escape_html(&item.name),
            escape_html(&item.artist),
            escape_html(&format_price(&item.price, self.currency_glyph))
        );

        html.push_str("</article>");
        html
    }

    /// Image-only block used on the reverse side of a double-sided sheet.
    pub fn render_back(&self, item: &PrintableItem, assets: &ItemAssets) -> String {
        format!(
            r#"<article class="item back {}" data-id="{}">{}</article>"#,
            self.theme.css_class(),
            escape_html(&item.id),
            self.render_image(item, assets.image_src.as_deref())
        )
    }

    fn render_code(&self, code: &CodeImage) -> String {
        match code {
            CodeImage::Persisted(url) => format!(
                r#"<div class="code"><img src="{}" alt="Scan for details"></div>"#,
                escape_html(&resolve_asset_url(&self.site_origin, url))
            ),
            CodeImage::Generated(svg) => format!(r#"<div class="code">{}</div>"#, svg),
            CodeImage::Pending(_) => format!(
                r#"<div class="code code-pending" style="border:2px dashed #999"><span>{}</span></div>"#,
                PLACEHOLDER_CAPTION
            ),
        }
    }

    fn render_image(&self, item: &PrintableItem, src: Option<&str>) -> String {
        match src {
            Some(src) => format!(
                r#"<div class="image"><img src="{}" alt="{}"></div>"#,
                escape_html(src),
                escape_html(&item.name)
            ),
            None => r#"<div class="image image-missing" style="border:2px dashed #999"><span>No image</span></div>"#
                .to_string(),
        }
    }

    pub fn render_page(&self, page: &Page, assets: &HashMap<String, ItemAssets>) -> RenderedPage {
        let mut front = String::new();
        let mut back = String::new();

        for item in &page.items {
            let item_assets = assets.get(&item.id).cloned().unwrap_or_else(|| ItemAssets {
                code: CodeImage::Pending("not resolved".to_string()),
                image_src: self.image_source(item),
            });
            front.push_str(&self.render_front(item, &item_assets));
            back.push_str(&self.render_back(item, &item_assets));
        }

        RenderedPage {
            number: page.number,
            item_count: page.items.len(),
            front_html: front,
            back_html: back,
        }
    }
}
