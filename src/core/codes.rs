use crate::domain::model::{CodeImage, PrintableItem};
use crate::utils::error::{PrintError, Result};
use qrcode::render::svg;
use qrcode::QrCode;
use std::collections::HashMap;
use std::time::Duration;

pub const PLACEHOLDER_CAPTION: &str = "Generating…";

const CODE_MIN_DIMENSION: u32 = 200;

/// URL encoded into an item's printed code: `<origin>/<route>/<slug-or-id>`.
///
/// Labels already in the field encode this shape, so it must not change.
pub fn code_payload_url(origin: &str, collection_route: &str, item: &PrintableItem) -> String {
    format!(
        "{}/{}/{}",
        origin.trim_end_matches('/'),
        collection_route.trim_matches('/'),
        item.route_key()
    )
}

pub fn generate_svg(id: &str, payload: &str) -> Result<String> {
    let code = QrCode::new(payload.as_bytes()).map_err(|e| PrintError::CodeImageError {
        id: id.to_string(),
        message: e.to_string(),
    })?;

    let markup = code
        .render::<svg::Color>()
        .min_dimensions(CODE_MIN_DIMENSION, CODE_MIN_DIMENSION)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();

    // Inline markup must not carry the XML prolog.
    Ok(match markup.find("<svg") {
        Some(start) => markup[start..].to_string(),
        None => markup,
    })
}

/// Reuses the persisted reference when there is one, otherwise generates.
/// A failed generation becomes [`CodeImage::Pending`] so the item still prints.
pub fn resolve_code_image(origin: &str, collection_route: &str, item: &PrintableItem) -> CodeImage {
    if let Some(url) = item.qr_code_url.as_deref().filter(|u| !u.trim().is_empty()) {
        return CodeImage::Persisted(url.to_string());
    }

    let payload = code_payload_url(origin, collection_route, item);
    match generate_svg(&item.id, &payload) {
        Ok(svg) => CodeImage::Generated(svg),
        Err(e) => {
            tracing::warn!("Code generation failed for {}: {}", item.id, e);
            CodeImage::Pending(e.to_string())
        }
    }
}

/// Resolves codes one item at a time, pausing between items that needed generating.
///
/// The pause keeps the rate of generation calls bounded; it is skipped after
/// the last item and for items that reuse a persisted reference.
pub async fn resolve_codes_sequential(
    items: &[PrintableItem],
    origin: &str,
    collection_route: &str,
    throttle: Duration,
) -> HashMap<String, CodeImage> {
    let mut codes = HashMap::with_capacity(items.len());
    let total = items.len();

    for (index, item) in items.iter().enumerate() {
        let needs_generation = !item.has_persisted_code();
        let code = resolve_code_image(origin, collection_route, item);
        tracing::debug!("Code {}/{} for {}: {}", index + 1, total, item.id, describe(&code));
        codes.insert(item.id.clone(), code);

        if needs_generation && index + 1 < total && !throttle.is_zero() {
            tokio::time::sleep(throttle).await;
        }
    }

    codes
}

fn describe(code: &CodeImage) -> &'static str {
    match code {
        CodeImage::Persisted(_) => "persisted",
        CodeImage::Generated(_) => "generated",
        CodeImage::Pending(_) => "pending",
    }
}
