//! Items-per-page lookup for every print layout.
//!
//! Capacity is a fixed table keyed by layout, never derived from content size
//! or page geometry. Unknown keys resolve to [`DEFAULT_ITEMS_PER_PAGE`].

pub const DEFAULT_ITEMS_PER_PAGE: usize = 6;

/// Counts a batch label sheet may be configured with.
pub const BATCH_LABEL_COUNTS: [usize; 4] = [1, 2, 4, 6];

const CUT_SHEET_ITEMS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafletVariant {
    ImageBesideText,
    ImageAboveText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Leaflet(LeafletVariant),
    BatchLabels(usize),
    /// 2×2 grid of cut-out labels.
    CutSheet,
}

impl LayoutMode {
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        match key.as_str() {
            "image-beside-text" => Some(LayoutMode::Leaflet(LeafletVariant::ImageBesideText)),
            "image-above-text" => Some(LayoutMode::Leaflet(LeafletVariant::ImageAboveText)),
            "cut-sheet" => Some(LayoutMode::CutSheet),
            _ => key
                .strip_prefix("labels-")
                .and_then(|n| n.parse::<usize>().ok())
                .map(LayoutMode::BatchLabels),
        }
    }

    pub fn items_per_page(&self) -> usize {
        match self {
            LayoutMode::Leaflet(LeafletVariant::ImageBesideText) => 6,
            LayoutMode::Leaflet(LeafletVariant::ImageAboveText) => 3,
            LayoutMode::BatchLabels(n) if BATCH_LABEL_COUNTS.contains(n) => *n,
            LayoutMode::BatchLabels(_) => DEFAULT_ITEMS_PER_PAGE,
            LayoutMode::CutSheet => CUT_SHEET_ITEMS,
        }
    }

    pub fn is_leaflet(&self) -> bool {
        matches!(self, LayoutMode::Leaflet(_))
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            LayoutMode::Leaflet(LeafletVariant::ImageBesideText) => "leaflet leaflet-beside",
            LayoutMode::Leaflet(LeafletVariant::ImageAboveText) => "leaflet leaflet-above",
            LayoutMode::BatchLabels(_) => "labels",
            LayoutMode::CutSheet => "labels cut-sheet",
        }
    }
}

impl Default for LayoutMode {
    fn default() -> Self {
        LayoutMode::Leaflet(LeafletVariant::ImageBesideText)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSize {
    A3,
    A4,
    A5,
    Custom { width_mm: f32, height_mm: f32 },
}

impl PageSize {
    /// Parses `A3`, `A4`, `A5` or `custom:<w>x<h>` (millimetres).
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        match key.to_ascii_uppercase().as_str() {
            "A3" => return Some(PageSize::A3),
            "A4" => return Some(PageSize::A4),
            "A5" => return Some(PageSize::A5),
            _ => {}
        }

        let dims = key.strip_prefix("custom:")?;
        let (w, h) = dims.split_once('x')?;
        let width_mm: f32 = w.trim().parse().ok()?;
        let height_mm: f32 = h.trim().parse().ok()?;
        if width_mm > 0.0 && height_mm > 0.0 {
            Some(PageSize::Custom {
                width_mm,
                height_mm,
            })
        } else {
            None
        }
    }

    /// Value for the CSS `@page { size: ... }` rule.
    pub fn css_size(&self) -> String {
        match self {
            PageSize::A3 => "A3".to_string(),
            PageSize::A4 => "A4".to_string(),
            PageSize::A5 => "A5".to_string(),
            PageSize::Custom {
                width_mm,
                height_mm,
            } => format!("{}mm {}mm", width_mm, height_mm),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

pub fn resolve_layout(variant_key: &str) -> LayoutMode {
    LayoutMode::from_key(variant_key).unwrap_or_else(|| {
        tracing::debug!("Unknown layout '{}', using default", variant_key);
        LayoutMode::default()
    })
}

pub fn resolve_page_size(page_size_key: &str) -> PageSize {
    PageSize::from_key(page_size_key).unwrap_or_else(|| {
        tracing::debug!("Unknown page size '{}', using A4", page_size_key);
        PageSize::default()
    })
}

/// Items per page for a page size and layout. The page size does not affect
/// the result; it is accepted so callers can resolve both keys together.
pub fn resolve_capacity(_page_size_key: &str, variant_key: &str) -> usize {
    match LayoutMode::from_key(variant_key) {
        Some(mode) => mode.items_per_page(),
        None => DEFAULT_ITEMS_PER_PAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaflet_capacities() {
        assert_eq!(resolve_capacity("A4", "image-beside-text"), 6);
        assert_eq!(resolve_capacity("A4", "image-above-text"), 3);
    }

    #[test]
    fn test_batch_label_capacities() {
        for n in BATCH_LABEL_COUNTS {
            assert_eq!(resolve_capacity("A4", &format!("labels-{}", n)), n);
        }
        assert_eq!(resolve_capacity("A4", "labels-5"), DEFAULT_ITEMS_PER_PAGE);
    }

    #[test]
    fn test_cut_sheet_is_always_four() {
        assert_eq!(resolve_capacity("A3", "cut-sheet"), 4);
        assert_eq!(resolve_capacity("custom:100x150", "cut-sheet"), 4);
    }

    #[test]
    fn test_unknown_keys_fall_back_to_default() {
        assert_eq!(resolve_capacity("Letter", "poster"), 6);
        assert_eq!(resolve_capacity("", ""), 6);
        assert_eq!(resolve_layout("poster"), LayoutMode::default());
    }

    #[test]
    fn test_page_size_parsing() {
        assert_eq!(PageSize::from_key("a5"), Some(PageSize::A5));
        assert_eq!(
            PageSize::from_key("custom:100x150"),
            Some(PageSize::Custom {
                width_mm: 100.0,
                height_mm: 150.0
            })
        );
        assert_eq!(PageSize::from_key("custom:0x150"), None);
        assert_eq!(resolve_page_size("Letter"), PageSize::A4);
        assert_eq!(resolve_page_size("custom:100x150").css_size(), "100mm 150mm");
    }
}
