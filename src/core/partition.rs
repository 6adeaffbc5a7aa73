use crate::core::capacity::DEFAULT_ITEMS_PER_PAGE;
use crate::domain::model::{Page, PrintableItem};
use regex::Regex;
use std::sync::OnceLock;

/// Splits `items` into contiguous pages of at most `per_page` items.
///
/// The last page keeps whatever is left over. An empty input gives no pages.
/// A zero capacity is a configuration mistake and falls back to the default.
pub fn partition(items: &[PrintableItem], per_page: usize) -> Vec<Page> {
    let per_page = if per_page == 0 {
        tracing::warn!(
            "Items per page is 0, falling back to {}",
            DEFAULT_ITEMS_PER_PAGE
        );
        DEFAULT_ITEMS_PER_PAGE
    } else {
        per_page
    };

    items
        .chunks(per_page)
        .enumerate()
        .map(|(index, chunk)| Page {
            number: index + 1,
            items: chunk.to_vec(),
        })
        .collect()
}

fn dimensions_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*x\s*(\d+(?:\.\d+)?)").expect("valid dimensions pattern")
    })
}

/// True when `dimensions` reads as `<w> x <h>` with equal sides.
///
/// Only a lowercase `x` separates the sides; `×` or `X` do not match.
pub fn is_square(dimensions: Option<&str>) -> bool {
    let Some(dimensions) = dimensions else {
        return false;
    };
    let Some(caps) = dimensions_pattern().captures(dimensions) else {
        return false;
    };

    match (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
        (Ok(width), Ok(height)) => width == height,
        _ => false,
    }
}

/// Moves square artworks to the front, keeping relative order in both groups.
pub fn sort_square_first(items: &mut [PrintableItem]) {
    items.sort_by_key(|item| !is_square(item.dimensions.as_deref()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<PrintableItem> {
        (1..=n)
            .map(|i| PrintableItem::new(i.to_string(), format!("Work {}", i)))
            .collect()
    }

    fn sized(id: &str, dimensions: &str) -> PrintableItem {
        let mut item = PrintableItem::new(id, id);
        item.dimensions = Some(dimensions.to_string());
        item
    }

    #[test]
    fn test_page_counts_match_ceiling_division() {
        for n in 0..=20 {
            for per_page in 1..=7 {
                let pages = partition(&items(n), per_page);
                assert_eq!(pages.len(), n.div_ceil(per_page), "n={} per_page={}", n, per_page);

                for page in pages.iter().take(n / per_page) {
                    assert_eq!(page.items.len(), per_page);
                }
                if n % per_page != 0 {
                    assert_eq!(pages.last().unwrap().items.len(), n % per_page);
                }
            }
        }
    }

    #[test]
    fn test_empty_input_has_no_pages() {
        assert!(partition(&[], 6).is_empty());
    }

    #[test]
    fn test_zero_capacity_uses_default() {
        let pages = partition(&items(13), 0);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].items.len(), DEFAULT_ITEMS_PER_PAGE);
        assert_eq!(pages[2].items.len(), 1);
    }

    #[test]
    fn test_partition_preserves_order() {
        let input = items(7);
        let pages = partition(&input, 3);
        let flattened: Vec<PrintableItem> = pages.into_iter().flat_map(|p| p.items).collect();
        assert_eq!(flattened, input);
    }

    #[test]
    fn test_page_numbers_start_at_one() {
        let pages = partition(&items(5), 2);
        let numbers: Vec<usize> = pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_square_detection() {
        assert!(is_square(Some("40 x 40 cm")));
        assert!(is_square(Some("40x40")));
        assert!(is_square(Some("40.0 x 40 cm")));
        assert!(!is_square(Some("30 x 50 cm")));
        assert!(!is_square(Some("40 × 40 cm")));
        assert!(!is_square(Some("Forty by forty")));
        assert!(!is_square(None));
    }

    #[test]
    fn test_square_sort_is_stable() {
        let mut input = vec![
            sized("a", "40 x 40 cm"),
            sized("b", "30 x 50 cm"),
            sized("c", "20 x 20 cm"),
        ];
        sort_square_first(&mut input);
        let dims: Vec<&str> = input
            .iter()
            .map(|i| i.dimensions.as_deref().unwrap())
            .collect();
        assert_eq!(dims, vec!["40 x 40 cm", "20 x 20 cm", "30 x 50 cm"]);
    }

    #[test]
    fn test_square_sort_keeps_unparseable_in_place() {
        let mut input = vec![
            PrintableItem::new("x", "no dims"),
            sized("y", "unknown"),
            sized("z", "10 x 10 cm"),
            sized("w", "12 x 8 cm"),
        ];
        sort_square_first(&mut input);
        let ids: Vec<&str> = input.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "x", "y", "w"]);
    }
}
