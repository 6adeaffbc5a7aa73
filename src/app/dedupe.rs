use crate::adapters::catalog_api::CatalogClient;
use crate::core::bulk::{bulk_delete, BulkOutcome};
use crate::core::duplicates::{find_duplicate_sets, select_all_duplicates, DuplicateSet};
use crate::utils::error::Result;

#[derive(Debug)]
pub struct DedupeReport {
    pub sets: Vec<DuplicateSet>,
    pub selected: Vec<String>,
}

pub async fn scan(catalog: &CatalogClient) -> Result<DedupeReport> {
    let items = catalog.fetch_items().await?;
    let sets = find_duplicate_sets(&items);
    let selected = select_all_duplicates(&sets);
    tracing::info!(
        "Scanned {} items: {} duplicate sets, {} removable",
        items.len(),
        sets.len(),
        selected.len()
    );
    Ok(DedupeReport { sets, selected })
}

/// Deletes every non-original duplicate, then rescans the catalog so the
/// caller sees what is actually left rather than what was intended.
pub async fn delete_duplicates(
    catalog: &CatalogClient,
    report: &DedupeReport,
) -> Result<(BulkOutcome, DedupeReport)> {
    let outcome = bulk_delete(catalog, report.selected.clone()).await;
    let refreshed = scan(catalog).await?;
    Ok((outcome, refreshed))
}
