use crate::adapters::catalog_api::CatalogClient;
use crate::core::codes::{code_payload_url, generate_svg};
use crate::core::{PrintableItem, Storage};
use crate::utils::error::{PrintError, Result};
use std::time::Duration;

pub const CODES_DIR: &str = "codes";

/// Outcome of a code generation run.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchSummary {
    pub generated: Vec<String>,
    pub skipped: Vec<String>,
    pub not_found: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl BatchSummary {
    pub fn summary(&self) -> String {
        format!(
            "{} generated, {} already had codes, {} not found, {} failed",
            self.generated.len(),
            self.skipped.len(),
            self.not_found.len(),
            self.failed.len()
        )
    }

    pub fn has_errors(&self) -> bool {
        !self.not_found.is_empty() || !self.failed.is_empty()
    }
}

pub struct CodeGenerator<'a, S: Storage> {
    pub catalog: &'a CatalogClient,
    pub storage: &'a S,
    pub site_origin: &'a str,
    pub collection_route: &'a str,
    pub throttle: Duration,
}

/// Slugs come from the catalog and become file names, so only plain names pass.
fn is_safe_file_stem(stem: &str) -> bool {
    !stem.is_empty()
        && !stem.starts_with('.')
        && !stem.contains(['/', '\\', '\0', ':'])
}

impl<S: Storage> CodeGenerator<'_, S> {
    /// Site-relative reference stored on the record for a generated code.
    pub fn reference_for(item: &PrintableItem) -> Result<String> {
        let stem = item.route_key();
        if !is_safe_file_stem(stem) {
            return Err(PrintError::CodeImageError {
                id: item.id.clone(),
                message: format!("'{}' is not usable as a file name", stem),
            });
        }
        Ok(format!("/{}/{}.svg", CODES_DIR, stem))
    }

    /// Generates, stores and records a code for every item that lacks one.
    ///
    /// Items are handled one at a time with a pause in between. A failure on
    /// one item is recorded and the run moves on.
    pub async fn generate_missing(&self, items: &[PrintableItem]) -> BatchSummary {
        let mut summary = BatchSummary::default();
        let pending: Vec<&PrintableItem> = items
            .iter()
            .filter(|item| {
                if item.has_persisted_code() {
                    summary.skipped.push(item.id.clone());
                    false
                } else {
                    true
                }
            })
            .collect();

        tracing::info!(
            "Generating codes for {} items ({} already have one)",
            pending.len(),
            summary.skipped.len()
        );

        for (index, item) in pending.iter().enumerate() {
            match self.generate_one(item).await {
                Ok(()) => summary.generated.push(item.id.clone()),
                Err(PrintError::NotFound { id }) => {
                    tracing::warn!("Item {} disappeared before its code was recorded", id);
                    summary.not_found.push(id);
                }
                Err(e) => {
                    tracing::warn!("Code generation failed for {}: {}", item.id, e);
                    summary.failed.push((item.id.clone(), e.to_string()));
                }
            }

            if index + 1 < pending.len() && !self.throttle.is_zero() {
                tokio::time::sleep(self.throttle).await;
            }
        }

        tracing::info!("Code generation: {}", summary.summary());
        summary
    }

    /// Looks each id up on the catalog, then generates codes for the ones that exist.
    pub async fn generate_for_ids(&self, ids: &[String]) -> BatchSummary {
        let mut items = Vec::with_capacity(ids.len());
        let mut lookup = BatchSummary::default();

        for id in ids {
            match self.catalog.fetch_item(id).await {
                Ok(item) => items.push(item),
                Err(PrintError::NotFound { id }) => {
                    tracing::warn!("Item {} is not in the catalog", id);
                    lookup.not_found.push(id);
                }
                Err(e) => {
                    tracing::warn!("Could not load item {}: {}", id, e);
                    lookup.failed.push((id.clone(), e.to_string()));
                }
            }
        }

        let mut summary = self.generate_missing(&items).await;
        summary.not_found.extend(lookup.not_found);
        summary.failed.extend(lookup.failed);
        summary
    }

    async fn generate_one(&self, item: &PrintableItem) -> Result<()> {
        let reference = Self::reference_for(item)?;
        let payload = code_payload_url(self.site_origin, self.collection_route, item);
        tracing::debug!("Encoding {} for {}", payload, item.id);
        let svg = generate_svg(&item.id, &payload)?;

        let file = reference.trim_start_matches('/');
        self.storage.write_file(file, svg.as_bytes()).await?;
        self.catalog.update_code_image(&item.id, &reference).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use httpmock::prelude::*;
    use httpmock::Method::PATCH;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_generate_missing_records_each_outcome() {
        let server = MockServer::start();
        let patch_a = server.mock(|when, then| {
            when.method(PATCH)
                .path("/api/artworks/a")
                .json_body(serde_json::json!({"qrCodeUrl": "/codes/alpha.svg"}));
            then.status(200);
        });
        server.mock(|when, then| {
            when.method(PATCH).path("/api/artworks/gone");
            then.status(404);
        });

        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        let catalog = CatalogClient::new(&server.url("/api/artworks"));

        let mut alpha = PrintableItem::new("a", "Alpha");
        alpha.slug = Some("alpha".to_string());
        let mut beta = PrintableItem::new("b", "Beta");
        beta.qr_code_url = Some("/codes/beta.svg".to_string());
        let gone = PrintableItem::new("gone", "Gone");

        let generator = CodeGenerator {
            catalog: &catalog,
            storage: &storage,
            site_origin: "https://gallery.example",
            collection_route: "artworks",
            throttle: Duration::ZERO,
        };
        let summary = generator.generate_missing(&[alpha, beta, gone]).await;

        patch_a.assert();
        assert_eq!(summary.generated, vec!["a"]);
        assert_eq!(summary.skipped, vec!["b"]);
        assert_eq!(summary.not_found, vec!["gone"]);
        assert!(summary.failed.is_empty());
        assert!(summary.has_errors());
        assert!(temp_dir.path().join("codes/alpha.svg").exists());
    }

    #[tokio::test]
    async fn test_unsafe_slugs_are_not_written() {
        let server = MockServer::start();
        let patch = server.mock(|when, then| {
            when.method(PATCH).path("/api/artworks/1");
            then.status(200);
        });

        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("public");
        let storage = LocalStorage::new(base.to_str().unwrap().to_string());
        let catalog = CatalogClient::new(&server.url("/api/artworks"));

        let mut escaping = PrintableItem::new("1", "Escaping");
        escaping.slug = Some("../../escaped".to_string());

        let generator = CodeGenerator {
            catalog: &catalog,
            storage: &storage,
            site_origin: "https://gallery.example",
            collection_route: "artworks",
            throttle: Duration::ZERO,
        };
        let summary = generator.generate_missing(&[escaping]).await;

        patch.assert_hits(0);
        assert!(summary.generated.is_empty());
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "1");
        assert!(!temp_dir.path().join("escaped.svg").exists());
        assert!(!temp_dir.path().parent().unwrap().join("escaped.svg").exists());
    }

    #[tokio::test]
    async fn test_generate_for_ids_reports_missing_items() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/artworks/5");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": 5, "name": "Five", "slug": "five"}));
        });
        server.mock(|when, then| {
            when.method(GET).path("/api/artworks/9");
            then.status(404);
        });
        let patch = server.mock(|when, then| {
            when.method(PATCH)
                .path("/api/artworks/5")
                .json_body(serde_json::json!({"qrCodeUrl": "/codes/five.svg"}));
            then.status(200);
        });

        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
        let catalog = CatalogClient::new(&server.url("/api/artworks"));
        let generator = CodeGenerator {
            catalog: &catalog,
            storage: &storage,
            site_origin: "https://gallery.example",
            collection_route: "artworks",
            throttle: Duration::ZERO,
        };

        let summary = generator
            .generate_for_ids(&["5".to_string(), "9".to_string()])
            .await;

        patch.assert();
        assert_eq!(summary.generated, vec!["5"]);
        assert_eq!(summary.not_found, vec!["9"]);
        assert!(temp_dir.path().join("codes/five.svg").exists());
    }

    #[test]
    fn test_reference_uses_slug_or_id() {
        let mut item = PrintableItem::new("7", "Seven");
        assert_eq!(
            CodeGenerator::<LocalStorage>::reference_for(&item).unwrap(),
            "/codes/7.svg"
        );
        item.slug = Some("harbour".to_string());
        assert_eq!(
            CodeGenerator::<LocalStorage>::reference_for(&item).unwrap(),
            "/codes/harbour.svg"
        );
        item.slug = Some("a\\b".to_string());
        assert!(CodeGenerator::<LocalStorage>::reference_for(&item).is_err());
    }
}
