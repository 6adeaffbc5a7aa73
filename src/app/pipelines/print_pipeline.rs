use crate::adapters::catalog_api::CatalogClient;
use crate::core::assemble::{assemble, AssembleOptions};
use crate::core::capacity::{resolve_layout, resolve_page_size};
use crate::core::codes::resolve_codes_sequential;
use crate::core::images::embed_images_sequential;
use crate::core::partition::{partition, sort_square_first};
use crate::core::render::{ItemAssets, ItemRenderer, Theme};
use crate::core::selection::Selection;
use crate::core::{ConfigProvider, Pipeline, PrintDocument, PrintableItem, Storage};
use crate::domain::model::CodeImage;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::time::Duration;

/// Catalog → selection → pages → HTML print document.
pub struct PrintPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) catalog: CatalogClient,
}

impl<S: Storage, C: ConfigProvider> PrintPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let catalog = CatalogClient::new(config.catalog_endpoint());
        Self {
            storage,
            config,
            catalog,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PrintPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<PrintableItem>> {
        let items = self.catalog.fetch_items().await?;
        let settings = self.config.export_settings();

        if settings.selected_ids.is_empty() {
            return Ok(items);
        }

        let selection = Selection::from_ids(settings.selected_ids.iter().cloned());
        let chosen = selection.apply(items);
        tracing::debug!("Selection kept {} of {} ids", chosen.len(), selection.len());
        Ok(chosen)
    }

    async fn transform(&self, mut items: Vec<PrintableItem>) -> Result<PrintDocument> {
        let settings = self.config.export_settings();
        let layout = resolve_layout(&settings.layout);
        let page_size = resolve_page_size(&settings.page_size);
        let theme = Theme::from_key(&settings.theme);
        let throttle = Duration::from_millis(settings.throttle_ms);

        if layout.is_leaflet() {
            sort_square_first(&mut items);
        }

        let pages = partition(&items, layout.items_per_page());
        tracing::debug!(
            "Partitioned {} items into {} pages of up to {}",
            items.len(),
            pages.len(),
            layout.items_per_page()
        );

        let renderer = ItemRenderer::new(
            theme,
            layout,
            settings.currency_glyph,
            &settings.site_origin,
        );

        let mut codes = resolve_codes_sequential(
            &items,
            &settings.site_origin,
            &settings.collection_route,
            throttle,
        )
        .await;

        let sources: HashMap<String, String> = items
            .iter()
            .filter_map(|item| renderer.image_source(item).map(|src| (item.id.clone(), src)))
            .collect();

        let mut embedded = if settings.embed_images {
            embed_images_sequential(self.catalog.http(), &items, &sources, throttle)
                .await
                .data_uris
        } else {
            HashMap::new()
        };

        let assets: HashMap<String, ItemAssets> = items
            .iter()
            .map(|item| {
                let code = codes
                    .remove(&item.id)
                    .unwrap_or_else(|| CodeImage::Pending("not resolved".to_string()));
                let image_src = embedded
                    .remove(&item.id)
                    .or_else(|| sources.get(&item.id).cloned());
                (item.id.clone(), ItemAssets { code, image_src })
            })
            .collect();

        let pending_codes = assets.values().filter(|a| a.code.is_pending()).count();

        let rendered: Vec<_> = pages
            .iter()
            .map(|page| renderer.render_page(page, &assets))
            .collect();

        let options = AssembleOptions {
            page_size,
            layout,
            theme,
            double_sided: settings.double_sided,
            ..AssembleOptions::default()
        };

        let mut document = assemble(&rendered, &options);
        document.pending_codes = pending_codes;
        Ok(document)
    }

    async fn load(&self, document: PrintDocument) -> Result<String> {
        let settings = self.config.export_settings();
        let output_path = format!("{}/{}", self.config.output_path(), settings.output_file);

        tracing::debug!(
            "Writing print document ({} bytes) to storage",
            document.html.len()
        );
        self.storage
            .write_file(&settings.output_file, document.html.as_bytes())
            .await?;

        Ok(output_path)
    }
}
