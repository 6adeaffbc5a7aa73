use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ExportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ExportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting print export");

        let items = self.pipeline.extract().await?;
        tracing::info!("Extracted {} catalog items", items.len());

        let document = self.pipeline.transform(items).await?;
        tracing::info!(
            "Assembled {} sheets for {} items ({} page breaks)",
            document.page_count,
            document.item_count,
            document.break_count
        );
        if document.pending_codes > 0 {
            tracing::warn!(
                "{} items print with a placeholder instead of a code",
                document.pending_codes
            );
        }

        let output_path = self.pipeline.load(document).await?;
        tracing::info!("Print document saved to: {}", output_path);

        Ok(output_path)
    }
}
