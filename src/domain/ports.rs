use crate::domain::model::{PrintDocument, PrintableItem};
use crate::domain::settings::ExportSettings;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_endpoint(&self) -> &str;
    fn output_path(&self) -> &str;
    fn export_settings(&self) -> ExportSettings;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<PrintableItem>>;
    async fn transform(&self, items: Vec<PrintableItem>) -> Result<PrintDocument>;
    async fn load(&self, document: PrintDocument) -> Result<String>;
}
