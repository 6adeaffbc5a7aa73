use crate::domain::model::PrintableItem;
use crate::utils::error::{PrintError, Result};
use reqwest::{Client, StatusCode};

/// REST client for the gallery catalog.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    endpoint: String,
}

impl CatalogClient {
    pub fn new(endpoint: &str) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn http(&self) -> &Client {
        &self.client
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.endpoint, id)
    }

    pub async fn fetch_items(&self) -> Result<Vec<PrintableItem>> {
        tracing::debug!("Fetching catalog from: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;
        tracing::debug!("Catalog response status: {}", response.status());

        if !response.status().is_success() {
            return Err(PrintError::HttpStatus {
                status: response.status().as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let json_data: serde_json::Value = response.json().await?;
        parse_catalog(json_data)
    }

    pub async fn fetch_item(&self, id: &str) -> Result<PrintableItem> {
        let url = self.item_url(id);
        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(PrintError::NotFound { id: id.to_string() }),
            status if status.is_success() => Ok(response.json().await?),
            status => Err(PrintError::HttpStatus {
                status: status.as_u16(),
                url,
            }),
        }
    }

    pub async fn delete_item(&self, id: &str) -> Result<()> {
        let url = self.item_url(id);
        tracing::debug!("DELETE {}", url);
        let response = self.client.delete(&url).send().await?;
        check_write_status(id, &url, response.status())
    }

    /// Stores a generated code reference on the catalog record.
    pub async fn update_code_image(&self, id: &str, reference: &str) -> Result<()> {
        let url = self.item_url(id);
        tracing::debug!("PATCH {} qrCodeUrl={}", url, reference);
        let response = self
            .client
            .patch(&url)
            .json(&serde_json::json!({ "qrCodeUrl": reference }))
            .send()
            .await?;
        check_write_status(id, &url, response.status())
    }
}

fn check_write_status(id: &str, url: &str, status: StatusCode) -> Result<()> {
    match status {
        StatusCode::NOT_FOUND => Err(PrintError::NotFound { id: id.to_string() }),
        status if status.is_success() => Ok(()),
        status => Err(PrintError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        }),
    }
}

/// Accepts a bare array or an object wrapping one under `items`, `artworks` or `data`.
/// Records that do not deserialize are skipped with a warning.
pub fn parse_catalog(json_data: serde_json::Value) -> Result<Vec<PrintableItem>> {
    let records = match json_data {
        serde_json::Value::Array(records) => records,
        serde_json::Value::Object(mut obj) => ["items", "artworks", "data"]
            .iter()
            .find_map(|key| match obj.remove(*key) {
                Some(serde_json::Value::Array(records)) => Some(records),
                _ => None,
            })
            .ok_or_else(|| PrintError::ProcessingError {
                message: "Catalog response has no item array".to_string(),
            })?,
        other => {
            return Err(PrintError::ProcessingError {
                message: format!("Unexpected catalog response: {}", other),
            })
        }
    };

    let mut items = Vec::with_capacity(records.len());
    for record in records {
        match serde_json::from_value::<PrintableItem>(record) {
            Ok(item) => items.push(item),
            Err(e) => tracing::warn!("Skipping malformed catalog record: {}", e),
        }
    }

    Ok(items)
}
