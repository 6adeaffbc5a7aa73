use crate::domain::model::PrintableItem;
use crate::utils::error::{PrintError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

#[derive(Debug, Default)]
pub struct EmbeddedImages {
    pub data_uris: HashMap<String, String>,
    pub failed: Vec<String>,
}

pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}

pub async fn fetch_as_data_uri(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(PrintError::HttpStatus {
            status: response.status().as_u16(),
            url: url.to_string(),
        });
    }

    let mime = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
        .filter(|v| v.starts_with("image/"))
        .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string());

    let bytes = response.bytes().await?;
    Ok(to_data_uri(&mime, &bytes))
}

/// Downloads each item's image in turn so the document prints without network access.
///
/// `sources` maps item ids to absolute image URLs. Failures are recorded and
/// the item keeps its placeholder.
pub async fn embed_images_sequential(
    client: &Client,
    items: &[PrintableItem],
    sources: &HashMap<String, String>,
    throttle: Duration,
) -> EmbeddedImages {
    let mut embedded = EmbeddedImages::default();
    let targets: Vec<(&str, &str)> = items
        .iter()
        .filter_map(|item| {
            sources
                .get(&item.id)
                .map(|url| (item.id.as_str(), url.as_str()))
        })
        .collect();

    for (index, (id, url)) in targets.iter().enumerate() {
        match fetch_as_data_uri(client, url).await {
            Ok(uri) => {
                embedded.data_uris.insert(id.to_string(), uri);
            }
            Err(e) => {
                tracing::warn!("Could not embed image for {}: {}", id, e);
                embedded.failed.push(id.to_string());
            }
        }

        if index + 1 < targets.len() && !throttle.is_zero() {
            tokio::time::sleep(throttle).await;
        }
    }

    tracing::info!(
        "Embedded {} images ({} failed)",
        embedded.data_uris.len(),
        embedded.failed.len()
    );
    embedded
}
