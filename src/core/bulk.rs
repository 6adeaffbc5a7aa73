use crate::adapters::catalog_api::CatalogClient;
use crate::utils::error::PrintError;
use tokio::task::JoinSet;

/// Per-id results of a bulk operation. There is no rollback; a partial
/// failure leaves whatever succeeded in place.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BulkOutcome {
    pub succeeded: Vec<String>,
    pub not_found: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl BulkOutcome {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.not_found.len() + self.failed.len()
    }

    pub fn is_complete_success(&self) -> bool {
        self.not_found.is_empty() && self.failed.is_empty()
    }

    pub fn record(&mut self, id: String, result: Result<(), PrintError>) {
        match result {
            Ok(()) => self.succeeded.push(id),
            Err(PrintError::NotFound { .. }) => self.not_found.push(id),
            Err(e) => self.failed.push((id, e.to_string())),
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{} succeeded, {} not found, {} failed",
            self.succeeded.len(),
            self.not_found.len(),
            self.failed.len()
        )
    }

    fn sort(&mut self) {
        self.succeeded.sort();
        self.not_found.sort();
        self.failed.sort();
    }
}

/// Issues every delete at once and waits for all of them to settle.
pub async fn bulk_delete(client: &CatalogClient, ids: Vec<String>) -> BulkOutcome {
    let mut tasks = JoinSet::new();
    for id in ids {
        let client = client.clone();
        tasks.spawn(async move {
            let result = client.delete_item(&id).await;
            (id, result)
        });
    }

    let mut outcome = BulkOutcome::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((id, result)) => outcome.record(id, result),
            Err(e) => {
                tracing::error!("Delete task did not complete: {}", e);
                outcome.failed.push(("<unknown>".to_string(), e.to_string()));
            }
        }
    }

    outcome.sort();
    if outcome.is_complete_success() {
        tracing::info!("Bulk delete: {}", outcome.summary());
    } else {
        tracing::warn!("Bulk delete: {}", outcome.summary());
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_bulk_delete_aggregates_partial_failure() {
        let server = MockServer::start();
        let ok_a = server.mock(|when, then| {
            when.method(DELETE).path("/artworks/a");
            then.status(204);
        });
        let ok_b = server.mock(|when, then| {
            when.method(DELETE).path("/artworks/b");
            then.status(200);
        });
        server.mock(|when, then| {
            when.method(DELETE).path("/artworks/gone");
            then.status(404);
        });
        server.mock(|when, then| {
            when.method(DELETE).path("/artworks/broken");
            then.status(500);
        });

        let client = CatalogClient::new(&server.url("/artworks"));
        let ids = ["a", "gone", "b", "broken"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let outcome = bulk_delete(&client, ids).await;

        ok_a.assert();
        ok_b.assert();
        assert_eq!(outcome.succeeded, vec!["a", "b"]);
        assert_eq!(outcome.not_found, vec!["gone"]);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].0, "broken");
        assert_eq!(outcome.total(), 4);
        assert!(!outcome.is_complete_success());
    }

    #[tokio::test]
    async fn test_bulk_delete_nothing() {
        let client = CatalogClient::new("http://127.0.0.1:9/artworks");
        let outcome = bulk_delete(&client, Vec::new()).await;
        assert_eq!(outcome.total(), 0);
        assert!(outcome.is_complete_success());
    }
}
