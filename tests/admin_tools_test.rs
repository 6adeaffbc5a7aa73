use gallery_print::app::codes::CodeGenerator;
use gallery_print::app::dedupe;
use gallery_print::core::duplicates::write_report_csv;
use gallery_print::{CatalogClient, LocalStorage};
use httpmock::prelude::*;
use httpmock::Method::PATCH;
use std::time::Duration;
use tempfile::TempDir;

fn duplicated_catalog() -> serde_json::Value {
    serde_json::json!([
        {"id": "s2", "name": "sunset ", "artist": "R", "createdAt": "2024-02-02T00:00:00Z"},
        {"id": "o1", "name": "Ocean", "artist": "R", "createdAt": "2024-01-05T00:00:00Z"},
        {"id": "s1", "name": "Sunset", "artist": "R", "createdAt": "2024-02-01T00:00:00Z"},
        {"id": "s3", "name": "SUNSET", "artist": "R", "createdAt": "2024-02-03T00:00:00Z"}
    ])
}

#[tokio::test]
async fn test_duplicate_cleanup_keeps_oldest_and_rescans() {
    let server = MockServer::start();
    let mut listing = server.mock(|when, then| {
        when.method(GET).path("/api/artworks");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(duplicated_catalog());
    });
    let delete_s2 = server.mock(|when, then| {
        when.method(DELETE).path("/api/artworks/s2");
        then.status(204);
    });
    let delete_s3 = server.mock(|when, then| {
        when.method(DELETE).path("/api/artworks/s3");
        then.status(500);
    });
    let delete_s1 = server.mock(|when, then| {
        when.method(DELETE).path("/api/artworks/s1");
        then.status(204);
    });

    let catalog = CatalogClient::new(&server.url("/api/artworks"));
    let report = dedupe::scan(&catalog).await.unwrap();
    assert_eq!(report.sets.len(), 1);
    assert_eq!(report.selected, vec!["s2", "s3"]);

    // After the delete, the catalog still has s3 because its delete failed.
    listing.delete();
    server.mock(|when, then| {
        when.method(GET).path("/api/artworks");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": "o1", "name": "Ocean", "createdAt": "2024-01-05T00:00:00Z"},
                {"id": "s1", "name": "Sunset", "createdAt": "2024-02-01T00:00:00Z"},
                {"id": "s3", "name": "SUNSET", "createdAt": "2024-02-03T00:00:00Z"}
            ]));
    });

    let (outcome, refreshed) = dedupe::delete_duplicates(&catalog, &report).await.unwrap();

    delete_s2.assert();
    delete_s3.assert();
    delete_s1.assert_hits(0);
    assert_eq!(outcome.succeeded, vec!["s2"]);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(refreshed.selected, vec!["s3"]);
}

#[tokio::test]
async fn test_duplicate_report_csv_file() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/artworks");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(duplicated_catalog());
    });

    let catalog = CatalogClient::new(&server.url("/api/artworks"));
    let report = dedupe::scan(&catalog).await.unwrap();

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("duplicates.csv");
    write_report_csv(&report.sets, std::fs::File::create(&path).unwrap()).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let roles: Vec<(&str, &str)> = text
        .lines()
        .skip(1)
        .map(|line| {
            let cols: Vec<&str> = line.split(',').collect();
            (cols[1], cols[2])
        })
        .collect();
    assert_eq!(
        roles,
        vec![("original", "s1"), ("duplicate", "s2"), ("duplicate", "s3")]
    );
}

#[tokio::test]
async fn test_code_generation_persists_and_reports() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/artworks");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([
                {"id": 1, "name": "One", "slug": "one"},
                {"id": 2, "name": "Two", "qrCodeUrl": "/codes/two.svg"},
                {"id": 3, "name": "Three"}
            ]));
    });
    let patch_one = server.mock(|when, then| {
        when.method(PATCH)
            .path("/api/artworks/1")
            .json_body(serde_json::json!({"qrCodeUrl": "/codes/one.svg"}));
        then.status(200);
    });
    let patch_three = server.mock(|when, then| {
        when.method(PATCH).path("/api/artworks/3");
        then.status(502);
    });

    let temp_dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());
    let catalog = CatalogClient::new(&server.url("/api/artworks"));
    let items = catalog.fetch_items().await.unwrap();

    let generator = CodeGenerator {
        catalog: &catalog,
        storage: &storage,
        site_origin: "https://gallery.example",
        collection_route: "artworks",
        throttle: Duration::from_millis(5),
    };
    let summary = generator.generate_missing(&items).await;

    patch_one.assert();
    patch_three.assert();
    assert_eq!(summary.generated, vec!["1"]);
    assert_eq!(summary.skipped, vec!["2"]);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, "3");

    let svg = std::fs::read_to_string(temp_dir.path().join("codes/one.svg")).unwrap();
    assert!(svg.starts_with("<svg"));
    // The file for 3 is written before the record update fails.
    assert!(temp_dir.path().join("codes/3.svg").exists());
}
