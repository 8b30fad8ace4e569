//! Fetching a catalog from a file or an HTTP endpoint and mounting it.

use std::io::Write;
use std::time::Instant;

use catalog_nav::app::state::{AppState, LoadState};
use catalog_nav::config::AppConfig;
use catalog_nav::core::catalog::Id;
use catalog_nav::core::provider::{CatalogSource, FetchError};
use ratatui::layout::Rect;

const BODY: &str = r#"{
    "categories": [
        {
            "id": 1, "title": "Hair",
            "items": [{"id": 10, "title": "Cut", "price": 500}],
            "subcategories": [
                {"id": 11, "title": "Color", "items": [{"id": 12, "title": "Dye"}]},
                {"id": 13, "title": "Care", "items": [{"id": 14, "title": "Mask"}]}
            ]
        },
        {"id": 2, "title": "Nails", "items": [{"id": 20, "title": "Polish"}]}
    ]
}"#;

fn state(hint: Option<&str>) -> AppState {
    let mut state = AppState::new("test".into(), AppConfig::default(), hint.map(Id::from));
    state.terminal_area = Rect::new(0, 0, 60, 30);
    state
}

#[tokio::test]
async fn file_source_loads_and_mounts() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BODY.as_bytes()).unwrap();

    let source = CatalogSource::parse(file.path().to_str().unwrap());
    let catalog = source.fetch().await.unwrap();
    assert_eq!(catalog.categories().len(), 2);

    let mut state = state(None);
    state.finish_load(Ok(catalog), Instant::now());
    assert_eq!(state.load, LoadState::Ready);

    let sync = state.sync.as_ref().unwrap();
    assert_eq!(sync.selection().active_category(), Some(&Id::from("1")));
    assert_eq!(sync.selection().active_subcategory(), Some(&Id::from("11")));
}

#[tokio::test]
async fn http_source_posts_and_decodes() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/services")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(BODY)
        .create_async()
        .await;

    let source = CatalogSource::parse(&format!("{}/api/services", server.url()));
    let catalog = source.fetch().await.unwrap();
    mock.assert_async().await;

    assert_eq!(catalog.item(&Id::from("14")).map(|i| i.title.as_str()), Some("Mask"));
}

#[tokio::test]
async fn http_error_status_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(500)
        .create_async()
        .await;

    let source = CatalogSource::Http(format!("{}/", server.url()));
    let err = source.fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Status(s) if s.as_u16() == 500));

    // The view shows the failure and never mounts an engine.
    let mut state = state(None);
    state.finish_load(Err(err), Instant::now());
    assert!(state.load.error().unwrap().contains("500"));
    assert!(state.sync.is_none());
    assert!(state.catalog().is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body("<html>oops</html>")
        .create_async()
        .await;

    let err = CatalogSource::Http(server.url()).fetch().await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn category_hint_opens_at_that_category() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(BODY.as_bytes()).unwrap();
    let catalog = CatalogSource::File(file.path().to_path_buf())
        .fetch()
        .await
        .unwrap();

    let mut state = state(Some("2"));
    state.finish_load(Ok(catalog), Instant::now());

    let sync = state.sync.as_ref().unwrap();
    assert_eq!(sync.selection().active_category(), Some(&Id::from("2")));
    assert_eq!(sync.selection().active_subcategory(), None);
    assert!(!sync.shows_subcategory_bar());
}
