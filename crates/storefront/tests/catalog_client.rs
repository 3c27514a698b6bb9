//! Integration tests for the catalog client against a mock HTTP server.

use httpmock::prelude::*;
use serde_json::json;

use pustaka_core::BookId;
use pustaka_storefront::catalog::types::BookFilters;
use pustaka_storefront::catalog::{CatalogClient, CatalogError};
use pustaka_storefront::config::CatalogConfig;

fn client_for(server: &MockServer) -> CatalogClient {
    let config = CatalogConfig::with_base_url(format!("{}/api/v1", server.base_url()));
    CatalogClient::new(&config)
}

#[tokio::test]
async fn fetch_page_normalizes_books_envelope() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/book").query_param("page", "1");
            then.status(200).json_body(json!({
                "books": [
                    {"_id": "b1", "title": "Bumi Manusia", "price": "Rp 88,000"},
                    {"_id": "b2", "title": "Pulang", "price": 65000}
                ],
                "pagination": {"total_page": 25}
            }));
        })
        .await;

    let page = client_for(&server).fetch_page(1).await.expect("page");

    mock.assert_async().await;
    assert_eq!(page.books.len(), 2);
    assert_eq!(page.books[0].price_value(), 88_000);
    assert_eq!(page.books[1].price_value(), 65_000);
    assert_eq!(page.total_pages, Some(25));
}

#[tokio::test]
async fn fetch_page_unknown_envelope_is_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/book");
            then.status(200).json_body(json!({"message": "nothing here"}));
        })
        .await;

    let page = client_for(&server).fetch_page(1).await.expect("page");
    assert!(page.books.is_empty());
    assert_eq!(page.total_pages, None);
}

#[tokio::test]
async fn fetch_page_propagates_http_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/book");
            then.status(503);
        })
        .await;

    let err = client_for(&server).fetch_page(1).await.expect_err("status error");
    assert!(matches!(err, CatalogError::Status(status) if status.as_u16() == 503));
}

#[tokio::test]
async fn fetch_page_caches_responses() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/book").query_param("page", "1");
            then.status(200).json_body(json!({"books": [{"_id": "b1"}]}));
        })
        .await;

    let client = client_for(&server);
    let first = client.fetch_page(1).await.expect("page");
    let second = client.fetch_page(1).await.expect("page");

    mock.assert_hits_async(1).await;
    assert_eq!(first.books.len(), second.books.len());
}

#[tokio::test]
async fn concurrent_fetch_deduplicates_by_identity() {
    let server = MockServer::start_async().await;
    for (page, books) in [
        (1, json!([{"_id": "b1"}, {"_id": "b2"}])),
        (2, json!([{"_id": "b2"}, {"_id": "b3"}])), // b2 repeats
        (3, json!([{"_id": "b4"}])),
    ] {
        server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/v1/book")
                    .query_param("page", page.to_string());
                then.status(200).json_body(json!({"books": books}));
            })
            .await;
    }

    let books = client_for(&server)
        .fetch_pages_concurrent(3)
        .await
        .expect("books");

    let ids: Vec<&str> = books.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec!["b1", "b2", "b3", "b4"]);
}

#[tokio::test]
async fn concurrent_fetch_is_all_or_nothing() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/book").query_param("page", "1");
            then.status(200).json_body(json!({"books": [{"_id": "b1"}]}));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/book").query_param("page", "2");
            then.status(500);
        })
        .await;

    let err = client_for(&server)
        .fetch_pages_concurrent(2)
        .await
        .expect_err("one failed page fails the whole call");
    assert!(matches!(err, CatalogError::Status(_)));
}

#[tokio::test]
async fn search_sends_only_populated_filters() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/book")
                .query_param("keyword", "sejarah")
                .query_param("sort", "newest");
            then.status(200).json_body(json!({"data": [{"_id": "b1"}]}));
        })
        .await;

    let filters = BookFilters {
        keyword: Some("sejarah".to_string()),
        genre: Some(String::new()), // blank: must not reach the query
        sort: Some("newest".to_string()),
        ..BookFilters::default()
    };
    let books = client_for(&server).search(&filters).await.expect("books");

    mock.assert_async().await;
    assert_eq!(books.len(), 1);
}

#[tokio::test]
async fn detail_backfills_nested_details() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/book/b1");
            then.status(200).json_body(json!({
                "data": {"book": {"_id": "b1", "isbn": "123", "details": {}}}
            }));
        })
        .await;

    let book = client_for(&server)
        .fetch_detail(&BookId::new("b1"))
        .await
        .expect("book");

    assert_eq!(book.details.isbn.as_deref(), Some("123"));
}

#[tokio::test]
async fn detail_missing_book_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/book/missing");
            then.status(404);
        })
        .await;

    let err = client_for(&server)
        .fetch_detail(&BookId::new("missing"))
        .await
        .expect_err("not found");
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn random_book_success_returns_some() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/random_book");
            then.status(200)
                .json_body(json!({"_id": "b9", "title": "Cantik Itu Luka"}));
        })
        .await;

    let book = client_for(&server)
        .fetch_random(None)
        .await
        .expect("no error")
        .expect("a book");
    assert_eq!(book.id, BookId::new("b9"));
}

#[tokio::test]
async fn random_book_http_status_propagates() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/random_book");
            then.status(500);
        })
        .await;

    let err = client_for(&server)
        .fetch_random(None)
        .await
        .expect_err("status error");
    assert!(matches!(err, CatalogError::Status(_)));
}

#[tokio::test]
async fn random_book_transport_failure_is_swallowed() {
    // Nothing listens here: the connection is refused.
    let config = CatalogConfig::with_base_url("http://127.0.0.1:9/api/v1");
    let client = CatalogClient::new(&config);

    let result = client.fetch_random(None).await.expect("swallowed");
    assert!(result.is_none());
}

#[tokio::test]
async fn list_failures_are_not_swallowed() {
    let config = CatalogConfig::with_base_url("http://127.0.0.1:9/api/v1");
    let client = CatalogClient::new(&config);

    let err = client.fetch_page(1).await.expect_err("transport error");
    assert!(matches!(err, CatalogError::Http(_)));
}
