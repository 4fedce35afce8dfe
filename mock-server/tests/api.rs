use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, DataItem};
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

/// Create an item against `app` and return it.
async fn create(app: &axum::Router, name: &str, value: f64) -> DataItem {
    let body = serde_json::json!({
        "name": name,
        "description": "test item",
        "value": value,
    });
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/data", &body.to_string()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await
}

// --- list ---

#[tokio::test]
async fn list_items_empty() {
    let app = app();
    let resp = app.oneshot(get_request("/api/data")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<DataItem> = body_json(resp).await;
    assert!(items.is_empty());
}

// --- create ---

#[tokio::test]
async fn create_item_assigns_sequential_ids_and_timestamps() {
    let app = app();
    let first = create(&app, "first", 5.0).await;
    let second = create(&app, "second", 6.0).await;

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert!(!first.created_at.is_empty());
    assert_eq!(first.created_at, first.updated_at);
}

#[tokio::test]
async fn create_item_rejects_empty_name_with_message() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/data",
            r#"{"name":"","description":"d","value":1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "name must not be empty");
}

#[tokio::test]
async fn create_item_rejects_empty_description_with_message() {
    let app = app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/api/data",
            r#"{"name":"A","description":"  ","value":1}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "description must not be empty");
}

#[tokio::test]
async fn create_item_malformed_json_returns_422() {
    let app = app();
    let resp = app
        .oneshot(json_request("POST", "/api/data", r#"{"not_name":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- get ---

#[tokio::test]
async fn get_item_returns_created_item() {
    let app = app();
    let created = create(&app, "A", 5.0).await;

    let resp = app
        .oneshot(get_request(&format!("/api/data/{}", created.id)))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: DataItem = body_json(resp).await;
    assert_eq!(fetched.id, created.id);
    assert_eq!(fetched.name, "A");
    assert_eq!(fetched.value, 5.0);
}

#[tokio::test]
async fn get_unknown_item_returns_404_with_message() {
    let app = app();
    let resp = app.oneshot(get_request("/api/data/99")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["message"], "no item with id 99");
}

// --- update ---

#[tokio::test]
async fn update_item_applies_only_present_fields() {
    let app = app();
    let created = create(&app, "A", 5.0).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/data/{}", created.id),
            r#"{"value":9}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let updated: DataItem = body_json(resp).await;
    assert_eq!(updated.value, 9.0);
    assert_eq!(updated.name, "A");
    assert_eq!(updated.description, "test item");
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn update_unknown_item_returns_404() {
    let app = app();
    let resp = app
        .oneshot(json_request("PUT", "/api/data/99", r#"{"value":9}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_item_returns_204_with_empty_body() {
    let app = app();
    let created = create(&app, "A", 5.0).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/data/{}", created.id),
            "",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());

    let resp = app
        .oneshot(get_request(&format!("/api/data/{}", created.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_item_twice_returns_404() {
    let app = app();
    let created = create(&app, "A", 5.0).await;
    let uri = format!("/api/data/{}", created.id);

    let resp = app
        .clone()
        .oneshot(json_request("DELETE", &uri, ""))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = app.oneshot(json_request("DELETE", &uri, "")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- batch ---

#[tokio::test]
async fn batch_get_skips_unknown_ids() {
    let app = app();
    let first = create(&app, "first", 5.0).await;
    let _second = create(&app, "second", 6.0).await;

    let body = serde_json::json!({ "ids": [first.id, 99] });
    let resp = app
        .oneshot(json_request("POST", "/api/data/batch", &body.to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let items: Vec<DataItem> = body_json(resp).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, first.id);
}
