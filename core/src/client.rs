//! Stateless HTTP request builder and response parser for the data-item API.
//!
//! # Design
//! `ItemClient` holds only a `base_url` and carries no mutable state between
//! calls. Each REST operation is split into a `build_*` method that produces
//! an `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The host executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.
//!
//! Status handling follows the wire contract rather than exact-status
//! matching: any 2xx is success, 404 maps to `ApiError::NotFound`, and
//! everything else maps to `ApiError::Request` with the server's message
//! extracted from a JSON error body when one is present.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{DataItem, ItemPatch, NewDataItem};

/// Synchronous, stateless client for the data-item API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The host is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct ItemClient {
    base_url: String,
}

impl ItemClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_create(&self, input: &NewDataItem) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/data", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/data", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/data/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_update(&self, id: i64, patch: &ItemPatch) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(patch).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: format!("{}/data/{id}", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/data/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Part of the external contract but not exercised by any form.
    pub fn build_batch_get(&self, ids: &[i64]) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(&serde_json::json!({ "ids": ids }))
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/data/batch", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<DataItem, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<DataItem>, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<DataItem, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<DataItem, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Success has no body.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_success(&response)
    }

    pub fn parse_batch_get(&self, response: HttpResponse) -> Result<Vec<DataItem>, ApiError> {
        check_success(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_success(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Request {
        status: response.status,
        message: extract_message(&response.body),
    })
}

/// Pull the `message` field out of a JSON error body; fall back to the raw
/// body text for servers that answer with plain text.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ItemClient {
        ItemClient::new("http://localhost:3001/api")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_produces_correct_request() {
        let req = client().build_list();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3001/api/data");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_produces_correct_request() {
        let req = client().build_get(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3001/api/data/42");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_produces_correct_request() {
        let input = NewDataItem {
            name: "A".to_string(),
            description: "d".to_string(),
            value: 5.0,
        };
        let req = client().build_create(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3001/api/data");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "A");
        assert_eq!(body["description"], "d");
        assert_eq!(body["value"], 5.0);
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_update_omits_unset_fields() {
        let patch = ItemPatch {
            value: Some(9.0),
            ..ItemPatch::default()
        };
        let req = client().build_update(7, &patch).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:3001/api/data/7");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["value"], 9.0);
        assert!(body.get("name").is_none());
    }

    #[test]
    fn build_delete_produces_correct_request() {
        let req = client().build_delete(7);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.url, "http://localhost:3001/api/data/7");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_batch_get_wraps_ids() {
        let req = client().build_batch_get(&[1, 2, 3]).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3001/api/data/batch");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "ids": [1, 2, 3] }));
    }

    #[test]
    fn parse_list_success() {
        let body = r#"[{"id":1,"name":"A","description":"d","value":5}]"#;
        let items = client().parse_list(response(200, body)).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, Some(1));
        assert_eq!(items[0].value, 5.0);
    }

    #[test]
    fn parse_create_accepts_201() {
        let body = r#"{"id":9,"name":"A","description":"d","value":5,"createdAt":"t"}"#;
        let item = client().parse_create(response(201, body)).unwrap();
        assert_eq!(item.id, Some(9));
        assert_eq!(item.created_at.as_deref(), Some("t"));
    }

    #[test]
    fn parse_get_not_found() {
        let err = client().parse_get(response(404, "")).unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }

    #[test]
    fn parse_error_extracts_json_message() {
        let err = client()
            .parse_create(response(400, r#"{"message":"name must not be empty"}"#))
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Request {
                status: 400,
                message: "name must not be empty".to_string(),
            }
        );
    }

    #[test]
    fn parse_error_falls_back_to_raw_body() {
        let err = client().parse_list(response(500, "boom")).unwrap_err();
        assert_eq!(
            err,
            ApiError::Request {
                status: 500,
                message: "boom".to_string(),
            }
        );
    }

    #[test]
    fn parse_delete_accepts_no_content() {
        assert!(client().parse_delete(response(204, "")).is_ok());
    }

    #[test]
    fn parse_delete_not_found() {
        let err = client().parse_delete(response(404, "")).unwrap_err();
        assert_eq!(err, ApiError::NotFound);
    }

    #[test]
    fn parse_list_bad_json() {
        let err = client().parse_list(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ItemClient::new("http://localhost:3001/api/");
        let req = client.build_list();
        assert_eq!(req.url, "http://localhost:3001/api/data");
    }
}
