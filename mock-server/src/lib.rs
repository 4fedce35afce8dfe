//! In-memory implementation of the data-item API, used as the integration
//! test backend and as a standalone binary for manual poking.
//!
//! Ids are assigned sequentially starting at 1; `createdAt`/`updatedAt` are
//! RFC 3339 strings. Error responses carry a JSON `{"message": ...}` body,
//! which is what the client's error-banner extraction expects.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub value: f64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Deserialize)]
pub struct CreateItem {
    pub name: String,
    pub description: String,
    pub value: f64,
}

#[derive(Deserialize)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub value: Option<f64>,
}

#[derive(Deserialize)]
pub struct BatchRequest {
    pub ids: Vec<i64>,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Default)]
pub struct Store {
    items: HashMap<i64, DataItem>,
    next_id: i64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/api/data", get(list_items).post(create_item))
        .route("/api/data/batch", post(batch_get_items))
        .route(
            "/api/data/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody {
            message: message.into(),
        }),
    )
}

fn not_found(id: i64) -> (StatusCode, Json<ErrorBody>) {
    error(StatusCode::NOT_FOUND, format!("no item with id {id}"))
}

async fn list_items(State(db): State<Db>) -> Json<Vec<DataItem>> {
    let store = db.read().await;
    Json(store.items.values().cloned().collect())
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<CreateItem>,
) -> Result<(StatusCode, Json<DataItem>), (StatusCode, Json<ErrorBody>)> {
    if input.name.trim().is_empty() {
        return Err(error(StatusCode::BAD_REQUEST, "name must not be empty"));
    }
    if input.description.trim().is_empty() {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "description must not be empty",
        ));
    }

    let mut store = db.write().await;
    store.next_id += 1;
    let now = Utc::now().to_rfc3339();
    let item = DataItem {
        id: store.next_id,
        name: input.name,
        description: input.description,
        value: input.value,
        created_at: now.clone(),
        updated_at: now,
    };
    store.items.insert(item.id, item.clone());
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<DataItem>, (StatusCode, Json<ErrorBody>)> {
    let store = db.read().await;
    store
        .items
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(id))
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateItem>,
) -> Result<Json<DataItem>, (StatusCode, Json<ErrorBody>)> {
    let mut store = db.write().await;
    let item = store.items.get_mut(&id).ok_or_else(|| not_found(id))?;
    if let Some(name) = input.name {
        item.name = name;
    }
    if let Some(description) = input.description {
        item.description = description;
    }
    if let Some(value) = input.value {
        item.value = value;
    }
    item.updated_at = Utc::now().to_rfc3339();
    Ok(Json(item.clone()))
}

async fn delete_item(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<ErrorBody>)> {
    let mut store = db.write().await;
    store
        .items
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found(id))
}

/// Ids that do not exist are skipped, not errors.
async fn batch_get_items(
    State(db): State<Db>,
    Json(input): Json<BatchRequest>,
) -> Json<Vec<DataItem>> {
    let store = db.read().await;
    let items = input
        .ids
        .iter()
        .filter_map(|id| store.items.get(id).cloned())
        .collect();
    Json(items)
}
