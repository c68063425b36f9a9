//! Request dispatcher
//!
//! Tries the instance route shape, then the collection shape, and only then
//! falls back to static files. A path that names a registered resource never
//! becomes a file lookup, whatever its method.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::Response;
use serde_json::{json, Value};

use super::{response, route, static_files, AppState};
use crate::error::{NerdError, Result};
use crate::table::{Document, Filter, ResourceTable};

/// Fallback handler owning the whole routing decision
pub async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> Response {
    let path = uri.path();

    if let Some((name, digits)) = route::instance(path) {
        if let Some(table) = state.registry.get(name) {
            return match digits.parse::<i64>() {
                Ok(id) => instance(table, method, id, body).await,
                Err(_) => out_of_range(table.as_ref(), method, digits, &body),
            };
        }
    }

    if let Some(name) = route::collection(path) {
        if let Some(table) = state.registry.get(name) {
            return collection(table, name, method, &uri, body).await;
        }
    }

    static_files::serve(&state.doc_root, &method, path).await
}

async fn instance(
    table: Arc<dyn ResourceTable>,
    method: Method,
    id: i64,
    body: Bytes,
) -> Response {
    match method {
        Method::GET => match blocking(move || table.get_one(id)).await {
            Ok(doc) => response::json(StatusCode::OK, Value::Object(doc)),
            Err(e) => response::failure(&e),
        },
        Method::PUT => response::outcome(update(table, id, body).await),
        Method::DELETE => response::outcome(blocking(move || table.remove(id)).await),
        _ => response::invalid_method(),
    }
}

/// Instance route whose id is too large to name any row
fn out_of_range(
    table: &dyn ResourceTable,
    method: Method,
    digits: &str,
    body: &[u8],
) -> Response {
    let missing = NerdError::not_found(table.kind(), digits);
    match method {
        Method::GET => response::failure(&missing),
        Method::PUT => response::outcome(parse_document(body).and(Err(missing))),
        Method::DELETE => response::success(),
        _ => response::invalid_method(),
    }
}

async fn collection(
    table: Arc<dyn ResourceTable>,
    name: &str,
    method: Method,
    uri: &Uri,
    body: Bytes,
) -> Response {
    match method {
        Method::POST => match create(table, body).await {
            Ok(id) => response::json(StatusCode::OK, json!({ "id": id })),
            Err(e) => response::failure(&e),
        },
        Method::GET => match list(table, uri).await {
            Ok(items) => {
                let mut listing = Document::new();
                listing.insert(name.to_string(), Value::from(items));
                response::json(StatusCode::OK, Value::Object(listing))
            }
            Err(e) => response::failure(&e),
        },
        _ => response::invalid_method(),
    }
}

async fn create(table: Arc<dyn ResourceTable>, body: Bytes) -> Result<i64> {
    let doc = parse_document(&body)?;
    blocking(move || table.insert(&doc)).await
}

async fn update(table: Arc<dyn ResourceTable>, id: i64, body: Bytes) -> Result<()> {
    let doc = parse_document(&body)?;
    blocking(move || table.update(id, &doc)).await
}

async fn list(table: Arc<dyn ResourceTable>, uri: &Uri) -> Result<Vec<Document>> {
    let Query(filter) = Query::<Filter>::try_from_uri(uri)
        .map_err(|e| NerdError::MalformedInput(e.to_string()))?;
    blocking(move || table.list(&filter)).await
}

/// Parse a request body as a JSON object
fn parse_document(body: &[u8]) -> Result<Document> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(doc)) => Ok(doc),
        Ok(_) => Err(NerdError::MalformedInput(
            "expected a JSON object".to_string(),
        )),
        Err(e) => Err(NerdError::MalformedInput(e.to_string())),
    }
}

/// Run a storage call on the blocking pool
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| NerdError::Internal(format!("storage task failed: {}", e)))?
}
