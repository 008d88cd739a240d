//! Macro routes
//!
//! ```text
//! GET    /macros          -> list
//! POST   /macros          -> create
//! POST   /macros/reorder  -> reorder
//! GET    /macros/{id}     -> read
//! PUT    /macros/{id}     -> update
//! DELETE /macros/{id}     -> delete
//! ```

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use gsender_macros::{Listing, MacroMove, MacroPatch, MacroRecord, NewMacro};
use serde_json::{json, Value};

use super::{ok_body, ListQuery};
use crate::error::ApiResult;
use crate::state::AppState;

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Listing<MacroRecord>>> {
    Ok(Json(state.macros.list(query.paging())?))
}

async fn create(State(state): State<AppState>, Json(input): Json<NewMacro>) -> ApiResult<Json<Value>> {
    let record = state.macros.create(input)?;
    Ok(Json(json!({ "macro": record })))
}

async fn read(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<MacroRecord>> {
    Ok(Json(state.macros.read(&id)?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<MacroPatch>,
) -> ApiResult<Json<Value>> {
    state.macros.update(&id, patch)?;
    Ok(Json(ok_body()))
}

async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    state.macros.delete(&id)?;
    Ok(Json(ok_body()))
}

async fn reorder(State(state): State<AppState>, Json(movement): Json<MacroMove>) -> ApiResult<Json<Value>> {
    let records = state.macros.reorder(movement)?;
    Ok(Json(json!({ "records": records })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/macros", get(list).post(create))
        .route("/macros/reorder", post(reorder))
        .route("/macros/{id}", get(read).put(update).delete(delete))
}
