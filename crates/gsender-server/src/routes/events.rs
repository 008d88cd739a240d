//! Program event routes, shaped like the macro routes

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use gsender_macros::{EventPatch, EventRecord, Listing, NewEvent};
use serde_json::{json, Value};

use super::{ok_body, ListQuery};
use crate::error::ApiResult;
use crate::state::AppState;

async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Listing<EventRecord>>> {
    Ok(Json(state.events.list(query.paging())?))
}

async fn create(State(state): State<AppState>, Json(input): Json<NewEvent>) -> ApiResult<Json<Value>> {
    let record = state.events.create(input)?;
    Ok(Json(json!({ "event": record })))
}

async fn read(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<EventRecord>> {
    Ok(Json(state.events.read(&id)?))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<EventPatch>,
) -> ApiResult<Json<Value>> {
    state.events.update(&id, patch)?;
    Ok(Json(ok_body()))
}

async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    state.events.delete(&id)?;
    Ok(Json(ok_body()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/events", get(list).post(create))
        .route("/events/{id}", get(read).put(update).delete(delete))
}
