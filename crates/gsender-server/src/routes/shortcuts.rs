//! Shortcut set routes
//!
//! ```text
//! GET /shortcuts  -> stored records, or the built-in set
//! PUT /shortcuts  -> replace the stored set; 400 when active shortcuts share keys
//! ```

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use gsender_shortcuts::{active_collisions, ShortcutRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ok_body;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortcutSet {
    pub records: Vec<ShortcutRecord>,
}

async fn fetch(State(state): State<AppState>) -> Json<ShortcutSet> {
    Json(ShortcutSet {
        records: state.shortcuts.load_or_builtin(),
    })
}

async fn replace(State(state): State<AppState>, Json(set): Json<ShortcutSet>) -> ApiResult<Json<Value>> {
    let conflicts = active_collisions(&set.records);
    if !conflicts.is_empty() {
        return Err(ApiError::ShortcutConflict(conflicts));
    }
    state.shortcuts.save(&set.records)?;
    Ok(Json(ok_body()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/shortcuts", get(fetch).put(replace))
}
