//! Flat blob resources
//!
//! Each resource is one store key holding an arbitrary JSON value. Reads
//! return the stored value shallow-merged over the resource defaults;
//! writes replace the value wholesale.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use gsender_store::keys;
use serde_json::{json, Value};

use super::ok_body;
use crate::error::ApiResult;
use crate::state::AppState;

/// A blob endpoint and the store key behind it
#[derive(Debug, Clone, Copy)]
pub struct BlobResource {
    pub path: &'static str,
    pub key: &'static str,
    defaults: fn() -> Value,
}

impl BlobResource {
    pub fn defaults(&self) -> Value {
        (self.defaults)()
    }
}

/// Every blob resource served under `/api`
pub const BLOB_RESOURCES: [BlobResource; 6] = [
    BlobResource {
        path: "/job-stats",
        key: keys::JOB_STATS,
        defaults: job_stats_defaults,
    },
    BlobResource {
        path: "/preferences",
        key: keys::PREFERENCES,
        defaults: preferences_defaults,
    },
    BlobResource {
        path: "/remote-settings",
        key: keys::REMOTE_SETTINGS,
        defaults: remote_settings_defaults,
    },
    BlobResource {
        path: "/maintenance",
        key: keys::MAINTENANCE,
        defaults: maintenance_defaults,
    },
    BlobResource {
        path: "/alarm-list",
        key: keys::ALARM_LIST,
        defaults: alarm_list_defaults,
    },
    BlobResource {
        path: "/metrics",
        key: keys::METRICS,
        defaults: metrics_defaults,
    },
];

fn job_stats_defaults() -> Value {
    json!({
        "totalRuntime": 0,
        "totalJobs": 0,
        "jobsFinished": 0,
        "jobsCancelled": 0,
        "jobs": []
    })
}

fn preferences_defaults() -> Value {
    json!({
        "units": "mm",
        "safeRetractHeight": 0,
        "shortcuts": { "enabled": true }
    })
}

fn remote_settings_defaults() -> Value {
    json!({
        "ip": "0.0.0.0",
        "port": 8000,
        "headlessStatus": false
    })
}

fn maintenance_defaults() -> Value {
    json!([])
}

fn alarm_list_defaults() -> Value {
    json!({ "list": [] })
}

fn metrics_defaults() -> Value {
    json!({
        "sendUsageData": false,
        "hasShownMetricsPrompt": false
    })
}

/// Overlay top-level fields of `stored` on `defaults`.
///
/// Non-object values are returned as stored.
pub fn shallow_merge(defaults: Value, stored: Option<Value>) -> Value {
    match (defaults, stored) {
        (defaults, None) => defaults,
        (Value::Object(mut merged), Some(Value::Object(stored))) => {
            merged.extend(stored);
            Value::Object(merged)
        }
        (_, Some(stored)) => stored,
    }
}

fn read_blob(state: &AppState, resource: BlobResource) -> Value {
    shallow_merge(resource.defaults(), state.store.get_value(resource.key))
}

fn write_blob(state: &AppState, resource: BlobResource, value: Value) -> ApiResult<Value> {
    state.store.set(resource.key, &value)?;
    tracing::info!(key = resource.key, "Blob replaced");
    Ok(ok_body())
}

fn blob_router(resource: BlobResource) -> Router<AppState> {
    Router::new().route(
        resource.path,
        get(move |State(state): State<AppState>| async move { Json(read_blob(&state, resource)) })
            .post(move |State(state): State<AppState>, Json(value): Json<Value>| async move {
                write_blob(&state, resource, value).map(Json)
            })
            .put(move |State(state): State<AppState>, Json(value): Json<Value>| async move {
                write_blob(&state, resource, value).map(Json)
            }),
    )
}

pub fn router() -> Router<AppState> {
    BLOB_RESOURCES
        .into_iter()
        .fold(Router::new(), |router, resource| router.merge(blob_router(resource)))
}
