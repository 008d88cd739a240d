pub mod blobs;
pub mod events;
pub mod health;
pub mod macros;
pub mod shortcuts;

use axum::Router;
use gsender_macros::Paging;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::AppState;

/// Every route mounted under `/api`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(macros::router())
        .merge(events::router())
        .merge(shortcuts::router())
        .merge(blobs::router())
}

/// Body of a successful mutation
pub(crate) fn ok_body() -> Value {
    json!({ "err": null })
}

/// `?paging=&page=&pageLength=` list parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub paging: Option<String>,
    pub page: Option<usize>,
    pub page_length: Option<usize>,
}

impl ListQuery {
    /// Requested paging, if any
    ///
    /// Paging is on when `paging` is truthy or a page parameter is given.
    pub fn paging(&self) -> Option<Paging> {
        let flag = self
            .paging
            .as_deref()
            .is_some_and(|v| !matches!(v.trim(), "" | "false" | "0"));
        if !flag && self.page.is_none() && self.page_length.is_none() {
            return None;
        }
        let defaults = Paging::default();
        Some(Paging {
            page: self.page.unwrap_or(defaults.page),
            page_length: self.page_length.unwrap_or(defaults.page_length),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_flag() {
        assert_eq!(ListQuery::default().paging(), None);

        let query = ListQuery {
            paging: Some("false".to_string()),
            ..Default::default()
        };
        assert_eq!(query.paging(), None);

        let query = ListQuery {
            paging: Some("true".to_string()),
            ..Default::default()
        };
        assert_eq!(query.paging(), Some(Paging::default()));

        let query = ListQuery {
            page: Some(3),
            ..Default::default()
        };
        assert_eq!(query.paging().map(|p| p.page), Some(3));
    }
}
