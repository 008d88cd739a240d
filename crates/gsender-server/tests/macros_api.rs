//! Integration tests for the macro and event routes.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, delete, get, post, put};
use serde_json::json;

#[tokio::test]
async fn test_macro_crud_round_trip() {
    let (app, _) = build_test_app();

    let (status, body) = post(
        &app,
        "/api/macros",
        json!({"name": "Probe Z", "content": "G38.2 Z-10 F100", "description": "plate"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["macro"]["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());
    assert_eq!(body["macro"]["column"], "column1");
    assert_eq!(body["macro"]["rowIndex"], 0);

    let (status, record) = get(&app, &format!("/api/macros/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["name"], "Probe Z");
    assert_eq!(record["content"], "G38.2 Z-10 F100");

    let (status, body) = put(&app, &format!("/api/macros/{id}"), json!({"name": "Probe"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"err": null}));

    let (_, record) = get(&app, &format!("/api/macros/{id}")).await;
    assert_eq!(record["name"], "Probe");
    assert_eq!(record["description"], "plate");

    let (status, body) = delete(&app, &format!("/api/macros/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"err": null}));

    let (status, body) = get(&app, &format!("/api/macros/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"msg": "Not found"}));
}

#[tokio::test]
async fn test_create_with_blank_name_is_400() {
    let (app, _) = build_test_app();

    let (status, body) = post(&app, "/api/macros", json!({"name": " ", "content": "G0"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "The \"name\" parameter must not be empty");

    let (_, listing) = get(&app, "/api/macros").await;
    assert_eq!(listing, json!({"records": []}));
}

#[tokio::test]
async fn test_unknown_ids_are_404() {
    let (app, _) = build_test_app();
    assert_eq!(delete(&app, "/api/macros/missing").await.0, StatusCode::NOT_FOUND);
    assert_eq!(
        put(&app, "/api/macros/missing", json!({})).await.0,
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_list_paging() {
    let (app, _) = build_test_app();
    for i in 0..25 {
        post(&app, "/api/macros", json!({"name": format!("M{i}"), "content": "G0"})).await;
    }

    let (_, all) = get(&app, "/api/macros").await;
    assert_eq!(all["records"].as_array().unwrap().len(), 25);
    assert!(all.get("pagination").is_none());

    let (_, page) = get(&app, "/api/macros?paging=true&page=3&pageLength=10").await;
    assert_eq!(page["pagination"], json!({"page": 3, "pageLength": 10, "totalRecords": 25}));
    let names: Vec<&str> = page["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["M20", "M21", "M22", "M23", "M24"]);

    let (_, clamped) = get(&app, "/api/macros?paging=true&page=99&pageLength=10").await;
    assert_eq!(clamped["pagination"]["page"], 3);
}

#[tokio::test]
async fn test_reorder_route() {
    let (app, _) = build_test_app();
    let (_, a) = post(&app, "/api/macros", json!({"name": "A", "content": "G0"})).await;
    post(&app, "/api/macros", json!({"name": "B", "content": "G0"})).await;
    let id = a["macro"]["id"].as_str().unwrap();

    let (status, body) = post(
        &app,
        "/api/macros/reorder",
        json!({"id": id, "column": "column2", "index": 5}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["name"], "A");
    assert_eq!(records[1]["column"], "column2");
    assert_eq!(records[1]["rowIndex"], 1);
}

#[tokio::test]
async fn test_event_routes() {
    let (app, _) = build_test_app();

    let (status, body) = post(&app, "/api/events", json!({"event": "gcode:start"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "The \"trigger\" parameter must not be empty");

    let (status, body) = post(
        &app,
        "/api/events",
        json!({"event": "gcode:start", "trigger": "gcode", "commands": "M3 S1000"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["event"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["event"]["enabled"], true);

    let (status, _) = put(&app, &format!("/api/events/{id}"), json!({"enabled": false})).await;
    assert_eq!(status, StatusCode::OK);
    let (_, record) = get(&app, &format!("/api/events/{id}")).await;
    assert_eq!(record["enabled"], false);

    let (_, listing) = get(&app, "/api/events?paging=1").await;
    assert_eq!(listing["pagination"]["totalRecords"], 1);

    assert_eq!(delete(&app, &format!("/api/events/{id}")).await.0, StatusCode::OK);
    assert_eq!(get(&app, &format!("/api/events/{id}")).await.0, StatusCode::NOT_FOUND);
}
