//! Integration tests for exercise endpoints

mod common;

use axum::http::StatusCode;
use common::parse;
use serde_json::json;

#[tokio::test]
async fn test_create_exercise_defaults_to_strength() {
    let app = common::TestApp::new().await;

    let (status, body) = app.post("/api/v1/exercises", &json!({ "name": "Bench Press" })).await;

    assert_eq!(status, StatusCode::CREATED);
    let exercise = parse(&body);
    assert_eq!(exercise["name"], "Bench Press");
    assert_eq!(exercise["kind"], "strength");
}

#[tokio::test]
async fn test_create_exercise_of_each_kind() {
    let app = common::TestApp::new().await;

    for kind in ["strength", "distance", "repsOnly"] {
        let (status, body) = app
            .post("/api/v1/exercises", &json!({ "name": format!("{} exercise", kind), "kind": kind }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(parse(&body)["kind"], kind);
    }

    let (_, body) = app.get("/api/v1/exercises").await;
    assert_eq!(parse(&body).as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_unknown_kind_rejected() {
    let app = common::TestApp::new().await;

    let (status, _) = app
        .post("/api/v1/exercises", &json!({ "name": "Rowing", "kind": "cardio" }))
        .await;

    assert!(status.is_client_error());
    let (_, body) = app.get("/api/v1/exercises").await;
    assert!(parse(&body).as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_change_kind() {
    let app = common::TestApp::new().await;
    let id = app.create_exercise("Push-ups", "strength").await;

    let (status, body) = app
        .patch(&format!("/api/v1/exercises/{}", id), &json!({ "kind": "repsOnly" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    let exercise = parse(&body);
    assert_eq!(exercise["kind"], "repsOnly");
    assert_eq!(exercise["name"], "Push-ups");
}

#[tokio::test]
async fn test_delete_exercise_cascades() {
    let app = common::TestApp::new().await;
    let user = app.create_user("Alex").await;
    let run = app.create_exercise("Running", "distance").await;
    let bench = app.create_exercise("Bench Press", "strength").await;

    for _ in 0..2 {
        let (status, _) = app
            .post(
                "/api/v1/records",
                &json!({ "user_id": user, "exercise_id": run, "distance": 3.0 }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    app.post(
        "/api/v1/records",
        &json!({ "user_id": user, "exercise_id": bench, "weight": 60.0 }),
    )
    .await;

    let (status, body) = app.delete(&format!("/api/v1/exercises/{}", run)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body), json!({ "deleted": true, "records_deleted": 2 }));

    let (_, body) = app.get("/api/v1/records").await;
    let records = parse(&body);
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["exercise_id"], bench);

    let (status, _) = app.delete(&format!("/api/v1/exercises/{}", run)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
