//! Integration tests for workout record endpoints

mod common;

use axum::http::StatusCode;
use common::parse;
use serde_json::json;

#[tokio::test]
async fn test_log_strength_record() {
    let app = common::TestApp::new().await;
    let user = app.create_user("Alex").await;
    let bench = app.create_exercise("Bench Press", "strength").await;

    let (status, body) = app
        .post(
            "/api/v1/records",
            &json!({ "user_id": user, "exercise_id": bench, "weight": 80.0, "reps": 5, "series": 3 }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let record = parse(&body);
    assert_eq!(record["weight"], 80.0);
    assert_eq!(record["reps"], 5);
    assert_eq!(record["series"], 3);
    assert!(record.get("distance").is_none());
    assert_eq!(record["is_distance_entry"], false);
    assert_eq!(record["user_id"], user);
}

#[tokio::test]
async fn test_log_distance_record_ignores_strength_fields() {
    let app = common::TestApp::new().await;
    let user = app.create_user("Alex").await;
    let run = app.create_exercise("Running", "distance").await;

    let (status, body) = app
        .post(
            "/api/v1/records",
            &json!({
                "user_id": user, "exercise_id": run,
                "distance": 5.2, "is_indoor": false,
                "weight": 70.0, "reps": 12, "series": 4
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let record = parse(&body);
    assert_eq!(record["distance"], 5.2);
    assert_eq!(record["is_indoor"], false);
    assert_eq!(record["weight"], 0.0);
    assert_eq!(record["reps"], 0);
    assert_eq!(record["series"], 0);
    assert_eq!(record["is_distance_entry"], true);
}

#[tokio::test]
async fn test_log_reps_only_record() {
    let app = common::TestApp::new().await;
    let user = app.create_user("Alex").await;
    let pushups = app.create_exercise("Push-ups", "repsOnly").await;

    let (status, body) = app
        .post(
            "/api/v1/records",
            &json!({ "user_id": user, "exercise_id": pushups, "reps": 25, "weight": 10.0, "series": 2 }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let record = parse(&body);
    assert_eq!(record["reps"], 25);
    assert_eq!(record["weight"], 0.0);
    assert_eq!(record["series"], 0);
    assert!(record.get("distance").is_none());
}

#[tokio::test]
async fn test_zero_distance_refused() {
    let app = common::TestApp::new().await;
    let user = app.create_user("Alex").await;
    let run = app.create_exercise("Running", "distance").await;

    let (status, body) = app
        .post(
            "/api/v1/records",
            &json!({ "user_id": user, "exercise_id": run, "distance": 0.0 }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = parse(&body);
    assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(error["error"]["field"], "distance");

    let (_, body) = app.get("/api/v1/records").await;
    assert!(parse(&body).as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_selection_refused() {
    let app = common::TestApp::new().await;
    let user = app.create_user("Alex").await;
    let bench = app.create_exercise("Bench Press", "strength").await;

    let (status, body) = app
        .post("/api/v1/records", &json!({ "exercise_id": bench, "weight": 80.0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse(&body)["error"]["field"], "user_id");

    // Missing user wins over an exercise that does not exist
    let (status, body) = app
        .post(
            "/api/v1/records",
            &json!({ "exercise_id": uuid::Uuid::new_v4(), "weight": 80.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse(&body)["error"]["field"], "user_id");

    let (status, body) = app
        .post("/api/v1/records", &json!({ "user_id": user, "weight": 80.0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(parse(&body)["error"]["field"], "exercise_id");
}

#[tokio::test]
async fn test_unknown_exercise_not_found() {
    let app = common::TestApp::new().await;
    let user = app.create_user("Alex").await;

    let (status, _) = app
        .post(
            "/api/v1/records",
            &json!({ "user_id": user, "exercise_id": uuid::Uuid::new_v4(), "weight": 80.0 }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_failure_is_retryable() {
    let app = common::TestApp::new().await;
    let user = app.create_user("Alex").await;
    let bench = app.create_exercise("Bench Press", "strength").await;

    sqlx::query("DROP TABLE workout_records")
        .execute(&app.pool)
        .await
        .unwrap();

    let (status, body) = app
        .post(
            "/api/v1/records",
            &json!({ "user_id": user, "exercise_id": bench, "weight": 80.0 }),
        )
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = parse(&body);
    assert_eq!(error["error"]["code"], "SAVE_FAILED");
    assert_eq!(error["error"]["retryable"], true);
    assert_eq!(app.state.events.revision(), 2, "no event for the failed save");
}

#[tokio::test]
async fn test_list_filter_and_delete() {
    let app = common::TestApp::new().await;
    let alex = app.create_user("Alex").await;
    let sam = app.create_user("Sam").await;
    let bench = app.create_exercise("Bench Press", "strength").await;

    for user in [&alex, &sam, &alex] {
        app.post(
            "/api/v1/records",
            &json!({ "user_id": user, "exercise_id": bench, "weight": 50.0 }),
        )
        .await;
    }

    let (_, body) = app.get(&format!("/api/v1/records?user_id={}", alex)).await;
    let records = parse(&body);
    assert_eq!(records.as_array().unwrap().len(), 2);

    let id = records[0]["id"].as_str().unwrap().to_string();
    let (status, _) = app.delete(&format!("/api/v1/records/{}", id)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.delete(&format!("/api/v1/records/{}", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get("/api/v1/records").await;
    assert_eq!(parse(&body).as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_deleting_user_cascades_records() {
    let app = common::TestApp::new().await;
    let alex = app.create_user("Alex").await;
    let bench = app.create_exercise("Bench Press", "strength").await;
    app.post(
        "/api/v1/records",
        &json!({ "user_id": alex, "exercise_id": bench, "weight": 50.0 }),
    )
    .await;

    let (status, body) = app.delete(&format!("/api/v1/users/{}", alex)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["records_deleted"], 1);
    let (_, body) = app.get("/api/v1/records").await;
    assert!(parse(&body).as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_input_ranges() {
    let app = common::TestApp::new().await;

    let (status, body) = app.get("/api/v1/records/input-ranges").await;

    assert_eq!(status, StatusCode::OK);
    let ranges = parse(&body);
    assert_eq!(ranges["weight"], json!({ "min": 0.0, "max": 500.0, "step": 2.5 }));
    assert_eq!(ranges["reps"]["max"], 999.0);
    assert_eq!(ranges["series"]["max"], 50.0);
    assert_eq!(ranges["distance"]["step"], 0.5);
}
