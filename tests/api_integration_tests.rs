// API Integration Tests
//
// Purpose: Test the HTTP endpoints against the bundled Irish task calendar
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use seasonal_guide::{create_router, AppState, JsonTaskRepository, ServerConfig};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt; // for oneshot

    const SEED_FILE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/seasonal_tasks.json");

    // Helper: Create test app state
    fn create_test_app() -> axum::Router {
        let repository =
            JsonTaskRepository::from_file(SEED_FILE).expect("seed task file should load");
        let state = AppState::with_repository(Arc::new(repository), &ServerConfig::default());
        create_router(state)
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(app: axum::Router, uri: &str, body: Value) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let response = get(create_test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Task queries
    // =========================================================================

    #[tokio::test]
    async fn test_list_tasks_with_filters() {
        let uri = "/api/tasks?month=6&climate_zone=ireland&plant_types=herb";
        let response = get(create_test_app(), uri).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["rows"], 1);
        assert_eq!(body["data"][0]["id"], "ie-012");
        assert_eq!(body["data"][0]["priority"], "high");
    }

    #[tokio::test]
    async fn test_list_tasks_rejects_unknown_priority() {
        let response = get(create_test_app(), "/api/tasks?priority=urgent").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("urgent"));
    }

    #[tokio::test]
    async fn test_search_tasks() {
        let response = get(create_test_app(), "/api/tasks/search?q=MULCH").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["rows"], 1);
        assert_eq!(body["data"][0]["id"], "ie-006");
    }

    #[tokio::test]
    async fn test_blank_search_returns_every_filtered_task() {
        let response = get(create_test_app(), "/api/tasks/search?q=&month=4").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["rows"], 3);

        let response = get(create_test_app(), "/api/tasks/search?q=%20%20").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["rows"], 26);
    }

    #[tokio::test]
    async fn test_tasks_by_category_and_priority() {
        let response = get(create_test_app(), "/api/tasks/category/harvesting?month=9").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["rows"], 1);

        let response = get(create_test_app(), "/api/tasks/priority/low").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        for task in body["data"].as_array().unwrap() {
            assert_eq!(task["priority"], "low");
        }

        let response = get(create_test_app(), "/api/tasks/category/pruning").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    // =========================================================================
    // Section 3: Per-user guidance
    // =========================================================================

    #[tokio::test]
    async fn test_recommendations() {
        let context = serde_json::json!({
            "user_plants": ["herb"],
            "current_month": 6,
            "climate_zone": "ireland"
        });
        let response = post_json(create_test_app(), "/api/recommendations", context).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        let data = body["data"].as_array().unwrap();
        assert!(data.len() <= 10);
        assert_eq!(data[0]["task"]["id"], "ie-012");
        assert_eq!(data[0]["relevance_score"], 105);
        assert_eq!(data[0]["urgency"], "immediate");
        assert_eq!(data[0]["user_plant_match"], true);
    }

    #[tokio::test]
    async fn test_current_month_guide() {
        let context = serde_json::json!({
            "user_plants": ["herb", "vegetable"],
            "current_month": 3,
            "climate_zone": "ireland"
        });
        let response = post_json(create_test_app(), "/api/guide/current", context).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["current_month"].as_array().unwrap().len(), 2);
        assert!(body["upcoming_tasks"].as_array().unwrap().len() <= 5);
        assert_eq!(body["seasonal_tips"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_monthly_summary() {
        let response = get(create_test_app(), "/api/summary/4?climate_zone=ireland").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["month"], 4);
        assert_eq!(body["total_tasks"], 3);
        assert_eq!(body["completed_tasks"], 0);
        assert_eq!(body["tasks_by_category"]["planting"], 2);
        assert_eq!(body["tasks_by_category"]["harvesting"], 0);
    }

    #[tokio::test]
    async fn test_monthly_summary_rejects_non_numeric_month() {
        let response = get(create_test_app(), "/api/summary/june?climate_zone=ireland").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("june"));
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let response =
            post_json(create_test_app(), "/api/cache/clear", serde_json::json!({})).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_response(response).await;
        assert_eq!(body["cleared"], true);
    }
}
