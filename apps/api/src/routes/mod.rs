pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::puzzles::handlers;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/crosswords/preview", post(handlers::handle_preview))
        .route("/api/v1/crosswords/number", post(handlers::handle_number))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;

    fn app() -> Router {
        build_router(AppState::new(Config {
            seed: Some(17),
            ..Config::default()
        }))
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = app()
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_preview_generates_layout() {
        let (status, body) = post_json(
            "/api/v1/crosswords/preview",
            json!({
                "title": "Pets",
                "rows": 5,
                "cols": 5,
                "time_budget_secs": 0.5,
                "words": [
                    {"word": "cat", "clue": "feline"},
                    {"word": "car", "clue": "vehicle"},
                    {"word": "art", "clue": "craft"},
                    {"word": "", "clue": "dropped"}
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert_eq!(body["size"], json!({"rows": 5, "cols": 5}));
        assert_eq!(body["grid"].as_array().unwrap().len(), 5);
        assert_eq!(body["grid"][0].as_array().unwrap().len(), 5);

        let placed = body["words"].as_array().unwrap().len();
        let unplaced = body["unplaced"].as_array().unwrap().len();
        assert_eq!(placed + unplaced, 3);
        assert!(placed >= 2);
        assert!(body["words"][0]["vertical"].is_boolean());
        assert_eq!(body["numbering"]["clues"][0]["number"], 1);
    }

    #[tokio::test]
    async fn test_preview_rejects_empty_word_list() {
        let (status, body) = post_json(
            "/api/v1/crosswords/preview",
            json!({"words": [{"word": "cat", "clue": "  "}]}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_preview_rejects_zero_rows() {
        let (status, _) = post_json(
            "/api/v1/crosswords/preview",
            json!({"rows": 0, "words": [{"word": "cat", "clue": "feline"}]}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_number_endpoint() {
        let (status, body) = post_json(
            "/api/v1/crosswords/number",
            json!({
                "grid": [["C", "A", "R"], ["A", " ", " "], ["T", " ", " "]],
                "words": [
                    {"word": "CAR", "clue": "vehicle", "row": 0, "col": 0, "vertical": false},
                    {"word": "CAT", "clue": "feline", "row": 0, "col": 0, "vertical": true}
                ]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "body: {body}");
        assert_eq!(body["number_grid"][0][0], 1);
        assert_eq!(body["across"][0]["word"], "CAR");
        assert_eq!(body["down"][0]["word"], "CAT");
        assert_eq!(body["down"][0]["orientation"], "down");
    }

    #[tokio::test]
    async fn test_number_rejects_ragged_grid() {
        let (status, body) = post_json(
            "/api/v1/crosswords/number",
            json!({
                "grid": [["C", "A", "T"], ["A"]],
                "words": [{"word": "CAT", "clue": "feline", "row": 0, "col": 0, "vertical": false}]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
