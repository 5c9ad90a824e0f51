use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::signup::SignupPayload;
use crate::services::credentials::{self, CredentialError};
use crate::state::AppState;

pub async fn handle_signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupPayload>,
) -> Result<Response, CredentialError> {
    let user = credentials::signup(state.db.as_ref(), &state.hasher, payload).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": user
        })),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::post,
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::db::mock_db::{test_app_state, MockDb};

    use super::handle_signup;

    fn build_app(db: MockDb) -> Router {
        Router::new()
            .route("/signup", post(handle_signup))
            .with_state(test_app_state(Arc::new(db)))
    }

    fn signup_body() -> Value {
        json!({
            "full_name": "Test User",
            "email": "test@example.com",
            "password": "Test@1234",
            "phone": "1234567890",
            "role": "customer",
            "status": "active"
        })
    }

    async fn post_signup(app: Router, body: Value) -> (StatusCode, Value) {
        let res = app
            .oneshot(
                Request::post("/signup")
                    .header("Content-Type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_signup_success_omits_password() {
        let app = build_app(MockDb::default());

        let (status, json) = post_signup(app, signup_body()).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "User created successfully");
        assert_eq!(json["user"]["full_name"], "Test User");
        assert_eq!(json["user"]["email"], "test@example.com");
        assert_eq!(json["user"]["phone"], "1234567890");
        assert_eq!(json["user"]["role"], "customer");
        assert_eq!(json["user"]["status"], "active");
        assert!(json["user"].get("password").is_none());
        assert!(json["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_signup_missing_fields() {
        let app = build_app(MockDb::default());

        let (status, json) = post_signup(app, json!({ "email": "incomplete@gmail.com" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "All fields are required");
    }

    #[tokio::test]
    async fn test_signup_invalid_role() {
        let app = build_app(MockDb::default());

        let mut body = signup_body();
        body["role"] = json!("pilot");
        let (status, json) = post_signup(app, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid role");
    }

    #[tokio::test]
    async fn test_signup_invalid_status() {
        let app = build_app(MockDb::default());

        let mut body = signup_body();
        body["status"] = json!("archived");
        let (status, json) = post_signup(app, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid status");
    }

    #[tokio::test]
    async fn test_signup_duplicate_email() {
        let app = build_app(MockDb {
            email_taken: true,
            ..Default::default()
        });

        let (status, json) = post_signup(app, signup_body()).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Email already exists");
    }

    #[tokio::test]
    async fn test_signup_insert_race_is_a_conflict() {
        let app = build_app(MockDb {
            duplicate_on_insert: true,
            ..Default::default()
        });

        let (status, json) = post_signup(app, signup_body()).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Email already exists");
    }

    #[tokio::test]
    async fn test_signup_db_error() {
        let app = build_app(MockDb {
            should_fail: true,
            ..Default::default()
        });

        let (status, _) = post_signup(app, signup_body()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
