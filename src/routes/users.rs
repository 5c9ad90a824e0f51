use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::db::is_unique_violation;
use crate::models::bus_owner::NewBusOwner;
use crate::models::user::UserStatus;
use crate::responses::JsonResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusChangePayload {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub status: String,
}

/// Administrative status toggle. Only `active` and `suspended` are
/// accepted here; `pending` is a signup-time state.
pub async fn change_user_status(
    State(state): State<AppState>,
    Json(payload): Json<StatusChangePayload>,
) -> Response {
    let status = UserStatus::parse(&payload.status)
        .filter(|s| matches!(s, UserStatus::Active | UserStatus::Suspended));
    let (id, status) = match (payload.id, status) {
        (Some(id), Some(status)) => (id, status),
        _ => {
            return JsonResponse::bad_request("Invalid input: id and valid status required.")
                .into_response()
        }
    };

    match state.db.update_user_status(id, status).await {
        Ok(Some(user)) => (
            StatusCode::OK,
            Json(json!({
                "message": "User status updated successfully.",
                "user": user
            })),
        )
            .into_response(),
        Ok(None) => JsonResponse::not_found("User not found.").into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to update user status");
            JsonResponse::server_error("Internal server error.").into_response()
        }
    }
}

pub async fn create_bus_owner(
    State(state): State<AppState>,
    Json(payload): Json<NewBusOwner>,
) -> Response {
    if payload.user_id.is_none()
        || payload.company_name.is_empty()
        || payload.contact_person.is_empty()
    {
        return JsonResponse::bad_request(
            "Missing required fields: user_id, company_name, contact_person.",
        )
        .into_response();
    }

    match state.owners.find_conflicting_field(&payload).await {
        Ok(Some(field)) => {
            return JsonResponse::conflict(&format!(
                "Conflict: bus owner with this '{}' already exists.",
                field
            ))
            .into_response()
        }
        Ok(None) => {}
        Err(err) => {
            tracing::error!(?err, "failed to check bus owner uniqueness");
            return JsonResponse::server_error("Internal server error.").into_response();
        }
    }

    match state.owners.insert(&payload).await {
        Ok(owner) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Bus owner created successfully.",
                "busOwner": owner
            })),
        )
            .into_response(),
        Err(err) if is_unique_violation(&err) => {
            JsonResponse::conflict("Conflict: bus owner already exists.").into_response()
        }
        Err(err) => {
            tracing::error!(?err, "failed to insert bus owner");
            JsonResponse::server_error("Internal server error.").into_response()
        }
    }
}

pub async fn get_bus_owner_list(State(state): State<AppState>) -> Response {
    match state.owners.list().await {
        Ok(owners) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "count": owners.len(),
                "busOwners": owners
            })),
        )
            .into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to list bus owners");
            JsonResponse::server_error("Internal server error.").into_response()
        }
    }
}

pub async fn get_bus_owner_by_id(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Response {
    match state.owners.find_by_id(id).await {
        Ok(Some(owner)) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "busOwner": owner
            })),
        )
            .into_response(),
        Ok(None) => JsonResponse::not_found("Bus owner not found.").into_response(),
        Err(err) => {
            tracing::error!(?err, "failed to fetch bus owner");
            JsonResponse::server_error("Internal server error.").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        routing::{get, patch, post},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::db::mock_db::{test_app_state, MockBusOwnerRepository, MockDb};
    use crate::models::user::{PublicUser, UserRole, UserStatus};
    use crate::state::AppState;

    use super::{change_user_status, create_bus_owner, get_bus_owner_by_id, get_bus_owner_list};

    fn build_app(state: AppState) -> Router {
        Router::new()
            .route("/status-change", patch(change_user_status))
            .route("/create-bus_owners", post(create_bus_owner))
            .route("/getBusOwnerList", get(get_bus_owner_list))
            .route("/getBusOwnerList/{id}", get(get_bus_owner_by_id))
            .with_state(state)
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn patch_status(body: Value) -> Request<Body> {
        Request::patch("/status-change")
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn public_user(id: Uuid, status: UserStatus) -> PublicUser {
        PublicUser {
            id,
            full_name: "Test User".into(),
            email: "test@example.com".into(),
            phone: "1234567890".into(),
            role: UserRole::Customer,
            status,
        }
    }

    #[tokio::test]
    async fn test_status_change_success() {
        let id = Uuid::new_v4();
        let db = MockDb {
            update_status_result: Some(public_user(id, UserStatus::Suspended)),
            ..Default::default()
        };
        let app = build_app(test_app_state(Arc::new(db)));

        let (status, json) = send(
            app,
            patch_status(json!({ "id": id, "status": "suspended" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "User status updated successfully.");
        assert_eq!(json["user"]["status"], "suspended");
    }

    #[tokio::test]
    async fn test_status_change_rejects_pending_and_missing_id() {
        let app = build_app(test_app_state(Arc::new(MockDb::default())));
        let (status, json) = send(
            app,
            patch_status(json!({ "id": Uuid::new_v4(), "status": "pending" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid input: id and valid status required.");

        let app = build_app(test_app_state(Arc::new(MockDb::default())));
        let (status, _) = send(app, patch_status(json!({ "status": "active" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_status_change_user_not_found() {
        let app = build_app(test_app_state(Arc::new(MockDb::default())));

        let (status, json) = send(
            app,
            patch_status(json!({ "id": Uuid::new_v4(), "status": "active" })),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "User not found.");
    }

    fn owner_body() -> Value {
        json!({
            "user_id": Uuid::new_v4(),
            "company_name": "Acme Travels",
            "contact_person": "Jane Doe",
            "gst_number": "29ABCDE1234F1Z5"
        })
    }

    #[tokio::test]
    async fn test_create_bus_owner_success() {
        let app = build_app(test_app_state(Arc::new(MockDb::default())));

        let (status, json) = send(
            app,
            Request::post("/create-bus_owners")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_vec(&owner_body()).unwrap()))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Bus owner created successfully.");
        assert_eq!(json["busOwner"]["company_name"], "Acme Travels");
    }

    #[tokio::test]
    async fn test_create_bus_owner_missing_fields() {
        let app = build_app(test_app_state(Arc::new(MockDb::default())));

        let (status, json) = send(
            app,
            Request::post("/create-bus_owners")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "company_name": "Acme Travels" })).unwrap(),
                ))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            json["message"],
            "Missing required fields: user_id, company_name, contact_person."
        );
    }

    #[tokio::test]
    async fn test_create_bus_owner_conflicting_field() {
        let mut state = test_app_state(Arc::new(MockDb::default()));
        state.owners = Arc::new(MockBusOwnerRepository {
            conflicting_field: Some("gst_number"),
            ..Default::default()
        });
        let app = build_app(state);

        let (status, json) = send(
            app,
            Request::post("/create-bus_owners")
                .header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_vec(&owner_body()).unwrap()))
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            json["message"],
            "Conflict: bus owner with this 'gst_number' already exists."
        );
    }

    #[tokio::test]
    async fn test_get_bus_owner_not_found() {
        let app = build_app(test_app_state(Arc::new(MockDb::default())));

        let (status, json) = send(
            app,
            Request::get(format!("/getBusOwnerList/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Bus owner not found.");
    }
}
