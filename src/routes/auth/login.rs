use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::models::signup::LoginPayload;
use crate::services::credentials::{self, CredentialError};
use crate::state::AppState;

pub async fn handle_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Response, CredentialError> {
    let token = credentials::login(
        state.db.as_ref(),
        &state.jwt,
        state.config.token_ttl,
        payload,
    )
    .await?;

    Ok(Json(json!({ "token": token })).into_response())
}
