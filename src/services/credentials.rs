use argon2::Argon2;
use axum::response::{IntoResponse, Response};
use chrono::{Duration, Utc};
use thiserror::Error;

use crate::db::{is_unique_violation, user_repository::UserRepository};
use crate::models::signup::{LoginPayload, SignupPayload};
use crate::models::user::{NewUser, PublicUser, UserRole, UserStatus};
use crate::responses::JsonResponse;
use crate::routes::auth::claims::Claims;
use crate::utils::jwt::{create_jwt, JwtKeys};
use crate::utils::password::{hash_password, verify_password};

/// Tagged outcome of the credential operations. The HTTP boundary maps
/// each kind to a status code; none of the variants carry internal detail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("{0}")]
    InvalidInput(&'static str),
    #[error("Email already exists")]
    EmailTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Internal server error")]
    Internal,
}

impl IntoResponse for CredentialError {
    fn into_response(self) -> Response {
        match self {
            CredentialError::InvalidInput(msg) => JsonResponse::bad_request(msg).into_response(),
            CredentialError::EmailTaken => {
                JsonResponse::conflict("Email already exists").into_response()
            }
            CredentialError::InvalidCredentials => {
                JsonResponse::unauthorized("Invalid credentials").into_response()
            }
            CredentialError::Unauthenticated => {
                JsonResponse::unauthorized("Authentication required").into_response()
            }
            CredentialError::Internal => {
                JsonResponse::server_error("Internal server error").into_response()
            }
        }
    }
}

/// Registers a new account: validate, check uniqueness, hash, persist.
/// The returned shape never contains the password hash.
pub async fn signup(
    repo: &dyn UserRepository,
    hasher: &Argon2<'_>,
    payload: SignupPayload,
) -> Result<PublicUser, CredentialError> {
    let SignupPayload {
        full_name,
        email,
        password,
        phone,
        role,
        status,
    } = payload;

    if full_name.is_empty()
        || email.is_empty()
        || password.is_empty()
        || phone.is_empty()
        || role.is_empty()
        || status.is_empty()
    {
        return Err(CredentialError::InvalidInput("All fields are required"));
    }

    let role =
        UserRole::parse(&role).ok_or(CredentialError::InvalidInput("Invalid role"))?;
    let status =
        UserStatus::parse(&status).ok_or(CredentialError::InvalidInput("Invalid status"))?;

    match repo.is_email_taken(&email).await {
        Ok(true) => return Err(CredentialError::EmailTaken),
        Ok(false) => {}
        Err(err) => {
            tracing::error!(?err, "failed to check email uniqueness");
            return Err(CredentialError::Internal);
        }
    }

    let password_hash = hash_password(&password, hasher).map_err(|err| {
        tracing::error!(?err, "password hashing failed");
        CredentialError::Internal
    })?;

    let new_user = NewUser {
        full_name,
        email,
        password_hash,
        phone,
        role,
        status,
    };

    match repo.create_user(&new_user).await {
        Ok(user) => Ok(user),
        // A concurrent signup can slip past the pre-check; the store's
        // unique index reports it and the caller sees the same conflict.
        Err(err) if is_unique_violation(&err) => Err(CredentialError::EmailTaken),
        Err(err) => {
            tracing::error!(?err, "failed to insert user");
            Err(CredentialError::Internal)
        }
    }
}

/// Verifies a credential pair and issues a signed bearer token. Unknown
/// email and wrong password are indistinguishable to the caller.
pub async fn login(
    repo: &dyn UserRepository,
    keys: &JwtKeys,
    token_ttl: Duration,
    payload: LoginPayload,
) -> Result<String, CredentialError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(CredentialError::InvalidInput(
            "Email and Password are required",
        ));
    }

    let user = match repo.find_user_by_email(&payload.email).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(CredentialError::InvalidCredentials),
        Err(err) => {
            tracing::error!(?err, "failed to look up user");
            return Err(CredentialError::Internal);
        }
    };

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(CredentialError::InvalidCredentials);
    }

    let now = Utc::now();
    let claims = Claims {
        id: user.id,
        email: user.email.clone(),
        full_name: user.full_name.clone(),
        iat: now.timestamp() as usize,
        exp: (now + token_ttl).timestamp() as usize,
    };

    create_jwt(&claims, keys).map_err(|err| {
        tracing::error!(?err, "token generation failed");
        CredentialError::Internal
    })
}
