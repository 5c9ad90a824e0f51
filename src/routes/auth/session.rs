use axum::{extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::routes::auth::claims::Claims;
use crate::services::credentials::CredentialError;
use crate::utils::jwt::{decode_jwt, JwtKeyProvider};

/// Gate in front of protected handlers: pulls the bearer token out of the
/// Authorization header, verifies it, and hands the claims to the handler.
/// Every failure mode collapses into the same generic 401.
#[derive(Debug, PartialEq)]
pub struct AuthSession(pub Claims);

impl<S> FromRequestParts<S> for AuthSession
where
    S: JwtKeyProvider + Send + Sync,
{
    type Rejection = CredentialError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| CredentialError::Unauthenticated)?;

        let claims = decode_jwt(bearer.token(), state.jwt_keys())
            .map_err(|_| CredentialError::Unauthenticated)?;

        Ok(AuthSession(claims))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::FromRequestParts,
        http::{header, Method, Request},
    };
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use crate::db::mock_db::TEST_JWT_SECRET;
    use crate::routes::auth::claims::Claims;
    use crate::routes::auth::session::AuthSession;
    use crate::services::credentials::CredentialError;
    use crate::utils::jwt::{create_jwt, JwtKeyProvider, JwtKeys};

    struct TestState {
        keys: JwtKeys,
    }

    impl JwtKeyProvider for TestState {
        fn jwt_keys(&self) -> &JwtKeys {
            &self.keys
        }
    }

    fn test_state() -> TestState {
        TestState {
            keys: JwtKeys::from_secret(TEST_JWT_SECRET).unwrap(),
        }
    }

    fn make_jwt(state: &TestState, ttl: Duration) -> String {
        let now = Utc::now();
        let claims = Claims {
            id: Uuid::new_v4(),
            email: "test@example.com".into(),
            full_name: "Test User".into(),
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        };
        create_jwt(&claims, &state.keys).expect("JWT should create successfully")
    }

    #[tokio::test]
    async fn test_valid_token_extracted() {
        let state = test_state();
        let jwt = make_jwt(&state, Duration::hours(1));

        let request = Request::builder()
            .method(Method::GET)
            .uri("/")
            .header(header::AUTHORIZATION, format!("Bearer {}", jwt))
            .body(())
            .unwrap();

        let mut parts = request.into_parts().0;
        let result = AuthSession::from_request_parts(&mut parts, &state).await;

        let session = result.expect("extraction should succeed");
        assert_eq!(session.0.email, "test@example.com");
        assert_eq!(session.0.full_name, "Test User");
    }

    #[tokio::test]
    async fn test_missing_header_returns_unauthenticated() {
        let state = test_state();
        let request = Request::builder()
            .method(Method::GET)
            .uri("/")
            .body(())
            .unwrap();

        let mut parts = request.into_parts().0;
        let result = AuthSession::from_request_parts(&mut parts, &state).await;

        assert_eq!(result, Err(CredentialError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_non_bearer_scheme_is_rejected() {
        let state = test_state();
        let request = Request::builder()
            .method(Method::GET)
            .uri("/")
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(())
            .unwrap();

        let mut parts = request.into_parts().0;
        let result = AuthSession::from_request_parts(&mut parts, &state).await;

        assert_eq!(result, Err(CredentialError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_invalid_token_returns_unauthenticated() {
        let state = test_state();
        let request = Request::builder()
            .method(Method::GET)
            .uri("/")
            .header(header::AUTHORIZATION, "Bearer invalid.token.here")
            .body(())
            .unwrap();

        let mut parts = request.into_parts().0;
        let result = AuthSession::from_request_parts(&mut parts, &state).await;

        assert_eq!(result, Err(CredentialError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_expired_token_returns_unauthenticated() {
        let state = test_state();
        let jwt = make_jwt(&state, Duration::seconds(-120));

        let request = Request::builder()
            .method(Method::GET)
            .uri("/")
            .header(header::AUTHORIZATION, format!("Bearer {}", jwt))
            .body(())
            .unwrap();

        let mut parts = request.into_parts().0;
        let result = AuthSession::from_request_parts(&mut parts, &state).await;

        assert_eq!(result, Err(CredentialError::Unauthenticated));
    }
}
