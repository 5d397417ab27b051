//! Request identity resolution and row access policy.
//!
//! Two identities reach this API: end users (`X-User-Id`, set by the platform
//! edge after session verification) and the processing worker (`Authorization:
//! Bearer <SERVICE_TOKEN>`). Row data is owner-only; the webhook surface is
//! service-only. Underlying file bytes are public-read/authenticated-write at
//! the bucket level and are not governed here.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Header carrying the acting end-user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// The identity a request acts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    /// An authenticated end user.
    User(Uuid),
    /// The processing worker reporting job outcomes.
    Service,
}

impl Actor {
    pub fn is_trusted_service(&self) -> bool {
        matches!(self, Actor::Service)
    }

    /// Owner-only row visibility. The worker reports through the gateway and
    /// has no read surface.
    pub fn can_read(&self, owner: Uuid) -> bool {
        matches!(self, Actor::User(id) if *id == owner)
    }

    /// Owner-only row mutation; status transitions go through the gateway.
    pub fn can_write(&self, owner: Uuid) -> bool {
        self.can_read(owner)
    }

    /// Unwraps an end-user identity.
    pub fn require_user(&self) -> Result<Uuid, AppError> {
        match self {
            Actor::User(id) => Ok(*id),
            Actor::Service => Err(AppError::Forbidden),
        }
    }

    /// Resolves the actor from request headers. Kept free of request-lifetime
    /// machinery so the policy matrix is testable without a running server.
    pub fn from_headers(headers: &HeaderMap, service_token: &str) -> Result<Actor, AppError> {
        if let Some(value) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            return match value.strip_prefix("Bearer ") {
                Some(token) if !service_token.is_empty() && token == service_token => {
                    Ok(Actor::Service)
                }
                _ => Err(AppError::Unauthorized),
            };
        }

        if let Some(raw) = headers.get(USER_ID_HEADER).and_then(|v| v.to_str().ok()) {
            let id = Uuid::parse_str(raw).map_err(|_| AppError::Unauthorized)?;
            return Ok(Actor::User(id));
        }

        Err(AppError::Unauthorized)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Actor::from_headers(&parts.headers, &state.config.service_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "worker-secret";

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                value.parse().unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_service_token_resolves_to_service() {
        let actor =
            Actor::from_headers(&headers(&[("authorization", "Bearer worker-secret")]), TOKEN)
                .unwrap();
        assert_eq!(actor, Actor::Service);
        assert!(actor.is_trusted_service());
    }

    #[test]
    fn test_wrong_bearer_token_rejected() {
        let result = Actor::from_headers(&headers(&[("authorization", "Bearer nope")]), TOKEN);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_empty_configured_token_never_matches() {
        let result = Actor::from_headers(&headers(&[("authorization", "Bearer ")]), "");
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_user_header_resolves_to_user() {
        let id = Uuid::new_v4();
        let actor =
            Actor::from_headers(&headers(&[("x-user-id", &id.to_string())]), TOKEN).unwrap();
        assert_eq!(actor, Actor::User(id));
        assert!(!actor.is_trusted_service());
    }

    #[test]
    fn test_malformed_user_id_rejected() {
        let result = Actor::from_headers(&headers(&[("x-user-id", "not-a-uuid")]), TOKEN);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_missing_identity_rejected() {
        let result = Actor::from_headers(&HeaderMap::new(), TOKEN);
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_owner_can_read_and_write_own_rows() {
        let owner = Uuid::new_v4();
        let actor = Actor::User(owner);
        assert!(actor.can_read(owner));
        assert!(actor.can_write(owner));
    }

    #[test]
    fn test_foreign_user_denied() {
        let actor = Actor::User(Uuid::new_v4());
        let owner = Uuid::new_v4();
        assert!(!actor.can_read(owner));
        assert!(!actor.can_write(owner));
    }

    #[test]
    fn test_service_has_no_row_crud_access() {
        let owner = Uuid::new_v4();
        assert!(!Actor::Service.can_read(owner));
        assert!(!Actor::Service.can_write(owner));
        assert!(matches!(
            Actor::Service.require_user(),
            Err(AppError::Forbidden)
        ));
    }
}
