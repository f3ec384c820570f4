use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{
    error::AppError,
    models::actor::Actor,
    repositories::{OfficeRepository, OfficeRepositoryTrait, UserRepository, UserRepositoryTrait},
    state::AppState,
    types::UserId,
    utils::{
        cookies::{extract_cookie_value, ACCESS_COOKIE_NAME},
        jwt::verify_access_token,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing access token")]
    MissingToken,
    #[error("invalid access token")]
    InvalidToken,
    #[error("token subject is not a user id")]
    InvalidSubject,
    #[error("user not found or deactivated")]
    UnknownUser,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Unauthorized(match err {
            AuthError::MissingToken => "Authentication required".into(),
            _ => "Invalid credentials".into(),
        })
    }
}

/// Resolves the caller into an [`Actor`] and stores it in the request extensions.
pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let actor = authenticate_request(request.headers(), &state).await?;
    tracing::debug!(user_id = %actor.user_id, role = ?actor.role, "authenticated");
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

async fn authenticate_request(headers: &HeaderMap, state: &AppState) -> Result<Actor, AppError> {
    let token = extract_token(headers).ok_or(AuthError::MissingToken)?;
    let claims = verify_access_token(&token, &state.config.jwt_secret).map_err(|err| {
        tracing::debug!(error = %err, "rejected access token");
        AuthError::InvalidToken
    })?;
    let user_id: UserId = claims.sub.parse().map_err(|_| AuthError::InvalidSubject)?;

    let user = UserRepository::new()
        .find_by_id(&state.pool, user_id)
        .await?
        .filter(|user| user.is_active())
        .ok_or(AuthError::UnknownUser)?;

    let office = OfficeRepository::new()
        .find_administered_by(&state.pool, user.id)
        .await?;

    Ok(Actor::from_user(&user, office.map(|o| o.id)))
}

fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .map(str::to_owned);
    bearer.or_else(|| {
        headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| extract_cookie_value(raw, ACCESS_COOKIE_NAME))
    })
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    let (scheme, rest) = header.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") {
        let token = rest.trim();
        (!token.is_empty()).then_some(token)
    } else {
        None
    }
}
