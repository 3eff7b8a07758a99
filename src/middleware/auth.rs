use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
};
use serde::{Deserialize, Serialize};
use crate::{error::Error, utils::token::decode_token, AppState};

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

/// The signed-in user, if any. Missing, malformed and expired tokens, and
/// tokens for users that no longer exist, all resolve to an anonymous request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Identity>);

impl CurrentUser {
    pub fn user_id(&self) -> Option<i64> {
        self.0.as_ref().map(|identity| identity.user_id)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn cookie_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == ACCESS_TOKEN_COOKIE)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

pub fn identity_from_headers(headers: &HeaderMap, secret: &str) -> Option<Identity> {
    let token = bearer_token(headers).or_else(|| cookie_token(headers))?;
    let claims = match decode_token(secret, token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::debug!(error = %err, "ignoring invalid access token");
            return None;
        }
    };
    let user_id = claims.sub.parse().ok()?;
    Some(Identity {
        user_id,
        username: claims.username,
    })
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth = &state.auth_service;
        let Some(claimed) = identity_from_headers(&parts.headers, auth.jwt_secret()) else {
            return Ok(CurrentUser(None));
        };
        Ok(CurrentUser(auth.resolve(claimed).await?))
    }
}

pub fn session_cookie(token: &str, max_age_seconds: i64) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        ACCESS_TOKEN_COOKIE, token, max_age_seconds
    ))
    .ok()
}

pub fn cleared_cookie() -> HeaderValue {
    HeaderValue::from_static("access_token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::token::issue_token;

    #[test]
    fn reads_bearer_header_before_cookie() {
        let token = issue_token("k", 7, "anna", 5).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers.insert(header::COOKIE, HeaderValue::from_static("access_token=garbage"));
        let identity = identity_from_headers(&headers, "k").unwrap();
        assert_eq!(identity.user_id, 7);
    }

    #[test]
    fn cookie_is_found_among_others() {
        let token = issue_token("k", 3, "bob", 5).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; access_token={}; lang=en", token)).unwrap(),
        );
        assert_eq!(identity_from_headers(&headers, "k").unwrap().username, "bob");
    }

    #[test]
    fn bad_tokens_are_anonymous() {
        let mut headers = HeaderMap::new();
        assert!(identity_from_headers(&headers, "k").is_none());
        headers.insert(header::COOKIE, HeaderValue::from_static("access_token="));
        assert!(identity_from_headers(&headers, "k").is_none());
        let token = issue_token("other", 3, "bob", 5).unwrap();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        assert!(identity_from_headers(&headers, "k").is_none());
    }
}
