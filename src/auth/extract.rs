//! Request extractor for signed-in admins

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
    response::Redirect,
};
use tracing::debug;

use super::{cookie_value, AdminUser, SESSION_COOKIE};
use crate::state::AppState;

/// Where unauthenticated admin requests are sent
pub const LOGIN_PATH: &str = "/admin/login";

/// Value of cookie `name` across every `Cookie` header of a request
pub fn request_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|raw| cookie_value(raw, name))
        .map(str::to_string)
}

/// The admin behind a valid session cookie. Requests without one are
/// redirected to the login page.
#[derive(Debug, Clone)]
pub struct AdminSession(pub AdminUser);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = request_cookie(&parts.headers, SESSION_COOKIE)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))?;

        state.sessions.verify(&token).map(AdminSession).map_err(|e| {
            debug!("Session rejected: {}", e);
            Redirect::to(LOGIN_PATH)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_request_cookie_reads_all_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(header::COOKIE, HeaderValue::from_static("ds_session=tok"));
        assert_eq!(request_cookie(&headers, "ds_session").as_deref(), Some("tok"));
        assert_eq!(request_cookie(&headers, "ds_brand"), None);
    }
}
