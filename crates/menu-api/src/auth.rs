//! Request-scoped admin authentication

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use uuid::Uuid;

use menu_shared::config::SessionSettings;

use crate::state::AppState;

/// Whether the request carries a live admin session cookie.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthContext {
    pub session_id: Option<Uuid>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.session_id.is_some()
    }
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let session_id = jar
            .get(&state.config.session.cookie_name)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())
            .filter(|id| state.sessions.is_active(id));

        Ok(Self { session_id })
    }
}

pub fn session_cookie(settings: &SessionSettings, session_id: Uuid) -> Cookie<'static> {
    Cookie::build((settings.cookie_name.clone(), session_id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure_cookie)
        .build()
}

/// Cookie value used to remove the session cookie from the browser.
pub fn removal_cookie(settings: &SessionSettings) -> Cookie<'static> {
    Cookie::build((settings.cookie_name.clone(), String::new()))
        .path("/")
        .build()
}
