use std::sync::Arc;

use axum::{
    Form,
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};

use crate::{AppState, error::ApiError, models::LoginForm, templates};

pub const ACCESS_COOKIE: &str = "screendock_access";

// Single shared secret; this is a gate, not an authentication model.
pub async fn require_access(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let Some(code) = &state.config.access_code else {
        return next.run(req).await;
    };

    let path = req.uri().path();
    if path == "/login" || path == "/api/health" {
        return next.run(req).await;
    }

    let cookie_ok = jar.get(ACCESS_COOKIE).is_some_and(|c| c.value() == code);
    let header_ok = req
        .headers()
        .get("x-access-code")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == code);

    if cookie_ok || header_ok {
        return next.run(req).await;
    }

    if path.starts_with("/api/") {
        ApiError::Unauthorized.into_response()
    } else {
        Redirect::to("/login").into_response()
    }
}

pub async fn login_page() -> Html<String> {
    Html(templates::login_page(false))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    match &state.config.access_code {
        Some(code) if form.code == *code => {
            let cookie = Cookie::build((ACCESS_COOKIE, form.code))
                .path("/")
                .http_only(true)
                .build();
            (jar.add(cookie), Redirect::to("/")).into_response()
        }
        // No gate configured; nothing to sign in to.
        None => Redirect::to("/").into_response(),
        Some(_) => Html(templates::login_page(true)).into_response(),
    }
}
