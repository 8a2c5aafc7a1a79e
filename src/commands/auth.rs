//! Auth Commands
//!
//! Bindings for `/api/auth/*`. Successful logins are persisted to the session
//! here so callers only deal with the returned user.

use serde::{Deserialize, Serialize};

use super::{get, post, post_json_unit, Query};
use crate::config::{api_url, OAUTH_GOOGLE_PATH};
use crate::error::ApiError;
use crate::models::{AuthResponse, User};
use crate::session;

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
pub struct RegisterArgs<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
struct EmailArgs<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct Empty {}

#[derive(Deserialize)]
struct SlugCheck {
    available: bool,
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

// ========================
// Commands
// ========================

/// Sign in and persist the token; fetches `/me` when the response has no user
pub async fn login(email: &str, password: &str) -> Result<User, ApiError> {
    let resp: AuthResponse = post("/api/auth/login", &LoginArgs { email, password }).await?;
    complete_login(resp.token, resp.user).await
}

/// Store a token obtained elsewhere (login response, OAuth callback) and load its user
pub async fn complete_login(token: String, user: Option<User>) -> Result<User, ApiError> {
    session::save_token(&token);
    let user = match user {
        Some(user) => user,
        None => current_user().await?,
    };
    session::save_user(&user);
    log::info!("[auth] signed in as {}", user.slug);
    Ok(user)
}

/// Create an account. The server sends a verification mail; no session is started.
pub async fn register(args: &RegisterArgs<'_>) -> Result<(), ApiError> {
    post_json_unit("/api/auth/register", args).await
}

pub async fn current_user() -> Result<User, ApiError> {
    get("/api/auth/me").await
}

/// Exchange the stored token for a fresh one
pub async fn refresh_token() -> Result<(), ApiError> {
    let resp: TokenResponse = post("/api/auth/refresh", &Empty {}).await?;
    session::save_token(&resp.token);
    Ok(())
}

pub async fn check_slug(slug: &str) -> Result<bool, ApiError> {
    let path = Query::new().push("slug", slug).to_path("/api/auth/check-slug");
    let resp: SlugCheck = get(&path).await?;
    Ok(resp.available)
}

pub async fn resend_verification(email: &str) -> Result<(), ApiError> {
    post_json_unit("/api/auth/resend-verification", &EmailArgs { email }).await
}

pub fn logout() {
    session::clear();
}

/// Full-page redirect into the Google OAuth flow
pub fn start_google_login() {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(&api_url(OAUTH_GOOGLE_PATH));
    }
}
