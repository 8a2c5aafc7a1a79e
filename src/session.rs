//! Browser Session
//!
//! Bearer token and cached user blob in `localStorage`. These are the only
//! pieces of state that survive a navigation.

use crate::config::{TOKEN_KEY, USER_KEY};
use crate::models::User;
use crate::routes;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn token() -> Option<String> {
    let raw = storage()?.get_item(TOKEN_KEY).ok().flatten()?;
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn is_signed_in() -> bool {
    token().is_some()
}

pub fn save_token(token: &str) {
    if let Some(storage) = storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

pub fn cached_user() -> Option<User> {
    let raw = storage()?.get_item(USER_KEY).ok().flatten()?;
    serde_json::from_str(&raw).ok()
}

pub fn save_user(user: &User) {
    let Some(storage) = storage() else {
        return;
    };
    if let Ok(raw) = serde_json::to_string(user) {
        let _ = storage.set_item(USER_KEY, &raw);
    }
}

pub fn clear() {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
        let _ = storage.remove_item(USER_KEY);
    }
}

/// Credentials were rejected: wipe them and send the browser to the login page
pub fn expire() {
    log::info!("[session] token rejected, signing out");
    clear();
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(routes::LOGIN);
    }
}
