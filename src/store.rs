//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity. Only the signed-in
//! user lives here; page data stays in page-local signals.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::models::User;
use crate::session;

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Signed-in user, seeded from the cached blob and refreshed from `/me`
    pub current_user: Option<User>,
    /// True once `/me` has answered (or there was no token to check)
    pub session_checked: bool,
}

impl AppState {
    pub fn from_session() -> Self {
        let has_token = session::is_signed_in();
        Self {
            current_user: if has_token { session::cached_user() } else { None },
            session_checked: !has_token,
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn set_current_user(store: &AppStore, user: Option<User>) {
    if let Some(user) = &user {
        session::save_user(user);
    }
    store.current_user().set(user);
    store.session_checked().set(true);
}

/// Re-fetch the signed-in user. Pages call this on mount so ownership checks
/// use the server's view of the session.
pub fn refresh_current_user(store: AppStore) {
    if !session::is_signed_in() {
        store.current_user().set(None);
        store.session_checked().set(true);
        return;
    }
    spawn_local(async move {
        match commands::current_user().await {
            Ok(user) => set_current_user(&store, Some(user)),
            Err(e) => {
                log::debug!("[store] current user unavailable: {e}");
                store.session_checked().set(true);
            }
        }
    });
}

pub fn sign_out(store: &AppStore) {
    commands::logout();
    store.current_user().set(None);
    store.session_checked().set(true);
}

/// Renew the stored token once per app start
pub fn refresh_session_token() {
    if !session::is_signed_in() {
        return;
    }
    spawn_local(async move {
        if let Err(e) = commands::refresh_token().await {
            log::debug!("[store] token refresh skipped: {e}");
        }
    });
}
