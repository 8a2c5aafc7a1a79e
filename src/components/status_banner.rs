//! Status Banners
//!
//! Loading, error and empty states shared by every page.

use leptos::prelude::*;

use crate::error::ApiError;

/// Fetch state of a single resource
#[derive(Clone, Debug, PartialEq)]
pub enum Load<T> {
    Loading,
    Ready(T),
    Failed(ApiError),
}

impl<T> Load<T> {
    pub fn from_result(result: Result<T, ApiError>) -> Self {
        match result {
            Ok(value) => Load::Ready(value),
            Err(e) => Load::Failed(e),
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Load::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="loading" role="status">
            <span class="spinner"></span>
            <span class="loading-text">"Loading…"</span>
        </div>
    }
}

/// Banner text depends on the error kind: not found, private, network, or
/// the server's own message
#[component]
pub fn ErrorBanner(error: ApiError) -> impl IntoView {
    let class = match error {
        _ if error.is_not_found() => "error-banner not-found",
        ApiError::Forbidden(_) => "error-banner forbidden",
        _ => "error-banner",
    };
    // a 403 may say why, e.g. "artist has hidden this work"
    let detail = match &error {
        ApiError::Forbidden(_) => error.server_message().map(String::from),
        _ => None,
    };
    view! {
        <div class=class role="alert">
            {error.user_message()}
            {detail.map(|d| view! { <span class="error-detail">{d}</span> })}
        </div>
    }
}

#[component]
pub fn EmptyState(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="empty-state">{message}</div>
    }
}
