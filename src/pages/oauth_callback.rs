//! Landing point after the Google OAuth redirect (`?token=…`).

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};
use leptos_router::NavigateOptions;

use crate::commands;
use crate::components::{ErrorBanner, LoadingSpinner, NavBar};
use crate::error::ApiError;
use crate::routes;
use crate::store::{set_current_user, use_app_store};

#[component]
pub fn OAuthCallbackPage() -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();
    let query = use_query_map();
    let (failure, set_failure) = signal(None::<ApiError>);

    let token = query.with_untracked(|q| q.get("token")).filter(|t| !t.trim().is_empty());
    match token {
        Some(token) => spawn_local(async move {
            match commands::complete_login(token, None).await {
                Ok(user) => {
                    let target = routes::gallery(&user.slug);
                    set_current_user(&store, Some(user));
                    navigate(&target, NavigateOptions { replace: true, ..Default::default() });
                }
                Err(e) => {
                    log::warn!("[oauth] sign-in failed: {e}");
                    commands::logout();
                    set_failure.set(Some(e));
                }
            }
        }),
        None => {
            let reason = query.with_untracked(|q| q.get("error"));
            log::warn!("[oauth] callback without token: {reason:?}");
            set_failure.set(Some(ApiError::Status {
                status: 400,
                message: reason.or_else(|| Some("Sign-in was cancelled".to_string())),
            }));
        }
    }

    view! {
        <NavBar />
        <main class="auth-page">
            {move || match failure.get() {
                None => view! { <LoadingSpinner /> }.into_any(),
                Some(error) => view! {
                    <ErrorBanner error=error />
                    <a class="btn" href=routes::LOGIN>"Back to sign in"</a>
                }
                .into_any(),
            }}
        </main>
    }
}
