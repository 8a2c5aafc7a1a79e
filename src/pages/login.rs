//! Login page: email/password, Google OAuth, and the unverified-email path.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::commands;
use crate::components::NavBar;
use crate::error::ApiError;
use crate::routes;
use crate::store::{set_current_user, use_app_store};

#[component]
pub fn LoginPage() -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error, set_error) = signal(None::<String>);
    let (notice, set_notice) = signal(None::<String>);
    let (unverified, set_unverified) = signal(false);
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (e, p) = (email.get_untracked(), password.get_untracked());
        if e.trim().is_empty() || p.is_empty() {
            set_error.set(Some("Enter your email and password".to_string()));
            return;
        }
        set_busy.set(true);
        set_error.set(None);
        set_notice.set(None);
        set_unverified.set(false);
        let navigate = navigate.clone();
        spawn_local(async move {
            match commands::login(e.trim(), &p).await {
                Ok(user) => {
                    let target = routes::gallery(&user.slug);
                    set_current_user(&store, Some(user));
                    navigate(&target, Default::default());
                }
                Err(ApiError::Forbidden(_)) => {
                    set_unverified.set(true);
                    set_error.set(Some("Please verify your email before signing in.".to_string()));
                }
                Err(ApiError::Unauthorized) => set_error.set(Some("Wrong email or password".to_string())),
                Err(err) => set_error.set(Some(err.user_message())),
            }
            set_busy.set(false);
        });
    };

    let on_resend = move |_| {
        let e = email.get_untracked();
        spawn_local(async move {
            match commands::resend_verification(e.trim()).await {
                Ok(()) => set_notice.set(Some(format!("Verification mail sent to {}", e.trim()))),
                Err(err) => set_error.set(Some(err.user_message())),
            }
        });
    };

    view! {
        <NavBar />
        <main class="auth-page">
            <h1>"Sign in"</h1>
            <form class="auth-form" on:submit=on_submit>
                <input
                    type="email"
                    placeholder="Email"
                    autocomplete="email"
                    prop:value=email
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder="Password"
                    autocomplete="current-password"
                    prop:value=password
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || error.get().map(|e| view! { <p class="field-error">{e}</p> })}
                {move || notice.get().map(|n| view! { <p class="notice">{n}</p> })}
                <Show when=move || unverified.get()>
                    <button type="button" class="link-btn" on:click=on_resend>"Resend verification mail"</button>
                </Show>
                <button type="submit" class="btn primary" prop:disabled=busy>
                    {move || if busy.get() { "Signing in…" } else { "Sign in" }}
                </button>
            </form>
            <button type="button" class="btn google" on:click=move |_| commands::start_google_login()>
                "Continue with Google"
            </button>
            <p class="auth-switch">"New here? " <a href=routes::REGISTER>"Create an account"</a></p>
        </main>
    }
}
