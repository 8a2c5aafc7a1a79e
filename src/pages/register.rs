//! Registration page with a debounced gallery-handle availability check.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, RegisterArgs};
use crate::components::NavBar;
use crate::config::SLUG_CHECK_DEBOUNCE_MS;
use crate::forms::slug_problem;
use crate::routes;

#[derive(Clone, Debug, PartialEq)]
enum SlugStatus {
    Unchecked,
    Checking,
    Available,
    Taken,
    Invalid(&'static str),
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let (name, set_name) = signal(String::new());
    let (slug, set_slug) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (slug_status, set_slug_status) = signal(SlugStatus::Unchecked);
    let (error, set_error) = signal(None::<String>);
    let (registered, set_registered) = signal(false);
    let (notice, set_notice) = signal(None::<String>);
    let (busy, set_busy) = signal(false);
    // bumped on every keystroke; only the latest check may report
    let check_seq = StoredValue::new(0u64);

    let on_slug_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev).trim().to_lowercase();
        set_slug.set(value.clone());
        check_seq.update_value(|n| *n += 1);
        let seq = check_seq.get_value();

        if let Some(problem) = slug_problem(&value) {
            set_slug_status.set(SlugStatus::Invalid(problem));
            return;
        }
        set_slug_status.set(SlugStatus::Checking);
        spawn_local(async move {
            TimeoutFuture::new(SLUG_CHECK_DEBOUNCE_MS).await;
            if check_seq.try_get_value() != Some(seq) {
                return;
            }
            let status = match commands::check_slug(&value).await {
                Ok(true) => SlugStatus::Available,
                Ok(false) => SlugStatus::Taken,
                Err(e) => {
                    log::warn!("[register] slug check failed: {e}");
                    SlugStatus::Unchecked
                }
            };
            if check_seq.try_get_value() == Some(seq) {
                let _ = set_slug_status.try_set(status);
            }
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let (n, s, e, p) = (
            name.get_untracked(),
            slug.get_untracked(),
            email.get_untracked(),
            password.get_untracked(),
        );
        if n.trim().is_empty() || e.trim().is_empty() || p.len() < 8 {
            set_error.set(Some("Fill in every field; passwords need 8 characters".to_string()));
            return;
        }
        if let Some(problem) = slug_problem(&s) {
            set_error.set(Some(problem.to_string()));
            return;
        }
        if slug_status.get_untracked() == SlugStatus::Taken {
            set_error.set(Some("That gallery address is taken".to_string()));
            return;
        }
        set_busy.set(true);
        set_error.set(None);
        spawn_local(async move {
            let args = RegisterArgs { name: n.trim(), slug: &s, email: e.trim(), password: &p };
            match commands::register(&args).await {
                Ok(()) => {
                    log::info!("[register] account created for {s}");
                    set_registered.set(true);
                }
                Err(err) => set_error.set(Some(err.user_message())),
            }
            set_busy.set(false);
        });
    };

    let on_resend = move |_| {
        let e = email.get_untracked();
        spawn_local(async move {
            match commands::resend_verification(e.trim()).await {
                Ok(()) => set_notice.set(Some("Sent again. Check your inbox.".to_string())),
                Err(err) => set_notice.set(Some(err.user_message())),
            }
        });
    };

    let slug_hint = move || match slug_status.get() {
        SlugStatus::Unchecked => None,
        SlugStatus::Checking => Some(("hint", "Checking…".to_string())),
        SlugStatus::Available => Some(("hint ok", format!("Your gallery: {}", routes::gallery(&slug.get())))),
        SlugStatus::Taken => Some(("hint bad", "Already taken".to_string())),
        SlugStatus::Invalid(problem) => Some(("hint bad", problem.to_string())),
    };

    view! {
        <NavBar />
        <main class="auth-page">
            <Show
                when=move || registered.get()
                fallback=move || view! {
                    <h1>"Create your gallery"</h1>
                    <form class="auth-form" on:submit=on_submit>
                        <input
                            type="text"
                            placeholder="Name"
                            prop:value=name
                            on:input=move |ev| set_name.set(event_target_value(&ev))
                        />
                        <input type="text" placeholder="Gallery address" prop:value=slug on:input=on_slug_input />
                        {move || slug_hint().map(|(class, text)| view! { <p class=class>{text}</p> })}
                        <input
                            type="email"
                            placeholder="Email"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                        <input
                            type="password"
                            placeholder="Password"
                            autocomplete="new-password"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        {move || error.get().map(|e| view! { <p class="field-error">{e}</p> })}
                        <button type="submit" class="btn primary" prop:disabled=busy>"Create account"</button>
                    </form>
                    <p class="auth-switch">"Already registered? " <a href=routes::LOGIN>"Sign in"</a></p>
                }
            >
                <h1>"Check your inbox"</h1>
                <p>{move || format!("We sent a verification link to {}.", email.get())}</p>
                <button type="button" class="link-btn" on:click=on_resend>"Resend the mail"</button>
                {move || notice.get().map(|n| view! { <p class="notice">{n}</p> })}
            </Show>
        </main>
    }
}
