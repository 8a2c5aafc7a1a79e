//! Blog editor for new and existing posts.
//!
//! The body is HTML; a plain textarea stands in for a rich-text editor, with
//! an image button that uploads and appends an `<img>` tag.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use wasm_bindgen::JsCast;

use super::{use_id_param, use_param, use_slug_owner, RouteId};
use crate::commands;
use crate::components::{ErrorBanner, LoadingSpinner, NavBar};
use crate::error::ApiError;
use crate::forms::PostDraft;
use crate::models::PostType;
use crate::routes;
use crate::store::{refresh_current_user, use_app_store, AppStateStoreFields};

#[component]
pub fn BlogEditorPage() -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();
    let slug = use_param("slug");
    let route_id = use_id_param("id");
    let post_id = Memo::new(move |_| route_id.get().id());
    let is_owner = use_slug_owner(slug);
    refresh_current_user(store);

    let draft = RwSignal::new(PostDraft::default());
    let (loading, set_loading) = signal(false);
    let (load_error, set_load_error) = signal(None::<ApiError>);
    let (error, set_error) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    Effect::new(move |_| {
        let Some(id) = post_id.get() else {
            draft.set(PostDraft::default());
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            match commands::get_post(id).await {
                Ok(post) => draft.set(PostDraft::from_post(&post)),
                Err(e) => set_load_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    });

    let on_image = move |ev: web_sys::Event| {
        let Some(input) = ev.target().and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
            return;
        };
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        input.set_value("");
        set_busy.set(true);
        spawn_local(async move {
            match commands::upload_image(&file).await {
                Ok(url) => draft.update(|d| d.content.push_str(&format!("\n<p><img src=\"{url}\" alt=\"\"></p>"))),
                Err(e) => set_error.set(Some(e.user_message())),
            }
            set_busy.set(false);
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let input = match draft.get_untracked().to_input() {
            Ok(input) => input,
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        set_busy.set(true);
        set_error.set(None);
        let navigate = navigate.clone();
        spawn_local(async move {
            let result = match post_id.get_untracked() {
                Some(id) => commands::update_post(id, &input).await,
                None => commands::create_post(&input).await,
            };
            match result {
                Ok(saved) => {
                    log::info!("[blog] saved post {}", saved.id);
                    navigate(&routes::blog_post(&slug.get_untracked(), saved.id), Default::default());
                }
                Err(e) => set_error.set(Some(e.user_message())),
            }
            set_busy.set(false);
        });
    };

    let cancel_href = move || match post_id.get() {
        Some(id) => routes::blog_post(&slug.get(), id),
        None => routes::blog(&slug.get()),
    };

    view! {
        <NavBar slug=slug.get_untracked() />
        <main class="editor-page">
            {move || {
                if route_id.get() == RouteId::Invalid {
                    return view! { <ErrorBanner error=ApiError::NotFound /> }.into_any();
                }
                if !store.session_checked().get() || loading.get() {
                    return view! { <LoadingSpinner /> }.into_any();
                }
                if let Some(error) = load_error.get() {
                    return view! { <ErrorBanner error=error /> }.into_any();
                }
                if !is_owner.get() {
                    return view! { <ErrorBanner error=ApiError::Forbidden(None) /> }.into_any();
                }
                view! {
                    <h1>{if post_id.get_untracked().is_some() { "Edit post" } else { "New post" }}</h1>
                    <form class="post-form" on:submit=on_submit.clone()>
                        <input
                            type="text"
                            placeholder="Title"
                            prop:value=move || draft.with(|d| d.title.clone())
                            on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                        />
                        <select
                            prop:value=move || draft.with(|d| d.post_type.as_str())
                            on:change=move |ev| {
                                if let Some(t) = PostType::from_str(&event_target_value(&ev)) {
                                    draft.update(|d| d.post_type = t);
                                }
                            }
                        >
                            {PostType::ALL
                                .iter()
                                .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                                .collect_view()}
                        </select>
                        <textarea
                            class="post-body"
                            placeholder="Write your post (HTML)"
                            prop:value=move || draft.with(|d| d.content.clone())
                            on:input=move |ev| draft.update(|d| d.content = event_target_value(&ev))
                        ></textarea>
                        <label class="field">
                            <span class="field-label">"Insert image"</span>
                            <input type="file" accept="image/*" on:change=on_image />
                        </label>
                        <input
                            type="text"
                            placeholder="Excerpt (optional)"
                            prop:value=move || draft.with(|d| d.excerpt.clone())
                            on:input=move |ev| draft.update(|d| d.excerpt = event_target_value(&ev))
                        />
                        <div class="checkboxes">
                            <label>
                                <input
                                    type="checkbox"
                                    prop:checked=move || draft.with(|d| d.published)
                                    on:change=move |ev| draft.update(|d| d.published = event_target_checked(&ev))
                                />
                                "Published"
                            </label>
                            <label>
                                <input
                                    type="checkbox"
                                    prop:checked=move || draft.with(|d| d.is_public)
                                    on:change=move |ev| draft.update(|d| d.is_public = event_target_checked(&ev))
                                />
                                "Public"
                            </label>
                            <label>
                                <input
                                    type="checkbox"
                                    prop:checked=move || draft.with(|d| d.pinned)
                                    on:change=move |ev| draft.update(|d| d.pinned = event_target_checked(&ev))
                                />
                                "Pinned"
                            </label>
                        </div>
                        {move || error.get().map(|e| view! { <p class="field-error">{e}</p> })}
                        <div class="form-actions">
                            <button type="submit" class="btn primary" prop:disabled=busy>"Save"</button>
                            <a class="btn" href=cancel_href>"Cancel"</a>
                        </div>
                    </form>
                }
                .into_any()
            }}
        </main>
    }
}
