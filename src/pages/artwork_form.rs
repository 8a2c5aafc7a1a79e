//! Artwork form for new and existing works.
//!
//! Thumbnail and progress shot go to temp storage as soon as they are picked.
//! Submit makes them permanent before saving the artwork; cancel or leaving
//! the page deletes whatever is still temporary, after asking once.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use super::{use_id_param, RouteId};
use crate::access;
use crate::commands;
use crate::components::{discard_pending, ErrorBanner, ImageUpload, LoadingSpinner, NavBar, UploadSlot};
use crate::error::ApiError;
use crate::forms::ArtworkDraft;
use crate::models::{ArtworkStatus, Privacy};
use crate::routes;
use crate::store::{refresh_current_user, use_app_store, AppStateStoreFields};

const DISCARD_PROMPT: &str = "Discard the images you uploaded?";

/// Text input bound to one field of the draft
fn draft_input(
    draft: RwSignal<ArtworkDraft>,
    label: &'static str,
    kind: &'static str,
    get: fn(&ArtworkDraft) -> &String,
    set: fn(&mut ArtworkDraft, String),
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <input
                type=kind
                prop:value=move || draft.with(|d| get(d).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    draft.update(|d| set(d, value));
                }
            />
        </label>
    }
}

#[component]
pub fn ArtworkFormPage() -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();
    let route_id = use_id_param("id");
    let artwork_id = Memo::new(move |_| route_id.get().id());
    refresh_current_user(store);

    let draft = RwSignal::new(ArtworkDraft::default());
    let thumbnail = UploadSlot::new(None);
    let progress = UploadSlot::new(None);
    // (user_id, user_slug) of the artwork being edited
    let owner = RwSignal::new(None::<(Option<i64>, Option<String>)>);
    let (loading, set_loading) = signal(false);
    let (load_error, set_load_error) = signal(None::<ApiError>);
    let (error, set_error) = signal(None::<String>);
    let (busy, set_busy) = signal(false);

    Effect::new(move |_| {
        let Some(id) = artwork_id.get() else {
            return;
        };
        set_loading.set(true);
        spawn_local(async move {
            match commands::get_artwork(id).await {
                Ok(a) => {
                    draft.set(ArtworkDraft::from_artwork(&a));
                    thumbnail.load(a.thumbnail_url.clone());
                    progress.load(a.work_in_progress_url.clone());
                    owner.set(Some((a.user_id, a.user_slug.clone())));
                }
                Err(e) => set_load_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    });

    // new works belong to whoever is signed in
    let is_owner = Signal::derive(move || {
        let user = store.current_user().get();
        match artwork_id.get() {
            None => user.is_some(),
            Some(_) => owner.with(|o| match o {
                Some((id, slug)) => access::is_owner(user.as_ref(), *id, slug.as_deref()),
                None => false,
            }),
        }
    });

    // leaving the page without saving
    on_cleanup(move || {
        discard_pending(&[thumbnail, progress], DISCARD_PROMPT);
    });

    let back_target = move || match artwork_id.get_untracked() {
        Some(id) => routes::artwork(id),
        None => store
            .current_user()
            .with_untracked(|u| u.as_ref().map(|u| routes::gallery(&u.slug)))
            .unwrap_or_else(|| routes::HOME.to_string()),
    };

    // Everything the save needs is taken from the page before the first
    // await; the task may outlive the form.
    let on_submit = {
        let navigate = navigate.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            let current = draft.get_untracked();
            if let Err(msg) = current.into_input(None, None) {
                set_error.set(Some(msg));
                return;
            }
            let [thumb_claim, wip_claim] = match UploadSlot::claim_pair(thumbnail, progress) {
                Ok(claimed) => claimed,
                Err(e) => {
                    log::debug!("[artwork] submit refused: {e}");
                    set_error.set(Some("Wait for the upload to finish".to_string()));
                    return;
                }
            };
            let editing = artwork_id.get_untracked();
            set_busy.set(true);
            set_error.set(None);
            let navigate = navigate.clone();
            spawn_local(async move {
                let thumbnail_url = thumbnail.settle(thumb_claim).await;
                let progress_url = progress.settle(wip_claim).await;
                let input = match current.into_input(thumbnail_url, progress_url) {
                    Ok(input) => input,
                    Err(msg) => {
                        let _ = set_error.try_set(Some(msg));
                        let _ = set_busy.try_set(false);
                        return;
                    }
                };
                let result = match editing {
                    Some(id) => commands::update_artwork(id, &input).await,
                    None => commands::create_artwork(&input).await,
                };
                match result {
                    Ok(saved) => {
                        log::info!("[artwork] saved {}", saved.id);
                        navigate(&routes::artwork(saved.id), Default::default());
                    }
                    Err(e) => {
                        log::warn!("[artwork] save failed: {e}");
                        let _ = set_error.try_set(Some(e.user_message()));
                        let _ = set_busy.try_set(false);
                    }
                }
            });
        }
    };

    let on_cancel = move |_| {
        if discard_pending(&[thumbnail, progress], DISCARD_PROMPT) {
            navigate(&back_target(), Default::default());
        }
    };

    view! {
        <NavBar />
        <main class="artwork-form-page">
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
                    let error = if store.current_user().with(Option::is_none) {
                        ApiError::Unauthorized
                    } else {
                        ApiError::Forbidden(None)
                    };
                    return view! { <ErrorBanner error=error /> }.into_any();
                }
                let on_submit = on_submit.clone();
                let on_cancel = on_cancel.clone();
                view! {
                    <h1>{if artwork_id.get_untracked().is_some() { "Edit artwork" } else { "New artwork" }}</h1>
                    <form class="artwork-form" on:submit=on_submit>
                        {draft_input(draft, "Title", "text", |d| &d.title, |d, v| d.title = v)}
                        <label class="field">
                            <span class="field-label">"Description"</span>
                            <textarea
                                prop:value=move || draft.with(|d| d.description.clone())
                                on:input=move |ev| draft.update(|d| d.description = event_target_value(&ev))
                            ></textarea>
                        </label>
                        {draft_input(draft, "Medium", "text", |d| &d.medium, |d, v| d.medium = v)}
                        {draft_input(draft, "Size", "text", |d| &d.size, |d, v| d.size = v)}
                        {draft_input(draft, "Year", "text", |d| &d.year, |d, v| d.year = v)}
                        <label class="field">
                            <span class="field-label">"Status"</span>
                            <select
                                prop:value=move || draft.with(|d| d.status.as_str())
                                on:change=move |ev| {
                                    if let Some(status) = ArtworkStatus::from_str(&event_target_value(&ev)) {
                                        draft.update(|d| d.status = status);
                                    }
                                }
                            >
                                {ArtworkStatus::ALL
                                    .iter()
                                    .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                        <label class="field">
                            <span class="field-label">"Visibility"</span>
                            <select
                                prop:value=move || draft.with(|d| d.privacy.as_str())
                                on:change=move |ev| {
                                    if let Some(privacy) = Privacy::from_str(&event_target_value(&ev)) {
                                        draft.update(|d| d.privacy = privacy);
                                    }
                                }
                            >
                                {Privacy::ALL
                                    .iter()
                                    .map(|p| view! { <option value=p.as_str()>{p.label()}</option> })
                                    .collect_view()}
                            </select>
                        </label>
                        {draft_input(draft, "Started", "date", |d| &d.start_date, |d, v| d.start_date = v)}
                        {draft_input(draft, "Finished", "date", |d| &d.end_date, |d, v| d.end_date = v)}
                        <ImageUpload upload=thumbnail label="Thumbnail" />
                        <Show when=move || draft.with(|d| d.status == ArtworkStatus::WorkInProgress) || progress.url().is_some()>
                            <ImageUpload upload=progress label="Progress shot" />
                        </Show>
                        {move || error.get().map(|e| view! { <p class="field-error">{e}</p> })}
                        <div class="form-actions">
                            <button type="submit" class="btn primary" prop:disabled=busy>
                                {move || if busy.get() { "Saving…" } else { "Save" }}
                            </button>
                            <button type="button" class="btn" on:click=on_cancel>"Cancel"</button>
                        </div>
                    </form>
                }
                .into_any()
            }}
        </main>
    }
}
