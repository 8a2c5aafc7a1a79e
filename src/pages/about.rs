//! About page: statement, portrait/video and CV, editable in place by the owner.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use super::{use_param, use_slug_owner};
use crate::commands;
use crate::components::{ErrorBanner, Load, LoadingSpinner, NavBar};
use crate::markdown;
use crate::models::{youtube_embed_url, Profile, ProfileUpdate};
use crate::store::{refresh_current_user, use_app_store};

fn blank_to_none(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn markdown_section(title: &'static str, body: Option<String>) -> Option<impl IntoView> {
    let body = body.filter(|b| !b.trim().is_empty())?;
    let html = markdown::render(&body);
    Some(view! {
        <section class="cv-section">
            <h2>{title}</h2>
            <div class="markdown" inner_html=html></div>
        </section>
    })
}

fn video_view(url: String) -> AnyView {
    match youtube_embed_url(&url) {
        Some(embed) => view! { <iframe class="about-video" src=embed allowfullscreen=true></iframe> }.into_any(),
        None => view! { <video class="about-video" src=url controls=true></video> }.into_any(),
    }
}

#[component]
fn AboutView(profile: Profile) -> impl IntoView {
    let about_html = profile.about_text.as_deref().map(markdown::render);
    view! {
        <article class="about">
            <h1>{format!("About {}", profile.name)}</h1>
            {profile.about_image_url.clone().map(|src| view! { <img class="about-image" src=src alt="" /> })}
            {about_html.map(|html| view! { <div class="markdown" inner_html=html></div> })}
            {profile.about_video_url.clone().filter(|u| !u.trim().is_empty()).map(video_view)}
            {markdown_section("Education", profile.cv_education.clone())}
            {markdown_section("Exhibitions", profile.cv_exhibitions.clone())}
            {markdown_section("Awards", profile.cv_awards.clone())}
        </article>
    }
}

/// Text field bound to one optional field of the edit draft
fn bound_textarea(
    draft: RwSignal<ProfileUpdate>,
    label: &'static str,
    get: fn(&ProfileUpdate) -> &Option<String>,
    set: fn(&mut ProfileUpdate, Option<String>),
) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            <textarea
                prop:value=move || draft.with(|d| get(d).clone().unwrap_or_default())
                on:input=move |ev| {
                    let value = blank_to_none(event_target_value(&ev));
                    draft.update(|d| set(d, value));
                }
            ></textarea>
        </label>
    }
}

#[component]
fn AboutEditor(
    slug: String,
    profile: Profile,
    #[prop(into)] on_saved: Callback<Profile>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    let draft = RwSignal::new(ProfileUpdate::from(&profile));
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let on_image = move |ev: web_sys::Event| {
        let Some(file) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .and_then(|files| files.get(0))
        else {
            return;
        };
        set_busy.set(true);
        spawn_local(async move {
            match commands::upload_image(&file).await {
                Ok(url) => draft.update(|d| d.about_image_url = Some(url)),
                Err(e) => set_error.set(Some(e.user_message())),
            }
            set_busy.set(false);
        });
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let update = draft.get_untracked();
        if update.name.trim().is_empty() {
            set_error.set(Some("Name is required".to_string()));
            return;
        }
        let slug = slug.clone();
        set_busy.set(true);
        spawn_local(async move {
            match commands::update_profile(&slug, &update).await {
                Ok(saved) => {
                    log::info!("[about] profile {slug} updated");
                    on_saved.run(saved);
                }
                Err(e) => set_error.set(Some(e.user_message())),
            }
            set_busy.set(false);
        });
    };

    view! {
        <form class="about-editor" on:submit=on_submit>
            <label class="field">
                <span class="field-label">"Name"</span>
                <input
                    type="text"
                    prop:value=move || draft.with(|d| d.name.clone())
                    on:input=move |ev| draft.update(|d| d.name = event_target_value(&ev))
                />
            </label>
            {bound_textarea(draft, "Short bio", |d| &d.bio, |d, v| d.bio = v)}
            {bound_textarea(draft, "About (Markdown)", |d| &d.about_text, |d, v| d.about_text = v)}
            <label class="field">
                <span class="field-label">"Portrait"</span>
                {move || draft.with(|d| d.about_image_url.clone()).map(|src| view! {
                    <img class="upload-preview" src=src alt="" />
                })}
                <input type="file" accept="image/*" on:change=on_image />
                <Show when=move || draft.with(|d| d.about_image_url.is_some())>
                    <button
                        type="button"
                        class="link-btn"
                        on:click=move |_| draft.update(|d| d.about_image_url = None)
                    >
                        "Remove"
                    </button>
                </Show>
            </label>
            <label class="field">
                <span class="field-label">"Video link"</span>
                <input
                    type="url"
                    prop:value=move || draft.with(|d| d.about_video_url.clone().unwrap_or_default())
                    on:input=move |ev| draft.update(|d| d.about_video_url = blank_to_none(event_target_value(&ev)))
                />
            </label>
            {bound_textarea(draft, "Studio description", |d| &d.studio_description, |d, v| d.studio_description = v)}
            {bound_textarea(draft, "Education", |d| &d.cv_education, |d, v| d.cv_education = v)}
            {bound_textarea(draft, "Exhibitions", |d| &d.cv_exhibitions, |d, v| d.cv_exhibitions = v)}
            {bound_textarea(draft, "Awards", |d| &d.cv_awards, |d, v| d.cv_awards = v)}
            {move || error.get().map(|e| view! { <p class="field-error">{e}</p> })}
            <div class="form-actions">
                <button type="submit" class="btn primary" prop:disabled=busy>"Save"</button>
                <button type="button" class="btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
            </div>
        </form>
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    let store = use_app_store();
    let slug = use_param("slug");
    let is_owner = use_slug_owner(slug);
    refresh_current_user(store);

    let profile = RwSignal::new(Load::<Profile>::Loading);
    let (editing, set_editing) = signal(false);

    Effect::new(move |_| {
        let slug = slug.get();
        profile.set(Load::Loading);
        set_editing.set(false);
        spawn_local(async move {
            profile.set(Load::from_result(commands::get_profile(&slug).await));
        });
    });

    view! {
        <NavBar slug=slug.get_untracked() />
        <main class="about-page">
            {move || match profile.get() {
                Load::Loading => view! { <LoadingSpinner /> }.into_any(),
                Load::Failed(error) => view! { <ErrorBanner error=error /> }.into_any(),
                Load::Ready(p) if editing.get() && is_owner.get() => view! {
                    <AboutEditor
                        slug=slug.get()
                        profile=p
                        on_saved=move |saved: Profile| {
                            profile.set(Load::Ready(saved));
                            set_editing.set(false);
                        }
                        on_cancel=move |_: ()| set_editing.set(false)
                    />
                }
                .into_any(),
                Load::Ready(p) => view! {
                    <AboutView profile=p />
                    <Show when=move || is_owner.get()>
                        <button type="button" class="btn" on:click=move |_| set_editing.set(true)>"Edit"</button>
                    </Show>
                }
                .into_any(),
            }}
        </main>
    }
}
