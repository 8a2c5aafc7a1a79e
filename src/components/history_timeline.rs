//! History Timeline Component
//!
//! Process entries for one artwork, newest last. Owners get an entry form
//! (add or edit) and per-entry delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use super::DeleteConfirmButton;
use crate::commands;
use crate::forms::HistoryDraft;
use crate::format;
use crate::markdown;
use crate::models::{youtube_embed_url, ArtworkHistory, MediaKind};

fn media_view(entry: &ArtworkHistory) -> Option<AnyView> {
    let url = entry.media_url.clone().filter(|u| !u.trim().is_empty() && markdown::is_safe_url(u))?;
    let view = match entry.media_type {
        MediaKind::Image => view! { <img class="history-media" src=url alt="" loading="lazy" /> }.into_any(),
        MediaKind::Video => view! { <video class="history-media" src=url controls=true></video> }.into_any(),
        MediaKind::Youtube => match youtube_embed_url(&url) {
            Some(embed) => view! {
                <iframe class="history-media youtube" src=embed allowfullscreen=true></iframe>
            }
            .into_any(),
            None => view! { <a href=url target="_blank" rel="noopener">"Watch video"</a> }.into_any(),
        },
        MediaKind::Document => view! {
            <a class="history-document" href=url target="_blank" rel="noopener">"Open document"</a>
        }
        .into_any(),
        MediaKind::Text => return None,
    };
    Some(view)
}

fn accept_for(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image/*",
        MediaKind::Video => "video/*",
        _ => ".pdf,.doc,.docx",
    }
}

fn event_file(ev: &web_sys::Event) -> Option<web_sys::File> {
    let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
    input.files()?.get(0)
}

/// Timeline of `histories` for `artwork_id`
#[component]
pub fn HistoryTimeline(
    artwork_id: i64,
    histories: RwSignal<Vec<ArtworkHistory>>,
    #[prop(into)] is_owner: Signal<bool>,
) -> impl IntoView {
    let draft = RwSignal::new(HistoryDraft::default());
    let editing = RwSignal::new(None::<i64>);
    let (form_open, set_form_open) = signal(false);
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal(None::<String>);

    let close_form = move || {
        draft.set(HistoryDraft::default());
        editing.set(None);
        set_error.set(None);
        set_form_open.set(false);
    };

    let on_file = move |ev: web_sys::Event| {
        let Some(file) = event_file(&ev) else {
            return;
        };
        set_busy.set(true);
        spawn_local(async move {
            // history media is stored permanently right away
            match commands::upload_image(&file).await {
                Ok(url) => draft.update(|d| d.media_url = url),
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
        spawn_local(async move {
            let result = match editing.get_untracked() {
                Some(id) => commands::update_history(artwork_id, id, &input).await,
                None => commands::create_history(artwork_id, &input).await,
            };
            match result {
                Ok(saved) => {
                    log::info!("[history] saved entry {} on artwork {artwork_id}", saved.id);
                    histories.update(|list| match list.iter_mut().find(|h| h.id == saved.id) {
                        Some(existing) => *existing = saved,
                        None => list.push(saved),
                    });
                    close_form();
                }
                Err(e) => set_error.set(Some(e.user_message())),
            }
            set_busy.set(false);
        });
    };

    let on_delete = move |id: i64| {
        spawn_local(async move {
            match commands::delete_history(artwork_id, id).await {
                Ok(()) => histories.update(|list| list.retain(|h| h.id != id)),
                Err(e) => set_error.set(Some(e.user_message())),
            }
        });
    };

    let start_edit = move |entry: ArtworkHistory| {
        draft.set(HistoryDraft {
            title: entry.title.clone().unwrap_or_default(),
            content: entry.content.clone().unwrap_or_default(),
            media_url: entry.media_url.clone().unwrap_or_default(),
            media_type: entry.media_type,
            history_date: entry.history_date.as_deref().map(format::format_date).unwrap_or_default(),
        });
        editing.set(Some(entry.id));
        set_form_open.set(true);
    };

    view! {
        <section class="history-timeline">
            <h2>"Process"</h2>
            <Show when=move || histories.with(Vec::is_empty)>
                <p class="empty-state">"No process notes yet."</p>
            </Show>
            <ol class="timeline">
                <For
                    each=move || histories.get()
                    key=|h| (h.id, h.title.clone(), h.content.clone(), h.media_url.clone())
                    children=move |entry| {
                        let id = entry.id;
                        let date = format::format_optional_date(entry.history_date.as_deref());
                        let media = media_view(&entry);
                        let for_edit = entry.clone();
                        view! {
                            <li class="timeline-entry">
                                {date.map(|d| view! { <time>{d}</time> })}
                                {entry.title.clone().map(|t| view! { <h3>{t}</h3> })}
                                {media}
                                {entry.content.clone().map(|c| view! { <p class="history-content">{c}</p> })}
                                <Show when=move || is_owner.get()>
                                    <div class="entry-actions">
                                        <button
                                            type="button"
                                            class="link-btn"
                                            on:click={
                                                let for_edit = for_edit.clone();
                                                move |_| start_edit(for_edit.clone())
                                            }
                                        >
                                            "Edit"
                                        </button>
                                        <DeleteConfirmButton
                                            button_class="link-btn danger"
                                            prompt="Remove entry?"
                                            on_confirm=move |_: ()| on_delete(id)
                                        />
                                    </div>
                                </Show>
                            </li>
                        }
                    }
                />
            </ol>

            <Show when=move || is_owner.get()>
                <Show
                    when=move || form_open.get()
                    fallback=move || view! {
                        <button type="button" class="btn" on:click=move |_| set_form_open.set(true)>
                            "Add process note"
                        </button>
                    }
                >
                    <form class="history-form" on:submit=on_submit>
                        <select
                            prop:value=move || draft.with(|d| d.media_type.as_str())
                            on:change=move |ev| {
                                if let Some(kind) = MediaKind::from_str(&event_target_value(&ev)) {
                                    draft.update(|d| {
                                        d.media_type = kind;
                                        d.media_url.clear();
                                    });
                                }
                            }
                        >
                            {MediaKind::ALL
                                .iter()
                                .map(|k| view! { <option value=k.as_str()>{k.label()}</option> })
                                .collect_view()}
                        </select>
                        <input
                            type="text"
                            placeholder="Title"
                            prop:value=move || draft.with(|d| d.title.clone())
                            on:input=move |ev| draft.update(|d| d.title = event_target_value(&ev))
                        />
                        <input
                            type="date"
                            prop:value=move || draft.with(|d| d.history_date.clone())
                            on:input=move |ev| draft.update(|d| d.history_date = event_target_value(&ev))
                        />
                        {move || {
                            let kind = draft.with(|d| d.media_type);
                            if kind.is_uploadable() {
                                view! {
                                    <input type="file" accept=accept_for(kind) on:change=on_file />
                                    {move || draft.with(|d| (!d.media_url.is_empty()).then(|| d.media_url.clone()))
                                        .map(|u| view! { <span class="upload-name">{u}</span> })}
                                }
                                .into_any()
                            } else if kind == MediaKind::Youtube {
                                view! {
                                    <input
                                        type="url"
                                        placeholder="YouTube link"
                                        prop:value=move || draft.with(|d| d.media_url.clone())
                                        on:input=move |ev| draft.update(|d| d.media_url = event_target_value(&ev))
                                    />
                                }
                                .into_any()
                            } else {
                                ().into_any()
                            }
                        }}
                        <textarea
                            placeholder="Notes"
                            prop:value=move || draft.with(|d| d.content.clone())
                            on:input=move |ev| draft.update(|d| d.content = event_target_value(&ev))
                        ></textarea>
                        {move || error.get().map(|e| view! { <p class="field-error">{e}</p> })}
                        <div class="form-actions">
                            <button type="submit" class="btn primary" prop:disabled=move || busy.get()>
                                {move || if editing.get().is_some() { "Save" } else { "Add" }}
                            </button>
                            <button type="button" class="btn" on:click=move |_| close_form()>"Cancel"</button>
                        </div>
                    </form>
                </Show>
            </Show>
        </section>
    }
}
