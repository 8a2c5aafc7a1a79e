//! Artwork detail: main image, metadata, extra images and the process timeline.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use super::use_id_param;
use crate::access;
use crate::commands;
use crate::components::{DeleteConfirmButton, ErrorBanner, HistoryTimeline, Load, LoadingSpinner, NavBar};
use crate::error::ApiError;
use crate::format;
use crate::markdown;
use crate::models::{Artwork, ArtworkHistory};
use crate::routes;
use crate::store::{refresh_current_user, use_app_store, AppStateStoreFields};

#[component]
pub fn ArtworkDetailPage() -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();
    let route_id = use_id_param("id");
    let artwork_id = Memo::new(move |_| route_id.get().id());
    refresh_current_user(store);

    let artwork = RwSignal::new(Load::<Artwork>::Loading);
    let histories = RwSignal::new(Vec::<ArtworkHistory>::new());
    let (action_error, set_action_error) = signal(None::<String>);

    Effect::new(move |_| {
        let Some(id) = artwork_id.get() else {
            artwork.set(Load::Failed(ApiError::NotFound));
            return;
        };
        artwork.set(Load::Loading);
        spawn_local(async move {
            match commands::get_artwork(id).await {
                Ok(mut loaded) => {
                    // older payloads leave histories out of the artwork
                    let entries = if loaded.histories.is_empty() {
                        commands::list_histories(id).await.unwrap_or_else(|e| {
                            log::warn!("[artwork] histories for {id}: {e}");
                            Vec::new()
                        })
                    } else {
                        std::mem::take(&mut loaded.histories)
                    };
                    histories.set(entries);
                    artwork.set(Load::Ready(loaded));
                }
                Err(e) => artwork.set(Load::Failed(e)),
            }
        });
    });

    let is_owner = Signal::derive(move || {
        let user = store.current_user().get();
        artwork.with(|a| {
            a.ready()
                .is_some_and(|a| access::is_owner(user.as_ref(), a.user_id, a.user_slug.as_deref()))
        })
    });

    let on_delete = Callback::new(move |_: ()| {
        let Some(id) = artwork_id.get_untracked() else {
            return;
        };
        let owner_slug = artwork.with_untracked(|a| a.ready().and_then(|a| a.user_slug.clone()));
        let navigate = navigate.clone();
        spawn_local(async move {
            match commands::delete_artwork(id).await {
                Ok(()) => {
                    log::info!("[artwork] deleted {id}");
                    let target = owner_slug.map(|s| routes::gallery(&s)).unwrap_or_else(|| routes::HOME.to_string());
                    navigate(&target, Default::default());
                }
                Err(e) => set_action_error.set(Some(e.user_message())),
            }
        });
    });

    view! {
        {move || match artwork.with(|a| a.ready().and_then(|a| a.user_slug.clone())) {
            Some(slug) => view! { <NavBar slug=slug /> }.into_any(),
            None => view! { <NavBar /> }.into_any(),
        }}
        <main class="artwork-page">
            {move || match artwork.get() {
                Load::Loading => view! { <LoadingSpinner /> }.into_any(),
                Load::Failed(error) => view! { <ErrorBanner error=error /> }.into_any(),
                Load::Ready(a) if !access::can_view_artwork(&a, is_owner.get()) => {
                    view! { <ErrorBanner error=ApiError::Forbidden(None) /> }.into_any()
                }
                Load::Ready(a) => {
                    let description = a.description.as_deref().map(markdown::render);
                    let schedule = format::date_range(a.start_date.as_deref(), a.end_date.as_deref());
                    let artist = a.user_slug.clone().map(|slug| {
                        let name = a.user_name.clone().unwrap_or_else(|| slug.clone());
                        view! { <a class="artist-link" href=routes::gallery(&slug)>{name}</a> }
                    });
                    let edit_href = routes::artwork_edit(a.id);
                    view! {
                        <figure class="artwork-hero">
                            <img src=a.display_image().to_string() alt=a.title.clone() />
                        </figure>
                        <header class="artwork-header">
                            <h1>{a.title.clone()}</h1>
                            {artist}
                            <p class="artwork-details">{a.details_line()}</p>
                            <p class="artwork-meta">
                                <span class="badge">{a.status.label()}</span>
                                <span class="badge">{a.privacy.label()}</span>
                                {schedule.map(|s| view! { <span class="schedule">{s}</span> })}
                                <span>{format::views(a.view_count)}</span>
                            </p>
                        </header>
                        {description.map(|html| view! { <div class="markdown artwork-description" inner_html=html></div> })}
                        <div class="artwork-images">
                            {a.images
                                .iter()
                                .map(|img| {
                                    let caption = img.caption.clone().filter(|c| !c.trim().is_empty());
                                    view! {
                                        <figure>
                                            <img src=img.url.clone() alt="" loading="lazy" />
                                            {caption.map(|c| view! { <figcaption>{c}</figcaption> })}
                                        </figure>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <Show when=move || is_owner.get()>
                            <div class="owner-actions">
                                <a class="btn" href=edit_href.clone()>"Edit"</a>
                                <DeleteConfirmButton button_class="btn danger" prompt="Delete this artwork and its history?" on_confirm=on_delete />
                            </div>
                        </Show>
                        <HistoryTimeline artwork_id=a.id histories=histories is_owner=is_owner />
                    }
                    .into_any()
                }
            }}
            {move || action_error.get().map(|e| view! { <p class="field-error">{e}</p> })}
        </main>
    }
}
