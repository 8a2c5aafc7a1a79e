//! Gallery page: profile header plus the artist's artwork grid.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{use_param, use_slug_owner};
use crate::access;
use crate::commands::{self, ArtworkFilter};
use crate::components::{
    ArtworkCard, EmptyState, ErrorBanner, FilterTabs, GalleryHeader, Load, LoadingSpinner, NavBar,
    ARTWORK_STATUS_TABS,
};
use crate::config::ARTWORK_PAGE_SIZE;
use crate::error::ApiError;
use crate::listing::{Listing, PageRequest};
use crate::models::{Artwork, ArtworkStatus, Profile};
use crate::routes;
use crate::store::{refresh_current_user, use_app_store};

type ArtworkListing = Listing<Artwork, ArtworkFilter>;

/// Fetch one page into `listing`; late answers for an old filter are dropped
pub(super) fn load_artworks(
    listing: RwSignal<ArtworkListing>,
    list_error: RwSignal<Option<ApiError>>,
    request: PageRequest<ArtworkFilter>,
) {
    spawn_local(async move {
        match commands::list_artworks(&request).await {
            Ok(page) => {
                let applied = listing.try_update(|l| l.apply(&request, page)).unwrap_or(false);
                if !applied {
                    log::debug!("[gallery] dropped stale page {}", request.page);
                }
            }
            Err(e) => {
                log::warn!("[gallery] page {} failed: {e}", request.page);
                listing.update(|l| l.fail(&request));
                list_error.set(Some(e));
            }
        }
    });
}

#[component]
pub fn GalleryPage() -> impl IntoView {
    let store = use_app_store();
    let slug = use_param("slug");
    let is_owner = use_slug_owner(slug);
    refresh_current_user(store);

    let profile = RwSignal::new(Load::<Profile>::Loading);
    let status_tab = RwSignal::new(String::new());
    let listing = RwSignal::new(ArtworkListing::new(
        ArtworkFilter { user: String::new(), status: None },
        ARTWORK_PAGE_SIZE,
    ));
    let list_error = RwSignal::new(None::<ApiError>);

    Effect::new(move |_| {
        let slug = slug.get();
        profile.set(Load::Loading);
        spawn_local(async move {
            let result = commands::get_profile(&slug).await;
            if let Err(e) = &result {
                log::warn!("[gallery] profile {slug}: {e}");
            }
            profile.set(Load::from_result(result));
        });
    });

    // any filter change restarts from page 1
    Effect::new(move |_| {
        let filter = ArtworkFilter {
            user: slug.get(),
            status: ArtworkStatus::from_str(&status_tab.get()),
        };
        list_error.set(None);
        if let Some(request) = listing.try_update(|l| l.reset(filter)) {
            load_artworks(listing, list_error, request);
        }
    });

    let load_more = move |_| {
        if let Some(request) = listing.try_update(|l| l.next_page()).flatten() {
            load_artworks(listing, list_error, request);
        }
    };

    let visible = Memo::new(move |_| listing.with(|l| access::visible_artworks(l.items(), is_owner.get())));

    view! {
        <NavBar slug=slug.get_untracked() />
        <main class="gallery-page">
            {move || match profile.get() {
                Load::Loading => view! { <LoadingSpinner /> }.into_any(),
                Load::Failed(error) => view! { <ErrorBanner error=error /> }.into_any(),
                Load::Ready(p) => view! { <GalleryHeader profile=p is_owner=is_owner /> }.into_any(),
            }}

            <div class="gallery-toolbar">
                <FilterTabs
                    tabs=ARTWORK_STATUS_TABS
                    current=status_tab
                    on_change=move |value: String| status_tab.set(value)
                />
                <Show when=move || is_owner.get()>
                    <a class="btn primary" href=routes::ARTWORK_NEW>"New artwork"</a>
                </Show>
            </div>

            {move || list_error.get().map(|error| view! { <ErrorBanner error=error /> })}
            <Show when=move || listing.with(|l| l.is_loading() && l.is_initial())>
                <LoadingSpinner />
            </Show>
            <Show when=move || listing.with(|l| !l.is_loading() && !l.is_initial()) && visible.with(Vec::is_empty)>
                <EmptyState message="No artworks yet." />
            </Show>

            <div class="artwork-grid">
                <For
                    each=move || visible.get()
                    key=|a| a.id
                    children=|artwork| view! { <ArtworkCard artwork=artwork /> }
                />
            </div>

            <Show when=move || listing.with(|l| l.has_more())>
                <button
                    type="button"
                    class="btn load-more"
                    prop:disabled=move || listing.with(|l| l.is_loading())
                    on:click=load_more
                >
                    {move || if listing.with(|l| l.is_loading()) { "Loading…" } else { "Load more" }}
                </button>
            </Show>
        </main>
    }
}
