//! Studio page: studio description, works in progress, and the owner's
//! private studio journal.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::blog_list::{load_posts, PostListing};
use super::gallery::load_artworks;
use super::{use_param, use_slug_owner};
use crate::access;
use crate::commands::{self, ArtworkFilter, PostFilter};
use crate::components::{ArtworkCard, EmptyState, ErrorBanner, Load, LoadingSpinner, NavBar, PostCard};
use crate::config::{ARTWORK_PAGE_SIZE, BLOG_PAGE_SIZE};
use crate::error::ApiError;
use crate::listing::Listing;
use crate::markdown;
use crate::models::{ArtworkStatus, PostType, Profile};
use crate::routes;
use crate::store::{refresh_current_user, use_app_store};

#[component]
pub fn StudioPage() -> impl IntoView {
    let store = use_app_store();
    let slug = use_param("slug");
    let is_owner = use_slug_owner(slug);
    refresh_current_user(store);

    let profile = RwSignal::new(Load::<Profile>::Loading);
    let works = RwSignal::new(Listing::new(
        ArtworkFilter { user: String::new(), status: Some(ArtworkStatus::WorkInProgress) },
        ARTWORK_PAGE_SIZE,
    ));
    let works_error = RwSignal::new(None::<ApiError>);
    let journal = RwSignal::new(PostListing::new(PostFilter::default(), BLOG_PAGE_SIZE));
    let journal_error = RwSignal::new(None::<ApiError>);

    Effect::new(move |_| {
        let slug = slug.get();
        profile.set(Load::Loading);
        spawn_local(async move {
            profile.set(Load::from_result(commands::get_profile(&slug).await));
        });
    });

    Effect::new(move |_| {
        let filter = ArtworkFilter { user: slug.get(), status: Some(ArtworkStatus::WorkInProgress) };
        works_error.set(None);
        if let Some(request) = works.try_update(|l| l.reset(filter)) {
            load_artworks(works, works_error, request);
        }
    });

    // studio posts are only requested for the owner; a reset also drops any
    // page still in flight from before the viewer changed
    Effect::new(move |_| {
        let filter = PostFilter { user: slug.get(), post_type: Some(PostType::Studio), ..Default::default() };
        let owner = is_owner.get();
        journal_error.set(None);
        let Some(request) = journal.try_update(|l| l.reset(filter)) else {
            return;
        };
        if owner {
            load_posts(journal, journal_error, request);
        } else {
            journal.update(|l| l.fail(&request));
        }
    });

    let visible_works = Memo::new(move |_| works.with(|l| access::visible_artworks(l.items(), is_owner.get())));
    let visible_journal = Memo::new(move |_| journal.with(|l| access::visible_posts(l.items(), is_owner.get())));

    view! {
        <NavBar slug=slug.get_untracked() />
        <main class="studio-page">
            {move || match profile.get() {
                Load::Loading => view! { <LoadingSpinner /> }.into_any(),
                Load::Failed(error) => view! { <ErrorBanner error=error /> }.into_any(),
                Load::Ready(p) => {
                    let description = p
                        .studio_description
                        .as_deref()
                        .filter(|d| !d.trim().is_empty())
                        .map(markdown::render);
                    view! {
                        <h1>{format!("{}'s studio", p.name)}</h1>
                        {description.map(|html| view! { <div class="markdown studio-description" inner_html=html></div> })}
                    }
                    .into_any()
                }
            }}

            <section class="studio-works">
                <h2>"In progress"</h2>
                {move || works_error.get().map(|error| view! { <ErrorBanner error=error /> })}
                <Show when=move || works.with(|l| !l.is_loading()) && visible_works.with(Vec::is_empty)>
                    <EmptyState message="Nothing on the easel right now." />
                </Show>
                <div class="artwork-grid">
                    <For
                        each=move || visible_works.get()
                        key=|a| a.id
                        children=|artwork| view! { <ArtworkCard artwork=artwork /> }
                    />
                </div>
                <Show when=move || works.with(|l| l.has_more())>
                    <button
                        type="button"
                        class="btn load-more"
                        on:click=move |_| {
                            if let Some(request) = works.try_update(|l| l.next_page()).flatten() {
                                load_artworks(works, works_error, request);
                            }
                        }
                    >
                        "Load more"
                    </button>
                </Show>
            </section>

            <Show when=move || is_owner.get()>
                <section class="studio-journal">
                    <h2>"Studio journal"</h2>
                    <p class="hint">"Only you can see these notes."</p>
                    <a class="btn" href=move || routes::blog_new(&slug.get())>"New note"</a>
                    {move || journal_error.get().map(|error| view! { <ErrorBanner error=error /> })}
                    <For
                        each=move || visible_journal.get()
                        key=|p| p.id
                        children=move |post| view! { <PostCard post=post slug=slug.get_untracked() /> }
                    />
                    <Show when=move || journal.with(|l| l.has_more())>
                        <button
                            type="button"
                            class="btn load-more"
                            on:click=move |_| {
                                if let Some(request) = journal.try_update(|l| l.next_page()).flatten() {
                                    load_posts(journal, journal_error, request);
                                }
                            }
                        >
                            "Load more"
                        </button>
                    </Show>
                </section>
            </Show>
        </main>
    }
}
