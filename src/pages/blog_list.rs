//! Blog list: post-type tabs, debounced search and "load more".

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{use_param, use_slug_owner};
use crate::access;
use crate::commands::{self, PostFilter};
use crate::components::{EmptyState, ErrorBanner, FilterTabs, LoadingSpinner, NavBar, PostCard, POST_TYPE_TABS};
use crate::config::{BLOG_PAGE_SIZE, SEARCH_DEBOUNCE_MS};
use crate::error::ApiError;
use crate::listing::{Listing, PageRequest};
use crate::models::{BlogPost, PostType};
use crate::routes;
use crate::store::{refresh_current_user, use_app_store};

pub(super) type PostListing = Listing<BlogPost, PostFilter>;

pub(super) fn load_posts(listing: RwSignal<PostListing>, list_error: RwSignal<Option<ApiError>>, request: PageRequest<PostFilter>) {
    spawn_local(async move {
        match commands::list_posts(&request).await {
            Ok(page) => {
                if !listing.try_update(|l| l.apply(&request, page)).unwrap_or(false) {
                    log::debug!("[blog] dropped stale page {}", request.page);
                }
            }
            Err(e) => {
                log::warn!("[blog] page {} failed: {e}", request.page);
                listing.update(|l| l.fail(&request));
                list_error.set(Some(e));
            }
        }
    });
}

#[component]
pub fn BlogListPage() -> impl IntoView {
    let store = use_app_store();
    let slug = use_param("slug");
    let is_owner = use_slug_owner(slug);
    refresh_current_user(store);

    let type_tab = RwSignal::new(String::new());
    let search_input = RwSignal::new(String::new());
    // debounced copy of `search_input` that actually drives the query
    let search = RwSignal::new(String::new());
    let search_seq = StoredValue::new(0u64);
    let listing = RwSignal::new(PostListing::new(PostFilter::default(), BLOG_PAGE_SIZE));
    let list_error = RwSignal::new(None::<ApiError>);

    // owner-only tabs disappear when the viewer is not the owner
    Effect::new(move |_| {
        let selected = PostType::from_str(&type_tab.get());
        if !is_owner.get() && selected.is_some_and(|t| t.is_owner_only()) {
            type_tab.set(String::new());
        }
    });

    Effect::new(move |_| {
        let filter = PostFilter {
            user: slug.get(),
            post_type: PostType::from_str(&type_tab.get()),
            search: search.get().trim().to_string(),
        };
        list_error.set(None);
        if let Some(request) = listing.try_update(|l| l.reset(filter)) {
            load_posts(listing, list_error, request);
        }
    });

    let on_search_input = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        search_input.set(value.clone());
        search_seq.update_value(|n| *n += 1);
        let seq = search_seq.get_value();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if search_seq.try_get_value() == Some(seq) {
                let _ = search.try_set(value);
            }
        });
    };

    let load_more = move |_| {
        if let Some(request) = listing.try_update(|l| l.next_page()).flatten() {
            load_posts(listing, list_error, request);
        }
    };

    let visible = Memo::new(move |_| listing.with(|l| access::visible_posts(l.items(), is_owner.get())));

    view! {
        <NavBar slug=slug.get_untracked() />
        <main class="blog-page">
            <div class="blog-toolbar">
                {move || {
                    let hidden = if is_owner.get() {
                        Vec::new()
                    } else {
                        PostType::ALL.iter().filter(|t| t.is_owner_only()).map(|t| t.as_str()).collect()
                    };
                    view! {
                        <FilterTabs
                            tabs=POST_TYPE_TABS
                            current=type_tab
                            on_change=move |value: String| type_tab.set(value)
                            hidden=hidden
                        />
                    }
                }}
                <input
                    type="search"
                    class="blog-search"
                    placeholder="Search posts"
                    prop:value=search_input
                    on:input=on_search_input
                />
                <Show when=move || is_owner.get()>
                    <a class="btn primary" href=move || routes::blog_new(&slug.get())>"Write"</a>
                </Show>
            </div>

            {move || list_error.get().map(|error| view! { <ErrorBanner error=error /> })}
            <Show when=move || listing.with(|l| l.is_loading() && l.is_initial())>
                <LoadingSpinner />
            </Show>
            <Show when=move || listing.with(|l| !l.is_loading() && !l.is_initial()) && visible.with(Vec::is_empty)>
                {move || {
                    let message = listing.with(|l| {
                        let search = &l.filter().search;
                        if search.is_empty() {
                            "No posts yet.".to_string()
                        } else {
                            format!("No posts match \"{search}\".")
                        }
                    });
                    view! { <EmptyState message=message /> }
                }}
            </Show>

            <div class="post-list">
                <For
                    each=move || visible.get()
                    key=|p| (p.id, p.title.clone(), p.pinned)
                    children=move |post| view! { <PostCard post=post slug=slug.get_untracked() /> }
                />
            </div>

            <Show when=move || listing.with(|l| l.has_more())>
                <button
                    type="button"
                    class="btn load-more"
                    prop:disabled=move || listing.with(|l| l.is_loading())
                    on:click=load_more
                >
                    "Load more"
                </button>
            </Show>
        </main>
    }
}
