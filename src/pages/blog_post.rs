//! Single blog post. Opening it bumps the view counter (best effort).

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use super::{use_id_param, use_param};
use crate::access;
use crate::commands;
use crate::components::{DeleteConfirmButton, ErrorBanner, Load, LoadingSpinner, NavBar};
use crate::error::ApiError;
use crate::format;
use crate::models::BlogPost;
use crate::routes;
use crate::store::{refresh_current_user, use_app_store, AppStateStoreFields};

#[component]
pub fn BlogPostPage() -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();
    let slug = use_param("slug");
    let route_id = use_id_param("id");
    let post_id = Memo::new(move |_| route_id.get().id());
    refresh_current_user(store);

    let post = RwSignal::new(Load::<BlogPost>::Loading);
    let (action_error, set_action_error) = signal(None::<String>);

    Effect::new(move |_| {
        let Some(id) = post_id.get() else {
            post.set(Load::Failed(ApiError::NotFound));
            return;
        };
        post.set(Load::Loading);
        spawn_local(async move {
            let result = commands::get_post(id).await;
            let found = result.is_ok();
            post.set(Load::from_result(result));
            if found {
                commands::record_view(id).await;
            }
        });
    });

    let is_owner = Signal::derive(move || {
        let user = store.current_user().get();
        post.with(|p| p.ready().is_some_and(|p| access::owns_post(user.as_ref(), p)))
    });

    let on_delete = Callback::new(move |_: ()| {
        let Some(id) = post_id.get_untracked() else {
            return;
        };
        let navigate = navigate.clone();
        spawn_local(async move {
            match commands::delete_post(id).await {
                Ok(()) => {
                    log::info!("[blog] deleted post {id}");
                    navigate(&routes::blog(&slug.get_untracked()), Default::default());
                }
                Err(e) => set_action_error.set(Some(e.user_message())),
            }
        });
    });

    view! {
        <NavBar slug=slug.get_untracked() />
        <main class="post-page">
            {move || match post.get() {
                Load::Loading => view! { <LoadingSpinner /> }.into_any(),
                Load::Failed(error) => view! { <ErrorBanner error=error /> }.into_any(),
                // a restricted post that slipped through is treated as private
                Load::Ready(p) if !access::can_view_post(&p, is_owner.get()) => {
                    view! { <ErrorBanner error=ApiError::Forbidden(None) /> }.into_any()
                }
                Load::Ready(p) => {
                    let date = format::format_optional_date(p.created_at.as_deref());
                    let edit_href = routes::blog_edit(&slug.get_untracked(), p.id);
                    view! {
                        <article class="post">
                            <header class="post-header">
                                <span class="post-type">{p.post_type.label()}</span>
                                <h1>{p.title.clone()}</h1>
                                <div class="post-meta">
                                    {date.map(|d| view! { <time>{d}</time> })}
                                    <span>{format::views(p.view_count)}</span>
                                    {(!p.published).then(|| view! { <span class="badge">"Draft"</span> })}
                                    {(!p.is_public).then(|| view! { <span class="badge">"Private"</span> })}
                                </div>
                            </header>
                            // editor output is stored as HTML
                            <div class="post-content" inner_html=p.content.clone()></div>
                        </article>
                        <Show when=move || is_owner.get()>
                            <div class="owner-actions">
                                <a class="btn" href=edit_href.clone()>"Edit"</a>
                                <DeleteConfirmButton button_class="btn danger" prompt="Delete this post?" on_confirm=on_delete />
                            </div>
                        </Show>
                    }
                    .into_any()
                }
            }}
            {move || action_error.get().map(|e| view! { <p class="field-error">{e}</p> })}
            <a class="back-link" href=move || routes::blog(&slug.get())>"All posts"</a>
        </main>
    }
}
