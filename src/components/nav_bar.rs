//! Navigation Bar Component
//!
//! Site header: gallery section links for the gallery being viewed, plus
//! sign-in state on the right.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::routes;
use crate::store::{sign_out, use_app_store, AppStateStoreFields};

/// Header with section links for `slug` (if any)
#[component]
pub fn NavBar(#[prop(optional, into)] slug: Option<String>) -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();

    let section_links = slug.map(|slug| {
        view! {
            <nav class="gallery-nav">
                <a href=routes::gallery(&slug)>"Works"</a>
                <a href=routes::about(&slug)>"About"</a>
                <a href=routes::studio(&slug)>"Studio"</a>
                <a href=routes::blog(&slug)>"Blog"</a>
            </nav>
        }
    });

    let on_sign_out = move |_| {
        sign_out(&store);
        navigate(routes::HOME, Default::default());
    };

    view! {
        <header class="site-header">
            <a class="site-title" href=routes::HOME>"Folio"</a>
            {section_links}
            <div class="session-links">
                {move || match store.current_user().get() {
                    Some(user) => view! {
                        <a href=routes::gallery(&user.slug)>{user.name.clone()}</a>
                        <button type="button" class="link-btn" on:click=on_sign_out.clone()>"Sign out"</button>
                    }.into_any(),
                    None => view! {
                        <a href=routes::LOGIN>"Sign in"</a>
                        <a href=routes::REGISTER>"Join"</a>
                    }.into_any(),
                }}
            </div>
        </header>
    }
}
