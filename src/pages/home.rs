//! Landing page. Signed-in users go straight to their own gallery.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use crate::components::NavBar;
use crate::routes;
use crate::store::{refresh_current_user, use_app_store, AppStateStoreFields};

#[component]
pub fn HomePage() -> impl IntoView {
    let store = use_app_store();
    let navigate = use_navigate();
    refresh_current_user(store);

    Effect::new(move |_| {
        if let Some(user) = store.current_user().get() {
            navigate(
                &routes::gallery(&user.slug),
                NavigateOptions { replace: true, ..Default::default() },
            );
        }
    });

    view! {
        <NavBar />
        <main class="landing">
            <h1>"Show your work, from first sketch to finished piece"</h1>
            <p>"Galleries, process timelines and a studio journal for artists."</p>
            <div class="landing-actions">
                <a class="btn primary" href=routes::REGISTER>"Create your gallery"</a>
                <a class="btn" href=routes::LOGIN>"Sign in"</a>
            </div>
        </main>
    }
}
