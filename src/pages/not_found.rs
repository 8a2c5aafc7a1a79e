use leptos::prelude::*;

use crate::components::NavBar;
use crate::routes;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <NavBar />
        <main class="not-found">
            <h1>"Page not found"</h1>
            <a href=routes::HOME>"Back to the start"</a>
        </main>
    }
}
