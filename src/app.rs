//! Folio Frontend App
//!
//! Provides the global store and the route table. Static segments are listed
//! before the `:slug` catch-alls so `/login` never resolves as a gallery.

use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;

use crate::pages::{
    AboutPage, ArtworkDetailPage, ArtworkFormPage, BlogEditorPage, BlogListPage, BlogPostPage, GalleryPage,
    HomePage, LoginPage, NotFoundPage, OAuthCallbackPage, RegisterPage, StudioPage,
};
use crate::store::{refresh_session_token, AppState};

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::from_session());
    provide_context(store);
    refresh_session_token();

    view! {
        <Router>
            <Routes fallback=|| view! { <NotFoundPage /> }>
                <Route path=path!("/login") view=LoginPage />
                <Route path=path!("/register") view=RegisterPage />
                <Route path=path!("/oauth/callback") view=OAuthCallbackPage />
                <Route path=path!("/artworks/new") view=ArtworkFormPage />
                <Route path=path!("/artworks/:id/edit") view=ArtworkFormPage />
                <Route path=path!("/artworks/:id") view=ArtworkDetailPage />
                <Route path=path!("/blog/:slug/new") view=BlogEditorPage />
                <Route path=path!("/blog/:slug/:id/edit") view=BlogEditorPage />
                <Route path=path!("/blog/:slug/:id") view=BlogPostPage />
                <Route path=path!("/blog/:slug") view=BlogListPage />
                <Route path=path!("/:slug/about") view=AboutPage />
                <Route path=path!("/:slug/studio") view=StudioPage />
                <Route path=path!("/:slug") view=GalleryPage />
                <Route path=path!("/") view=HomePage />
            </Routes>
        </Router>
    }
}
