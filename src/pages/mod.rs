//! Route Pages
//!
//! One component per route in `app.rs`. Pages own their data in local
//! signals; only the signed-in user comes from the global store.

mod about;
mod artwork_detail;
mod artwork_form;
mod blog_editor;
mod blog_list;
mod blog_post;
mod gallery;
mod home;
mod login;
mod not_found;
mod oauth_callback;
mod register;
mod studio;

pub use about::AboutPage;
pub use artwork_detail::ArtworkDetailPage;
pub use artwork_form::ArtworkFormPage;
pub use blog_editor::BlogEditorPage;
pub use blog_list::BlogListPage;
pub use blog_post::BlogPostPage;
pub use gallery::GalleryPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use oauth_callback::OAuthCallbackPage;
pub use register::RegisterPage;
pub use studio::StudioPage;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::access;
use crate::store::{use_app_store, AppStateStoreFields};

/// Reactive route parameter, empty when absent
fn use_param(key: &'static str) -> Memo<String> {
    let params = use_params_map();
    Memo::new(move |_| params.with(|p| p.get(key).unwrap_or_default()))
}

/// Numeric id segment of a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteId {
    /// Route has no id segment ("new" forms)
    Absent,
    Valid(i64),
    /// Present but not a number; render not-found
    Invalid,
}

impl RouteId {
    fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return RouteId::Absent;
        }
        match raw.parse::<i64>() {
            Ok(id) => RouteId::Valid(id),
            Err(_) => RouteId::Invalid,
        }
    }

    fn id(self) -> Option<i64> {
        match self {
            RouteId::Valid(id) => Some(id),
            _ => None,
        }
    }
}

fn use_id_param(key: &'static str) -> Memo<RouteId> {
    let raw = use_param(key);
    Memo::new(move |_| raw.with(|r| RouteId::parse(r)))
}

/// Whether the signed-in user owns the gallery at `slug`
fn use_slug_owner(slug: Memo<String>) -> Signal<bool> {
    let store = use_app_store();
    Signal::derive(move || {
        let user = store.current_user().get();
        slug.with(|s| access::is_owner(user.as_ref(), None, Some(s)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_id_distinguishes_missing_from_garbage() {
        assert_eq!(RouteId::parse(""), RouteId::Absent);
        assert_eq!(RouteId::parse("42"), RouteId::Valid(42));
        assert_eq!(RouteId::parse("abc"), RouteId::Invalid);
        assert_eq!(RouteId::parse("abc").id(), None);
        assert_eq!(RouteId::parse("7").id(), Some(7));
    }
}
