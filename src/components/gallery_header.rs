//! Gallery Header Component
//!
//! Artist name, bio and counters shown above the gallery and studio pages.

use leptos::prelude::*;

use crate::markdown;
use crate::models::Profile;
use crate::routes;

#[component]
pub fn GalleryHeader(profile: Profile, is_owner: Signal<bool>) -> impl IntoView {
    let bio_html = profile.bio.as_deref().map(markdown::render);
    let about_href = routes::about(&profile.slug);

    view! {
        <section class="gallery-header">
            {profile.profile_image_url.clone().map(|src| view! {
                <img class="profile-image" src=src alt="" />
            })}
            <div class="gallery-info">
                <h1>{profile.name.clone()}</h1>
                {bio_html.map(|html| view! { <div class="bio" inner_html=html></div> })}
                <p class="gallery-counters">
                    <span>{format!("{} works", profile.total_artworks)}</span>
                    " · "
                    <span>{crate::format::views(profile.total_views)}</span>
                </p>
                <Show when=move || is_owner.get()>
                    <a class="btn" href=about_href.clone()>"Edit profile"</a>
                </Show>
            </div>
        </section>
    }
}
