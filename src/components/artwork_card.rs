//! Artwork Card Component

use leptos::prelude::*;

use crate::models::{Artwork, ArtworkStatus, Privacy};
use crate::routes;

/// Grid tile linking to the artwork page
#[component]
pub fn ArtworkCard(artwork: Artwork) -> impl IntoView {
    let href = routes::artwork(artwork.id);
    let image = artwork.display_image().to_string();
    let details = artwork.details_line();
    let badge = match (artwork.status, artwork.privacy) {
        (_, Privacy::Private) => Some("Private"),
        (ArtworkStatus::WorkInProgress, _) => Some(ArtworkStatus::WorkInProgress.label()),
        _ => None,
    };

    view! {
        <a class="artwork-card" href=href>
            <img src=image alt=artwork.title.clone() loading="lazy" />
            <div class="artwork-card-caption">
                <span class="artwork-title">{artwork.title.clone()}</span>
                {(!details.is_empty()).then(|| view! { <span class="artwork-details">{details}</span> })}
                {badge.map(|b| view! { <span class="badge">{b}</span> })}
            </div>
        </a>
    }
}
