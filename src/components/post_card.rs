//! Post Card Component

use leptos::prelude::*;

use crate::config::EXCERPT_CHARS;
use crate::format;
use crate::markdown::plain_excerpt;
use crate::models::BlogPost;
use crate::routes;

/// Blog list entry with type, date and teaser
#[component]
pub fn PostCard(post: BlogPost, #[prop(into)] slug: String) -> impl IntoView {
    let href = routes::blog_post(&slug, post.id);
    let teaser = post
        .excerpt
        .clone()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| plain_excerpt(&post.content, EXCERPT_CHARS));
    let date = format::format_optional_date(post.created_at.as_deref());
    let mut class = String::from("post-card");
    if post.pinned {
        class.push_str(" pinned");
    }
    if !post.published {
        class.push_str(" draft");
    }

    view! {
        <article class=class>
            <div class="post-meta">
                <span class="post-type">{post.post_type.label()}</span>
                {date.map(|d| view! { <time>{d}</time> })}
                {post.pinned.then(|| view! { <span class="badge">"Pinned"</span> })}
                {(!post.published).then(|| view! { <span class="badge">"Draft"</span> })}
            </div>
            <h2><a href=href>{post.title.clone()}</a></h2>
            <p class="post-excerpt">{teaser}</p>
            <span class="post-views">{format::views(post.view_count)}</span>
        </article>
    }
}
