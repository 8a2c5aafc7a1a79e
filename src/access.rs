//! Ownership Checks
//!
//! UI-only gates for edit/delete affordances and owner-only content. The
//! backend remains the authority; these checks run again on every render so a
//! response that leaks restricted items still never shows them.

use crate::models::{Artwork, BlogPost, Privacy, User};

/// Whether `viewer` owns a resource identified by owner id and/or slug
pub fn is_owner(viewer: Option<&User>, owner_id: Option<i64>, owner_slug: Option<&str>) -> bool {
    let Some(viewer) = viewer else {
        return false;
    };
    match (owner_id, owner_slug) {
        (Some(id), _) => viewer.id == id,
        (None, Some(slug)) => !slug.is_empty() && viewer.slug == slug,
        (None, None) => false,
    }
}

/// Ownership of a post, from the post's own owner fields only. A post that
/// names no owner is owned by nobody, whatever route it was opened under.
pub fn owns_post(viewer: Option<&User>, post: &BlogPost) -> bool {
    is_owner(viewer, post.user_id, post.user_slug.as_deref())
}

pub fn can_view_post(post: &BlogPost, is_owner: bool) -> bool {
    is_owner || (!post.post_type.is_owner_only() && post.published && post.is_public)
}

pub fn visible_posts(posts: &[BlogPost], is_owner: bool) -> Vec<BlogPost> {
    posts.iter().filter(|p| can_view_post(p, is_owner)).cloned().collect()
}

pub fn can_view_artwork(artwork: &Artwork, is_owner: bool) -> bool {
    is_owner || artwork.privacy != Privacy::Private
}

pub fn visible_artworks(artworks: &[Artwork], is_owner: bool) -> Vec<Artwork> {
    artworks.iter().filter(|a| can_view_artwork(a, is_owner)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostType;

    fn user(id: i64, slug: &str) -> User {
        User {
            id,
            email: format!("{slug}@example.com"),
            name: slug.to_string(),
            slug: slug.to_string(),
            email_verified: true,
        }
    }

    fn post(id: i64, post_type: PostType) -> BlogPost {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": format!("Post {id}"),
            "post_type": post_type.as_str(),
        }))
        .unwrap()
    }

    #[test]
    fn test_is_owner_prefers_id() {
        let me = user(1, "mina");
        assert!(is_owner(Some(&me), Some(1), Some("other")));
        assert!(!is_owner(Some(&me), Some(2), Some("mina")));
        assert!(is_owner(Some(&me), None, Some("mina")));
        assert!(!is_owner(Some(&me), None, Some("")));
        assert!(!is_owner(None, Some(1), Some("mina")));
    }

    #[test]
    fn test_post_without_owner_fields_is_owned_by_nobody() {
        let eve = user(5, "eve");
        let orphan = post(42, PostType::Studio);

        let owns = owns_post(Some(&eve), &orphan);
        assert!(!owns);
        assert!(!can_view_post(&orphan, owns));

        let mut mine = post(43, PostType::Studio);
        mine.user_slug = Some("eve".into());
        assert!(owns_post(Some(&eve), &mine));
        mine.user_id = Some(6);
        assert!(!owns_post(Some(&eve), &mine));
    }

    #[test]
    fn test_studio_posts_hidden_from_visitors() {
        let posts = vec![post(1, PostType::Blog), post(2, PostType::Studio), post(3, PostType::News)];

        let visitor: Vec<i64> = visible_posts(&posts, false).iter().map(|p| p.id).collect();
        assert_eq!(visitor, vec![1, 3]);

        let owner: Vec<i64> = visible_posts(&posts, true).iter().map(|p| p.id).collect();
        assert_eq!(owner, vec![1, 2, 3]);
    }

    #[test]
    fn test_drafts_and_private_posts_hidden_from_visitors() {
        let mut draft = post(1, PostType::Blog);
        draft.published = false;
        let mut private = post(2, PostType::Notice);
        private.is_public = false;

        assert!(!can_view_post(&draft, false));
        assert!(!can_view_post(&private, false));
        assert!(can_view_post(&draft, true));
    }

    #[test]
    fn test_private_artworks_hidden_from_visitors() {
        let mut artwork: Artwork = serde_json::from_str(r#"{"id":1,"title":"a","privacy":"private"}"#).unwrap();
        assert!(!can_view_artwork(&artwork, false));
        assert!(can_view_artwork(&artwork, true));
        artwork.privacy = Privacy::Unlisted;
        assert!(can_view_artwork(&artwork, false));
    }
}
