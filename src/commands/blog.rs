//! Blog Commands

use super::{delete, get, post, post_empty, put, Query};
use crate::error::ApiError;
use crate::listing::PageRequest;
use crate::models::{BlogPost, BlogPostInput, Page, PostType};

/// Filter for a blog list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PostFilter {
    pub user: String,
    pub post_type: Option<PostType>,
    pub search: String,
}

fn post_path(id: i64) -> String {
    format!("/api/blog/posts/{id}")
}

pub(crate) fn list_path(request: &PageRequest<PostFilter>) -> String {
    Query::new()
        .push("user", &request.filter.user)
        .push_opt("type", request.filter.post_type.map(|t| t.as_str()))
        .push_opt("search", Some(request.filter.search.trim()))
        .push("page", request.page_index())
        .push("size", request.size)
        .to_path("/api/blog/posts")
}

pub async fn list_posts(request: &PageRequest<PostFilter>) -> Result<Page<BlogPost>, ApiError> {
    get(&list_path(request)).await
}

pub async fn get_post(id: i64) -> Result<BlogPost, ApiError> {
    get(&post_path(id)).await
}

pub async fn create_post(input: &BlogPostInput) -> Result<BlogPost, ApiError> {
    post("/api/blog/posts", input).await
}

pub async fn update_post(id: i64, input: &BlogPostInput) -> Result<BlogPost, ApiError> {
    put(&post_path(id), input).await
}

pub async fn delete_post(id: i64) -> Result<(), ApiError> {
    delete(&post_path(id)).await
}

/// Bump the view counter; failures are only logged
pub async fn record_view(id: i64) {
    if let Err(e) = post_empty(&format!("{}/view", post_path(id))).await {
        log::warn!("[blog] view count for post {id} not recorded: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Listing;

    #[test]
    fn test_list_path_includes_active_filters() {
        let filter = PostFilter {
            user: "mina".to_string(),
            post_type: Some(PostType::Exhibition),
            search: " spring show ".to_string(),
        };
        let mut listing: Listing<BlogPost, PostFilter> = Listing::new(filter.clone(), 10);
        let first = listing.reset(filter);
        assert_eq!(
            list_path(&first),
            "/api/blog/posts?user=mina&type=EXHIBITION&search=spring%20show&page=0&size=10"
        );
    }

    #[test]
    fn test_list_path_omits_empty_filters() {
        let filter = PostFilter { user: "mina".to_string(), ..Default::default() };
        let mut listing: Listing<BlogPost, PostFilter> = Listing::new(filter.clone(), 10);
        let first = listing.reset(filter);
        assert_eq!(list_path(&first), "/api/blog/posts?user=mina&page=0&size=10");
    }
}
