//! Artwork Commands
//!
//! Bindings for `/api/artworks` and the nested history timeline.

use super::{delete, get, post, put, Query};
use crate::error::ApiError;
use crate::listing::PageRequest;
use crate::models::{Artwork, ArtworkHistory, ArtworkInput, ArtworkStatus, HistoryInput, Page};

/// Filter for a gallery grid
#[derive(Debug, Clone, PartialEq)]
pub struct ArtworkFilter {
    pub user: String,
    pub status: Option<ArtworkStatus>,
}

fn artwork_path(id: i64) -> String {
    format!("/api/artworks/{id}")
}

fn histories_path(artwork_id: i64) -> String {
    format!("/api/artworks/{artwork_id}/histories")
}

pub(crate) fn list_path(request: &PageRequest<ArtworkFilter>) -> String {
    Query::new()
        .push("user", &request.filter.user)
        .push_opt("status", request.filter.status.map(|s| s.as_str()))
        .push("page", request.page_index())
        .push("size", request.size)
        .to_path("/api/artworks")
}

pub async fn list_artworks(request: &PageRequest<ArtworkFilter>) -> Result<Page<Artwork>, ApiError> {
    get(&list_path(request)).await
}

pub async fn get_artwork(id: i64) -> Result<Artwork, ApiError> {
    get(&artwork_path(id)).await
}

pub async fn create_artwork(input: &ArtworkInput) -> Result<Artwork, ApiError> {
    post("/api/artworks", input).await
}

pub async fn update_artwork(id: i64, input: &ArtworkInput) -> Result<Artwork, ApiError> {
    put(&artwork_path(id), input).await
}

pub async fn delete_artwork(id: i64) -> Result<(), ApiError> {
    delete(&artwork_path(id)).await
}

// ========================
// Histories
// ========================

pub async fn list_histories(artwork_id: i64) -> Result<Vec<ArtworkHistory>, ApiError> {
    get(&histories_path(artwork_id)).await
}

pub async fn create_history(artwork_id: i64, input: &HistoryInput) -> Result<ArtworkHistory, ApiError> {
    post(&histories_path(artwork_id), input).await
}

pub async fn update_history(artwork_id: i64, history_id: i64, input: &HistoryInput) -> Result<ArtworkHistory, ApiError> {
    put(&format!("{}/{history_id}", histories_path(artwork_id)), input).await
}

pub async fn delete_history(artwork_id: i64, history_id: i64) -> Result<(), ApiError> {
    delete(&format!("{}/{history_id}", histories_path(artwork_id))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::Listing;

    #[test]
    fn test_list_path_sends_zero_based_page() {
        let filter = ArtworkFilter { user: "mina".to_string(), status: Some(ArtworkStatus::WorkInProgress) };
        let mut listing: Listing<Artwork, ArtworkFilter> = Listing::new(filter.clone(), 12);
        let request = listing.reset(filter);
        assert_eq!(
            list_path(&request),
            "/api/artworks?user=mina&status=work_in_progress&page=0&size=12"
        );
    }

    #[test]
    fn test_history_paths() {
        assert_eq!(histories_path(3), "/api/artworks/3/histories");
        assert_eq!(artwork_path(3), "/api/artworks/3");
    }
}
