//! Profile Commands

use super::{get, put, segment};
use crate::error::ApiError;
use crate::models::{Profile, ProfileUpdate};

fn profile_path(slug: &str) -> String {
    format!("/api/profile/{}", segment(slug))
}

pub async fn get_profile(slug: &str) -> Result<Profile, ApiError> {
    get(&profile_path(slug)).await
}

pub async fn update_profile(slug: &str, update: &ProfileUpdate) -> Result<Profile, ApiError> {
    put(&profile_path(slug), update).await
}
