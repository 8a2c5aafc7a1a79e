//! Upload Commands
//!
//! File storage endpoints. `UploadApi` plugs them into the temp-upload
//! lifecycle; `upload_image` is for files that go straight to permanent
//! storage (about image, history media).

use serde::{Deserialize, Serialize};
use temp_upload::UploadBackend;

use super::{delete, post, post_file, Query};
use crate::error::ApiError;

#[derive(Deserialize)]
struct UrlResponse {
    url: String,
}

#[derive(Serialize)]
struct UrlArgs<'a> {
    url: &'a str,
}

/// Upload into the temp namespace
pub async fn upload_temp_file(file: &web_sys::File) -> Result<String, ApiError> {
    let resp: UrlResponse = post_file("/api/upload", file).await?;
    Ok(resp.url)
}

/// Upload directly to permanent storage
pub async fn upload_image(file: &web_sys::File) -> Result<String, ApiError> {
    let resp: UrlResponse = post_file("/api/upload/image", file).await?;
    Ok(resp.url)
}

pub async fn move_temp_to_permanent(url: &str) -> Result<String, ApiError> {
    let resp: UrlResponse = post("/api/upload/move-temp-to-permanent", &UrlArgs { url }).await?;
    Ok(resp.url)
}

pub async fn delete_file(url: &str) -> Result<(), ApiError> {
    delete(&Query::new().push("url", url).to_path("/api/upload/delete-file")).await
}

/// Backend for [`temp_upload`] over the REST endpoints
#[derive(Clone, Copy, Debug, Default)]
pub struct UploadApi;

impl UploadBackend for UploadApi {
    type File = web_sys::File;
    type Error = ApiError;

    async fn upload_temp(&self, file: web_sys::File) -> Result<String, ApiError> {
        upload_temp_file(&file).await
    }

    async fn move_to_permanent(&self, temp_url: &str) -> Result<String, ApiError> {
        move_temp_to_permanent(temp_url).await
    }

    async fn delete(&self, url: &str) -> Result<(), ApiError> {
        delete_file(url).await
    }
}
