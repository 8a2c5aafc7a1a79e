//! Frontend Models
//!
//! Data structures matching backend JSON. Nothing here outlives a page view
//! except the cached [`User`] in session storage.

use serde::{Deserialize, Serialize};

use crate::config::PLACEHOLDER_IMAGE;

/// Authenticated account (from `/api/auth/me`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub email: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub email_verified: bool,
}

/// Public gallery profile, including the about/studio/CV fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub profile_image_url: Option<String>,
    pub about_text: Option<String>,
    pub about_image_url: Option<String>,
    pub about_video_url: Option<String>,
    pub studio_description: Option<String>,
    pub cv_education: Option<String>,
    pub cv_exhibitions: Option<String>,
    pub cv_awards: Option<String>,
    pub total_artworks: u64,
    pub total_views: u64,
}

/// Editable subset of [`Profile`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    pub name: String,
    pub bio: Option<String>,
    pub about_text: Option<String>,
    pub about_image_url: Option<String>,
    pub about_video_url: Option<String>,
    pub studio_description: Option<String>,
    pub cv_education: Option<String>,
    pub cv_exhibitions: Option<String>,
    pub cv_awards: Option<String>,
}

impl From<&Profile> for ProfileUpdate {
    fn from(p: &Profile) -> Self {
        Self {
            name: p.name.clone(),
            bio: p.bio.clone(),
            about_text: p.about_text.clone(),
            about_image_url: p.about_image_url.clone(),
            about_video_url: p.about_video_url.clone(),
            studio_description: p.studio_description.clone(),
            cv_education: p.cv_education.clone(),
            cv_exhibitions: p.cv_exhibitions.clone(),
            cv_awards: p.cv_awards.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ArtworkStatus {
    WorkInProgress,
    #[default]
    Completed,
    Archived,
}

impl ArtworkStatus {
    pub const ALL: [ArtworkStatus; 3] = [
        ArtworkStatus::WorkInProgress,
        ArtworkStatus::Completed,
        ArtworkStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtworkStatus::WorkInProgress => "work_in_progress",
            ArtworkStatus::Completed => "completed",
            ArtworkStatus::Archived => "archived",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ArtworkStatus::WorkInProgress => "In progress",
            ArtworkStatus::Completed => "Completed",
            ArtworkStatus::Archived => "Archived",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    #[default]
    Public,
    Private,
    Unlisted,
}

impl Privacy {
    pub const ALL: [Privacy; 3] = [Privacy::Public, Privacy::Private, Privacy::Unlisted];

    pub fn as_str(&self) -> &'static str {
        match self {
            Privacy::Public => "public",
            Privacy::Private => "private",
            Privacy::Unlisted => "unlisted",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Privacy::Public => "Public",
            Privacy::Private => "Private",
            Privacy::Unlisted => "Unlisted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkImage {
    pub id: i64,
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub position: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub medium: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub status: ArtworkStatus,
    #[serde(default)]
    pub privacy: Privacy,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub work_in_progress_url: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub images: Vec<ArtworkImage>,
    #[serde(default)]
    pub histories: Vec<ArtworkHistory>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_slug: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Artwork {
    /// Image shown for this artwork in grids and headers.
    ///
    /// In-progress works show their progress shot when they have one,
    /// otherwise the thumbnail, otherwise the placeholder.
    pub fn display_image(&self) -> &str {
        if self.status == ArtworkStatus::WorkInProgress {
            if let Some(url) = non_empty(&self.work_in_progress_url) {
                return url;
            }
        }
        non_empty(&self.thumbnail_url).unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Comma-joined medium, size and year for captions
    pub fn details_line(&self) -> String {
        let year = self.year.map(|y| y.to_string());
        [non_empty(&self.medium), non_empty(&self.size), year.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Create/update body for artworks
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArtworkInput {
    pub title: String,
    pub description: Option<String>,
    pub medium: Option<String>,
    pub size: Option<String>,
    pub year: Option<i32>,
    pub status: ArtworkStatus,
    pub privacy: Privacy,
    pub thumbnail_url: Option<String>,
    pub work_in_progress_url: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
    Youtube,
    Document,
    Text,
}

impl MediaKind {
    pub const ALL: [MediaKind; 5] = [
        MediaKind::Image,
        MediaKind::Video,
        MediaKind::Youtube,
        MediaKind::Document,
        MediaKind::Text,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
            MediaKind::Youtube => "youtube",
            MediaKind::Document => "document",
            MediaKind::Text => "text",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Video => "Video",
            MediaKind::Youtube => "YouTube",
            MediaKind::Document => "Document",
            MediaKind::Text => "Note",
        }
    }

    /// Kinds whose media is a file picked from disk
    pub fn is_uploadable(&self) -> bool {
        matches!(self, MediaKind::Image | MediaKind::Video | MediaKind::Document)
    }
}

/// Process timeline entry for an artwork
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkHistory {
    pub id: i64,
    #[serde(default)]
    pub artwork_id: Option<i64>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_type: MediaKind,
    #[serde(default)]
    pub history_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoryInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub media_url: Option<String>,
    pub media_type: MediaKind,
    pub history_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum PostType {
    #[default]
    Blog,
    Notice,
    Exhibition,
    Award,
    News,
    Studio,
}

impl PostType {
    pub const ALL: [PostType; 6] = [
        PostType::Blog,
        PostType::Notice,
        PostType::Exhibition,
        PostType::Award,
        PostType::News,
        PostType::Studio,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Blog => "BLOG",
            PostType::Notice => "NOTICE",
            PostType::Exhibition => "EXHIBITION",
            PostType::Award => "AWARD",
            PostType::News => "NEWS",
            PostType::Studio => "STUDIO",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str().eq_ignore_ascii_case(s))
    }

    pub fn label(&self) -> &'static str {
        match self {
            PostType::Blog => "Blog",
            PostType::Notice => "Notice",
            PostType::Exhibition => "Exhibition",
            PostType::Award => "Award",
            PostType::News => "News",
            PostType::Studio => "Studio",
        }
    }

    /// Types only the gallery owner may see
    pub fn is_owner_only(&self) -> bool {
        matches!(self, PostType::Studio)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    /// HTML from the rich-text editor
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub post_type: PostType,
    #[serde(default = "default_true")]
    pub published: bool,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_slug: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlogPostInput {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub post_type: PostType,
    pub published: bool,
    pub is_public: bool,
    pub pinned: bool,
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index as reported by the server
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub last: Option<bool>,
}

impl<T> Page<T> {
    /// Whether another page can be requested after this one
    pub fn has_more(&self, requested_size: u32) -> bool {
        match self.last {
            Some(last) => !last,
            None if self.total_pages > 0 => self.page + 1 < self.total_pages,
            None => self.content.len() as u32 >= requested_size && !self.content.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Embeddable player URL for a YouTube link
pub fn youtube_embed_url(url: &str) -> Option<String> {
    let url = url.trim();
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").or_else(|| rest.strip_prefix("m.")).unwrap_or(rest);

    let id = if let Some(path) = rest.strip_prefix("youtu.be/") {
        path
    } else if let Some(path) = rest.strip_prefix("youtube.com/") {
        if let Some(query) = path.strip_prefix("watch?") {
            query.split('&').find_map(|pair| pair.strip_prefix("v="))?
        } else {
            path.strip_prefix("embed/").or_else(|| path.strip_prefix("shorts/"))?
        }
    } else {
        return None;
    };

    let id: String = id
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if id.is_empty() {
        return None;
    }
    Some(format!("https://www.youtube.com/embed/{id}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artwork(status: ArtworkStatus, thumbnail: Option<&str>, wip: Option<&str>) -> Artwork {
        Artwork {
            id: 1,
            title: "Untitled".to_string(),
            description: None,
            medium: None,
            size: None,
            year: None,
            status,
            privacy: Privacy::Public,
            thumbnail_url: thumbnail.map(String::from),
            work_in_progress_url: wip.map(String::from),
            start_date: None,
            end_date: None,
            images: Vec::new(),
            histories: Vec::new(),
            user_id: None,
            user_slug: None,
            user_name: None,
            view_count: 0,
            created_at: None,
        }
    }

    #[test]
    fn test_display_image_prefers_wip_shot_for_in_progress() {
        let a = artwork(ArtworkStatus::WorkInProgress, Some("/thumb.png"), Some("/wip.png"));
        assert_eq!(a.display_image(), "/wip.png");
    }

    #[test]
    fn test_display_image_ignores_wip_shot_otherwise() {
        for status in [ArtworkStatus::Completed, ArtworkStatus::Archived] {
            let a = artwork(status, Some("/thumb.png"), Some("/wip.png"));
            assert_eq!(a.display_image(), "/thumb.png");
        }
        let a = artwork(ArtworkStatus::WorkInProgress, Some("/thumb.png"), Some(""));
        assert_eq!(a.display_image(), "/thumb.png");
        let a = artwork(ArtworkStatus::WorkInProgress, Some("/thumb.png"), None);
        assert_eq!(a.display_image(), "/thumb.png");
    }

    #[test]
    fn test_display_image_placeholder() {
        assert_eq!(artwork(ArtworkStatus::Completed, None, None).display_image(), PLACEHOLDER_IMAGE);
        assert_eq!(artwork(ArtworkStatus::WorkInProgress, Some(" "), Some("")).display_image(), PLACEHOLDER_IMAGE);
        assert_eq!(artwork(ArtworkStatus::Completed, None, Some("/wip.png")).display_image(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_artwork_deserializes_with_defaults() {
        let json = r#"{"id":7,"title":"Dusk","status":"work_in_progress","privacy":"unlisted","year":2023}"#;
        let a: Artwork = serde_json::from_str(json).unwrap();
        assert_eq!(a.status, ArtworkStatus::WorkInProgress);
        assert_eq!(a.privacy, Privacy::Unlisted);
        assert!(a.histories.is_empty());
        assert_eq!(a.details_line(), "2023");
    }

    #[test]
    fn test_post_type_wire_format() {
        let post: BlogPost = serde_json::from_str(r#"{"id":1,"title":"t","post_type":"STUDIO"}"#).unwrap();
        assert_eq!(post.post_type, PostType::Studio);
        assert!(post.published && post.is_public);
        assert_eq!(PostType::from_str("exhibition"), Some(PostType::Exhibition));
        assert_eq!(serde_json::to_string(&PostType::Award).unwrap(), r#""AWARD""#);
    }

    #[test]
    fn test_page_has_more() {
        let page: Page<i64> = serde_json::from_str(r#"{"content":[1,2],"last":false}"#).unwrap();
        assert!(page.has_more(2));
        let page: Page<i64> = serde_json::from_str(r#"{"content":[1,2],"page":1,"total_pages":2}"#).unwrap();
        assert!(!page.has_more(2));
        let page: Page<i64> = serde_json::from_str(r#"{"content":[1]}"#).unwrap();
        assert!(!page.has_more(2));
    }

    #[test]
    fn test_youtube_embed_url() {
        let expected = Some("https://www.youtube.com/embed/dQw4w9WgXcQ".to_string());
        assert_eq!(youtube_embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"), expected);
        assert_eq!(youtube_embed_url("https://youtu.be/dQw4w9WgXcQ?si=abc"), expected);
        assert_eq!(youtube_embed_url("youtube.com/embed/dQw4w9WgXcQ"), expected);
        assert_eq!(youtube_embed_url("https://m.youtube.com/shorts/dQw4w9WgXcQ"), expected);
        assert_eq!(youtube_embed_url("https://vimeo.com/123"), None);
        assert_eq!(youtube_embed_url("https://www.youtube.com/watch?list=x"), None);
    }
}
