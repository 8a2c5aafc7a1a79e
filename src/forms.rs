//! Form Drafts
//!
//! What the user has typed, as strings, and the validation that turns it into
//! a request body. Keeps the page components free of parsing rules.

use chrono::NaiveDate;

use crate::config::EXCERPT_CHARS;
use crate::markdown::plain_excerpt;
use crate::models::{
    Artwork, ArtworkInput, ArtworkStatus, BlogPost, BlogPostInput, HistoryInput, MediaKind, PostType, Privacy,
};

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn optional_date(value: &str, field: &str) -> Result<Option<String>, String> {
    match optional(value) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(&v, "%Y-%m-%d")
            .map(|_| Some(v))
            .map_err(|_| format!("{field} must be a date like 2024-05-31")),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtworkDraft {
    pub title: String,
    pub description: String,
    pub medium: String,
    pub size: String,
    pub year: String,
    pub status: ArtworkStatus,
    pub privacy: Privacy,
    pub start_date: String,
    pub end_date: String,
}

impl ArtworkDraft {
    pub fn from_artwork(a: &Artwork) -> Self {
        Self {
            title: a.title.clone(),
            description: a.description.clone().unwrap_or_default(),
            medium: a.medium.clone().unwrap_or_default(),
            size: a.size.clone().unwrap_or_default(),
            year: a.year.map(|y| y.to_string()).unwrap_or_default(),
            status: a.status,
            privacy: a.privacy,
            start_date: a.start_date.as_deref().map(crate::format::format_date).unwrap_or_default(),
            end_date: a.end_date.as_deref().map(crate::format::format_date).unwrap_or_default(),
        }
    }

    /// Validate and build the request body around already-committed image URLs
    pub fn into_input(
        &self,
        thumbnail_url: Option<String>,
        work_in_progress_url: Option<String>,
    ) -> Result<ArtworkInput, String> {
        let title = optional(&self.title).ok_or("Title is required")?;
        let year = match optional(&self.year) {
            None => None,
            Some(y) => Some(y.parse::<i32>().map_err(|_| "Year must be a number".to_string())?),
        };
        let start_date = optional_date(&self.start_date, "Start date")?;
        let end_date = optional_date(&self.end_date, "End date")?;
        if let (Some(start), Some(end)) = (&start_date, &end_date) {
            if end < start {
                return Err("End date is before start date".to_string());
            }
        }

        Ok(ArtworkInput {
            title,
            description: optional(&self.description),
            medium: optional(&self.medium),
            size: optional(&self.size),
            year,
            status: self.status,
            privacy: self.privacy,
            thumbnail_url,
            work_in_progress_url,
            start_date,
            end_date,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub post_type: PostType,
    pub published: bool,
    pub is_public: bool,
    pub pinned: bool,
}

impl Default for PostDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            excerpt: String::new(),
            post_type: PostType::Blog,
            published: true,
            is_public: true,
            pinned: false,
        }
    }
}

impl PostDraft {
    pub fn from_post(p: &BlogPost) -> Self {
        Self {
            title: p.title.clone(),
            content: p.content.clone(),
            excerpt: p.excerpt.clone().unwrap_or_default(),
            post_type: p.post_type,
            published: p.published,
            is_public: p.is_public,
            pinned: p.pinned,
        }
    }

    pub fn to_input(&self) -> Result<BlogPostInput, String> {
        let title = optional(&self.title).ok_or("Title is required")?;
        if plain_excerpt(&self.content, 1).is_empty() && !self.content.contains("<img") {
            return Err("Content is required".to_string());
        }
        let excerpt = optional(&self.excerpt).or_else(|| {
            let derived = plain_excerpt(&self.content, EXCERPT_CHARS);
            (!derived.is_empty()).then_some(derived)
        });

        Ok(BlogPostInput {
            title,
            content: self.content.clone(),
            excerpt,
            post_type: self.post_type,
            published: self.published,
            is_public: self.is_public,
            pinned: self.pinned,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryDraft {
    pub title: String,
    pub content: String,
    pub media_url: String,
    pub media_type: MediaKind,
    pub history_date: String,
}

impl HistoryDraft {
    pub fn to_input(&self) -> Result<HistoryInput, String> {
        let content = optional(&self.content);
        let media_url = optional(&self.media_url);
        match self.media_type {
            MediaKind::Text if content.is_none() => return Err("Write something for this entry".to_string()),
            MediaKind::Text => {}
            _ if media_url.is_none() => return Err(format!("{} entries need a file or link", self.media_type.label())),
            _ => {}
        }

        Ok(HistoryInput {
            title: optional(&self.title),
            content,
            media_url: if self.media_type == MediaKind::Text { None } else { media_url },
            media_type: self.media_type,
            history_date: optional_date(&self.history_date, "Date")?,
        })
    }
}

/// Problem with a gallery handle, if any
pub fn slug_problem(slug: &str) -> Option<&'static str> {
    let len = slug.chars().count();
    if !(3..=30).contains(&len) {
        return Some("Use 3 to 30 characters");
    }
    if !slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Some("Use lowercase letters, numbers and hyphens only");
    }
    if slug.starts_with('-') || slug.ends_with('-') {
        return Some("Cannot start or end with a hyphen");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ArtworkDraft {
        ArtworkDraft {
            title: "  Harbour at dusk ".to_string(),
            year: "2024".to_string(),
            medium: "Oil on canvas".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_artwork_draft_uses_committed_urls() {
        let input = draft()
            .into_input(Some("/files/a.png".into()), None)
            .unwrap();
        assert_eq!(input.title, "Harbour at dusk");
        assert_eq!(input.year, Some(2024));
        assert_eq!(input.thumbnail_url.as_deref(), Some("/files/a.png"));
        assert_eq!(input.description, None);

        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["thumbnail_url"], "/files/a.png");
        assert_eq!(body["status"], "completed");
    }

    #[test]
    fn test_artwork_draft_validation() {
        let mut d = draft();
        d.title = "   ".into();
        assert_eq!(d.into_input(None, None).unwrap_err(), "Title is required");

        let mut d = draft();
        d.year = "twenty".into();
        assert!(d.into_input(None, None).is_err());

        let mut d = draft();
        d.start_date = "2024-05-01".into();
        d.end_date = "2024-04-01".into();
        assert_eq!(d.into_input(None, None).unwrap_err(), "End date is before start date");

        let mut d = draft();
        d.start_date = "May 1".into();
        assert!(d.into_input(None, None).unwrap_err().starts_with("Start date"));
    }

    #[test]
    fn test_post_draft_derives_excerpt() {
        let d = PostDraft {
            title: "Open studio".into(),
            content: "<p>Doors open at <b>noon</b>.</p>".into(),
            ..Default::default()
        };
        let input = d.to_input().unwrap();
        assert_eq!(input.excerpt.as_deref(), Some("Doors open at noon."));
        assert!(input.published && input.is_public);
    }

    #[test]
    fn test_post_draft_keeps_written_excerpt_and_requires_content() {
        let d = PostDraft {
            title: "t".into(),
            content: "<p>body</p>".into(),
            excerpt: "teaser".into(),
            ..Default::default()
        };
        assert_eq!(d.to_input().unwrap().excerpt.as_deref(), Some("teaser"));

        let empty = PostDraft { title: "t".into(), content: "<p> </p>".into(), ..Default::default() };
        assert_eq!(empty.to_input().unwrap_err(), "Content is required");
    }

    #[test]
    fn test_history_draft_rules() {
        let note = HistoryDraft { media_type: MediaKind::Text, media_url: "/x.png".into(), content: "first wash".into(), ..Default::default() };
        let input = note.to_input().unwrap();
        assert_eq!(input.media_url, None);
        assert_eq!(input.content.as_deref(), Some("first wash"));

        let empty_note = HistoryDraft { media_type: MediaKind::Text, ..Default::default() };
        assert!(empty_note.to_input().is_err());

        let video = HistoryDraft { media_type: MediaKind::Youtube, ..Default::default() };
        assert_eq!(video.to_input().unwrap_err(), "YouTube entries need a file or link");
    }

    #[test]
    fn test_slug_problem() {
        assert_eq!(slug_problem("mina-kim"), None);
        assert_eq!(slug_problem("ab"), Some("Use 3 to 30 characters"));
        assert!(slug_problem("Mina").is_some());
        assert!(slug_problem("-mina").is_some());
        assert!(slug_problem("mina_kim").is_some());
    }
}
