//! Build-time Configuration
//!
//! Everything is a constant; the API origin can be overridden at build time
//! with `FOLIO_API_BASE=https://api.example.com trunk build`.

/// Origin prefixed to every `/api/...` path. Empty means same origin.
pub const API_BASE: &str = match option_env!("FOLIO_API_BASE") {
    Some(base) => base,
    None => "",
};

/// Google sign-in entry point (full-page redirect)
pub const OAUTH_GOOGLE_PATH: &str = "/oauth2/authorization/google";

pub const ARTWORK_PAGE_SIZE: u32 = 12;
pub const BLOG_PAGE_SIZE: u32 = 10;

/// Delay before a typed search term is sent
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Delay before a typed slug is checked for availability
pub const SLUG_CHECK_DEBOUNCE_MS: u32 = 400;

/// localStorage keys
pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";

/// Characters kept in a derived blog excerpt
pub const EXCERPT_CHARS: usize = 160;

pub fn api_url(path: &str) -> String {
    format!("{}{}", API_BASE.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_joins_base() {
        let url = api_url("/api/auth/me");
        assert!(url.ends_with("/api/auth/me"));
        assert!(!url.contains("//api"));
    }
}
