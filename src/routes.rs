//! Route Paths
//!
//! Builders for every client route so links and redirects agree with the
//! router table in `app.rs`.

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const REGISTER: &str = "/register";
pub const ARTWORK_NEW: &str = "/artworks/new";

pub fn gallery(slug: &str) -> String {
    format!("/{slug}")
}

pub fn about(slug: &str) -> String {
    format!("/{slug}/about")
}

pub fn studio(slug: &str) -> String {
    format!("/{slug}/studio")
}

pub fn blog(slug: &str) -> String {
    format!("/blog/{slug}")
}

pub fn blog_new(slug: &str) -> String {
    format!("/blog/{slug}/new")
}

pub fn blog_post(slug: &str, id: i64) -> String {
    format!("/blog/{slug}/{id}")
}

pub fn blog_edit(slug: &str, id: i64) -> String {
    format!("/blog/{slug}/{id}/edit")
}

pub fn artwork(id: i64) -> String {
    format!("/artworks/{id}")
}

pub fn artwork_edit(id: i64) -> String {
    format!("/artworks/{id}/edit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_builders() {
        assert_eq!(gallery("mina"), "/mina");
        assert_eq!(about("mina"), "/mina/about");
        assert_eq!(studio("mina"), "/mina/studio");
        assert_eq!(blog_post("mina", 4), "/blog/mina/4");
        assert_eq!(blog_edit("mina", 4), "/blog/mina/4/edit");
        assert_eq!(artwork_edit(9), "/artworks/9/edit");
    }
}
