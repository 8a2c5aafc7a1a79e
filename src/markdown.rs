//! Markdown and HTML Text Helpers
//!
//! Profile text (bio, about, CV) is written as Markdown:
//! - Raw HTML is shown as text, never injected
//! - Images get a max-width constraint
//! - Image links to video files render as `<video>`
//! - Link and media URLs are limited to http, https, mailto and relative
//!
//! Blog content arrives as HTML from the editor; `plain_excerpt` derives the
//! list-view teaser from it.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag};

/// Schemes a rendered link or embed may use
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

const URL_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Render Markdown to HTML safe for `inner_html`
pub fn render(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

enum State {
    Normal,
    /// Inside an image whose alt-text events are dropped
    InImage { depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
                Event::Start(Tag::Link { link_type, dest_url, title, id }) if !is_safe_url(&dest_url) => {
                    events.push(Event::Start(Tag::Link { link_type, dest_url: CowStr::Borrowed("#"), title, id }));
                }
                Event::Start(Tag::Image { dest_url, .. }) => {
                    // unsafe media is dropped along with its alt text
                    if is_safe_url(&dest_url) {
                        let url = utf8_percent_encode(&dest_url, URL_ENCODE_SET).to_string();
                        let html = if is_video_url(&url) {
                            format!(r#"<video controls src="{url}" style="max-width: 100%;"></video>"#)
                        } else {
                            format!(r#"<img src="{url}" style="max-width: 100%;" />"#)
                        };
                        events.push(Event::Html(CowStr::from(html)));
                    }
                    state = State::InImage { depth: 0 };
                }
                other => events.push(other),
            },
            State::InImage { ref mut depth } => match event {
                Event::Start(_) => *depth += 1,
                Event::End(_) => {
                    if *depth == 0 {
                        state = State::Normal;
                    } else {
                        *depth -= 1;
                    }
                }
                _ => {}
            },
        }
    }

    events
}

/// Whether `url` is relative or uses one of [`ALLOWED_SCHEMES`]
pub fn is_safe_url(url: &str) -> bool {
    // browsers skip whitespace and control characters when reading a scheme
    let cleaned: String = url.chars().filter(|c| !c.is_whitespace() && !c.is_control()).collect();
    match cleaned.find([':', '/', '?', '#']) {
        Some(i) if cleaned[i..].starts_with(':') => {
            let scheme = cleaned[..i].to_ascii_lowercase();
            ALLOWED_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}

pub fn is_video_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    let path = lower.split(['?', '#']).next().unwrap_or_default();
    path.ends_with(".mp4") || path.ends_with(".webm") || path.ends_with(".mov")
}

/// Tag-free, whitespace-collapsed text of an HTML fragment, cut to `max_chars`
pub fn plain_excerpt(html: &str, max_chars: usize) -> String {
    let mut text = String::with_capacity(html.len());
    // body of the tag being read, between `<` and `>`
    let mut tag: Option<String> = None;
    for c in html.chars() {
        if let Some(body) = tag.as_mut() {
            if c == '>' {
                if is_block_tag(body) {
                    text.push(' ');
                }
                tag = None;
            } else {
                body.push(c);
            }
        } else if c == '<' {
            tag = Some(String::new());
        } else {
            text.push(c);
        }
    }
    let text = decode_entities(&text);
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let cut: String = collapsed.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}

const BLOCK_TAGS: [&str; 22] = [
    "p", "div", "br", "hr", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "table",
    "tr", "td", "th", "figure", "figcaption", "section",
];

/// Tags that separate words; inline tags like `<b>` do not
fn is_block_tag(body: &str) -> bool {
    let name = body
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    BLOCK_TAGS.contains(&name.as_str())
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let html = render("# Studio\n\nOil on **linen**.");
        assert!(html.contains("<h1>Studio</h1>"));
        assert!(html.contains("<strong>linen</strong>"));
    }

    #[test]
    fn test_render_escapes_raw_html() {
        let html = render("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_media() {
        let html = render("![studio view](/files/studio.jpg)");
        assert!(html.contains(r#"<img src="/files/studio.jpg""#));
        assert!(!html.contains("studio view"));

        let html = render("![clip](/files/process.mp4)");
        assert!(html.contains("<video controls src=\"/files/process.mp4\""));
    }

    #[test]
    fn test_render_neutralizes_script_urls() {
        let html = render("[portfolio](javascript:alert(document.cookie))");
        assert!(!html.contains("javascript"));
        assert!(html.contains(r##"<a href="#">portfolio</a>"##));

        let html = render("[x](JavaScript:alert(1)) <data:text/html,hi>");
        assert!(!html.contains("JavaScript"));
        assert!(!html.contains(r#"href="data:"#));
        assert_eq!(html.matches(r##"href="#""##).count(), 2);

        let html = render("![x](javascript:alert(1))");
        assert!(!html.contains("<img"));
        assert!(!html.contains("javascript"));
    }

    #[test]
    fn test_render_keeps_ordinary_links() {
        let html = render("[site](https://mina.art) [mail](mailto:mina@example.com) [cv](/files/cv.pdf)");
        assert!(html.contains(r#"href="https://mina.art""#));
        assert!(html.contains(r#"href="mailto:mina@example.com""#));
        assert!(html.contains(r#"href="/files/cv.pdf""#));
    }

    #[test]
    fn test_is_safe_url() {
        assert!(is_safe_url("https://cdn.example.com/a.png"));
        assert!(is_safe_url("files/a.png?x=1:2"));
        assert!(is_safe_url("#top"));
        assert!(!is_safe_url(" javascript:alert(1)"));
        assert!(!is_safe_url("vbscript:x"));
        assert!(!is_safe_url("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_plain_excerpt_strips_tags() {
        let html = "<p>First&nbsp;line</p><p>Second <b>bold</b> &amp; more</p>";
        assert_eq!(plain_excerpt(html, 100), "First line Second bold & more");
    }

    #[test]
    fn test_plain_excerpt_inline_tags_do_not_split_words() {
        assert_eq!(plain_excerpt("<p>Doors at <b>noon</b>.</p>", 100), "Doors at noon.");
        assert_eq!(plain_excerpt("<p>re<em>work</em>ed</p><p>next</p>", 100), "reworked next");
        assert_eq!(plain_excerpt("line<br/>break<BR>again", 100), "line break again");
    }

    #[test]
    fn test_plain_excerpt_truncates_on_char_boundary() {
        let html = "<p>가나다라마바사</p>";
        assert_eq!(plain_excerpt(html, 3), "가나다…");
    }

    #[test]
    fn test_is_video_url_ignores_query() {
        assert!(is_video_url("https://cdn.example.com/a.MP4?sig=1"));
        assert!(!is_video_url("https://cdn.example.com/a.png"));
    }
}
