//! Derived content fields for post bodies.
//!
//! Posts store their body as rich HTML. Word count and reading time are
//! derived from the stripped plain text and recomputed on every write, so
//! the stored values never drift from the stored body.

use std::sync::LazyLock;

use regex::Regex;

/// Average reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: i32 = 200;

/// Maximum length of an excerpt auto-derived from a post body.
pub const EXCERPT_MAX_CHARS: usize = 220;

/// Matches a complete HTML tag including attributes.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Matches runs of whitespace for collapsing.
static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strip HTML down to plain text.
///
/// Tags are replaced by spaces (so `<p>a</p><p>b</p>` keeps a word
/// boundary between `a` and `b`), the common named entities are decoded,
/// and whitespace is collapsed.
pub fn strip_html(html: &str) -> String {
    let without_tags = TAG_RE.replace_all(html, " ");
    let decoded = decode_entities(&without_tags);
    WHITESPACE_RE.replace_all(&decoded, " ").trim().to_string()
}

/// Count whitespace-delimited words in the stripped body.
pub fn word_count(html: &str) -> i32 {
    strip_html(html).split_whitespace().count() as i32
}

/// Estimated reading time in minutes: `ceil(words / 200)`.
///
/// An empty body reads in zero minutes; anything else takes at least one.
pub fn reading_time_minutes(word_count: i32) -> i32 {
    if word_count <= 0 {
        return 0;
    }
    (word_count + WORDS_PER_MINUTE - 1) / WORDS_PER_MINUTE
}

/// Derive a plain-text excerpt from an HTML body.
///
/// The stripped text is truncated to at most `max_chars` characters on a
/// character boundary, with a trailing ellipsis when anything was cut.
pub fn plain_excerpt(html: &str, max_chars: usize) -> String {
    let text = strip_html(html);
    if text.chars().count() <= max_chars {
        return text;
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}…", truncated.trim_end())
}

/// Decode the named entities WordPress commonly emits in rendered HTML.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#8217;", "\u{2019}")
        .replace("&amp;", "&")
}
