//! Fixed-weight SEO scoring heuristic.
//!
//! Scores a post from its title, meta fields, and body on a 0..=100 scale.
//! The weights are fixed point values, so the score is deterministic for a
//! given input and comparable across posts.

use crate::content::strip_html;

// ── Point weights ────────────────────────────────────────────────────

/// A non-empty title.
const TITLE_PRESENT: i16 = 10;

/// Title length inside the preferred 30..=60 character window.
const TITLE_LENGTH_OPTIMAL: i16 = 20;

/// Title length inside the acceptable 20..=70 character window.
const TITLE_LENGTH_ACCEPTABLE: i16 = 10;

/// A non-empty meta description.
const DESCRIPTION_PRESENT: i16 = 10;

/// Meta description inside the preferred 120..=160 character window.
const DESCRIPTION_LENGTH_OPTIMAL: i16 = 20;

/// Meta description inside the acceptable 50..=180 character window.
const DESCRIPTION_LENGTH_ACCEPTABLE: i16 = 10;

/// Focus keyword appears in the title.
const KEYWORD_IN_TITLE: i16 = 15;

/// Focus keyword appears in the meta description.
const KEYWORD_IN_DESCRIPTION: i16 = 10;

/// Focus keyword appears in the body text.
const KEYWORD_IN_BODY: i16 = 15;

/// Maximum reachable score.
pub const MAX_SCORE: i16 = 100;

// ── Scoring ──────────────────────────────────────────────────────────

/// Score a post's on-page SEO signals.
///
/// `seo_title` substitutes for `title` when present (it is what search
/// engines render). Keyword checks are case-insensitive; without a focus
/// keyword those points are simply unreachable.
pub fn score_post(
    title: &str,
    seo_title: Option<&str>,
    seo_description: Option<&str>,
    body_html: &str,
    focus_keyword: Option<&str>,
) -> i16 {
    let effective_title = seo_title.filter(|t| !t.trim().is_empty()).unwrap_or(title);
    let description = seo_description.unwrap_or("").trim();
    let mut score = 0i16;

    if !effective_title.trim().is_empty() {
        score += TITLE_PRESENT;
        score += match effective_title.chars().count() {
            30..=60 => TITLE_LENGTH_OPTIMAL,
            20..=70 => TITLE_LENGTH_ACCEPTABLE,
            _ => 0,
        };
    }

    if !description.is_empty() {
        score += DESCRIPTION_PRESENT;
        score += match description.chars().count() {
            120..=160 => DESCRIPTION_LENGTH_OPTIMAL,
            50..=180 => DESCRIPTION_LENGTH_ACCEPTABLE,
            _ => 0,
        };
    }

    if let Some(keyword) = focus_keyword.map(str::trim).filter(|k| !k.is_empty()) {
        let keyword = keyword.to_lowercase();
        if effective_title.to_lowercase().contains(&keyword) {
            score += KEYWORD_IN_TITLE;
        }
        if description.to_lowercase().contains(&keyword) {
            score += KEYWORD_IN_DESCRIPTION;
        }
        if strip_html(body_html).to_lowercase().contains(&keyword) {
            score += KEYWORD_IN_BODY;
        }
    }

    score.min(MAX_SCORE)
}
