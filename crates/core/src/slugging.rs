//! URL slug derivation for post titles.
//!
//! Slugs are derived once at creation time when the caller does not supply
//! one. Accented characters are folded to ASCII, punctuation is dropped, and
//! word boundaries become single hyphens (`"Café com Açúcar!"` →
//! `"cafe-com-acucar"`).

use slug::slugify;

use crate::error::CoreError;

/// Derive a URL slug from a human-readable title.
///
/// Fails with [`CoreError::Validation`] when the title is empty or contains
/// nothing that survives slugification.
pub fn derive_slug(title: &str) -> Result<String, CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("title must not be empty".into()));
    }

    let candidate = slugify(title);
    if candidate.is_empty() {
        return Err(CoreError::Validation(format!(
            "cannot derive a slug from `{title}`"
        )));
    }

    Ok(candidate)
}
