//! Error taxonomy for the WordPress REST boundary.
//!
//! The four remote failure classes are distinguished because the sync
//! coordinator treats them differently: auth failures abort a whole run,
//! a missing remote post triggers stale-linkage recovery, and everything
//! else is a per-post failure that the run survives.

/// Errors from the WordPress REST layer.
#[derive(Debug, thiserror::Error)]
pub enum WpError {
    /// Transport-level failure reaching the site (DNS, TLS, refused, timeout).
    #[error("connection to WordPress failed: {0}")]
    Connection(#[source] reqwest::Error),

    /// WordPress rejected the credentials (401/403).
    #[error("WordPress rejected the credentials (HTTP {status})")]
    Auth { status: u16 },

    /// The referenced remote resource does not exist (404).
    #[error("remote resource not found")]
    NotFound,

    /// Any other non-2xx response.
    #[error("WordPress API error ({status}): {body}")]
    Remote { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("unexpected WordPress response shape: {0}")]
    Payload(String),
}

/// Classify a non-2xx status code into the taxonomy above.
pub(crate) fn classify_status(status: u16, body: String) -> WpError {
    match status {
        401 | 403 => WpError::Auth { status },
        404 => WpError::NotFound,
        _ => WpError::Remote { status, body },
    }
}
