//! WordPress REST adapter.
//!
//! A stateless client for one blog's WordPress site, wrapping the
//! `/wp-json/wp/v2` endpoints (posts, categories, tags, media) behind the
//! [`WordPressClient`] trait. The [`WordPressApi`] implementation uses
//! [`reqwest`] with HTTP Basic auth (application passwords); consumers that
//! need to run without a network (the sync coordinator's tests) implement
//! the trait in memory.

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use api::WordPressApi;
pub use client::{BlogConnection, WordPressClient};
pub use error::WpError;
pub use types::{PostFields, RemoteMedia, RemotePost, RemoteTerm};
