//! Server-rendered web front-end for Coffee Chats.
//!
//! Axum routes that render the listing, detail and form views as HTML and
//! post form submissions back through the same controllers the CLI uses.

pub mod error;
pub mod handlers;
pub mod router;
