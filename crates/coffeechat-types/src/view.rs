//! Logical views of the application.
//!
//! A `View` is both a navigation target (where the user goes after an
//! action) and a cache key (which rendered page became stale).

use std::fmt;

use crate::chat::ChatId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// All chats, `/`.
    Listing,
    /// One chat, `/chats/{id}`.
    Detail(ChatId),
    /// Empty create form, `/chats/new`.
    New,
    /// Edit form for one chat, `/chats/{id}/edit`.
    Edit(ChatId),
}

impl View {
    /// The URL path of this view on the web front-end.
    pub fn path(&self) -> String {
        match self {
            View::Listing => "/".to_string(),
            View::Detail(id) => format!("/chats/{id}"),
            View::New => "/chats/new".to_string(),
            View::Edit(id) => format!("/chats/{id}/edit"),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
