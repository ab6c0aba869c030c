//! REST client for the chat backend.

pub mod client;

pub use client::{BasicCredentials, ClientSettings, HttpChatRepository};
