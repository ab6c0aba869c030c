//! Shared domain types for Coffee Chats.
//!
//! This crate contains the types used across the workspace: the `Chat`
//! record and its `ChatDraft` payload, the logical `View`s that double as
//! navigation targets and cache keys, configuration file types, and errors.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod view;
