//! Observability setup for Coffee Chats.

pub mod tracing_setup;
