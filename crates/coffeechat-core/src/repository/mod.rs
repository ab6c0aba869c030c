//! Repository trait definitions (ports).
//!
//! The infrastructure layer (coffeechat-infra) implements these against the
//! remote chat backend. The core crate never depends on a transport.

pub mod chat;
