//! UI-facing controllers shared by the CLI and the web front-end.
//!
//! Controllers hold per-interaction state and decide where the user goes
//! next. They never navigate themselves; the host follows the returned
//! [`View`](coffeechat_types::view::View).

pub mod delete;
pub mod form;
