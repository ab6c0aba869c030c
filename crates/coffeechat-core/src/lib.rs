//! Business logic and repository trait definitions for Coffee Chats.
//!
//! This crate defines the ports the infrastructure layer implements
//! (`ChatRepository`) and the ones the hosting surface provides
//! (`ViewCache`, `Confirmer`). It depends only on `coffeechat-types` --
//! never on `coffeechat-infra` or any HTTP crate.

pub mod cache;
pub mod controller;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod repository;
pub mod service;
