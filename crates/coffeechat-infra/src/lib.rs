//! Infrastructure layer for Coffee Chats.
//!
//! Contains the implementation of the `ChatRepository` port defined in
//! `coffeechat-core` against the remote REST backend, and the configuration
//! loader that decides which backend to talk to and with which credentials.

pub mod config;
pub mod http;
