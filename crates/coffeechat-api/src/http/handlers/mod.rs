//! HTTP request handlers for the web front-end.

pub mod pages;
