//! Maze grid backend.
//!
//! Serves pre-authored maze layouts and per-difficulty settings from a JSON
//! document over HTTP. The `store` module owns loading, validation and the
//! lookups; `server` is the actix-web adapter in front of it.

pub mod config;
pub mod server;
pub mod store;
