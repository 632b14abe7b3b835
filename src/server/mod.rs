// src/server/mod.rs

//! Server layer root module.
//!
//! This module organizes the HTTP adapter over the grid store:
//! - Route configuration
//! - Maze endpoint handlers
//! - Error response helpers

pub mod http_error;
pub mod maze;
pub mod router;
