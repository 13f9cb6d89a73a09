//! Friendzone library
//!
//! Exposes the server, the persistence layer and the terminal client so the
//! binaries and integration tests share one implementation.

pub mod app;
pub mod client;
pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod router;
pub mod services;
