//! Infrastructure adapters for the AutoGlue client.
//!
//! This crate supplies the concrete implementations of the application
//! layer's ports: a reqwest-backed HTTP layer, file and in-memory
//! session storage and the system clock.

pub mod adapters;
pub mod auth;
pub mod http;
pub mod storage;

pub use adapters::SystemClock;
pub use auth::HttpAuthTransport;
pub use http::{ApiClient, ApiError};
pub use storage::{FileSessionStorage, MemorySessionStorage};
