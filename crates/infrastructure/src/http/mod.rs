//! Authenticated HTTP plumbing over reqwest.

mod client;
mod error;

pub use client::ApiClient;
pub use error::ApiError;
