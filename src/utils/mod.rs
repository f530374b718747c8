//! Utility functions and helpers.

pub mod http;
#[cfg(test)]
pub mod testing;

pub use http::{ApiEndpoints, HttpClient, Transport};
