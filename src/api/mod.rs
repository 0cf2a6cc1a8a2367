//! Typed operations over the clinic service REST API.
//!
//! [`ApiClient`] owns the request plumbing; the per-entity operation sets
//! live in `patients` and `appointments`. Every error reaches the caller
//! as an [`ApiError`] — nothing is retried or swallowed here.

pub mod appointments;
pub mod client;
pub mod error;
pub mod patients;

pub use client::ApiClient;
pub use error::ApiError;
