//! service-core: Shared infrastructure for the FishGPT web services.
pub mod error;
pub mod middleware;
pub mod observability;

pub use axum;
