//! # Menu API
//!
//! HTTP handlers, request extractors, page rendering and the router.

pub mod auth;
pub mod error;
pub mod form;
pub mod handlers;
pub mod render;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
