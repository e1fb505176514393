//! # Menu Core
//!
//! Domain records, repository traits (ports) and the catalog/admin/auth
//! services of the menu site.

pub mod domain;
pub mod error;
pub mod pricing;
pub mod repositories;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
