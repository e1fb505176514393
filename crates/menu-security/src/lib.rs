//! # Menu Security
//!
//! Admin credential hashing and session bookkeeping.

pub mod password;
pub mod session;

pub use password::{PasswordError, PasswordService};
pub use session::{Session, SessionStore};
