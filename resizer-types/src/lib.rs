//! Resizer Types
//!
//! Shared request/response payloads, the fixed transcode profile and
//! object key helpers used by the Resizer services.

pub mod error;
pub mod keys;
pub mod schemas;

pub use error::*;
pub use keys::*;
pub use schemas::*;
