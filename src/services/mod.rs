//! Backend communication services.
//!
//! # Services
//!
//! - [`upload`] - Per-file multipart transfer to the upload endpoint,
//!   with upload progress reporting.

pub mod upload;

pub use upload::*;
