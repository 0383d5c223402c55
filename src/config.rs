//! Application configuration.
//!
//! Centralized configuration for the dashboard frontend.
//! In development these are hardcoded. In production they could be
//! loaded from environment or a config file.

/// API server base URL.
///
/// The backend accepting multipart uploads at `{API_SERVER}/upload`.
/// Read at send time, once per transfer.
pub const API_SERVER: &str = "http://localhost:5000/api";
