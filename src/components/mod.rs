//! UI Components for the dashboard frontend.
//!
//! This module contains all Leptos components organized by function:
//!
//! # Layout Components
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`UploadSection`] - Multi-file upload with per-file progress
//! - [`DropZone`] - Click-to-browse / drag & drop file selection
//! - [`ProgressBar`] - Percentage-driven progress bar

mod dropzone;
mod footer;
mod hero;
mod progress;
mod upload;

pub use dropzone::*;
pub use footer::*;
pub use hero::*;
pub use progress::*;
pub use upload::*;
