//! Common types used across the frontend application.
//!
//! This module centralizes type definitions to avoid duplication
//! and ensure consistency across components.
//!
//! # Categories
//!
//! - **Upload Types** - File identity, transfer status, run state
//! - **Event Types** - Transfer callbacks feeding the coordinator
//! - **Error Types** - Frontend error handling

use std::fmt;

// =============================================================================
// Upload Types
// =============================================================================

/// Identifier assigned to a file when it joins the pending batch.
///
/// Files are keyed by this generated id rather than by name, so two
/// selected files sharing a name never collide in the status map.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub(crate) u64);

/// Per-file transfer status for the current run.
#[derive(Clone, Debug, PartialEq)]
pub enum TransferState {
    /// Transfer in flight; percentage in 0..=100.
    Pending { percentage: f64 },
    /// Transfer finished successfully.
    Done,
    /// Transfer failed at the transport level.
    Error,
}

impl TransferState {
    /// Percentage shown by the progress bar for this status.
    ///
    /// `Done` renders as 100, `Error` as 0.
    pub fn percentage(&self) -> f64 {
        match self {
            TransferState::Pending { percentage } => *percentage,
            TransferState::Done => 100.0,
            TransferState::Error => 0.0,
        }
    }

    /// Whether the transfer has settled (success or failure).
    pub fn is_settled(&self) -> bool {
        matches!(self, TransferState::Done | TransferState::Error)
    }

    /// Whether the transfer finished successfully.
    pub fn is_done(&self) -> bool {
        matches!(self, TransferState::Done)
    }
}

/// Overall state of the upload coordinator.
///
/// `Completed` is reached when every launched transfer has settled,
/// whether it succeeded or failed; per-file [`TransferState`] is the
/// only place a failure is visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    /// No run in flight; files may be added and a run started.
    #[default]
    Idle,
    /// A run is in flight.
    Uploading,
    /// All transfers of the run have settled; awaiting Clear.
    Completed,
}

// =============================================================================
// Event Types
// =============================================================================

/// Event emitted by a single file transfer.
///
/// Per file, events arrive in the order `Progress* -> (Done | Failed)`;
/// events across different files are unordered relative to each other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransferEvent {
    /// Upload progress with a computable length.
    Progress { id: FileId, loaded: f64, total: f64 },
    /// The transfer finished successfully.
    Done { id: FileId },
    /// The transfer failed.
    Failed { id: FileId },
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
///
/// Unified error type for all frontend operations.
#[derive(Clone, Debug)]
pub enum AppError {
    /// Request could not be constructed or dispatched.
    Upload(String),
    /// Network/HTTP error during a transfer.
    Network(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Upload(msg) => write!(f, "Upload error: {}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;
