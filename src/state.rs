//! Upload coordinator state machine.
//!
//! [`UploadBatch`] owns the pending file list, the per-file transfer
//! statuses of the current run, and the overall [`RunState`]. All
//! transfer callbacks funnel through [`UploadBatch::apply`], so every
//! update transforms the latest authoritative state rather than a
//! snapshot captured when the transfer started.
//!
//! The type is generic over the file-handle type `F` (a `web_sys::File`
//! in the browser) so the state machine itself has no wasm dependency.

use std::collections::HashMap;

use crate::types::{FileId, RunState, TransferEvent, TransferState};

/// One file in the pending batch.
#[derive(Clone, Debug)]
pub struct BatchFile<F> {
    /// Generated identity, assigned at add time.
    pub id: FileId,
    /// Original file name, display only.
    pub name: String,
    /// Underlying file handle.
    pub handle: F,
}

/// The pending batch plus per-run transfer bookkeeping.
#[derive(Clone, Debug, Default)]
pub struct UploadBatch<F> {
    files: Vec<BatchFile<F>>,
    statuses: HashMap<FileId, TransferState>,
    run: RunState,
    /// Transfers launched by the current run.
    launched: usize,
    /// Transfers of the current run that have settled.
    settled: usize,
    next_id: u64,
}

impl<F> UploadBatch<F> {
    pub fn new() -> Self {
        UploadBatch {
            files: Vec::new(),
            statuses: HashMap::new(),
            run: RunState::Idle,
            launched: 0,
            settled: 0,
            next_id: 0,
        }
    }

    /// Append a selection to the pending batch, preserving order.
    ///
    /// Valid in any state and never touches the run state: files added
    /// while a run is in flight join the batch but not that run.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = (String, F)>) {
        for (name, handle) in files {
            let id = FileId(self.next_id);
            self.next_id += 1;
            self.files.push(BatchFile { id, name, handle });
        }
    }

    /// Files currently in the pending batch, in selection order.
    pub fn files(&self) -> &[BatchFile<F>] {
        &self.files
    }

    /// Transfer status of a file within the current run, if any.
    pub fn status(&self, id: FileId) -> Option<&TransferState> {
        self.statuses.get(&id)
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    /// Whether the Upload action is available.
    pub fn can_start(&self) -> bool {
        self.run == RunState::Idle && !self.files.is_empty()
    }

    /// Begin a run covering every file currently in the batch.
    ///
    /// Resets the status map and moves to `Uploading`. Returns `false`
    /// (and changes nothing) when the batch is empty or a run has
    /// already started.
    pub fn start_run(&mut self) -> bool {
        if !self.can_start() {
            return false;
        }
        self.statuses.clear();
        self.launched = self.files.len();
        self.settled = 0;
        self.run = RunState::Uploading;
        true
    }

    /// Apply a transfer callback to the authoritative state.
    ///
    /// When the last launched transfer settles the run moves to
    /// `Completed` — deliberately regardless of whether any transfer
    /// failed; a failure is visible only as that file's `Error` status.
    pub fn apply(&mut self, event: TransferEvent) {
        match event {
            TransferEvent::Progress { id, loaded, total } => {
                if self.status(id).is_some_and(TransferState::is_settled) {
                    return;
                }
                let percentage = if total > 0.0 { loaded / total * 100.0 } else { 0.0 };
                self.statuses.insert(id, TransferState::Pending { percentage });
            }
            TransferEvent::Done { id } => self.settle(id, TransferState::Done),
            TransferEvent::Failed { id } => self.settle(id, TransferState::Error),
        }
    }

    fn settle(&mut self, id: FileId, status: TransferState) {
        if self.status(id).is_some_and(TransferState::is_settled) {
            return;
        }
        self.statuses.insert(id, status);
        self.settled += 1;
        if self.run == RunState::Uploading && self.settled >= self.launched {
            self.run = RunState::Completed;
        }
    }

    /// Dismiss a completed run: empty the batch and return to `Idle`.
    ///
    /// No-op unless the run state is `Completed`. Returns whether the
    /// batch was cleared.
    pub fn clear(&mut self) -> bool {
        if self.run != RunState::Completed {
            return false;
        }
        self.files.clear();
        self.statuses.clear();
        self.launched = 0;
        self.settled = 0;
        self.run = RunState::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(batch: &UploadBatch<()>) -> Vec<&str> {
        batch.files().iter().map(|f| f.name.as_str()).collect()
    }

    fn add(batch: &mut UploadBatch<()>, names: &[&str]) -> Vec<FileId> {
        let before = batch.files().len();
        batch.add_files(names.iter().map(|n| (n.to_string(), ())));
        batch.files()[before..].iter().map(|f| f.id).collect()
    }

    #[test]
    fn add_files_appends_in_selection_order() {
        let mut batch = UploadBatch::new();
        add(&mut batch, &["a.txt", "b.txt"]);
        add(&mut batch, &["c.txt"]);
        assert_eq!(named(&batch), ["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn duplicate_names_get_distinct_ids() {
        let mut batch = UploadBatch::new();
        let ids = add(&mut batch, &["same.txt", "same.txt"]);
        assert_ne!(ids[0], ids[1]);

        batch.start_run();
        batch.apply(TransferEvent::Done { id: ids[0] });
        assert_eq!(batch.status(ids[0]), Some(&TransferState::Done));
        assert_eq!(batch.status(ids[1]), None);
    }

    #[test]
    fn start_with_empty_batch_is_a_noop() {
        let mut batch = UploadBatch::<()>::new();
        assert!(!batch.start_run());
        assert_eq!(batch.run_state(), RunState::Idle);
    }

    #[test]
    fn start_while_uploading_is_a_noop() {
        let mut batch = UploadBatch::new();
        let ids = add(&mut batch, &["a", "b"]);
        assert!(batch.start_run());
        batch.apply(TransferEvent::Progress { id: ids[0], loaded: 10.0, total: 100.0 });

        assert!(!batch.can_start());
        assert!(!batch.start_run());
        assert_eq!(batch.run_state(), RunState::Uploading);
        // the in-flight run's statuses were not reset
        assert!(batch.status(ids[0]).is_some());
    }

    #[test]
    fn run_completes_only_when_every_transfer_settled() {
        let mut batch = UploadBatch::new();
        let ids = add(&mut batch, &["a", "b", "c"]);
        batch.start_run();

        batch.apply(TransferEvent::Done { id: ids[0] });
        batch.apply(TransferEvent::Failed { id: ids[1] });
        assert_eq!(batch.run_state(), RunState::Uploading);

        batch.apply(TransferEvent::Done { id: ids[2] });
        assert_eq!(batch.run_state(), RunState::Completed);
    }

    #[test]
    fn progress_updates_compute_percentage() {
        let mut batch = UploadBatch::new();
        let ids = add(&mut batch, &["f"]);
        batch.start_run();

        batch.apply(TransferEvent::Progress { id: ids[0], loaded: 50.0, total: 200.0 });
        assert_eq!(batch.status(ids[0]), Some(&TransferState::Pending { percentage: 25.0 }));

        batch.apply(TransferEvent::Progress { id: ids[0], loaded: 200.0, total: 200.0 });
        assert_eq!(batch.status(ids[0]), Some(&TransferState::Pending { percentage: 100.0 }));

        batch.apply(TransferEvent::Done { id: ids[0] });
        assert_eq!(batch.status(ids[0]), Some(&TransferState::Done));
        assert_eq!(batch.status(ids[0]).unwrap().percentage(), 100.0);
    }

    #[test]
    fn one_failed_transfer_does_not_block_the_others() {
        let mut batch = UploadBatch::new();
        let ids = add(&mut batch, &["a", "b"]);
        batch.start_run();

        batch.apply(TransferEvent::Failed { id: ids[0] });
        assert_eq!(batch.status(ids[0]), Some(&TransferState::Error));
        assert_eq!(batch.status(ids[0]).unwrap().percentage(), 0.0);
        assert_eq!(batch.run_state(), RunState::Uploading);

        batch.apply(TransferEvent::Done { id: ids[1] });
        assert_eq!(batch.status(ids[1]), Some(&TransferState::Done));
        assert_eq!(batch.run_state(), RunState::Completed);
    }

    #[test]
    fn clear_is_only_valid_once_completed() {
        let mut batch = UploadBatch::new();
        let ids = add(&mut batch, &["a"]);

        assert!(!batch.clear());
        assert_eq!(named(&batch), ["a"]);

        batch.start_run();
        assert!(!batch.clear());
        assert_eq!(batch.run_state(), RunState::Uploading);

        batch.apply(TransferEvent::Done { id: ids[0] });
        assert!(batch.clear());
        assert!(batch.files().is_empty());
        assert_eq!(batch.run_state(), RunState::Idle);
    }

    #[test]
    fn files_added_mid_run_do_not_join_the_run() {
        let mut batch = UploadBatch::new();
        let first = add(&mut batch, &["a"]);
        batch.start_run();

        // queued for a later run; the in-flight run ignores it
        add(&mut batch, &["late"]);
        assert_eq!(batch.run_state(), RunState::Uploading);

        batch.apply(TransferEvent::Done { id: first[0] });
        assert_eq!(batch.run_state(), RunState::Completed);
        assert_eq!(named(&batch), ["a", "late"]);
    }

    #[test]
    fn duplicate_settle_events_are_ignored() {
        let mut batch = UploadBatch::new();
        let ids = add(&mut batch, &["a", "b"]);
        batch.start_run();

        batch.apply(TransferEvent::Done { id: ids[0] });
        batch.apply(TransferEvent::Done { id: ids[0] });
        batch.apply(TransferEvent::Failed { id: ids[0] });
        assert_eq!(batch.run_state(), RunState::Uploading);
        assert_eq!(batch.status(ids[0]), Some(&TransferState::Done));

        // late progress after settling is dropped too
        batch.apply(TransferEvent::Progress { id: ids[0], loaded: 1.0, total: 2.0 });
        assert_eq!(batch.status(ids[0]), Some(&TransferState::Done));

        batch.apply(TransferEvent::Done { id: ids[1] });
        assert_eq!(batch.run_state(), RunState::Completed);
    }

    #[test]
    fn mixed_outcome_run_end_to_end() {
        let mut batch = UploadBatch::new();
        let ids = add(&mut batch, &["a.bin", "b.bin"]);
        batch.start_run();
        assert_eq!(batch.run_state(), RunState::Uploading);

        // a.bin: 100 bytes, succeeds
        batch.apply(TransferEvent::Progress { id: ids[0], loaded: 50.0, total: 100.0 });
        assert_eq!(batch.status(ids[0]).unwrap().percentage(), 50.0);
        batch.apply(TransferEvent::Done { id: ids[0] });

        // b.bin: 200 bytes, fails halfway
        batch.apply(TransferEvent::Progress { id: ids[1], loaded: 100.0, total: 200.0 });
        assert_eq!(batch.status(ids[1]).unwrap().percentage(), 50.0);
        batch.apply(TransferEvent::Failed { id: ids[1] });

        assert_eq!(batch.run_state(), RunState::Completed);
        assert_eq!(batch.status(ids[0]), Some(&TransferState::Done));
        assert_eq!(batch.status(ids[1]), Some(&TransferState::Error));

        assert!(batch.clear());
        assert!(batch.files().is_empty());
        assert_eq!(batch.run_state(), RunState::Idle);
        assert_eq!(batch.status(ids[0]), None);
    }
}
