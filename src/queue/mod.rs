//! The upload queue manager.

pub mod admission;
pub mod candidate;
pub mod events;
pub mod record;

pub use admission::CustomFilter;
pub use candidate::{CandidateFile, FileSource};
pub use events::QueueEvent;
pub use record::{FileRecord, FileSnapshot, FileStatus};

use crate::common::{AcceptPattern, UploaderConfig};
use crate::thumbnail;
use crate::transport::TransportHandle;
use admission::AdmissionPolicy;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Owns every [`FileRecord`] and serializes all mutations.
///
/// Records live in one arena in insertion order; the queued and uploaded
/// views are computed from it, so a status change is visible everywhere at
/// once. The arena lock is held across the thumbnail join inside [`add`],
/// which makes each operation atomic with respect to the others.
///
/// User-driven operations (`add`, removals, `reset`) are silent no-ops while
/// the queue is disabled. Transport-driven transitions are not gated: a
/// transfer already in flight still reports its outcome.
///
/// [`add`]: UploadQueue::add
pub struct UploadQueue {
    records: Mutex<Vec<FileRecord>>,
    config: UploaderConfig,
    accept: Vec<AcceptPattern>,
    filter: Option<CustomFilter>,
    disabled: AtomicBool,
    events: broadcast::Sender<QueueEvent>,
}

impl UploadQueue {
    pub fn new(config: UploaderConfig) -> Self {
        Self::with_filter(config, None)
    }

    /// Queue with a custom admission transform as the final filter stage.
    pub fn with_filter(config: UploaderConfig, filter: Option<CustomFilter>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            records: Mutex::new(Vec::new()),
            accept: config.accept_patterns(),
            disabled: AtomicBool::new(config.disable),
            config,
            filter,
            events,
        }
    }

    /// Subscribe to queue change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<QueueEvent> {
        self.events.subscribe()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    /// Freeze or unfreeze all user-driven mutations.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// True when the queue is enabled and at least one file is waiting.
    pub async fn can_upload(&self) -> bool {
        if self.is_disabled() {
            return false;
        }
        let records = self.records.lock().await;
        records.iter().any(|r| r.status() == FileStatus::Idle)
    }

    /// Run candidates through admission and thumbnail loading, then publish
    /// the survivors. Returns the published snapshots, in admitted order; an
    /// empty batch emits no event. The picker ingestion path.
    pub async fn add(&self, candidates: Vec<CandidateFile>) -> Vec<FileSnapshot> {
        if self.is_disabled() || candidates.is_empty() {
            return Vec::new();
        }

        let mut records = self.records.lock().await;
        let existing: HashSet<String> = records.iter().map(|r| r.name().to_string()).collect();
        let policy = AdmissionPolicy {
            accept: &self.accept,
            max_file_size: self.config.max_file_size,
            max_total_size: self.config.max_total_size,
            filter: self.filter.as_ref(),
        };
        let admitted = admission::admit(candidates, &existing, &policy);
        if admitted.is_empty() {
            return Vec::new();
        }

        // All thumbnail attempts settle before the batch becomes visible,
        // so subscribers never observe partially-prepared records.
        let thumbnails = thumbnail::load_batch(&admitted, self.config.no_thumbnails).await;

        let mut published = Vec::with_capacity(admitted.len());
        for (candidate, thumbnail) in admitted.into_iter().zip(thumbnails) {
            let record = FileRecord::new(candidate, thumbnail);
            published.push(record.snapshot());
            records.push(record);
        }

        tracing::debug!("Queued {} file(s)", published.len());
        // sent under the lock so event order matches mutation order
        let _ = self.events.send(QueueEvent::Added(published.clone()));
        published
    }

    /// Drag-and-drop ingestion: keeps only the first candidate when multiple
    /// selection is off, then behaves like [`add`](UploadQueue::add).
    pub async fn add_dropped(&self, mut candidates: Vec<CandidateFile>) -> Vec<FileSnapshot> {
        if !self.config.multiple {
            candidates.truncate(1);
        }
        self.add(candidates).await
    }

    /// Remove one file by name, aborting its transfer if one is in flight.
    /// Returns false when disabled or the name is not queued.
    pub async fn remove_file(&self, name: &str) -> bool {
        if self.is_disabled() {
            return false;
        }

        let mut records = self.records.lock().await;
        let Some(index) = records.iter().position(|r| r.name() == name) else {
            return false;
        };
        let mut record = records.remove(index);
        if let Some(handle) = record.take_handle() {
            tracing::debug!("Aborting in-flight upload for {}", name);
            handle.abort();
        }
        let _ = self.events.send(QueueEvent::Removed {
            name: name.to_string(),
        });
        true
    }

    /// Drop every record that finished successfully.
    pub async fn remove_uploaded_files(&self) {
        if self.is_disabled() {
            return;
        }

        let mut records = self.records.lock().await;
        let mut removed = Vec::new();
        records.retain(|r| {
            if r.status() == FileStatus::Uploaded {
                removed.push(r.name().to_string());
                false
            } else {
                true
            }
        });

        for name in removed {
            let _ = self.events.send(QueueEvent::Removed { name });
        }
    }

    /// Clear the queue. In-flight transfers are not aborted here; use
    /// [`reset`](UploadQueue::reset) for that.
    pub async fn remove_all_files(&self) {
        if self.is_disabled() {
            return;
        }

        let mut records = self.records.lock().await;
        records.clear();

        let _ = self.events.send(QueueEvent::Cleared);
    }

    /// Abort every in-flight transfer, then clear the queue.
    pub async fn reset(&self) {
        if self.is_disabled() {
            return;
        }

        let mut records = self.records.lock().await;
        for record in records.iter_mut() {
            if let Some(handle) = record.take_handle() {
                handle.abort();
            }
        }
        records.clear();

        tracing::debug!("Queue reset");
        let _ = self.events.send(QueueEvent::Cleared);
    }

    /// Snapshot of every record, in insertion order.
    pub async fn files(&self) -> Vec<FileSnapshot> {
        self.snapshots(|_| true).await
    }

    /// Snapshot of records still waiting to upload.
    pub async fn queued_files(&self) -> Vec<FileSnapshot> {
        self.snapshots(|r| r.status() == FileStatus::Idle).await
    }

    /// Snapshot of records that finished successfully.
    pub async fn uploaded_files(&self) -> Vec<FileSnapshot> {
        self.snapshots(|r| r.status() == FileStatus::Uploaded).await
    }

    async fn snapshots(&self, keep: impl Fn(&FileRecord) -> bool) -> Vec<FileSnapshot> {
        let records = self.records.lock().await;
        records
            .iter()
            .filter(|r| keep(r))
            .map(FileRecord::snapshot)
            .collect()
    }

    /// Transport callback: a send operation began for `name`.
    /// Late or unknown names are no-ops.
    pub async fn upload_started(&self, name: &str, handle: Arc<dyn TransportHandle>) -> bool {
        self.transition(name, |record| record.start_upload(handle))
            .await
    }

    /// Transport callback: `uploaded_bytes` of `name` have been sent so far.
    /// Non-monotonic reports are ignored.
    pub async fn upload_progressed(&self, name: &str, uploaded_bytes: u64) -> bool {
        self.transition(name, |record| record.record_progress(uploaded_bytes))
            .await
    }

    /// Transport callback: `name` finished successfully.
    pub async fn upload_succeeded(&self, name: &str) -> bool {
        self.transition(name, FileRecord::complete_upload).await
    }

    /// Transport callback: `name` failed. Terminal; the record stays queued
    /// until the user removes it.
    pub async fn upload_failed(&self, name: &str) -> bool {
        self.transition(name, FileRecord::fail_upload).await
    }

    async fn transition(
        &self,
        name: &str,
        apply: impl FnOnce(&mut FileRecord) -> bool,
    ) -> bool {
        let mut records = self.records.lock().await;
        let Some(record) = records.iter_mut().find(|r| r.name() == name) else {
            tracing::debug!("Ignoring transport callback for unknown file {}", name);
            return false;
        };
        if !apply(record) {
            return false;
        }
        let snapshot = record.snapshot();
        let _ = self.events.send(QueueEvent::Updated(snapshot));
        true
    }
}
