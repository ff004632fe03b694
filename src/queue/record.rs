//! Per-file lifecycle state.

use crate::common::format::{human_storage_size, progress_label};
use crate::queue::CandidateFile;
use crate::thumbnail::Thumbnail;
use crate::transport::TransportHandle;
use std::sync::Arc;

/// Lifecycle status of a queued file.
/// `Uploaded` and `Failed` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileStatus {
    Idle,
    Uploading,
    Uploaded,
    Failed,
}

impl FileStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, FileStatus::Uploaded | FileStatus::Failed)
    }
}

/// The queue's owned representation of an admitted file.
///
/// Fields mutate only through the transition methods, which implement:
/// `Idle → Uploading → {Uploaded, Failed}`. The uploaded-byte counter never
/// decreases while uploading and is forced to the full size on success.
pub struct FileRecord {
    name: String,
    size: u64,
    mime_type: String,
    status: FileStatus,
    uploaded_bytes: u64,
    thumbnail: Option<Arc<Thumbnail>>,
    handle: Option<Arc<dyn TransportHandle>>,
}

impl FileRecord {
    /// Admit a candidate: status starts at `Idle` with zero bytes uploaded.
    pub(crate) fn new(candidate: CandidateFile, thumbnail: Option<Arc<Thumbnail>>) -> Self {
        Self {
            name: candidate.name,
            size: candidate.size,
            mime_type: candidate.mime_type,
            status: FileStatus::Idle,
            uploaded_bytes: 0,
            thumbnail,
            handle: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn status(&self) -> FileStatus {
        self.status
    }

    pub fn uploaded_bytes(&self) -> u64 {
        self.uploaded_bytes
    }

    /// Fraction of the file transferred, clamped to `[0, 1]`.
    /// Zero-size files report 1.0 once uploaded and 0.0 before.
    pub fn progress_fraction(&self) -> f64 {
        if self.status == FileStatus::Uploaded {
            return 1.0;
        }
        if self.size == 0 {
            return 0.0;
        }
        (self.uploaded_bytes as f64 / self.size as f64).min(1.0)
    }

    /// `Idle → Uploading`; stores the transport handle for cancellation.
    /// Returns false (and changes nothing) from any other state.
    pub(crate) fn start_upload(&mut self, handle: Arc<dyn TransportHandle>) -> bool {
        if self.status != FileStatus::Idle {
            tracing::debug!("Ignoring upload start for {} ({:?})", self.name, self.status);
            return false;
        }
        self.status = FileStatus::Uploading;
        self.handle = Some(handle);
        true
    }

    /// Progress report while `Uploading`. Reported bytes are clamped to the
    /// file size; a decrease is ignored, never applied.
    pub(crate) fn record_progress(&mut self, reported_bytes: u64) -> bool {
        if self.status != FileStatus::Uploading {
            return false;
        }
        let bytes = reported_bytes.min(self.size);
        if bytes < self.uploaded_bytes {
            tracing::debug!(
                "Ignoring non-monotonic progress for {}: {} < {}",
                self.name,
                bytes,
                self.uploaded_bytes
            );
            return false;
        }
        self.uploaded_bytes = bytes;
        true
    }

    /// `Uploading → Uploaded`; forces the byte counter to the full size.
    pub(crate) fn complete_upload(&mut self) -> bool {
        if self.status != FileStatus::Uploading {
            return false;
        }
        self.status = FileStatus::Uploaded;
        self.uploaded_bytes = self.size;
        self.handle = None;
        true
    }

    /// `* → Failed`; byte counters keep their last known value.
    pub(crate) fn fail_upload(&mut self) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = FileStatus::Failed;
        self.handle = None;
        true
    }

    /// Detach the in-flight transport handle, if any, for cancellation.
    pub(crate) fn take_handle(&mut self) -> Option<Arc<dyn TransportHandle>> {
        self.handle.take()
    }

    /// Immutable copy of the record for events and host rendering.
    pub fn snapshot(&self) -> FileSnapshot {
        let fraction = self.progress_fraction();
        FileSnapshot {
            name: self.name.clone(),
            size: self.size,
            mime_type: self.mime_type.clone(),
            status: self.status,
            uploaded_bytes: self.uploaded_bytes,
            progress_fraction: fraction,
            progress_label: progress_label(fraction),
            size_label: human_storage_size(self.size),
            thumbnail: self.thumbnail.clone(),
        }
    }
}

/// Point-in-time view of a [`FileRecord`], with display labels materialized.
#[derive(Clone, Debug)]
pub struct FileSnapshot {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub status: FileStatus,
    pub uploaded_bytes: u64,
    pub progress_fraction: f64,
    pub progress_label: String,
    pub size_label: String,
    pub thumbnail: Option<Arc<Thumbnail>>,
}
