//! The transport collaborator seam.
//!
//! The queue never performs network transfer itself. The host hands queued
//! files to a [`Transport`], which begins a send operation and then drives
//! the queue's status transitions as the transfer progresses:
//!
//! - [`UploadQueue::upload_started`] with the handle returned by `begin`
//! - [`UploadQueue::upload_progressed`] for each byte-count report
//! - [`UploadQueue::upload_succeeded`] or [`UploadQueue::upload_failed`]
//!
//! Retry policy, concurrency limits, and the wire protocol all belong to the
//! transport, not the queue.
//!
//! [`UploadQueue::upload_started`]: crate::queue::UploadQueue::upload_started
//! [`UploadQueue::upload_progressed`]: crate::queue::UploadQueue::upload_progressed
//! [`UploadQueue::upload_succeeded`]: crate::queue::UploadQueue::upload_succeeded
//! [`UploadQueue::upload_failed`]: crate::queue::UploadQueue::upload_failed

use crate::queue::FileSnapshot;
use std::sync::Arc;

/// Cancellable reference to one in-flight send operation.
pub trait TransportHandle: Send + Sync {
    /// Request cancellation. Synchronous and best-effort: the queue does not
    /// wait for acknowledgement, and a late completion callback after an
    /// abort is ignored.
    fn abort(&self);
}

/// Host-supplied transfer mechanism.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Begin sending one file. Returns the handle the queue stores for the
    /// record while it is uploading.
    async fn begin(&self, file: FileSnapshot) -> Arc<dyn TransportHandle>;
}
