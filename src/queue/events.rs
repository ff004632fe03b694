//! Change notifications for host consumers.

use crate::queue::FileSnapshot;

/// Published on the queue's broadcast channel after each applied mutation.
/// Payloads carry snapshots so hosts can render without re-querying.
#[derive(Clone, Debug)]
pub enum QueueEvent {
    /// A batch passed admission and was appended, in admitted order.
    Added(Vec<FileSnapshot>),
    /// One record changed status or progress.
    Updated(FileSnapshot),
    /// One record was removed by name.
    Removed { name: String },
    /// The whole queue was cleared.
    Cleared,
}
