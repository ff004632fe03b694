//! Admission pipeline deciding which candidates enter the queue.
//!
//! Stages run in order: dedupe, type filter, per-file cap, cumulative cap,
//! custom hook. Any stage that empties the list aborts the whole call, so a
//! rejected batch never mutates the queue. Rejection is silent by design.

use crate::common::AcceptPattern;
use crate::queue::CandidateFile;
use std::collections::HashSet;

/// Host-supplied transform applied as the final admission stage. Its output
/// is authoritative: it may drop, reorder, or synthesize entries. It has no
/// access to queue internals.
pub type CustomFilter = Box<dyn Fn(Vec<CandidateFile>) -> Vec<CandidateFile> + Send + Sync>;

pub(crate) struct AdmissionPolicy<'a> {
    pub accept: &'a [AcceptPattern],
    pub max_file_size: Option<u64>,
    pub max_total_size: Option<u64>,
    pub filter: Option<&'a CustomFilter>,
}

pub(crate) fn admit(
    candidates: Vec<CandidateFile>,
    existing_names: &HashSet<String>,
    policy: &AdmissionPolicy<'_>,
) -> Vec<CandidateFile> {
    // names already queued never re-enter; first occurrence wins inside a batch
    let mut seen = HashSet::new();
    let mut files: Vec<CandidateFile> = candidates
        .into_iter()
        .filter(|c| !existing_names.contains(&c.name) && seen.insert(c.name.clone()))
        .collect();
    if files.is_empty() {
        return Vec::new();
    }

    if !policy.accept.is_empty() {
        files.retain(|c| {
            policy
                .accept
                .iter()
                .any(|pattern| pattern.matches(&c.mime_type, &c.name))
        });
        if files.is_empty() {
            return Vec::new();
        }
    }

    if let Some(cap) = policy.max_file_size {
        files.retain(|c| c.size <= cap);
        if files.is_empty() {
            return Vec::new();
        }
    }

    if let Some(cap) = policy.max_total_size {
        let mut total: u64 = 0;
        for i in 0..files.len() {
            total = total.saturating_add(files[i].size);
            if total > cap {
                // Deliberate boundary quirk carried over from the original
                // widget: overflow at index i keeps files[..i-1], and an
                // overflow on the very first file rejects the whole batch.
                if i > 0 {
                    files.truncate(i - 1);
                    break;
                }
                return Vec::new();
            }
        }
        if files.is_empty() {
            return Vec::new();
        }
    }

    if let Some(filter) = policy.filter {
        files = filter(files);
    }

    files
}
