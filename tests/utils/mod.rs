#![allow(dead_code)]

pub mod mock_transport;

use updrop::CandidateFile;

/// Non-image candidate with a synthetic size and no real content.
pub fn candidate(name: &str, mime: &str, size: u64) -> CandidateFile {
    let mut candidate = CandidateFile::from_memory(name, mime, Vec::new());
    candidate.size = size;
    candidate
}
