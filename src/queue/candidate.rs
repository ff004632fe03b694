//! Pre-admission file representation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where a candidate's bytes live. Only consulted for thumbnail decoding;
/// the queue itself never reads file contents.
#[derive(Debug, Clone)]
pub enum FileSource {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

/// A file offered for admission, not yet part of the queue.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub source: FileSource,
}

impl CandidateFile {
    /// Candidate backed by an in-memory buffer; `size` is the buffer length.
    pub fn from_memory(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            mime_type: mime_type.into(),
            source: FileSource::Memory(bytes),
        }
    }

    /// Candidate backed by a file on disk. The name is the path's final
    /// component and the size comes from filesystem metadata.
    pub async fn from_path(
        path: impl AsRef<Path>,
        mime_type: impl Into<String>,
    ) -> std::io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = tokio::fs::metadata(&path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            name,
            size: metadata.len(),
            mime_type: mime_type.into(),
            source: FileSource::Path(path),
        })
    }

    /// True when the MIME type marks this as an image (`image/...`),
    /// case-insensitively.
    pub fn is_image(&self) -> bool {
        self.mime_type.to_uppercase().starts_with("IMAGE")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_candidate_takes_buffer_length_as_size() {
        let candidate = CandidateFile::from_memory("a.bin", "application/octet-stream", vec![0u8; 7]);
        assert_eq!(candidate.size, 7);
        assert_eq!(candidate.name, "a.bin");
    }

    #[test]
    fn image_detection_is_case_insensitive() {
        let candidate = CandidateFile::from_memory("p.png", "IMAGE/PNG", Vec::new());
        assert!(candidate.is_image());

        let candidate = CandidateFile::from_memory("n.txt", "text/plain", Vec::new());
        assert!(!candidate.is_image());
    }

    #[tokio::test]
    async fn path_candidate_reads_metadata() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sample.png");
        std::fs::write(&path, b"abcd").expect("write file");

        let candidate = CandidateFile::from_path(&path, "image/png")
            .await
            .expect("candidate from path");
        assert_eq!(candidate.name, "sample.png");
        assert_eq!(candidate.size, 4);
        assert!(candidate.is_image());
    }
}
