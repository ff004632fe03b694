//! Best-effort image preview decoding.
//!
//! Decode failures are recovered here: the affected record simply carries no
//! thumbnail, and the rest of the batch is unaffected.

use crate::common::ThumbnailError;
use crate::queue::{CandidateFile, FileSource};
use image::DynamicImage;
use std::sync::Arc;

/// Decoded in-memory preview of an admitted image file.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    image: DynamicImage,
}

impl Thumbnail {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}

/// Decode previews for every image-typed candidate in the batch, in input
/// order. Attempts run concurrently and are all joined before returning, so
/// the caller publishes fully-prepared records only. Non-image candidates
/// and failed decodes yield `None`.
pub(crate) async fn load_batch(
    candidates: &[CandidateFile],
    disabled: bool,
) -> Vec<Option<Arc<Thumbnail>>> {
    let tasks: Vec<_> = candidates
        .iter()
        .map(|candidate| {
            if disabled || !candidate.is_image() {
                None
            } else {
                let name = candidate.name.clone();
                let source = candidate.source.clone();
                Some(tokio::spawn(async move {
                    match load_one(source).await {
                        Ok(thumbnail) => Some(Arc::new(thumbnail)),
                        Err(e) => {
                            tracing::debug!("Thumbnail for {} skipped: {}", name, e);
                            None
                        }
                    }
                }))
            }
        })
        .collect();

    futures::future::join_all(tasks.into_iter().map(|task| async move {
        match task {
            Some(handle) => handle.await.ok().flatten(),
            None => None,
        }
    }))
    .await
}

async fn load_one(source: FileSource) -> Result<Thumbnail, ThumbnailError> {
    let bytes: Arc<[u8]> = match source {
        FileSource::Memory(bytes) => bytes,
        FileSource::Path(path) => tokio::fs::read(&path)
            .await
            .map_err(|source| ThumbnailError::Read { path, source })?
            .into(),
    };

    // image decoding is CPU-bound; keep it off the async workers
    let image = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await
        .map_err(|_| ThumbnailError::Cancelled)??;

    Ok(Thumbnail { image })
}
