use std::path::PathBuf;
use thiserror::Error;

/// Failure while producing an image preview. Recovered inside the thumbnail
/// loader; the affected record simply carries no thumbnail.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("decode task was cancelled")]
    Cancelled,
}
