pub mod config;
pub mod errors;
pub mod format;

pub use config::{load_config, AcceptPattern, UploaderConfig};
pub use errors::ThumbnailError;
