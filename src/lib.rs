pub mod common;
pub mod queue;
pub mod thumbnail;
pub mod transport;

pub use common::{load_config, UploaderConfig};
pub use queue::{CandidateFile, FileSnapshot, FileStatus, QueueEvent, UploadQueue};
pub use transport::{Transport, TransportHandle};
