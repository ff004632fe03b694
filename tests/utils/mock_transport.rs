use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use updrop::{FileSnapshot, Transport, TransportHandle};

/// Transport handle that records abort requests.
#[derive(Default)]
pub struct MockHandle {
    aborts: AtomicUsize,
}

impl MockHandle {
    pub fn abort_count(&self) -> usize {
        self.aborts.load(Ordering::SeqCst)
    }
}

impl TransportHandle for MockHandle {
    fn abort(&self) {
        self.aborts.fetch_add(1, Ordering::SeqCst);
    }
}

/// Transport that remembers which files it began and hands out inspectable
/// handles. Tests drive the queue's callbacks themselves.
#[derive(Default)]
pub struct MockTransport {
    begun: Mutex<Vec<String>>,
    handles: Mutex<Vec<Arc<MockHandle>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begun_files(&self) -> Vec<String> {
        self.begun.lock().unwrap().clone()
    }

    pub fn handles(&self) -> Vec<Arc<MockHandle>> {
        self.handles.lock().unwrap().clone()
    }

    pub fn total_aborts(&self) -> usize {
        self.handles().iter().map(|h| h.abort_count()).sum()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn begin(&self, file: FileSnapshot) -> Arc<dyn TransportHandle> {
        let handle = Arc::new(MockHandle::default());
        self.begun.lock().unwrap().push(file.name);
        self.handles.lock().unwrap().push(handle.clone());
        handle
    }
}
