use crate::error::BoxError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

pub type TickCallback = Box<dyn FnMut() + Send + 'static>;

/// Invokes a callback once per tick until the returned handle is stopped.
pub trait Scheduler {
    fn start(&self, callback: TickCallback) -> Result<TickHandle, BoxError>;
}

/// Cancellation handle for a started callback. Dropping it cancels without
/// waiting; `stop` cancels and waits for the worker to finish its tick.
pub struct TickHandle {
    cancelled: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl TickHandle {
    pub fn new(cancelled: Arc<AtomicBool>, worker: Option<JoinHandle<()>>) -> Self {
        Self { cancelled, worker }
    }

    pub fn stop(mut self) -> Result<(), BoxError> {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(worker) = self.worker.take() {
            worker
                .join()
                .map_err(|_| -> BoxError { "tick worker panicked".into() })?;
        }
        Ok(())
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}
