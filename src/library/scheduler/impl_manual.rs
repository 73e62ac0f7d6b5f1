use crate::error::BoxError;
use crate::library::scheduler::interface::{Scheduler, TickCallback, TickHandle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

type Registration = (Arc<AtomicBool>, TickCallback);

/// Ticks only when the caller says so. Cancelled callbacks are dropped on the
/// next tick.
#[derive(Clone, Default)]
pub struct SchedulerManual {
    registrations: Arc<Mutex<Vec<Registration>>>,
}

impl SchedulerManual {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every live callback once and returns how many ran.
    pub fn tick(&self) -> Result<usize, BoxError> {
        let mut registrations = self
            .registrations
            .lock()
            .map_err(|e| -> BoxError { e.to_string().into() })?;

        registrations.retain(|(cancelled, _)| !cancelled.load(Ordering::SeqCst));

        for (_, callback) in registrations.iter_mut() {
            callback();
        }

        Ok(registrations.len())
    }
}

impl Scheduler for SchedulerManual {
    fn start(&self, callback: TickCallback) -> Result<TickHandle, BoxError> {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.registrations
            .lock()
            .map_err(|e| -> BoxError { e.to_string().into() })?
            .push((Arc::clone(&cancelled), callback));
        Ok(TickHandle::new(cancelled, None))
    }
}
