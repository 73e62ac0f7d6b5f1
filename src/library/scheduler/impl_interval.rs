use crate::error::BoxError;
use crate::library::scheduler::interface::{Scheduler, TickCallback, TickHandle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Runs the callback on its own thread, sleeping `tick_rate` between ticks.
#[derive(Debug, Clone)]
pub struct SchedulerInterval {
    tick_rate: Duration,
}

impl SchedulerInterval {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }
}

impl Scheduler for SchedulerInterval {
    fn start(&self, mut callback: TickCallback) -> Result<TickHandle, BoxError> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let worker_cancelled = Arc::clone(&cancelled);
        let tick_rate = self.tick_rate;

        let worker = std::thread::Builder::new()
            .name("gesture-tick".to_string())
            .spawn(move || {
                while !worker_cancelled.load(Ordering::SeqCst) {
                    callback();
                    std::thread::sleep(tick_rate);
                }
            })?;

        Ok(TickHandle::new(cancelled, Some(worker)))
    }
}
