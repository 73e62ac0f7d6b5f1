use crate::config::FreeModeConfig;
use crate::device_display::interface::DeviceDisplay;
use crate::device_sensor::interface::DeviceSensor;
use crate::error::{GestureError, Result};
use crate::feature_extractor::main::FeatureExtractor;
use crate::gesture_classifier::main::GestureClassifier;
use crate::library::logger::interface::Logger;
use crate::library::scheduler::interface::{Scheduler, TickHandle};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Shows the gesture currently held over the sensor.
#[derive(Clone)]
pub struct FreeMode {
    config: FreeModeConfig,
    extractor: FeatureExtractor,
    logger: Arc<dyn Logger + Send + Sync>,
    device_sensor: Arc<dyn DeviceSensor + Send + Sync>,
    device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    classifier: Arc<Mutex<GestureClassifier>>,
    classified_this_presence: Arc<AtomicBool>,
    tick_handle: Arc<Mutex<Option<TickHandle>>>,
}

fn poisoned<T>(e: PoisonError<T>) -> GestureError {
    GestureError::Collaborator(e.to_string().into())
}

impl FreeMode {
    pub fn new(
        config: FreeModeConfig,
        logger: Arc<dyn Logger + Send + Sync>,
        device_sensor: Arc<dyn DeviceSensor + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        classifier: Arc<Mutex<GestureClassifier>>,
    ) -> Result<Self> {
        let feature_set = classifier.lock().map_err(poisoned)?.feature_set();
        Ok(Self {
            config,
            extractor: FeatureExtractor::new(feature_set),
            logger: logger.with_namespace("free_mode"),
            device_sensor,
            device_display,
            classifier,
            classified_this_presence: Arc::new(AtomicBool::new(false)),
            tick_handle: Arc::new(Mutex::new(None)),
        })
    }

    /// One polling step. Frames without hands, or ticks without a model, are
    /// skipped before extraction and re-arm `classify_once_per_presence`.
    pub fn tick(&self) -> Result<Option<String>> {
        let frame = self.device_sensor.frame()?;
        let mut classifier = self.classifier.lock().map_err(poisoned)?;

        if !classifier.model_exists() || !frame.has_hands() {
            self.classified_this_presence.store(false, Ordering::SeqCst);
            return Ok(None);
        }
        if self.config.classify_once_per_presence
            && self.classified_this_presence.load(Ordering::SeqCst)
        {
            return Ok(None);
        }

        let vector = self.extractor.extract(&frame)?;
        let gesture = classifier.classify(&vector.to_array())?;
        drop(classifier);
        self.classified_this_presence.store(true, Ordering::SeqCst);

        self.logger
            .info(&format!("Frame {}: {}", frame.id, gesture))?;
        self.device_display
            .lock()
            .map_err(poisoned)?
            .write_line(0, &gesture)?;
        Ok(Some(gesture))
    }

    /// Ticks on every beat of `scheduler` until `stop`. Tick errors are
    /// logged and the loop carries on.
    pub fn start(&self, scheduler: &dyn Scheduler) -> Result<()> {
        let mut tick_handle = self.tick_handle.lock().map_err(poisoned)?;
        if tick_handle.is_some() {
            self.logger.warn("Free mode is already running")?;
            return Ok(());
        }

        let free_mode = self.clone();
        let handle = scheduler.start(Box::new(move || {
            if let Err(e) = free_mode.tick() {
                let _ = free_mode.logger.warn(&format!("Tick failed: {}", e));
            }
        }))?;
        *tick_handle = Some(handle);
        drop(tick_handle);

        self.logger.info("Free mode started")?;
        Ok(())
    }

    pub fn stop(&self) -> Result<()> {
        let handle = self.tick_handle.lock().map_err(poisoned)?.take();
        if let Some(handle) = handle {
            handle.stop()?;
            self.classified_this_presence.store(false, Ordering::SeqCst);
            self.device_display.lock().map_err(poisoned)?.clear()?;
            self.logger.info("Free mode stopped")?;
        }
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.tick_handle
            .lock()
            .map(|handle| handle.is_some())
            .unwrap_or(false)
    }
}
