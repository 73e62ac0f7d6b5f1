use gesture_sign::config::Config;
use gesture_sign::device_display::impl_console::DeviceDisplayConsole;
use gesture_sign::device_sensor::impl_fake::{DeviceSensorFake, HandPose};
use gesture_sign::device_sensor::interface::DeviceSensor;
use gesture_sign::feature_extractor::main::FeatureExtractor;
use gesture_sign::feature_store::impl_json_file::StoreJsonFile;
use gesture_sign::feature_store::interface::FeatureVectorStore;
use gesture_sign::free_mode::main::FreeMode;
use gesture_sign::gesture_classifier::main::GestureClassifier;
use gesture_sign::gesture_classifier::model_store::ModelStoreJsonFile;
use gesture_sign::library::logger::impl_console::LoggerConsole;
use gesture_sign::library::logger::interface::Logger;
use gesture_sign::library::scheduler::impl_interval::SchedulerInterval;
use std::error::Error;
use std::sync::{Arc, Mutex};

const USAGE: &str = "usage: gesture-sign [free [ticks] | train | capture <gesture> <count>]";
const FREE_MODE_TICKS: u32 = 50;
/// Frames read per wanted vector before `capture` gives up on the sensor.
const CAPTURE_ATTEMPTS_PER_VECTOR: usize = 100;

fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = Config::default();
    let args: Vec<String> = std::env::args().skip(1).collect();

    let logger: Arc<dyn Logger + Send + Sync> = Arc::new(LoggerConsole::new(config.logger_timezone));
    let store = Arc::new(StoreJsonFile::open(&config.storage.store_path(), logger.clone())?);
    let mut classifier = GestureClassifier::new(
        &config,
        store.clone(),
        Arc::new(ModelStoreJsonFile::new()),
        logger.clone(),
    );
    classifier.start()?;

    match args.first().map(String::as_str).unwrap_or("free") {
        "capture" => {
            let (gesture, count) = match (args.get(1), args.get(2).map(|n| n.parse::<usize>())) {
                (Some(gesture), Some(Ok(count))) => (gesture.as_str(), count),
                _ => return Err(USAGE.into()),
            };
            let sensor = match HandPose::from_name(gesture) {
                Some(pose) => DeviceSensorFake::holding(logger.clone(), pose, 0.05),
                None => DeviceSensorFake::new(logger.clone()),
            };
            capture(&config, &sensor, store.as_ref(), gesture, count, logger.as_ref())?;
        }
        "train" => {
            classifier.train()?;
        }
        "free" => {
            let ticks = match args.get(1) {
                Some(ticks) => ticks.parse::<u32>()?,
                None => FREE_MODE_TICKS,
            };
            let free_mode = FreeMode::new(
                config.free_mode.clone(),
                logger.clone(),
                Arc::new(DeviceSensorFake::new(logger.clone())),
                Arc::new(Mutex::new(DeviceDisplayConsole::new())),
                Arc::new(Mutex::new(classifier)),
            )?;
            free_mode.start(&SchedulerInterval::new(config.tick_rate))?;
            std::thread::sleep(config.tick_rate * ticks);
            free_mode.stop()?;
        }
        _ => return Err(USAGE.into()),
    }

    Ok(())
}

/// Stores `count` hand frames from `sensor` under `gesture`. Frames without
/// hands are skipped; reading more than `CAPTURE_ATTEMPTS_PER_VECTOR` frames
/// per vector is an error.
fn capture(
    config: &Config,
    sensor: &dyn DeviceSensor,
    store: &dyn FeatureVectorStore,
    gesture: &str,
    count: usize,
    logger: &dyn Logger,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let extractor = FeatureExtractor::new(config.feature_set);
    let max_attempts = count.saturating_mul(CAPTURE_ATTEMPTS_PER_VECTOR);
    let mut captured = 0;
    let mut attempts = 0;
    while captured < count {
        if attempts >= max_attempts {
            return Err(format!(
                "Sensor saw no hand in {} frames; captured {} of {} {:?} vectors",
                attempts, captured, count, gesture
            )
            .into());
        }
        attempts += 1;
        let frame = sensor.frame()?;
        if !frame.has_hands() {
            continue;
        }
        let vector = extractor.extract(&frame)?;
        store.save_gesture(&vector, gesture)?;
        captured += 1;
    }
    logger.info(&format!("Captured {} {:?} vectors", captured, gesture))?;
    Ok(())
}
