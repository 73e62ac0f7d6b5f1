use chrono::Offset;
use crate::feature_vector::feature_set::FeatureSet;
use crate::random_forest::forest::ForestConfig;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// File name of the persisted model under `<root>/Model`.
    pub model_name: String,
    pub forest: ForestConfig,
    /// Compare every `test_outputs.len()` classifications against
    /// `test_outputs` and log a confusion matrix.
    pub calculate_accuracy: bool,
    pub test_outputs: Vec<i32>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_name: "gesture-model.json".to_string(),
            forest: ForestConfig::default(),
            calculate_accuracy: false,
            test_outputs: vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1],
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Read-only assets shipped with the binary.
    pub bundled_root: PathBuf,
    /// Where models and captured vectors are written.
    pub writable_root: PathBuf,
    pub store_file_name: String,
}

impl StorageConfig {
    pub fn store_path(&self) -> PathBuf {
        self.writable_root.join(&self.store_file_name)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bundled_root: PathBuf::from("assets"),
            writable_root: PathBuf::from("data"),
            store_file_name: "feature-vectors.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FreeModeConfig {
    /// Classify once when hands appear instead of on every tick.
    pub classify_once_per_presence: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub tick_rate: Duration,
    pub logger_timezone: chrono::FixedOffset,
    pub feature_set: FeatureSet,
    pub classifier: ClassifierConfig,
    pub storage: StorageConfig,
    pub free_mode: FreeModeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
            logger_timezone: mountain_standard_time(),
            feature_set: FeatureSet::default(),
            classifier: ClassifierConfig::default(),
            storage: StorageConfig::default(),
            free_mode: FreeModeConfig::default(),
        }
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap_or_else(|| chrono::Utc.fix())
}
