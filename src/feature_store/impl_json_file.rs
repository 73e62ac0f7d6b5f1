use crate::error::BoxError;
use crate::feature_store::impl_memory::StoreContents;
use crate::feature_store::interface::FeatureVectorStore;
use crate::feature_vector::main::FeatureVector;
use crate::library::logger::interface::Logger;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Store kept as one JSON document, rewritten after every save.
pub struct StoreJsonFile {
    path: PathBuf,
    contents: Mutex<StoreContents>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl StoreJsonFile {
    /// Opens `path`, starting empty when the file does not exist yet.
    pub fn open(path: &Path, logger: Arc<dyn Logger + Send + Sync>) -> Result<Self, BoxError> {
        let logger = logger.with_namespace("store");
        let contents = if path.exists() {
            let text = fs::read_to_string(path)?;
            let contents: StoreContents = serde_json::from_str(&text)?;
            logger.info(&format!(
                "Loaded {} vectors and {} gestures from {}",
                contents.vectors.len(),
                contents.gestures.len(),
                path.display()
            ))?;
            contents
        } else {
            logger.info(&format!("Starting empty store at {}", path.display()))?;
            StoreContents::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            contents: Mutex::new(contents),
            logger,
        })
    }

    fn write(&self, contents: &StoreContents) -> Result<(), BoxError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temporary = self.path.with_extension("json.tmp");
        fs::write(&temporary, serde_json::to_string_pretty(contents)?)?;
        fs::rename(&temporary, &self.path)?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, StoreContents>, BoxError> {
        self.contents
            .lock()
            .map_err(|e| -> BoxError { e.to_string().into() })
    }
}

impl FeatureVectorStore for StoreJsonFile {
    fn all_feature_vectors(&self) -> Result<Vec<FeatureVector>, BoxError> {
        Ok(self.lock()?.vectors.clone())
    }

    fn save_gesture(
        &self,
        vector: &FeatureVector,
        gesture: &str,
    ) -> Result<FeatureVector, BoxError> {
        let mut contents = self.lock()?;
        let mut updated = contents.clone();
        let stored = updated.insert(vector, gesture);
        self.write(&updated)?;
        *contents = updated;

        self.logger.info(&format!(
            "Saved vector {} as {:?} (label {})",
            stored.id.unwrap_or_default(),
            gesture,
            stored.class_label.unwrap_or_default()
        ))?;
        Ok(stored)
    }

    fn class_label_to_gesture(&self, class_label: i32) -> Result<Option<String>, BoxError> {
        Ok(self.lock()?.gesture(class_label))
    }

    fn gesture_to_class_label(&self, gesture: &str) -> Result<Option<i32>, BoxError> {
        Ok(self.lock()?.class_label(gesture))
    }
}
