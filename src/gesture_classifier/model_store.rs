use crate::error::{GestureError, Result};
use crate::random_forest::forest::RandomForest;
use std::fs;
use std::path::Path;

/// Where trained forests live between sessions.
pub trait ModelStore: Send + Sync {
    fn save(&self, path: &Path, forest: &RandomForest) -> Result<()>;

    /// `Ok(None)` when nothing has been saved at `path` yet.
    fn load(&self, path: &Path) -> Result<Option<RandomForest>>;
}

pub struct ModelStoreJsonFile;

impl ModelStoreJsonFile {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ModelStoreJsonFile {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelStore for ModelStoreJsonFile {
    fn save(&self, path: &Path, forest: &RandomForest) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| GestureError::persistence(parent, e))?;
        }

        let json = serde_json::to_string(forest)?;
        let temporary = path.with_extension("tmp");
        fs::write(&temporary, json).map_err(|e| GestureError::persistence(&temporary, e))?;
        fs::rename(&temporary, path).map_err(|e| GestureError::persistence(path, e))?;
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<Option<RandomForest>> {
        if !path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(path).map_err(|e| GestureError::persistence(path, e))?;
        let forest: RandomForest = serde_json::from_str(&json)?;
        forest.validate()?;
        Ok(Some(forest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_forest::forest::ForestConfig;

    #[test]
    fn test_missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join(format!(
            "gesture-sign-model-missing-{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        assert!(ModelStoreJsonFile::new().load(&path).unwrap().is_none());
    }

    #[test]
    fn test_garbage_file_fails_to_load() {
        let path = std::env::temp_dir().join(format!(
            "gesture-sign-model-garbage-{}.json",
            std::process::id()
        ));
        fs::write(&path, "not a model").unwrap();

        let result = ModelStoreJsonFile::new().load(&path);

        assert!(matches!(result, Err(GestureError::Serialization(_))));
    }

    #[test]
    fn test_saved_forest_loads_back_equal() {
        let dir = std::env::temp_dir().join(format!("gesture-sign-model-{}", std::process::id()));
        let path = dir.join("nested").join("forest.json");
        let _ = fs::remove_dir_all(&dir);
        let config = ForestConfig {
            number_of_trees: 3,
            seed: Some(1),
            ..ForestConfig::default()
        };
        let forest = RandomForest::learn(
            &[vec![0.0, 1.0], vec![1.0, 0.0], vec![0.1, 0.9]],
            &[0, 1, 0],
            &config,
        )
        .unwrap();

        let store = ModelStoreJsonFile::new();
        store.save(&path, &forest).unwrap();

        assert_eq!(store.load(&path).unwrap(), Some(forest));
    }
}
