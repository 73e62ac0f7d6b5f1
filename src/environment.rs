use crate::config::StorageConfig;
use crate::error::{GestureError, Result};
use std::fs;
use std::path::PathBuf;

pub const MODEL_DIRECTORY: &str = "Model";

/// Returns `<writable_root>/Model/<model_name>`, creating the directory and
/// seeding the file from `<bundled_root>/Model` on first run. A model that is
/// in neither place is left absent.
pub fn resolve_model_path(storage: &StorageConfig, model_name: &str) -> Result<PathBuf> {
    let writable_dir = storage.writable_root.join(MODEL_DIRECTORY);
    fs::create_dir_all(&writable_dir)
        .map_err(|e| GestureError::persistence(&writable_dir, e))?;

    let model_path = writable_dir.join(model_name);
    if model_path.exists() {
        return Ok(model_path);
    }

    let bundled_path = storage.bundled_root.join(MODEL_DIRECTORY).join(model_name);
    if bundled_path.exists() {
        fs::copy(&bundled_path, &model_path)
            .map_err(|e| GestureError::persistence(&bundled_path, e))?;
    }

    Ok(model_path)
}
