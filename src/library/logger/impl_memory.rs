use crate::error::BoxError;
use crate::library::logger::interface::{join_namespace, Level, Logger};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub struct LogLine {
    pub level: Level,
    pub namespace: Option<String>,
    pub message: String,
}

/// Keeps every line in a buffer shared by all namespaced children.
#[derive(Debug, Clone, Default)]
pub struct LoggerMemory {
    namespace: Option<String>,
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl LoggerMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<LogLine> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.message.contains(needle))
    }
}

impl Logger for LoggerMemory {
    fn log(&self, level: Level, message: &str) -> Result<(), BoxError> {
        let mut lines = self
            .lines
            .lock()
            .map_err(|e| -> BoxError { e.to_string().into() })?;
        lines.push(LogLine {
            level,
            namespace: self.namespace.clone(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerMemory {
            namespace: Some(join_namespace(self.namespace.as_deref(), namespace)),
            lines: Arc::clone(&self.lines),
        })
    }
}
