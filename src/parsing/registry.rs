//! Extractor registry
//!
//! Holds the extractors in priority order and hands out the first enabled one
//! that accepts a path. Enable flags come from `languages.<name>.enabled` in
//! the settings.

use super::{JavaScriptExtractor, JvmExtractor, PythonExtractor, RelationExtractor};
use crate::Settings;

pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn RelationExtractor>>,
}

impl ExtractorRegistry {
    /// Registry with every built-in extractor enabled
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Box::new(JavaScriptExtractor::new()),
                Box::new(JvmExtractor::new()),
                Box::new(PythonExtractor::new()),
            ],
        }
    }

    /// Built-in extractors minus those disabled in `settings`
    pub fn from_settings(settings: &Settings) -> Self {
        let mut registry = Self::new();
        registry.extractors.retain(|extractor| {
            let enabled = settings.language_enabled(extractor.name());
            if !enabled {
                tracing::debug!(target: "builder", "extractor '{}' disabled in configuration", extractor.name());
            }
            enabled
        });
        registry
    }

    /// Empty registry, for callers that register their own extractors
    pub fn empty() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Append an extractor; earlier registrations win on overlapping extensions.
    pub fn register(&mut self, extractor: Box<dyn RelationExtractor>) {
        self.extractors.push(extractor);
    }

    /// First extractor whose `can_parse` accepts `path`.
    pub fn get_extractor(&self, path: &str) -> Option<&dyn RelationExtractor> {
        self.extractors
            .iter()
            .find(|extractor| extractor.can_parse(path))
            .map(|extractor| extractor.as_ref())
    }

    /// Names of the registered extractors, in priority order
    pub fn enabled_extractors(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
