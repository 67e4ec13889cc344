//! Rule-based message classifier.
//!
//! Maps raw guest text to a [`Classification`]: the first category whose
//! keyword list has a substring match, and the first time pattern that
//! matches. Both tables come from the [`Catalog`] and are walked in their
//! declared order.

use regex::Regex;

use concierge_core::catalog::Catalog;
use concierge_core::{Category, Classification, TimePreference};

use crate::error::ChatError;

/// A time pattern compiled from the catalog.
struct CompiledTimePattern {
    preference: TimePreference,
    regex: Regex,
}

/// Classifies guest messages into a category and a time preference.
///
/// Pure: holds only the compiled tables and never fails at classification
/// time.
pub struct MessageClassifier {
    categories: Vec<(Category, Vec<String>)>,
    time_patterns: Vec<CompiledTimePattern>,
}

impl MessageClassifier {
    /// Build a classifier from the catalog's keyword and time-pattern tables.
    ///
    /// Keywords are lower-cased here so matching only lower-cases the input.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, ChatError> {
        let categories = catalog
            .categories
            .iter()
            .map(|entry| {
                let keywords = entry.keywords.iter().map(|k| k.to_lowercase()).collect();
                (entry.category, keywords)
            })
            .collect();

        let time_patterns = catalog
            .time_patterns
            .iter()
            .map(|entry| {
                Regex::new(&entry.pattern)
                    .map(|regex| CompiledTimePattern {
                        preference: entry.preference,
                        regex,
                    })
                    .map_err(|e| {
                        ChatError::Catalog(format!(
                            "invalid time pattern for '{}': {}",
                            entry.preference, e
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            categories,
            time_patterns,
        })
    }

    /// Classify a raw message.
    pub fn classify(&self, text: &str) -> Classification {
        Classification {
            category: self.detect_category(text),
            time_preference: self.detect_time(text),
        }
    }

    /// First category, in table order, with any keyword contained in the
    /// lower-cased text.
    pub fn detect_category(&self, text: &str) -> Option<Category> {
        let lower = text.to_lowercase();
        self.categories
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|(category, _)| *category)
    }

    /// First time preference, in table order, whose pattern matches.
    pub fn detect_time(&self, text: &str) -> Option<TimePreference> {
        self.time_patterns
            .iter()
            .find(|p| p.regex.is_match(text))
            .map(|p| p.preference)
    }

    #[cfg(test)]
    fn category_order(&self) -> Vec<Category> {
        self.categories.iter().map(|(c, _)| *c).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
