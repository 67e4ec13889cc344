//! Canned reply selection.
//!
//! Picks one reply from the category's bucket (time-specific list first when
//! the context carries a matching time preference), attaches the first three
//! follow-up suggestions, and draws an advisory confidence. All randomness
//! comes from the caller's generator.

use std::collections::BTreeMap;

use rand::seq::IndexedRandom;
use rand::Rng;

use concierge_core::catalog::Catalog;
use concierge_core::{Category, ConciergeReply, SessionContext, TimePreference};

use crate::error::ChatError;

/// Maximum number of suggestions attached to a reply.
pub const MAX_SUGGESTIONS: usize = 3;

/// Inclusive lower bound of the advisory confidence.
pub const CONFIDENCE_MIN: f64 = 0.85;

/// Exclusive upper bound of the advisory confidence.
pub const CONFIDENCE_MAX: f64 = 1.0;

/// Reply used only if a bucket somehow has nothing to pick from.
const FALLBACK_REPLY: &str =
    "I'd be happy to help. Could you tell me a little more about what you're looking for?";

/// Reply bucket with its keys resolved to typed values.
#[derive(Debug, Clone, Default)]
struct Bucket {
    general: Vec<String>,
    time_specific: BTreeMap<TimePreference, Vec<String>>,
}

impl Bucket {
    /// The list to pick from for the given time preference.
    fn pool(&self, time: Option<TimePreference>) -> &[String] {
        time.and_then(|t| self.time_specific.get(&t))
            .filter(|list| !list.is_empty())
            .unwrap_or(&self.general)
    }
}

/// Stateless reply selector built from the catalog's response and
/// suggestion tables.
pub struct ResponseSelector {
    buckets: BTreeMap<Category, Bucket>,
    suggestions: BTreeMap<Category, Vec<String>>,
    default_suggestions: Vec<String>,
}

impl ResponseSelector {
    /// Build a selector, validating the catalog first.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, ChatError> {
        catalog.validate()?;

        let mut buckets = BTreeMap::new();
        for (name, bucket) in &catalog.responses {
            let mut time_specific = BTreeMap::new();
            for (time_name, replies) in &bucket.time_specific {
                time_specific.insert(time_name.parse::<TimePreference>()?, replies.clone());
            }
            buckets.insert(
                name.parse::<Category>()?,
                Bucket {
                    general: bucket.general.clone(),
                    time_specific,
                },
            );
        }

        let mut suggestions = BTreeMap::new();
        for (name, list) in &catalog.suggestions {
            suggestions.insert(name.parse::<Category>()?, list.clone());
        }

        Ok(Self {
            buckets,
            suggestions,
            default_suggestions: catalog.default_suggestions.clone(),
        })
    }

    /// Select a reply for `category` given the session's merged context.
    ///
    /// Draws exactly two values from `rng`: the reply index, then the
    /// confidence.
    pub fn select<R: Rng + ?Sized>(
        &self,
        category: Category,
        context: &SessionContext,
        rng: &mut R,
    ) -> ConciergeReply {
        let content = match self.bucket_for(category) {
            Some(bucket) => bucket.pool(context.time_preference).choose(rng).cloned(),
            None => None,
        }
        .unwrap_or_else(|| FALLBACK_REPLY.to_string());

        let confidence = rng.random_range(CONFIDENCE_MIN..CONFIDENCE_MAX);

        ConciergeReply {
            content,
            suggestions: self.suggestions_for(category),
            category,
            confidence,
        }
    }

    /// First [`MAX_SUGGESTIONS`] follow-ups for a category, in declared order.
    pub fn suggestions_for(&self, category: Category) -> Vec<String> {
        self.suggestions
            .get(&category)
            .unwrap_or(&self.default_suggestions)
            .iter()
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }

    #[cfg(test)]
    fn candidates(&self, category: Category, time: Option<TimePreference>) -> Vec<String> {
        self.bucket_for(category)
            .map(|b| b.pool(time).to_vec())
            .unwrap_or_default()
    }

    /// Category bucket, or the general bucket when the category has none.
    fn bucket_for(&self, category: Category) -> Option<&Bucket> {
        self.buckets
            .get(&category)
            .or_else(|| self.buckets.get(&Category::General))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_core::catalog::ResponseBucket;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn selector() -> ResponseSelector {
        ResponseSelector::from_catalog(&Catalog::default()).unwrap()
    }

    fn ctx(category: Option<Category>, time: Option<TimePreference>) -> SessionContext {
        SessionContext {
            category,
            time_preference: time,
        }
    }

    #[test]
    fn test_spa_suggestions_are_prefix_of_configured_list() {
        let catalog = Catalog::default();
        let s = ResponseSelector::from_catalog(&catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let reply = s.select(Category::Spa, &ctx(Some(Category::Spa), None), &mut rng);
        assert_eq!(reply.suggestions.len(), 3);
        assert_eq!(reply.suggestions[..], catalog.suggestions["spa"][..3]);
    }

    #[test]
    fn test_general_uses_default_suggestions() {
        let catalog = Catalog::default();
        let s = ResponseSelector::from_catalog(&catalog).unwrap();
        assert_eq!(
            s.suggestions_for(Category::General)[..],
            catalog.default_suggestions[..3]
        );
    }

    #[test]
    fn test_short_suggestion_list_is_not_padded() {
        let mut catalog = Catalog::default();
        catalog
            .suggestions
            .insert("spa".to_string(), vec!["Only one".to_string()]);
        let s = ResponseSelector::from_catalog(&catalog).unwrap();
        assert_eq!(s.suggestions_for(Category::Spa), vec!["Only one".to_string()]);
    }

    #[test]
    fn test_time_specific_pool_used_exclusively() {
        let s = selector();
        let dining_tomorrow = Catalog::default().responses["dining"].time_specific["tomorrow"].clone();
        let context = ctx(Some(Category::Dining), Some(TimePreference::Tomorrow));
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let reply = s.select(Category::Dining, &context, &mut rng);
            assert!(dining_tomorrow.contains(&reply.content), "{}", reply.content);
        }
    }

    #[test]
    fn test_time_without_specific_list_uses_general() {
        let s = selector();
        let local_general = Catalog::default().responses["local"].general.clone();
        // Local has no tomorrow list
        let context = ctx(Some(Category::Local), Some(TimePreference::Tomorrow));
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let reply = s.select(Category::Local, &context, &mut rng);
            assert!(local_general.contains(&reply.content));
        }
    }

    #[test]
    fn test_no_time_preference_uses_general() {
        let s = selector();
        let dining_general = Catalog::default().responses["dining"].general.clone();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..20 {
            let reply = s.select(Category::Dining, &ctx(Some(Category::Dining), None), &mut rng);
            assert!(dining_general.contains(&reply.content));
        }
    }

    #[test]
    fn test_empty_time_list_falls_back_to_general() {
        let mut catalog = Catalog::default();
        catalog
            .responses
            .get_mut("spa")
            .unwrap()
            .time_specific
            .insert("tonight".to_string(), vec![]);
        let s = ResponseSelector::from_catalog(&catalog).unwrap();
        assert_eq!(
            s.candidates(Category::Spa, Some(TimePreference::Tonight)),
            catalog.responses["spa"].general
        );
    }

    #[test]
    fn test_category_without_bucket_falls_back_to_general_bucket() {
        let mut catalog = Catalog::default();
        catalog.responses.remove("events");
        let s = ResponseSelector::from_catalog(&catalog).unwrap();
        let general = catalog.responses["general"].general.clone();
        let mut rng = StdRng::seed_from_u64(9);
        let reply = s.select(Category::Events, &ctx(Some(Category::Events), None), &mut rng);
        assert!(general.contains(&reply.content));
        // Category is reported as requested; suggestions still per category
        assert_eq!(reply.category, Category::Events);
        assert_eq!(reply.suggestions[0], "Find concert tickets");
    }

    #[test]
    fn test_confidence_range() {
        let s = selector();
        let mut rng = StdRng::seed_from_u64(11);
        for category in Category::ALL {
            for _ in 0..200 {
                let reply = s.select(category, &ctx(Some(category), None), &mut rng);
                assert!(reply.confidence >= CONFIDENCE_MIN);
                assert!(reply.confidence < CONFIDENCE_MAX);
            }
        }
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let s = selector();
        let context = ctx(Some(Category::Dining), Some(TimePreference::Weekend));
        let mut a = StdRng::seed_from_u64(1234);
        let mut b = StdRng::seed_from_u64(1234);
        for _ in 0..10 {
            assert_eq!(
                s.select(Category::Dining, &context, &mut a),
                s.select(Category::Dining, &context, &mut b)
            );
        }
    }

    #[test]
    fn test_single_entry_pool_is_exact() {
        let mut catalog = Catalog::default();
        catalog.responses.insert(
            "transportation".to_string(),
            ResponseBucket {
                general: vec!["Your car is on the way.".to_string()],
                time_specific: BTreeMap::new(),
            },
        );
        let s = ResponseSelector::from_catalog(&catalog).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let reply = s.select(
            Category::Transportation,
            &ctx(Some(Category::Transportation), Some(TimePreference::Tonight)),
            &mut rng,
        );
        assert_eq!(reply.content, "Your car is on the way.");
    }

    #[test]
    fn test_from_catalog_rejects_invalid_catalog() {
        let mut catalog = Catalog::default();
        catalog.responses.remove("general");
        assert!(matches!(
            ResponseSelector::from_catalog(&catalog),
            Err(ChatError::Catalog(_))
        ));
    }
}
