//! Static content tables that drive classification and reply selection.
//!
//! The catalog is plain configuration data: the ordered keyword table, the
//! ordered time-pattern table, canned reply buckets, and follow-up
//! suggestions. It ships with built-in hotel concierge content and can be
//! replaced wholesale from the `[catalog]` section of the config file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConciergeError, Result};
use crate::types::{Category, TimePreference};

/// Keywords that select a category when any of them is a substring of the
/// lower-cased message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub category: Category,
    pub keywords: Vec<String>,
}

/// A regex that yields a time preference when it matches the raw message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePattern {
    pub preference: TimePreference,
    pub pattern: String,
}

/// Canned replies for one category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseBucket {
    /// Replies used when no time-specific list applies.
    pub general: Vec<String>,
    /// Replies keyed by time preference name (e.g. `tomorrow`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub time_specific: BTreeMap<String, Vec<String>>,
}

/// Complete content catalog.
///
/// `categories` and `time_patterns` are evaluated in declared order and the
/// first match wins, so their order is part of the contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    /// Generic follow-ups for categories without their own list.
    pub default_suggestions: Vec<String>,
    pub categories: Vec<CategoryKeywords>,
    pub time_patterns: Vec<TimePattern>,
    /// Reply buckets keyed by category name. Must contain `general`.
    pub responses: BTreeMap<String, ResponseBucket>,
    /// Follow-up prompts keyed by category name.
    pub suggestions: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    /// Check the catalog for problems that would otherwise surface as
    /// silent misbehavior at runtime.
    pub fn validate(&self) -> Result<()> {
        for entry in &self.categories {
            if entry.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(ConciergeError::Catalog(format!(
                    "category '{}' has an empty keyword",
                    entry.category
                )));
            }
        }

        for entry in &self.time_patterns {
            if entry.pattern.is_empty() {
                return Err(ConciergeError::Catalog(format!(
                    "time pattern for '{}' is empty",
                    entry.preference
                )));
            }
        }

        for (name, bucket) in &self.responses {
            name.parse::<Category>()?;
            if bucket.general.is_empty() {
                return Err(ConciergeError::Catalog(format!(
                    "response bucket '{}' has no general replies",
                    name
                )));
            }
            for time_name in bucket.time_specific.keys() {
                time_name.parse::<TimePreference>()?;
            }
        }

        if !self.responses.contains_key(Category::General.as_str()) {
            return Err(ConciergeError::Catalog(
                "missing 'general' response bucket".to_string(),
            ));
        }

        for name in self.suggestions.keys() {
            name.parse::<Category>()?;
        }

        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn bucket(general: &[&str], time_specific: &[(TimePreference, &[&str])]) -> ResponseBucket {
    ResponseBucket {
        general: strings(general),
        time_specific: time_specific
            .iter()
            .map(|(time, replies)| (time.as_str().to_string(), strings(replies)))
            .collect(),
    }
}

impl Default for Catalog {
    fn default() -> Self {
        use TimePreference::*;

        let categories = vec![
            CategoryKeywords {
                category: Category::Dining,
                keywords: strings(&[
                    "restaurant",
                    "dining",
                    "dinner",
                    "lunch",
                    "brunch",
                    "reservation",
                    "table for",
                    "cuisine",
                    "hungry",
                    "steakhouse",
                    "sushi",
                ]),
            },
            CategoryKeywords {
                category: Category::Local,
                keywords: strings(&[
                    "attraction",
                    "sightseeing",
                    "museum",
                    "things to do",
                    "nearby",
                    "explore",
                    "local",
                    "tour",
                    "shopping",
                    "nightlife",
                    "landmark",
                ]),
            },
            CategoryKeywords {
                category: Category::Spa,
                keywords: strings(&[
                    "spa",
                    "massage",
                    "facial",
                    "treatment",
                    "wellness",
                    "sauna",
                    "manicure",
                    "pedicure",
                ]),
            },
            CategoryKeywords {
                category: Category::Transportation,
                keywords: strings(&[
                    "transport",
                    "taxi",
                    "airport",
                    "shuttle",
                    "car service",
                    "rental car",
                    "limo",
                    "directions",
                    "parking",
                ]),
            },
            CategoryKeywords {
                category: Category::RoomService,
                keywords: strings(&[
                    "room service",
                    "in-room",
                    "to my room",
                    "breakfast in bed",
                    "minibar",
                    "menu",
                    "deliver",
                    "order food",
                ]),
            },
            CategoryKeywords {
                category: Category::Events,
                keywords: strings(&[
                    "event",
                    "concert",
                    "theater",
                    "theatre",
                    "ticket",
                    "performance",
                    "festival",
                    "gallery",
                    "live music",
                ]),
            },
        ];

        let time_patterns = vec![
            TimePattern {
                preference: Tonight,
                pattern: r"(?i)tonight|this evening".to_string(),
            },
            TimePattern {
                preference: Tomorrow,
                pattern: r"(?i)tomorrow".to_string(),
            },
            TimePattern {
                preference: Weekend,
                pattern: r"(?i)weekend|saturday|sunday".to_string(),
            },
            TimePattern {
                preference: SpecificTime,
                pattern: r"(?i)\d{1,2}:?(?:\d{2})?\s?(?:am|pm)".to_string(),
            },
        ];

        let mut responses = BTreeMap::new();
        responses.insert(
            Category::Dining.as_str().to_string(),
            bucket(
                &[
                    "Our signature restaurant, The Azure Room, serves seasonal coastal cuisine. Would you like me to check availability?",
                    "There are several excellent restaurants within walking distance, from casual bistros to fine dining. What kind of cuisine are you in the mood for?",
                    "I'd be happy to help with dining. Do you have any dietary preferences I should keep in mind?",
                ],
                &[
                    (
                        Tonight,
                        &[
                            "For tonight, The Azure Room still has tables at 7:30 PM and 9:00 PM. Shall I reserve one?",
                            "Tonight the rooftop terrace is hosting a chef's tasting menu. I can hold a table for you.",
                        ],
                    ),
                    (
                        Tomorrow,
                        &[
                            "Tomorrow evening looks open at most of our partner restaurants. What time would suit you?",
                            "I can book tomorrow's dinner now so you have one less thing to plan. How many guests?",
                        ],
                    ),
                    (
                        Weekend,
                        &[
                            "Weekend tables fill quickly, so I recommend booking now. Saturday brunch at The Azure Room is a guest favorite.",
                            "For the weekend, the harbor-side seafood restaurants are wonderful. Would you like a reservation?",
                        ],
                    ),
                    (
                        SpecificTime,
                        &[
                            "Let me check availability at that time. How many guests should I book for?",
                        ],
                    ),
                ],
            ),
        );
        responses.insert(
            Category::Local.as_str().to_string(),
            bucket(
                &[
                    "The old town, the botanical gardens, and the maritime museum are all within a short walk. Which interests you most?",
                    "Guests love the harbor walking tour and the weekend artisan market. I can share directions or book a guide.",
                    "There's plenty to explore nearby. Are you looking for culture, outdoor activities, or shopping?",
                ],
                &[
                    (
                        Tonight,
                        &[
                            "Tonight the waterfront promenade is lovely, and the jazz bars in the old town open at 8 PM.",
                        ],
                    ),
                    (
                        Weekend,
                        &[
                            "This weekend the artisan market is open and the museum offers free guided tours on Sunday morning.",
                        ],
                    ),
                ],
            ),
        );
        responses.insert(
            Category::Spa.as_str().to_string(),
            bucket(
                &[
                    "Our spa offers massages, facials, and hydrotherapy. Would you like to see the full treatment menu?",
                    "I'd be glad to arrange a spa treatment for you. Do you have a preferred time?",
                    "The spa's signature hot stone massage is very popular. Shall I check availability?",
                ],
                &[
                    (
                        Tomorrow,
                        &[
                            "Tomorrow the spa has morning and late-afternoon openings. Which would you prefer?",
                        ],
                    ),
                    (
                        Weekend,
                        &[
                            "Weekend spa appointments book up early. I recommend reserving today, and couples packages are available.",
                        ],
                    ),
                ],
            ),
        );
        responses.insert(
            Category::Transportation.as_str().to_string(),
            bucket(
                &[
                    "I can arrange a private car, a taxi, or the hotel shuttle. Where are you headed?",
                    "Our airport transfer service runs around the clock. Would you like me to schedule a pickup?",
                    "Happy to help with transportation. Do you need directions or a booked ride?",
                ],
                &[
                    (
                        SpecificTime,
                        &[
                            "I'll arrange a car for that time. Please confirm your pickup point and destination.",
                        ],
                    ),
                    (
                        Tomorrow,
                        &[
                            "I can schedule your ride for tomorrow now. What time should the driver arrive?",
                        ],
                    ),
                ],
            ),
        );
        responses.insert(
            Category::RoomService.as_str().to_string(),
            bucket(
                &[
                    "Room service is available 24 hours a day. Would you like me to send up the menu?",
                    "I can place an in-room dining order for you. What would you like?",
                    "Our breakfast in bed is a guest favorite. Shall I take your order?",
                ],
                &[(
                    Tonight,
                    &["The late-night room service menu is available until 2 AM. What can I send up tonight?"],
                )],
            ),
        );
        responses.insert(
            Category::Events.as_str().to_string(),
            bucket(
                &[
                    "There are concerts, theater performances, and gallery openings around the city this week. What kind of event do you enjoy?",
                    "I can help you find and book tickets for local events. Any particular show in mind?",
                ],
                &[
                    (
                        Tonight,
                        &[
                            "Tonight there's a symphony performance downtown and live jazz at the harbor club. Shall I look for tickets?",
                        ],
                    ),
                    (
                        Weekend,
                        &[
                            "This weekend features a street food festival and an open-air concert in the park.",
                        ],
                    ),
                ],
            ),
        );
        responses.insert(
            Category::General.as_str().to_string(),
            bucket(
                &[
                    "I'm here to help with anything you need during your stay. I can assist with dining, spa appointments, transportation, local recommendations, and more.",
                    "How can I make your stay more enjoyable? I can book restaurants, arrange transport, or suggest things to do nearby.",
                    "I'd be happy to help. Could you tell me a little more about what you're looking for?",
                ],
                &[],
            ),
        );

        let mut suggestions = BTreeMap::new();
        suggestions.insert(
            Category::Dining.as_str().to_string(),
            strings(&[
                "Show me fine dining options",
                "What about casual restaurants?",
                "I need dietary restrictions accommodated",
                "Book a table for tonight",
            ]),
        );
        suggestions.insert(
            Category::Local.as_str().to_string(),
            strings(&[
                "What are the top attractions?",
                "Find family-friendly activities",
                "Show me nightlife options",
                "I need transportation directions",
            ]),
        );
        suggestions.insert(
            Category::Spa.as_str().to_string(),
            strings(&[
                "Show available spa treatments",
                "Book a massage appointment",
                "What are your spa packages?",
                "Check spa availability for couples",
            ]),
        );
        suggestions.insert(
            Category::Transportation.as_str().to_string(),
            strings(&[
                "Book airport transfer",
                "Arrange car service",
                "Get directions to downtown",
                "Find parking information",
            ]),
        );
        suggestions.insert(
            Category::RoomService.as_str().to_string(),
            strings(&[
                "Show room service menu",
                "Order dinner to my room",
                "What are the breakfast options?",
                "Place a beverage order",
            ]),
        );
        suggestions.insert(
            Category::Events.as_str().to_string(),
            strings(&[
                "Find concert tickets",
                "Show theater performances",
                "Book sports event tickets",
                "Find art gallery openings",
            ]),
        );

        Self {
            default_suggestions: strings(&[
                "Tell me about hotel amenities",
                "Help with restaurant reservations",
                "Find local attractions",
                "Assist with room service",
            ]),
            categories,
            time_patterns,
            responses,
            suggestions,
        }
    }
}
