//! Per-category event sequences.

use std::collections::{BTreeMap, HashMap};

use ghpulse_core::event::{EventCategory, GitHubEvent};

/// Events grouped by category, each group in arrival order.
#[derive(Debug, Default)]
pub struct CategoryIndex {
    sequences: HashMap<EventCategory, Vec<GitHubEvent>>,
}

impl CategoryIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `event` to its category's sequence.
    pub fn record(&mut self, event: GitHubEvent) {
        self.sequences.entry(event.category()).or_default().push(event);
    }

    /// The full sequence for `category`; empty if never observed.
    #[must_use]
    pub fn get(&self, category: EventCategory) -> &[GitHubEvent] {
        self.sequences
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of recorded events per observed category.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<EventCategory, usize> {
        self.sequences
            .iter()
            .map(|(category, events)| (*category, events.len()))
            .collect()
    }
}
