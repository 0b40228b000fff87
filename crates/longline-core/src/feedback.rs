//! Publish/subscribe delivery of feedback events.
//!
//! A [`FeedbackBus`] is built for one run, borrows its subscribers mutably and
//! hands every published [`FeedbackEvent`] to each of them in registration
//! order. [`Counter`] and [`Collector`] are the two stock subscribers.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::types::{display_path, FeedbackEvent};

/// Receives feedback events from a [`FeedbackBus`].
pub trait FeedbackSubscriber {
    /// Called once per published event.
    fn on_feedback(&mut self, event: &FeedbackEvent);
}

/// Run-owned registry of subscribers.
///
/// ```
/// use longline_core::{Collector, Counter, FeedbackBus};
///
/// let mut counter = Counter::new();
/// let mut collector = Collector::new();
/// {
///     let mut bus = FeedbackBus::new();
///     bus.register(&mut counter);
///     bus.register(&mut collector);
///     // analyzer.analyze(&mut bus)?;
/// }
/// assert_eq!(counter.total_violation_count(), 0);
/// ```
#[derive(Default)]
pub struct FeedbackBus<'a> {
    subscribers: Vec<&'a mut dyn FeedbackSubscriber>,
}

impl<'a> FeedbackBus<'a> {
    /// Creates a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber. Delivery follows registration order.
    pub fn register(&mut self, subscriber: &'a mut dyn FeedbackSubscriber) {
        self.subscribers.push(subscriber);
    }

    /// Delivers `event` to every subscriber, once each.
    pub fn publish(&mut self, event: &FeedbackEvent) {
        for subscriber in &mut self.subscribers {
            subscriber.on_feedback(event);
        }
    }

    /// Number of registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for FeedbackBus<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Tallies violations per file and overall.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    total: usize,
    per_file: IndexMap<PathBuf, usize>,
}

impl Counter {
    /// Creates an empty counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Violations seen across all files.
    #[must_use]
    pub fn total_violation_count(&self) -> usize {
        self.total
    }

    /// Violations per file, in first-seen order.
    #[must_use]
    pub fn violation_count_per_file(&self) -> &IndexMap<PathBuf, usize> {
        &self.per_file
    }

    /// Violations for one file; zero if the file produced none.
    #[must_use]
    pub fn violation_count_for_file(&self, path: &Path) -> usize {
        self.per_file.get(path).copied().unwrap_or(0)
    }
}

impl FeedbackSubscriber for Counter {
    fn on_feedback(&mut self, event: &FeedbackEvent) {
        self.total += 1;
        *self.per_file.entry(event.path().to_path_buf()).or_insert(0) += 1;
    }
}

/// Keeps every event, grouped by file in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    events: Vec<FeedbackEvent>,
    per_file: IndexMap<PathBuf, Vec<FeedbackEvent>>,
}

impl Collector {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All events in publication order.
    #[must_use]
    pub fn feedback(&self) -> &[FeedbackEvent] {
        &self.events
    }

    /// Events grouped by full file path.
    #[must_use]
    pub fn feedback_per_file(&self) -> &IndexMap<PathBuf, Vec<FeedbackEvent>> {
        &self.per_file
    }

    /// Events for one file, or `None` if the file produced none.
    #[must_use]
    pub fn feedback_for_file(&self, path: &Path) -> Option<&[FeedbackEvent]> {
        self.per_file.get(path).map(Vec::as_slice)
    }

    /// Groups keyed by display-normalized path, for rendering.
    #[must_use]
    pub fn display_groups(&self) -> Vec<(String, &[FeedbackEvent])> {
        self.per_file
            .iter()
            .map(|(path, events)| (display_path(path), events.as_slice()))
            .collect()
    }

    /// Returns true if nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FeedbackSubscriber for Collector {
    fn on_feedback(&mut self, event: &FeedbackEvent) {
        self.events.push(event.clone());
        self.per_file
            .entry(event.path().to_path_buf())
            .or_default()
            .push(event.clone());
    }
}
