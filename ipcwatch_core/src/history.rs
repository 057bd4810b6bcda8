//! Bounded rolling history for events and issues.
//!
//! Both sequences are most-recent-first: new records are pushed at the
//! front and the tail is truncated once capacity is exceeded. Eviction
//! is by insertion order, NOT by timestamp — because timestamps are
//! independently jittered into the past, an event stamped long ago can
//! outlive a newer-stamped one. That is a deliberate, documented quirk
//! carried over from the observed behavior, not a bug.

use std::collections::VecDeque;

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::model::{IpcEvent, Issue};

/// Rolling window of events kept for aggregation and display.
pub const EVENT_CAPACITY: usize = 100;

/// Rolling window of issues.
pub const ISSUE_CAPACITY: usize = 20;

/// Probability an unresolved issue resolves on one sweep pass.
const SWEEP_RESOLVE_P: f64 = 0.10;

/// Bounded, insertion-ordered stores for events and issues.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    events: VecDeque<IpcEvent>,
    issues: VecDeque<Issue>,
    event_capacity: usize,
    issue_capacity: usize,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_capacities(EVENT_CAPACITY, ISSUE_CAPACITY)
    }

    /// Store with explicit capacities, for tests and sizing experiments.
    pub fn with_capacities(event_capacity: usize, issue_capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(event_capacity),
            issues: VecDeque::with_capacity(issue_capacity),
            event_capacity,
            issue_capacity,
        }
    }

    /// Prepends an event; evicts the oldest-inserted once over capacity.
    pub fn push_event(&mut self, event: IpcEvent) {
        self.events.push_front(event);
        self.events.truncate(self.event_capacity);
    }

    /// Prepends an issue; evicts the oldest-inserted once over capacity.
    pub fn push_issue(&mut self, issue: Issue) {
        self.issues.push_front(issue);
        self.issues.truncate(self.issue_capacity);
    }

    /// Background incident resolution: every unresolved issue
    /// independently flips to resolved with 10% probability. Resolved
    /// issues are never revisited, so the flag is monotonic.
    ///
    /// Returns how many issues flipped this pass.
    pub fn sweep_resolutions(&mut self, rng: &mut ChaCha8Rng) -> usize {
        let mut flipped = 0;
        for issue in self.issues.iter_mut() {
            if !issue.resolved && rng.gen::<f64>() < SWEEP_RESOLVE_P {
                issue.resolved = true;
                flipped += 1;
            }
        }
        flipped
    }

    /// Events, most-recent-inserted first.
    pub fn events(&self) -> impl Iterator<Item = &IpcEvent> {
        self.events.iter()
    }

    /// Issues, most-recent-inserted first.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }

    /// Issues still unresolved.
    pub fn active_issue_count(&self) -> usize {
        self.issues.iter().filter(|i| !i.resolved).count()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{generate_event, generate_issue};
    use crate::registry::ProcessRegistry;
    use rand::SeedableRng;

    const NOW_MS: i64 = 1_704_067_200_000;

    fn fixtures() -> (ProcessRegistry, ChaCha8Rng) {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let registry = ProcessRegistry::generate(8, NOW_MS, &mut rng).unwrap();
        (registry, rng)
    }

    #[test]
    fn test_event_eviction_keeps_most_recent_inserts() {
        let (registry, mut rng) = fixtures();
        let mut store = HistoryStore::new();

        let mut ids = Vec::new();
        for _ in 0..105 {
            let event = generate_event(registry.processes(), NOW_MS, &mut rng).unwrap();
            ids.push(event.id);
            store.push_event(event);
        }

        assert_eq!(store.event_count(), 100);

        // Retained = the 100 most recently inserted, newest first.
        let stored: Vec<_> = store.events().map(|e| e.id).collect();
        let expected: Vec<_> = ids.iter().rev().take(100).copied().collect();
        assert_eq!(stored, expected);
    }

    #[test]
    fn test_issue_eviction_at_capacity() {
        let (registry, mut rng) = fixtures();
        let mut store = HistoryStore::new();

        for _ in 0..25 {
            let issue = generate_issue(registry.processes(), NOW_MS, &mut rng).unwrap();
            store.push_issue(issue);
        }

        assert_eq!(store.issue_count(), 20);
    }

    #[test]
    fn test_sweep_is_monotonic() {
        let (registry, mut rng) = fixtures();
        let mut store = HistoryStore::new();

        for _ in 0..20 {
            let issue = generate_issue(registry.processes(), NOW_MS, &mut rng).unwrap();
            store.push_issue(issue);
        }

        for _ in 0..50 {
            let resolved_before: Vec<bool> = store.issues().map(|i| i.resolved).collect();
            store.sweep_resolutions(&mut rng);
            let resolved_after: Vec<bool> = store.issues().map(|i| i.resolved).collect();

            for (before, after) in resolved_before.iter().zip(&resolved_after) {
                assert!(!(*before && !*after), "an issue un-resolved itself");
            }
        }

        // 50 passes at 10% each leaves essentially nothing unresolved.
        assert_eq!(store.active_issue_count(), 0);
    }

    #[test]
    fn test_sweep_counts_flips() {
        let (registry, mut rng) = fixtures();
        let mut store = HistoryStore::new();

        for _ in 0..20 {
            let mut issue = generate_issue(registry.processes(), NOW_MS, &mut rng).unwrap();
            issue.resolved = false;
            store.push_issue(issue);
        }

        let mut total_flipped = 0;
        for _ in 0..200 {
            total_flipped += store.sweep_resolutions(&mut rng);
        }
        assert_eq!(total_flipped, 20);
        assert_eq!(store.active_issue_count(), 0);
    }

    #[test]
    fn test_custom_capacities() {
        let (registry, mut rng) = fixtures();
        let mut store = HistoryStore::with_capacities(3, 2);

        for _ in 0..5 {
            let event = generate_event(registry.processes(), NOW_MS, &mut rng).unwrap();
            store.push_event(event);
        }
        assert_eq!(store.event_count(), 3);
    }
}
