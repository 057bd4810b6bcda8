//! Derived statistics over the current registry and history snapshot.
//!
//! Everything here is a pure read-only computation, recomputed on
//! demand with no caching; staleness is bounded by how often the caller
//! refreshes, which is a driver policy, not an engine concern.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::history::HistoryStore;
use crate::model::{IpcEvent, IpcMechanism};
use crate::registry::ProcessRegistry;

/// Headline stat tiles of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Events currently in the rolling window.
    pub total_events: usize,

    /// Registry processes in `running` state (registry, not history).
    pub active_processes: usize,

    /// Mean latency over the stored events; 0 when the window is empty.
    pub avg_latency_ms: f64,

    /// Unresolved issues in the rolling window.
    pub active_issues: usize,
}

/// One directed communication edge. Keyed by the ordered (source,
/// target) pid pair — A→B and B→A accumulate into separate buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommEdge {
    pub source_pid: u32,
    pub target_pid: u32,

    /// Occurrence count within the current event window; drives
    /// rendering intensity.
    pub count: usize,
}

/// Per-mechanism share of the current event window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionSlot {
    pub mechanism: IpcMechanism,
    pub label: &'static str,
    pub count: usize,

    /// Percentage of `max(total, 1)`, so an empty window yields 0
    /// rather than NaN.
    pub percentage: f64,
}

/// Computes the headline stats from the current snapshot.
pub fn dashboard_stats(registry: &ProcessRegistry, history: &HistoryStore) -> DashboardStats {
    let total_events = history.event_count();

    let avg_latency_ms = if total_events == 0 {
        0.0
    } else {
        history.events().map(|e| e.latency_ms).sum::<f64>() / total_events as f64
    };

    DashboardStats {
        total_events,
        active_processes: registry.running_count(),
        avg_latency_ms,
        active_issues: history.active_issue_count(),
    }
}

/// Accumulates directed edge weights over the event window.
///
/// Output is sorted by weight descending (ties by pid pair) so callers
/// get a stable ordering regardless of accumulation order.
pub fn communication_edges<'a>(events: impl IntoIterator<Item = &'a IpcEvent>) -> Vec<CommEdge> {
    let mut buckets: HashMap<(u32, u32), usize> = HashMap::new();
    for event in events {
        *buckets.entry((event.source_pid, event.target_pid)).or_insert(0) += 1;
    }

    let mut edges: Vec<CommEdge> = buckets
        .into_iter()
        .map(|((source_pid, target_pid), count)| CommEdge {
            source_pid,
            target_pid,
            count,
        })
        .collect();

    edges.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.source_pid.cmp(&b.source_pid))
            .then(a.target_pid.cmp(&b.target_pid))
    });
    edges
}

/// Per-mechanism counts and percentages, sorted by count descending
/// (ties keep the canonical mechanism order).
pub fn mechanism_distribution<'a>(
    events: impl IntoIterator<Item = &'a IpcEvent>,
) -> Vec<DistributionSlot> {
    let mut counts = [0usize; IpcMechanism::ALL.len()];
    let mut total = 0usize;

    for event in events {
        let idx = IpcMechanism::ALL
            .iter()
            .position(|m| *m == event.mechanism)
            .unwrap_or(0);
        counts[idx] += 1;
        total += 1;
    }

    let denominator = total.max(1) as f64;

    let mut slots: Vec<DistributionSlot> = IpcMechanism::ALL
        .iter()
        .zip(counts)
        .map(|(mechanism, count)| DistributionSlot {
            mechanism: *mechanism,
            label: mechanism.label(),
            count,
            percentage: count as f64 / denominator * 100.0,
        })
        .collect();

    slots.sort_by(|a, b| b.count.cmp(&a.count));
    slots
}
