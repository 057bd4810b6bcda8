//! Render-agnostic view model.
//!
//! `DashboardView` is a pure data transform over (registry, history):
//! filtered event rows, the unresolved-issue panel, timeline dots, the
//! mechanism distribution, and communication edges. Any presentation
//! layer (TUI, web, native) can consume it; nothing here knows how to
//! draw.

use serde::Serialize;

use crate::aggregate::{
    communication_edges, dashboard_stats, mechanism_distribution, CommEdge, DashboardStats,
    DistributionSlot,
};
use crate::history::HistoryStore;
use crate::model::{EventStatus, IpcEvent, IpcMechanism, Issue, Severity};
use crate::registry::ProcessRegistry;

/// Most event rows a view carries.
pub const EVENT_ROW_CAP: usize = 50;

/// Most issues the issue panel shows.
pub const ISSUE_PANEL_CAP: usize = 5;

/// Most dots on the timeline strip.
pub const TIMELINE_CAP: usize = 30;

/// Horizontal clamp for timeline dots, in percent of track width.
const TIMELINE_CLAMP_PCT: (f64, f64) = (2.0, 96.0);

/// Free-text and mechanism filtering for the event list.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Case-insensitive substring match against source OR target name.
    pub search: Option<String>,

    /// Exact mechanism match; `None` shows all.
    pub mechanism: Option<IpcMechanism>,
}

impl EventFilter {
    fn matches(&self, event: &IpcEvent) -> bool {
        let matches_search = match &self.search {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                event.source_name.to_lowercase().contains(&term)
                    || event.target_name.to_lowercase().contains(&term)
            }
        };
        let matches_mechanism = self
            .mechanism
            .map_or(true, |m| m == event.mechanism);
        matches_search && matches_mechanism
    }
}

/// One row of the unresolved-issue panel.
#[derive(Debug, Clone, Serialize)]
pub struct IssueRow {
    pub kind: &'static str,
    pub icon: &'static str,
    pub severity: Severity,
    pub description: &'static str,
    pub affected: Vec<String>,
    pub timestamp_ms: i64,
}

impl IssueRow {
    fn from_issue(issue: &Issue) -> Self {
        Self {
            kind: issue.kind.as_str(),
            icon: issue.icon(),
            severity: issue.severity,
            description: issue.description(),
            affected: issue.affected.clone(),
            timestamp_ms: issue.timestamp_ms,
        }
    }
}

/// One dot on the timeline strip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimelineDot {
    /// Horizontal position in percent of the track, clamped to [2, 96].
    pub position_pct: f64,

    /// Vertical lane (0..=2) to reduce dot overlap.
    pub lane: u8,

    pub mechanism: IpcMechanism,
    pub status: EventStatus,
}

/// The complete renderable snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub stats: DashboardStats,

    /// Filtered events, most recent first, capped at [`EVENT_ROW_CAP`].
    pub events: Vec<IpcEvent>,

    /// Unresolved issues only, capped at [`ISSUE_PANEL_CAP`].
    pub issues: Vec<IssueRow>,

    /// Last [`TIMELINE_CAP`] events by timestamp, oldest to newest.
    pub timeline: Vec<TimelineDot>,

    pub distribution: Vec<DistributionSlot>,
    pub edges: Vec<CommEdge>,
}

/// Builds the full view model from the current snapshot.
pub fn build_view(
    registry: &ProcessRegistry,
    history: &HistoryStore,
    filter: &EventFilter,
) -> DashboardView {
    let events: Vec<IpcEvent> = history
        .events()
        .filter(|e| filter.matches(e))
        .take(EVENT_ROW_CAP)
        .cloned()
        .collect();

    let issues: Vec<IssueRow> = history
        .issues()
        .filter(|i| !i.resolved)
        .take(ISSUE_PANEL_CAP)
        .map(IssueRow::from_issue)
        .collect();

    DashboardView {
        stats: dashboard_stats(registry, history),
        events,
        issues,
        timeline: build_timeline(history),
        distribution: mechanism_distribution(history.events()),
        edges: communication_edges(history.events()),
    }
}

/// Timeline dots: all stored events sorted by (jittered) timestamp, the
/// most recent [`TIMELINE_CAP`] of them positioned across the min..max
/// span. A zero-width span parks every dot at the left clamp.
fn build_timeline(history: &HistoryStore) -> Vec<TimelineDot> {
    let mut sorted: Vec<&IpcEvent> = history.events().collect();
    if sorted.is_empty() {
        return Vec::new();
    }
    sorted.sort_by_key(|e| e.timestamp_ms);

    let min_ts = sorted[0].timestamp_ms;
    let max_ts = sorted[sorted.len() - 1].timestamp_ms;
    let span = (max_ts - min_ts).max(1) as f64;

    let start = sorted.len().saturating_sub(TIMELINE_CAP);
    sorted[start..]
        .iter()
        .enumerate()
        .map(|(lane_idx, event)| {
            let position = (event.timestamp_ms - min_ts) as f64 / span * 100.0;
            TimelineDot {
                position_pct: position.clamp(TIMELINE_CLAMP_PCT.0, TIMELINE_CLAMP_PCT.1),
                lane: (lane_idx % 3) as u8,
                mechanism: event.mechanism,
                status: event.status,
            }
        })
        .collect()
}
