//! Synthetic IPC activity engine.
//!
//! This crate simulates a plausible, internally consistent stream of
//! inter-process communication activity and derives dashboard-ready
//! views from it. There is no real IPC instrumentation anywhere; the
//! point is a deterministic, seedable data source for demoing and
//! load-testing dashboard UIs.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                    driver (tick)                    │
//! │   ┌───────────┐   ┌────────────┐   ┌────────────┐   │
//! │   │  registry │──►│ generators │──►│  history   │   │
//! │   │ (fixed)   │   │ (seeded)   │   │ (bounded)  │   │
//! │   └───────────┘   └────────────┘   └─────┬──────┘   │
//! │                                          │          │
//! │                     ┌────────────────────▼───────┐  │
//! │                     │  aggregate + view (pure)   │  │
//! │                     └────────────────────────────┘  │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! All randomness flows through an explicitly threaded, seeded
//! `ChaCha8Rng`: the same seed replays the same session. History is
//! bounded and most-recent-first; eviction is by insertion order (a
//! documented quirk, see [`history::HistoryStore`]). Aggregation and
//! the view model are pure functions of the current snapshot.

pub mod aggregate;
pub mod error;
pub mod generate;
pub mod history;
pub mod model;
pub mod registry;
pub mod view;

#[cfg(feature = "dashboard")]
pub mod dashboard;

pub use aggregate::{
    communication_edges, dashboard_stats, mechanism_distribution, CommEdge, DashboardStats,
    DistributionSlot,
};
pub use error::SimError;
pub use generate::{generate_event, generate_issue};
pub use history::{HistoryStore, EVENT_CAPACITY, ISSUE_CAPACITY};
pub use model::{
    EventStatus, IpcEvent, IpcMechanism, Issue, IssueKind, Process, ProcessStatus, Severity,
};
pub use registry::{ProcessRegistry, PROCESS_NAMES};
pub use view::{build_view, DashboardView, EventFilter, IssueRow, TimelineDot};

#[cfg(feature = "dashboard")]
pub use dashboard::{IpcDashboard, MetricPacket};
