//! Deterministic driver for the ipcwatch dashboard engine.
//!
//! Owns the timer-driven control flow around `ipcwatch_core`: a virtual
//! clock, a `SimWorld` advancing on a 1-second base tick (events every
//! 2s, issue cycles every 5s), a JSON frame exporter, and an optional
//! remote stats poller. Everything is reproducible from a single seed.

pub mod clock;
pub mod exporter;
pub mod world;

#[cfg(feature = "remote-stats")]
pub mod poll;

pub use clock::SimClock;
pub use exporter::{SimExport, StatFrame};
pub use world::{SimConfig, SimWorld, TickReport};

#[cfg(feature = "remote-stats")]
pub use poll::StatsPoller;
