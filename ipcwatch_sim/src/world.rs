//! SimWorld - the simulation driver container.
//!
//! Owns the registry, the rolling history, and the per-subsystem RNGs,
//! and advances them on a fixed 1-second base tick: an event is
//! injected on every event-interval boundary, and every issue-interval
//! boundary runs the resolution sweep plus a 30%-gated issue insertion.
//! Everything is synchronous and single-threaded; a tick completes
//! before anyone can observe the store.

use std::time::Duration;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use ipcwatch_core::{
    build_view, dashboard_stats, generate_event, generate_issue, DashboardStats, DashboardView,
    EventFilter, HistoryStore, ProcessRegistry, SimError,
};

use crate::clock::SimClock;

/// Configuration for a simulation session.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Master seed for determinism
    pub seed: u64,

    /// Number of simulated processes
    pub num_processes: usize,

    /// Seconds between event injections
    pub event_interval_secs: u64,

    /// Seconds between issue cycles (sweep + gated insertion)
    pub issue_interval_secs: u64,

    /// Events preloaded before the first tick
    pub initial_events: usize,

    /// Issues preloaded before the first tick
    pub initial_issues: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_processes: 8,
            event_interval_secs: 2,
            issue_interval_secs: 5,
            initial_events: 30,
            initial_issues: 5,
        }
    }
}

/// Probability an issue cycle actually inserts a new issue.
const ISSUE_INSERT_P: f64 = 0.30;

/// What one tick did, for logging and run summaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickReport {
    pub tick: u64,
    pub injected_event: bool,
    pub injected_issue: bool,
    pub resolved_issues: usize,
}

/// The SimWorld - container for one simulation session.
pub struct SimWorld {
    config: SimConfig,
    clock: SimClock,
    registry: ProcessRegistry,
    history: HistoryStore,

    /// RNG for event generation
    event_rng: ChaCha8Rng,

    /// RNG for issue generation and the resolution sweep
    issue_rng: ChaCha8Rng,

    tick_count: u64,
    events_generated: u64,
    issues_generated: u64,
    issues_resolved: u64,
}

impl SimWorld {
    /// Builds the registry and preloads history per the configuration.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        // Derive separate seeds so one subsystem's draw order does not
        // perturb another's.
        let registry_seed = config.seed;
        let event_seed = config.seed.wrapping_mul(0x9e3779b97f4a7c15);
        let issue_seed = config.seed.wrapping_mul(0x517cc1b727220a95);

        let clock = SimClock::new();
        let mut registry_rng = ChaCha8Rng::seed_from_u64(registry_seed);
        let registry =
            ProcessRegistry::generate(config.num_processes, clock.now_ms(), &mut registry_rng)?;

        let mut world = Self {
            config,
            clock,
            registry,
            history: HistoryStore::new(),
            event_rng: ChaCha8Rng::seed_from_u64(event_seed),
            issue_rng: ChaCha8Rng::seed_from_u64(issue_seed),
            tick_count: 0,
            events_generated: 0,
            issues_generated: 0,
            issues_resolved: 0,
        };
        world.preload()?;
        Ok(world)
    }

    fn preload(&mut self) -> Result<(), SimError> {
        for _ in 0..self.config.initial_events {
            let event =
                generate_event(self.registry.processes(), self.clock.now_ms(), &mut self.event_rng)?;
            self.history.push_event(event);
            self.events_generated += 1;
        }
        for _ in 0..self.config.initial_issues {
            let issue =
                generate_issue(self.registry.processes(), self.clock.now_ms(), &mut self.issue_rng)?;
            self.history.push_issue(issue);
            self.issues_generated += 1;
        }
        Ok(())
    }

    /// Advances the session by one 1-second base tick.
    pub fn tick(&mut self) -> Result<TickReport, SimError> {
        self.clock.advance(Duration::from_secs(1));
        self.tick_count += 1;

        let mut report = TickReport {
            tick: self.tick_count,
            ..TickReport::default()
        };

        if self.tick_count % self.config.event_interval_secs == 0 {
            let event =
                generate_event(self.registry.processes(), self.clock.now_ms(), &mut self.event_rng)?;
            debug!(
                source = %event.source_name,
                target = %event.target_name,
                mechanism = event.mechanism.as_str(),
                "injected event"
            );
            self.history.push_event(event);
            self.events_generated += 1;
            report.injected_event = true;
        }

        if self.tick_count % self.config.issue_interval_secs == 0 {
            if self.issue_rng.gen::<f64>() < ISSUE_INSERT_P {
                let issue = generate_issue(
                    self.registry.processes(),
                    self.clock.now_ms(),
                    &mut self.issue_rng,
                )?;
                debug!(kind = issue.kind.as_str(), "injected issue");
                self.history.push_issue(issue);
                self.issues_generated += 1;
                report.injected_issue = true;
            }

            // The sweep runs every issue cycle, whether or not an issue
            // was inserted.
            let flipped = self.history.sweep_resolutions(&mut self.issue_rng);
            self.issues_resolved += flipped as u64;
            report.resolved_issues = flipped;
        }

        Ok(report)
    }

    /// Headline stats for the current snapshot.
    pub fn stats(&self) -> DashboardStats {
        dashboard_stats(&self.registry, &self.history)
    }

    /// Full view model for the current snapshot.
    pub fn view(&self, filter: &EventFilter) -> DashboardView {
        build_view(&self.registry, &self.history, filter)
    }

    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn uptime_secs(&self) -> u64 {
        self.clock.uptime_secs()
    }

    pub fn events_generated(&self) -> u64 {
        self.events_generated
    }

    pub fn issues_generated(&self) -> u64 {
        self.issues_generated
    }

    pub fn issues_resolved(&self) -> u64 {
        self.issues_resolved
    }
}
