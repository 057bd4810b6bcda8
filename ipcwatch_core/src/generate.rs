//! Event and issue generators.
//!
//! Both generators are pure functions of the process list, the current
//! timestamp, and an explicitly threaded seeded RNG; the same seed
//! always replays the same stream. Ids are minted from the RNG rather
//! than the OS entropy pool for the same reason.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::SimError;
use crate::model::{EventStatus, IpcEvent, IpcMechanism, Issue, IssueKind, Process, Severity};

/// Event timestamps are backdated up to 60s, simulating out-of-order
/// arrival and buffering.
pub const EVENT_BACKDATE_MS: i64 = 60_000;

/// Issue timestamps are backdated up to 300s.
pub const ISSUE_BACKDATE_MS: i64 = 300_000;

/// Probability an issue is already resolved when it is first observed.
const RESOLVED_AT_CREATION_P: f64 = 0.25;

fn mint_id(rng: &mut ChaCha8Rng) -> Uuid {
    Uuid::from_u128(rng.gen())
}

/// Generates one synthetic IPC event between two processes.
///
/// Source and target are drawn uniformly; the target is drawn from the
/// processes with a different pid whenever more than one process
/// exists. With exactly one process, source == target is permitted.
pub fn generate_event(
    processes: &[Process],
    now_ms: i64,
    rng: &mut ChaCha8Rng,
) -> Result<IpcEvent, SimError> {
    let source = processes.choose(rng).ok_or(SimError::NoProcesses)?;

    let target = if processes.len() > 1 {
        let candidates: Vec<&Process> =
            processes.iter().filter(|p| p.pid != source.pid).collect();
        candidates.choose(rng).copied().unwrap_or(source)
    } else {
        source
    };

    let mechanism = *IpcMechanism::ALL.choose(rng).unwrap_or(&IpcMechanism::Pipe);
    let operation = mechanism
        .operations()
        .choose(rng)
        .copied()
        .unwrap_or("read");

    let (size_min, size_max) = mechanism.size_range_bytes();
    let message_size_bytes = if size_max == 0 {
        0
    } else {
        rng.gen_range(size_min..=size_max)
    };

    let (lat_min, lat_max) = mechanism.latency_range_ms();
    let raw_latency = lat_min + rng.gen::<f64>() * (lat_max - lat_min);
    let latency_ms = (raw_latency * 100.0).round() / 100.0;

    let status = *EventStatus::WEIGHTED
        .choose(rng)
        .unwrap_or(&EventStatus::Success);

    Ok(IpcEvent {
        id: mint_id(rng),
        timestamp_ms: now_ms - rng.gen_range(0..=EVENT_BACKDATE_MS),
        mechanism,
        operation: operation.to_string(),
        source_pid: source.pid,
        source_name: source.name.clone(),
        target_pid: target.pid,
        target_name: target.name.clone(),
        status,
        message_size_bytes,
        latency_ms,
    })
}

/// Generates one synthetic anomaly record.
///
/// Affected names are sampled with replacement, keeping only
/// first-seen names, so the list holds 1 to 3 distinct entries.
pub fn generate_issue(
    processes: &[Process],
    now_ms: i64,
    rng: &mut ChaCha8Rng,
) -> Result<Issue, SimError> {
    if processes.is_empty() {
        return Err(SimError::NoProcesses);
    }

    let draw_count = rng.gen_range(1..=3usize).min(processes.len());
    let mut affected: Vec<String> = Vec::with_capacity(draw_count);
    for _ in 0..draw_count {
        if let Some(p) = processes.choose(rng) {
            if !affected.iter().any(|name| name == &p.name) {
                affected.push(p.name.clone());
            }
        }
    }

    let kind = *IssueKind::ALL.choose(rng).unwrap_or(&IssueKind::Error);
    let severity = *Severity::ALL.choose(rng).unwrap_or(&Severity::Low);

    Ok(Issue {
        id: mint_id(rng),
        kind,
        severity,
        affected,
        timestamp_ms: now_ms - rng.gen_range(0..=ISSUE_BACKDATE_MS),
        resolved: rng.gen::<f64>() < RESOLVED_AT_CREATION_P,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ProcessRegistry;
    use rand::SeedableRng;

    const NOW_MS: i64 = 1_704_067_200_000;

    fn registry(count: usize, seed: u64) -> ProcessRegistry {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        ProcessRegistry::generate(count, NOW_MS, &mut rng).unwrap()
    }

    #[test]
    fn test_empty_process_list_is_an_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(matches!(
            generate_event(&[], NOW_MS, &mut rng),
            Err(SimError::NoProcesses)
        ));
        assert!(matches!(
            generate_issue(&[], NOW_MS, &mut rng),
            Err(SimError::NoProcesses)
        ));
    }

    #[test]
    fn test_operation_belongs_to_mechanism() {
        let registry = registry(8, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..1000 {
            let event = generate_event(registry.processes(), NOW_MS, &mut rng).unwrap();
            assert!(
                event.mechanism.operations().contains(&event.operation.as_str()),
                "{} is not valid for {}",
                event.operation,
                event.mechanism.as_str()
            );
        }
    }

    #[test]
    fn test_source_differs_from_target() {
        let registry = registry(8, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..1000 {
            let event = generate_event(registry.processes(), NOW_MS, &mut rng).unwrap();
            assert_ne!(event.source_pid, event.target_pid);
        }
    }

    #[test]
    fn test_single_process_talks_to_itself() {
        let registry = registry(1, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let event = generate_event(registry.processes(), NOW_MS, &mut rng).unwrap();
        assert_eq!(event.source_pid, event.target_pid);
    }

    #[test]
    fn test_size_and_latency_within_range() {
        let registry = registry(8, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..10_000 {
            let event = generate_event(registry.processes(), NOW_MS, &mut rng).unwrap();

            let (size_min, size_max) = event.mechanism.size_range_bytes();
            assert!(
                event.message_size_bytes >= size_min && event.message_size_bytes <= size_max,
                "{} bytes outside [{}, {}] for {}",
                event.message_size_bytes,
                size_min,
                size_max,
                event.mechanism.as_str()
            );

            let (lat_min, lat_max) = event.mechanism.latency_range_ms();
            // Rounding to 2 decimals can nudge a boundary draw by half a
            // hundredth in either direction.
            assert!(
                event.latency_ms >= lat_min - 0.005 && event.latency_ms <= lat_max + 0.005,
                "{}ms outside [{}, {}) for {}",
                event.latency_ms,
                lat_min,
                lat_max,
                event.mechanism.as_str()
            );
        }
    }

    #[test]
    fn test_latency_rounded_to_two_decimals() {
        let registry = registry(8, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..200 {
            let event = generate_event(registry.processes(), NOW_MS, &mut rng).unwrap();
            let scaled = event.latency_ms * 100.0;
            assert!((scaled - scaled.round()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_event_timestamp_backdated() {
        let registry = registry(8, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..200 {
            let event = generate_event(registry.processes(), NOW_MS, &mut rng).unwrap();
            assert!(event.timestamp_ms <= NOW_MS);
            assert!(event.timestamp_ms >= NOW_MS - EVENT_BACKDATE_MS);
        }
    }

    #[test]
    fn test_signal_events_carry_no_payload() {
        let registry = registry(8, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut saw_signal = false;
        for _ in 0..500 {
            let event = generate_event(registry.processes(), NOW_MS, &mut rng).unwrap();
            if event.mechanism == IpcMechanism::Signal {
                saw_signal = true;
                assert_eq!(event.message_size_bytes, 0);
            }
        }
        assert!(saw_signal);
    }

    #[test]
    fn test_issue_affected_distinct_and_bounded() {
        let registry = registry(8, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        for _ in 0..1000 {
            let issue = generate_issue(registry.processes(), NOW_MS, &mut rng).unwrap();
            assert!((1..=3).contains(&issue.affected.len()));

            let mut names = issue.affected.clone();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), issue.affected.len());

            assert!(issue.timestamp_ms <= NOW_MS);
            assert!(issue.timestamp_ms >= NOW_MS - ISSUE_BACKDATE_MS);
        }
    }

    #[test]
    fn test_generators_deterministic() {
        let registry = registry(8, 1);

        let mut rng1 = ChaCha8Rng::seed_from_u64(99);
        let mut rng2 = ChaCha8Rng::seed_from_u64(99);

        let e1 = generate_event(registry.processes(), NOW_MS, &mut rng1).unwrap();
        let e2 = generate_event(registry.processes(), NOW_MS, &mut rng2).unwrap();
        assert_eq!(e1.id, e2.id);
        assert_eq!(e1.latency_ms, e2.latency_ms);

        let i1 = generate_issue(registry.processes(), NOW_MS, &mut rng1).unwrap();
        let i2 = generate_issue(registry.processes(), NOW_MS, &mut rng2).unwrap();
        assert_eq!(i1.id, i2.id);
        assert_eq!(i1.kind, i2.kind);
    }
}
