//! Process registry: the fixed set of simulated processes.
//!
//! The registry is built wholesale at session start and never appended
//! to or mutated afterward. Pids combine the process index with random
//! jitter; jitter draws that would collide with an already assigned pid
//! are rejected, so pids are unique within one build (they are NOT
//! unique across independent builds, which is fine because the registry
//! is always rebuilt from scratch).

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::error::SimError;
use crate::model::{Process, ProcessStatus};

/// Fixed pool of process names; draws are without replacement.
pub const PROCESS_NAMES: [&str; 10] = [
    "nginx",
    "postgres",
    "redis",
    "node",
    "python",
    "systemd",
    "docker",
    "kubelet",
    "etcd",
    "prometheus",
];

/// Backdate window for process start times (24h in millis).
const START_BACKDATE_MS: i64 = 86_400_000;

/// The fixed set of simulated processes for one session.
#[derive(Debug, Clone)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
}

impl ProcessRegistry {
    /// Generates `count` processes with pairwise-distinct names.
    ///
    /// Fails with `NamePoolExhausted` when `count` exceeds the name
    /// pool; capping silently would hide a driver misconfiguration.
    pub fn generate(count: usize, now_ms: i64, rng: &mut ChaCha8Rng) -> Result<Self, SimError> {
        if count > PROCESS_NAMES.len() {
            return Err(SimError::NamePoolExhausted {
                requested: count,
                available: PROCESS_NAMES.len(),
            });
        }

        let mut names: Vec<&str> = PROCESS_NAMES.to_vec();
        names.shuffle(rng);

        let mut processes = Vec::with_capacity(count);
        let mut used_pids = Vec::with_capacity(count);

        for (i, name) in names.into_iter().take(count).enumerate() {
            // Index plus jitter; reject draws that collide so that the
            // event generator's target selection always terminates.
            let pid = loop {
                let candidate = 1000 + i as u32 * rng.gen_range(1..=100);
                if !used_pids.contains(&candidate) {
                    break candidate;
                }
            };
            used_pids.push(pid);

            let status = if rng.gen::<f64>() > 0.2 {
                ProcessStatus::Running
            } else {
                *ProcessStatus::DEGRADED
                    .choose(rng)
                    .unwrap_or(&ProcessStatus::Blocked)
            };

            processes.push(Process {
                pid,
                name: name.to_string(),
                status,
                cpu_usage: rng.gen::<f64>() * 100.0,
                memory_usage: rng.gen::<f64>() * 100.0,
                started_at_ms: now_ms - rng.gen_range(0..=START_BACKDATE_MS),
            });
        }

        Ok(Self { processes })
    }

    /// Registry snapshot.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Number of processes currently in `running` state.
    pub fn running_count(&self) -> usize {
        self.processes
            .iter()
            .filter(|p| p.status == ProcessStatus::Running)
            .count()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    const NOW_MS: i64 = 1_704_067_200_000;

    #[test]
    fn test_generate_distinct_names() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let registry = ProcessRegistry::generate(5, NOW_MS, &mut rng).unwrap();

        assert_eq!(registry.len(), 5);
        let mut names: Vec<&str> = registry.processes().iter().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn test_generate_distinct_pids() {
        for seed in 0..50 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let registry = ProcessRegistry::generate(10, NOW_MS, &mut rng).unwrap();
            let mut pids: Vec<u32> = registry.processes().iter().map(|p| p.pid).collect();
            pids.sort_unstable();
            pids.dedup();
            assert_eq!(pids.len(), 10, "pid collision with seed {}", seed);
        }
    }

    #[test]
    fn test_generate_over_pool_fails() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let err = ProcessRegistry::generate(11, NOW_MS, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            SimError::NamePoolExhausted { requested: 11, available: 10 }
        ));
    }

    #[test]
    fn test_generate_deterministic() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(7);
        let mut rng2 = ChaCha8Rng::seed_from_u64(7);
        let r1 = ProcessRegistry::generate(8, NOW_MS, &mut rng1).unwrap();
        let r2 = ProcessRegistry::generate(8, NOW_MS, &mut rng2).unwrap();

        for (a, b) in r1.processes().iter().zip(r2.processes()) {
            assert_eq!(a.pid, b.pid);
            assert_eq!(a.name, b.name);
            assert_eq!(a.status, b.status);
        }
    }

    #[test]
    fn test_usage_and_start_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let registry = ProcessRegistry::generate(10, NOW_MS, &mut rng).unwrap();

        for p in registry.processes() {
            assert!((0.0..100.0).contains(&p.cpu_usage));
            assert!((0.0..100.0).contains(&p.memory_usage));
            assert!(p.started_at_ms <= NOW_MS);
            assert!(p.started_at_ms >= NOW_MS - 86_400_000);
        }
    }

    #[test]
    fn test_status_mostly_running() {
        // 80% running in expectation; over 500 builds of 10 the running
        // fraction should land well inside [0.7, 0.9].
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut running = 0usize;
        let mut total = 0usize;

        for _ in 0..500 {
            let registry = ProcessRegistry::generate(10, NOW_MS, &mut rng).unwrap();
            running += registry.running_count();
            total += registry.len();
        }

        let fraction = running as f64 / total as f64;
        assert!((0.7..0.9).contains(&fraction), "running fraction {}", fraction);
    }
}
