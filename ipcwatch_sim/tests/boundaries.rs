//! Statistical boundary tests over the generators, driven through the
//! simulation world so the whole pipeline is exercised.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ipcwatch_core::{generate_event, generate_issue, ProcessRegistry};
use ipcwatch_sim::{SimConfig, SimWorld};

const NOW_MS: i64 = 1_704_067_200_000;

proptest! {
    /// Sizes and latencies stay inside the documented per-mechanism
    /// envelopes for any seed. 100 seeds x 100 events per case gives
    /// the 10k-sample coverage the contract asks for.
    #[test]
    fn event_payloads_within_mechanism_ranges(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let registry = ProcessRegistry::generate(8, NOW_MS, &mut rng).unwrap();

        for _ in 0..100 {
            let event = generate_event(registry.processes(), NOW_MS, &mut rng).unwrap();

            let (size_min, size_max) = event.mechanism.size_range_bytes();
            prop_assert!(event.message_size_bytes >= size_min);
            prop_assert!(event.message_size_bytes <= size_max);

            let (lat_min, lat_max) = event.mechanism.latency_range_ms();
            prop_assert!(event.latency_ms >= lat_min - 0.005);
            prop_assert!(event.latency_ms <= lat_max + 0.005);

            prop_assert!(event.mechanism.operations().contains(&event.operation.as_str()));
            prop_assert_ne!(event.source_pid, event.target_pid);
        }
    }

    /// Issue records keep their structural invariants for any seed.
    #[test]
    fn issues_structurally_valid(seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let registry = ProcessRegistry::generate(8, NOW_MS, &mut rng).unwrap();

        for _ in 0..50 {
            let issue = generate_issue(registry.processes(), NOW_MS, &mut rng).unwrap();
            prop_assert!((1..=3).contains(&issue.affected.len()));

            let mut names = issue.affected.clone();
            names.sort();
            names.dedup();
            prop_assert_eq!(names.len(), issue.affected.len());
        }
    }

    /// A full session never breaks the history bounds or produces a NaN
    /// average, whatever the seed.
    #[test]
    fn session_invariants_hold(seed in any::<u64>(), ticks in 1u64..200) {
        let config = SimConfig { seed, ..SimConfig::default() };
        let mut world = SimWorld::new(config).unwrap();

        for _ in 0..ticks {
            world.tick().unwrap();
        }

        prop_assert!(world.history().event_count() <= 100);
        prop_assert!(world.history().issue_count() <= 20);

        let stats = world.stats();
        prop_assert!(!stats.avg_latency_ms.is_nan());
        prop_assert!(stats.active_issues <= world.history().issue_count());
    }
}
