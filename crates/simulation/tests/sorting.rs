//! End-to-end tests for the odd-even transposition sort.
//!
//! These run the full event loop and check the properties the protocol
//! guarantees: global order, no values gained or lost, a fixed number of
//! phases, and monotonic logical time.

use oddeven_core::{Event, EventKind, PhaseParity, Rank, Value};
use oddeven_simulation::{SimulationConfig, SimulationRunner, TimingConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing_test::traced_test;

fn random_data(n: u32, k: usize, seed: u64) -> Vec<Vec<Value>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..k).map(|_| rng.gen_range(1..=100_000)).collect())
        .collect()
}

fn sorted_flat(data: &[Vec<Value>]) -> Vec<Value> {
    let mut all: Vec<Value> = data.iter().flatten().copied().collect();
    all.sort_unstable();
    all
}

fn run(n: u32, k: usize, data: Vec<Vec<Value>>) -> SimulationRunner {
    let mut runner = SimulationRunner::new(SimulationConfig::new(n, k)).unwrap();
    runner.load_all_data(data).unwrap();
    runner.run().unwrap();
    runner
}

/// Every process ends holding its slice of the global order.
#[test]
fn test_global_sortedness_across_sizes() {
    for n in 2..=9u32 {
        for k in [1usize, 2, 5, 16] {
            let data = random_data(n, k, u64::from(n) * 1_000 + k as u64);
            let expected = sorted_flat(&data);
            let runner = run(n, k, data);

            assert_eq!(runner.gather(), expected, "n = {n}, k = {k}");
            for rank in 0..n {
                let buffer = runner.process_buffer(Rank(rank)).unwrap();
                assert_eq!(buffer.len(), k);
                assert_eq!(
                    buffer,
                    &expected[rank as usize * k..(rank as usize + 1) * k]
                );
            }
        }
    }
}

/// Duplicates and negative values survive intact.
#[test]
fn test_multiset_preserved_with_duplicates() {
    let data = vec![
        vec![3, 3, -1, 7],
        vec![7, 7, 3, 0],
        vec![-1, -1, 3, 7],
        vec![0, 0, 0, 3],
        vec![7, -1, 0, 3],
    ];
    let expected = sorted_flat(&data);
    let runner = run(5, 4, data);
    assert_eq!(runner.gather(), expected);
}

/// Reverse-ordered input is the worst case for transposition sort.
#[test]
fn test_descending_input_sorted() {
    let n = 8u32;
    let k = 3usize;
    let data: Vec<Vec<Value>> = (0..n)
        .map(|rank| {
            (0..k)
                .map(|i| -((rank as usize * k + i) as Value))
                .collect()
        })
        .collect();
    let expected = sorted_flat(&data);
    let runner = run(n, k, data);
    assert_eq!(runner.gather(), expected);
}

/// Exactly N phases regardless of data.
#[test]
fn test_phase_count_matches_process_count() {
    for n in 1..=7u32 {
        let mut runner = SimulationRunner::new(SimulationConfig::new(n, 2)).unwrap();
        runner.load_all_data(random_data(n, 2, 9)).unwrap();
        let stats = runner.run().unwrap();

        assert_eq!(stats.phase_starts, 1);
        assert_eq!(stats.phases_scheduled, u64::from(n));
        assert_eq!(stats.sends, stats.receives);
        assert_eq!(stats.sends, stats.compare_splits);
        // Every (process, phase) pair either exchanges or is skipped.
        assert_eq!(
            stats.compare_splits + stats.boundary_skips,
            u64::from(n) * u64::from(n)
        );
    }
}

/// Edge processes get no events in phases where they have no partner.
#[test]
fn test_boundary_processes_skipped() {
    for n in [4u32, 5] {
        let mut runner = SimulationRunner::new(SimulationConfig::new(n, 1)).unwrap();
        runner.load_all_data(random_data(n, 1, 3)).unwrap();

        let mut splits: Vec<(Rank, PhaseParity)> = Vec::new();
        runner
            .run_with_observer(&mut |event: &Event, _now: Duration, _record: &str| {
                if let EventKind::CompareSplit { rank, parity } = event.kind() {
                    splits.push((*rank, *parity));
                }
            })
            .unwrap();

        let last = Rank(n - 1);
        let last_missing = if last.is_even() {
            PhaseParity::Odd
        } else {
            PhaseParity::Even
        };
        assert!(!splits.contains(&(Rank::ZERO, PhaseParity::Even)));
        assert!(!splits.contains(&(last, last_missing)));
        assert!(splits.contains(&(Rank::ZERO, PhaseParity::Odd)));
    }
}

/// A single process has no partner ever; its data stays exactly as loaded.
#[test]
fn test_single_process_left_untouched() {
    let runner = run(1, 4, vec![vec![4, 1, 3, 2]]);

    assert_eq!(runner.process_buffer(Rank::ZERO), Some(&[4, 1, 3, 2][..]));
    assert_eq!(runner.stats().events_processed, 1);
    assert_eq!(runner.stats().boundary_skips, 1);
}

/// Dispatched events never go back in time.
#[traced_test]
#[test]
fn test_time_is_monotonic() {
    let mut runner = SimulationRunner::new(SimulationConfig::new(6, 5)).unwrap();
    runner.load_all_data(random_data(6, 5, 77)).unwrap();

    let mut times = Vec::new();
    let mut records = Vec::new();
    runner
        .run_with_observer(&mut |event: &Event, now: Duration, record: &str| {
            assert!(event.time() <= now);
            times.push(now);
            records.push(record.to_string());
        })
        .unwrap();

    assert!(times.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(times.last().copied(), Some(runner.now()));
    assert_eq!(records.len() as u64, runner.stats().events_processed);
    assert!(records[0].starts_with("Time: 2.5, Type: START_SORT"));
    assert!(logs_contain("Simulation complete"));
}

/// Size-dependent latency and tighter phase spacing still sort correctly.
#[test]
fn test_custom_timing_still_sorts() {
    let timing = TimingConfig::default()
        .with_phase_spacing(Duration::from_secs(8))
        .with_per_element_delay(Duration::from_millis(100));
    let config = SimulationConfig::new(6, 10).with_timing(timing);

    let data = random_data(6, 10, 5);
    let expected = sorted_flat(&data);
    let mut runner = SimulationRunner::new(config).unwrap();
    runner.load_all_data(data).unwrap();
    runner.run().unwrap();

    assert_eq!(runner.gather(), expected);
}

/// Runners share nothing; identical inputs give identical results.
#[test]
fn test_independent_runners_are_deterministic() {
    let mut first = SimulationRunner::new(SimulationConfig::new(5, 3)).unwrap();
    let mut second = SimulationRunner::new(SimulationConfig::new(5, 3)).unwrap();
    first.load_all_data(random_data(5, 3, 42)).unwrap();
    second.load_all_data(random_data(5, 3, 42)).unwrap();

    let mut first_log = Vec::new();
    let mut second_log = Vec::new();
    first
        .run_with_observer(&mut |_: &Event, _: Duration, record: &str| {
            first_log.push(record.to_string())
        })
        .unwrap();
    second
        .run_with_observer(&mut |_: &Event, _: Duration, record: &str| {
            second_log.push(record.to_string())
        })
        .unwrap();

    assert_eq!(first_log, second_log);
    assert_eq!(first.gather(), second.gather());
    assert_eq!(first.now(), second.now());
}
