//! Unit tests for perf module.

use panelgrid::perf::{OperationStats, ReorderProfiler, ScopedTimer, measure};

#[test]
fn test_scoped_timer_creation() {
    // threshold is high, nothing is logged on drop
    let timer = ScopedTimer::new("test_op", 1000.0);
    assert_eq!(timer.name(), "test_op");
    assert!(timer.elapsed_ms() >= 0.0);
}

#[test]
fn test_measure_returns_value() {
    let (value, elapsed) = measure(|| (1..=10).sum::<u32>());
    assert_eq!(value, 55);
    assert!(elapsed >= 0.0);
}

#[test]
fn test_operation_stats() {
    let mut stats = OperationStats::default();
    for ms in [1.0, 2.0, 3.0, 4.0] {
        stats.record(ms);
    }
    assert_eq!(stats.count(), 4);
    assert_eq!(stats.average(), 2.5);
    assert_eq!(stats.max_ms(), 4.0);
}

#[test]
fn test_reorder_profiler_tracks_passes() {
    let mut profiler = ReorderProfiler::new();
    profiler.record(12, 0.2);
    profiler.record(12, 0.3);

    assert_eq!(profiler.passes(), 2);
    assert_eq!(profiler.slots_tested, 12);
    assert_eq!(profiler.last_pass_ms, 0.3);
}
