//! Property-based tests for strandpool using proptest

use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use strandpool::prelude::*;

// ============================================================================
// PoolConfig Tests
// ============================================================================

proptest! {
    /// Test that PoolConfig preserves an explicit worker count
    #[test]
    fn test_config_worker_count(workers in 1usize..32) {
        let config = PoolConfig::new(workers);
        assert_eq!(config.num_workers, workers);
    }

    /// Test that builder methods compose without clobbering each other
    #[test]
    fn test_config_builders(
        workers in 1usize..16,
        max_queue_size in 1usize..10000
    ) {
        let config = PoolConfig::new(workers)
            .with_max_queue_size(max_queue_size)
            .with_drain_poll_interval(Duration::from_millis(5));

        assert_eq!(config.num_workers, workers);
        assert_eq!(config.max_queue_size, max_queue_size);
        assert_eq!(config.drain_poll_interval, Duration::from_millis(5));
    }

    /// Test that the worker name prefix round-trips through the builder
    #[test]
    fn test_config_worker_name_prefix(
        workers in 1usize..8,
        prefix in "[a-z]{3,10}"
    ) {
        let config = PoolConfig::new(workers)
            .with_worker_name_prefix(&prefix);

        assert_eq!(config.worker_name_prefix, prefix);
    }
}

// ============================================================================
// Pool Creation Tests
// ============================================================================

proptest! {
    /// Test that pools of various sizes spawn and report their size
    #[test]
    fn test_pool_creation(workers in 1usize..8) {
        let pool = WorkerPool::with_workers(workers).unwrap();
        assert_eq!(pool.worker_count(), workers);
        pool.shutdown().unwrap();
    }
}

// ============================================================================
// Job Execution Tests
// ============================================================================

proptest! {
    /// Test that every submitted job runs exactly once, for any pool size
    /// and job count
    #[test]
    fn test_all_jobs_complete(
        workers in 1usize..4,
        jobs in 0usize..40
    ) {
        let pool = WorkerPool::with_workers(workers).unwrap();
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..jobs {
            let counter = Arc::clone(&counter);
            pool.execute(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }).unwrap();
        }

        pool.wait_drained();
        assert_eq!(counter.load(Ordering::SeqCst), jobs);
        assert_eq!(pool.outstanding_jobs(), 0);
        assert_eq!(pool.total_jobs_submitted() as usize, jobs);
        pool.shutdown().unwrap();
    }
}

// ============================================================================
// Serialized Discipline Tests
// ============================================================================

proptest! {
    /// Test that serialized submission yields completion in submission
    /// order for any stream length
    #[test]
    fn test_serialized_preserves_order(jobs in 1usize..12) {
        let config = PoolConfig::new(3)
            .with_drain_poll_interval(Duration::from_millis(5));
        let pool = WorkerPool::with_config(config).unwrap();
        pool.set_submit_mode(SubmitMode::Serialized);

        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..jobs {
            let order = Arc::clone(&order);
            pool.execute(move || {
                order.lock().push(i);
            }).unwrap();
        }

        pool.wait_drained();
        assert_eq!(*order.lock(), (0..jobs).collect::<Vec<_>>());
        pool.shutdown().unwrap();
    }

    /// Test that serialized jobs never overlap, whatever the pool size
    #[test]
    fn test_serialized_never_overlaps(
        workers in 1usize..4,
        jobs in 1usize..8
    ) {
        let config = PoolConfig::new(workers)
            .with_drain_poll_interval(Duration::from_millis(5));
        let pool = WorkerPool::with_config(config).unwrap();
        pool.set_submit_mode(SubmitMode::Serialized);

        let in_flight = Arc::new(AtomicUsize::new(0));
        let max_in_flight = Arc::new(AtomicUsize::new(0));
        for _ in 0..jobs {
            let in_flight = Arc::clone(&in_flight);
            let max_in_flight = Arc::clone(&max_in_flight);
            pool.execute(move || {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                max_in_flight.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(1));
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }).unwrap();
        }

        pool.wait_drained();
        assert_eq!(max_in_flight.load(Ordering::SeqCst), 1,
                   "Serialized jobs overlapped with {} workers", workers);
        pool.shutdown().unwrap();
    }
}

// ============================================================================
// Bounded Queue Tests
// ============================================================================

proptest! {
    /// Test that the queue never holds more than its configured capacity
    #[test]
    fn test_bounded_queue_respects_capacity(
        capacity in 1usize..8,
        jobs in 1usize..40
    ) {
        let config = PoolConfig::new(1).with_max_queue_size(capacity);
        let pool = WorkerPool::with_config(config).unwrap();
        let executed = Arc::new(AtomicUsize::new(0));

        let mut accepted = 0usize;
        for _ in 0..jobs {
            let executed = Arc::clone(&executed);
            let outcome = pool.execute(move || {
                executed.fetch_add(1, Ordering::SeqCst);
            });
            match outcome {
                Ok(()) => accepted += 1,
                Err(PoolError::QueueFull { queued, capacity: reported }) => {
                    assert_eq!(queued, capacity);
                    assert_eq!(reported, capacity);
                }
                Err(e) => panic!("Unexpected submission error: {}", e),
            }
            assert!(pool.queued_jobs() <= capacity);
        }

        pool.wait_drained();
        assert_eq!(executed.load(Ordering::SeqCst), accepted);
        pool.shutdown().unwrap();
    }
}

// ============================================================================
// Safety Tests (Shutdown)
// ============================================================================

proptest! {
    /// Test that shutdown terminates whatever is left in the queue
    #[test]
    fn test_shutdown_always_terminates(
        workers in 1usize..4,
        jobs in 0usize..30
    ) {
        let pool = WorkerPool::with_workers(workers).unwrap();

        for _ in 0..jobs {
            let _ = pool.execute(|| {
                std::thread::sleep(Duration::from_millis(1));
            });
        }

        pool.shutdown().unwrap();
    }

    /// Test that a second shutdown is a no-op
    #[test]
    fn test_double_shutdown_safe(workers in 1usize..4) {
        let pool = WorkerPool::with_workers(workers).unwrap();
        pool.shutdown().unwrap();
        pool.shutdown().unwrap();
    }

    /// Test that submission after shutdown is accepted, not rejected
    #[test]
    fn test_submit_after_shutdown_accepted(_dummy in 0..50u32) {
        let pool = WorkerPool::with_workers(2).unwrap();
        pool.shutdown().unwrap();

        // The job lands in the queue but no worker is left to run it.
        pool.execute(|| {}).unwrap();
        assert_eq!(pool.outstanding_jobs(), 1);
    }
}
