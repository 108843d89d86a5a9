//! Basic worker pool usage example
//!
//! Demonstrates pool creation, job submission, draining, and statistics.
//!
//! Run with: cargo run --example basic_usage

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use strandpool::prelude::*;

struct GreetJob {
    who: String,
}

impl Job for GreetJob {
    fn run(&mut self) {
        println!("  Hello, {}!", self.who);
    }

    fn job_type(&self) -> &str {
        "GreetJob"
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("=== Strandpool - Basic Usage Example ===\n");

    // Create a pool with 4 worker threads
    let pool = WorkerPool::with_workers(4)?;
    println!("1. Started worker pool with {} workers", pool.worker_count());

    println!("\n2. Submitting simple jobs:");
    let completed = Arc::new(AtomicUsize::new(0));
    for i in 0..10 {
        let completed = Arc::clone(&completed);
        pool.execute(move || {
            println!(
                "  Job {} executing on {}",
                i,
                thread::current().name().unwrap_or("?")
            );
            thread::sleep(Duration::from_millis(50));
            completed.fetch_add(1, Ordering::SeqCst);
        })?;
    }
    println!("   Submitted 10 jobs");

    // Block until the queue has emptied and every job has finished
    println!("\n3. Draining the pool...");
    pool.wait_drained();
    println!("   {} jobs completed", completed.load(Ordering::SeqCst));

    println!("\n4. Job statistics:");
    println!("   Total jobs submitted: {}", pool.total_jobs_submitted());
    println!("   Total jobs processed: {}", pool.total_jobs_processed());

    println!("\n5. Per-worker statistics:");
    for (i, stat) in pool.stats().iter().enumerate() {
        println!(
            "   Worker {}: {} processed, avg time: {:.2}μs",
            i,
            stat.get_jobs_processed(),
            stat.get_average_processing_time_us()
        );
    }

    println!("\n6. Submitting a custom job type:");
    pool.submit(GreetJob {
        who: "world".to_string(),
    })?;
    pool.wait_drained();

    println!("\n7. Shutting down worker pool...");
    pool.shutdown()?;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
