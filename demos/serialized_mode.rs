//! Submission discipline example
//!
//! Shows how switching between concurrent and serialized submission changes
//! completion order on the same pool.
//!
//! Run with: cargo run --example serialized_mode

use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use strandpool::prelude::*;

fn main() -> Result<()> {
    println!("=== Strandpool - Submission Disciplines Example ===\n");

    let pool = WorkerPool::with_workers(4)?;

    // Concurrent discipline: completion order follows job runtimes.
    println!("1. Concurrent submissions (default):");
    let order = Arc::new(Mutex::new(Vec::new()));
    for i in 0..5u64 {
        let order = Arc::clone(&order);
        pool.execute(move || {
            // Later jobs sleep less, so they tend to finish first.
            thread::sleep(Duration::from_millis((5 - i) * 20));
            order.lock().push(i);
        })?;
    }
    pool.wait_drained();
    println!("   Completion order: {:?}", order.lock());

    // Serialized discipline: completion order equals submission order, no
    // matter how the runtimes compare.
    println!("\n2. Serialized submissions:");
    pool.set_submit_mode(SubmitMode::Serialized);
    let order = Arc::new(Mutex::new(Vec::new()));
    for i in 0..5u64 {
        let order = Arc::clone(&order);
        pool.execute(move || {
            thread::sleep(Duration::from_millis((5 - i) * 20));
            order.lock().push(i);
        })?;
    }
    pool.wait_drained();
    println!("   Completion order: {:?}", order.lock());

    println!("\n3. Shutting down...");
    pool.shutdown()?;

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
