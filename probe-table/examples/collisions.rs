//! Example showing how collisions, tombstones and a full table behave
//!
//! Run with `RUST_LOG=debug` to see the table's own log output.

use probe_table::hasher::collisions;
use probe_table::{HashTable, TableError};
use std::time::Instant;

fn main() -> Result<(), TableError> {
    env_logger::init();

    println!("=== Fixed-Capacity Probe Table Demo ===\n");

    // Bucket spread of the rolling hash
    let size = 10_000;
    let keys: Vec<String> = (0..size).map(|i| format!("user-{}", i)).collect();
    let report = collisions(keys.iter().map(String::as_str), size)?;
    println!(
        "{} out of {} buckets with {} collisions\n",
        report.occupied_buckets, size, report.collisions
    );

    // Fill a table to capacity
    let mut table = HashTable::with_capacity(size)?;
    let start = Instant::now();
    for (i, key) in keys.iter().enumerate() {
        table.add(key.clone(), i)?;
    }
    let duration = start.elapsed();
    println!(
        "Inserted {} entries in {:?} ({:.2} ops/sec), load factor {:.2}",
        table.size(),
        duration,
        size as f64 / duration.as_secs_f64(),
        table.load_factor()
    );

    // One more key does not fit
    match table.add("one-too-many".to_string(), 0) {
        Err(e) => println!("Expected failure: {}\n", e),
        Ok(_) => println!("Unexpected success\n"),
    }

    // Remove half, leaving tombstones behind
    for key in keys.iter().step_by(2) {
        table.remove(key.as_str());
    }
    println!(
        "After removing half: {} entries, {} tombstones",
        table.size(),
        table.tombstones()
    );

    let start = Instant::now();
    let misses = (0..1_000).filter(|i| !table.contains(format!("absent-{}", i).as_str())).count();
    println!("{} misses with tombstones took {:?}", misses, start.elapsed());

    table.compact();
    let start = Instant::now();
    let misses = (0..1_000).filter(|i| !table.contains(format!("absent-{}", i).as_str())).count();
    println!(
        "{} misses after compaction took {:?} ({} tombstones left)",
        misses,
        start.elapsed(),
        table.tombstones()
    );

    // Grow explicitly by rebuilding into a larger table
    let table = table.rebuild(size * 2)?;
    println!(
        "\nRebuilt into {} slots, load factor {:.2}",
        table.capacity(),
        table.load_factor()
    );

    Ok(())
}
