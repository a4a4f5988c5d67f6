//! Memory Allocation Simulator Demo
//!
//! Drives the allocator through the classic teaching scenario: the default
//! [100, 500, 200, 300, 600] partition, one allocation per strategy,
//! failures, deallocation and reset.
//!
//! # Run
//!
//! ```bash
//! cargo run --example simulator
//! ```

use memsim::allocator::{Allocator, AllocatorConfig, Strategy};
use memsim::report::{memory_table, status_line};
use memsim::validation::InputValidator;

fn main() {
    println!("=== Memory Allocation Simulator ===\n");

    let mut allocator = Allocator::new(AllocatorConfig::default()).expect("default layout");
    let validator = InputValidator::default();

    println!("Initial memory:");
    println!("{}", memory_table(&allocator.snapshot()));
    println!("{}\n", status_line(&allocator.statistics()));

    // One 150-unit request per strategy, as raw text the way a form field
    // would hand it over.
    let requests = [
        ("150", "first", "first fit scans in order"),
        ("150", "best", "best fit picks the tightest block"),
        ("150", "worst", "worst fit picks the largest block"),
    ];

    for (raw_size, raw_strategy, desc) in requests {
        let size = validator.parse_request_size(raw_size).expect("valid size");
        let strategy = validator.parse_strategy(raw_strategy).expect("valid strategy");

        match allocator.allocate(size, strategy) {
            Ok(id) => println!("[{strategy}] Allocated with ID={id} ({desc})"),
            Err(err) => println!("[{strategy}] Allocation failed: {err}"),
        }
    }

    println!("\nAfter three allocations:");
    println!("{}", memory_table(&allocator.snapshot()));
    println!("{}\n", status_line(&allocator.statistics()));

    // A request no free block can hold.
    match allocator.allocate(1000, Strategy::FirstFit) {
        Ok(id) => println!("Unexpected success: ID={id}"),
        Err(err) => println!("Oversized request refused: {err}"),
    }

    // Invalid raw input never reaches the core.
    for raw in ["-5", "abc", "0"] {
        match validator.parse_request_size(raw) {
            Ok(_) => println!("Unexpectedly accepted {raw:?}"),
            Err(err) => println!("Rejected input {raw:?}: {err}"),
        }
    }

    // Free the first allocation, then try to free it again.
    let id = validator.parse_allocation_id("1").expect("valid id");
    match allocator.deallocate(id) {
        Ok(()) => println!("\nFreed allocation ID={id}"),
        Err(err) => println!("\n{err}"),
    }
    match allocator.deallocate(id) {
        Ok(()) => println!("Double free succeeded (bug!)"),
        Err(err) => println!("Second free refused: {err}"),
    }

    println!("\nAfter deallocation:");
    println!("{}", status_line(&allocator.statistics()));

    // Fresh session: ids restart at 1.
    allocator.reset();
    println!("\nAfter reset:");
    println!("{}", memory_table(&allocator.snapshot()));
    println!("{}", status_line(&allocator.statistics()));
    println!("Next allocation id: {}", allocator.next_allocation_id());
}
