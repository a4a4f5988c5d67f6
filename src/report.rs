//! Text rendering over allocator snapshots.
//!
//! Pure formatting, no allocation logic: these functions take the views
//! returned by [`crate::allocator::Allocator::snapshot`] and
//! [`crate::allocator::Allocator::statistics`] and produce the simulator's
//! memory table and status line.
//!
//! # Examples
//!
//! ```rust
//! use memsim::allocator::{Allocator, AllocatorConfig, Strategy};
//! use memsim::report::{memory_table, status_line};
//!
//! let mut allocator = Allocator::new(AllocatorConfig::default()).unwrap();
//! allocator.allocate(150, Strategy::FirstFit).unwrap();
//!
//! let table = memory_table(&allocator.snapshot());
//! assert!(table.contains("Allocated (ID=1)"));
//!
//! let status = status_line(&allocator.statistics());
//! assert_eq!(status, "Allocated Blocks: 1 | Total Free Memory: 1200");
//! ```

use crate::allocator::{BlockView, MemoryStats};
use std::fmt::Write;

/// Render block views as the simulator's `Index | Size | Status` table.
pub fn memory_table(views: &[BlockView]) -> String {
    let mut table = String::from("Index | Size | Status\n");
    table.push_str("---------------------\n");

    for view in views {
        let status = match view.allocation_id {
            Some(id) => format!("Allocated (ID={id})"),
            None => "Free".to_string(),
        };
        // write! into a String cannot fail.
        let _ = writeln!(
            table,
            "{:<5} | {:<4} | {}",
            view.position, view.size, status
        );
    }
    table
}

/// Render the simulator's status bar line.
pub fn status_line(stats: &MemoryStats) -> String {
    format!(
        "Allocated Blocks: {} | Total Free Memory: {}",
        stats.allocated_blocks, stats.total_free
    )
}
