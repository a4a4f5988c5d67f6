//! Memory Allocation Simulator
//!
//! A simplified contiguous-memory allocator demonstrating the classic
//! placement strategies (first-fit, best-fit, worst-fit) over a fixed set
//! of memory blocks.
//!
//! # Overview
//!
//! The crate is built around one component:
//!
//! - **Allocator**: the state machine owning an ordered block sequence and
//!   a monotonically increasing allocation-id counter. Allocate,
//!   deallocate, snapshot, statistics and reset all pass through it.
//!
//! Presentation surfaces are thin collaborators:
//!
//! - **validation**: parses and bounds-checks raw user input before it
//!   reaches the core.
//! - **report**: renders snapshots as the simulator's memory table and
//!   status line.
//!
//! Blocks are never split, merged or coalesced; the partition layout is
//! fixed between resets. The allocator is single-threaded and synchronous;
//! callers sharing it across threads must serialize all mutating operations
//! in one mutual-exclusion scope, since allocate's scan-then-mark sequence
//! is not atomic on its own.
//!
//! # Examples
//!
//! ```rust
//! use memsim::allocator::{Allocator, AllocatorConfig, Strategy};
//! use memsim::report::status_line;
//!
//! let mut allocator = Allocator::new(AllocatorConfig::default()).unwrap();
//!
//! // Blocks [100, 500, 200, 300, 600]: worst-fit lands in the 600 block.
//! let id = allocator.allocate(150, Strategy::WorstFit).unwrap();
//! assert_eq!(id.value(), 1);
//!
//! assert_eq!(
//!     status_line(&allocator.statistics()),
//!     "Allocated Blocks: 1 | Total Free Memory: 1100"
//! );
//!
//! allocator.deallocate(id).unwrap();
//! allocator.reset();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]

pub mod allocator;
pub mod error;
pub mod report;
pub mod validation;

pub use allocator::{
    AllocationId, Allocator, AllocatorConfig, BlockState, BlockView, MemoryStats, Strategy,
};
pub use error::{Error, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
