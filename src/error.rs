//! Error types for the memory allocation simulator.
//!
//! Every failure here is recoverable and local: the allocator never panics
//! or aborts for a rejected request, it reports an outcome. Presentation
//! layers translate these into user-visible messages.
//!
//! # Examples
//!
//! ```rust
//! use memsim::{Error, Result};
//!
//! fn check_size(size: u32) -> Result<()> {
//!     if size == 0 {
//!         return Err(Error::invalid_request_size("size must be positive"));
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;

/// Main error type for the simulator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Request size was not a positive integer.
    InvalidRequestSize(String),

    /// No free block satisfies the size requirement under the chosen
    /// strategy.
    NoSuitableBlock(String),

    /// Deallocation target not found among occupied blocks.
    UnknownAllocationId(String),

    /// Bad partition layout or selector.
    Config(String),
}

impl Error {
    /// Create an invalid-request-size error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memsim::Error;
    ///
    /// let err = Error::invalid_request_size("got 0");
    /// assert!(matches!(err, Error::InvalidRequestSize(_)));
    /// ```
    pub fn invalid_request_size(msg: impl Into<String>) -> Self {
        Self::InvalidRequestSize(msg.into())
    }

    /// Create a no-suitable-block error.
    pub fn no_suitable_block(msg: impl Into<String>) -> Self {
        Self::NoSuitableBlock(msg.into())
    }

    /// Create an unknown-allocation-id error.
    pub fn unknown_allocation_id(msg: impl Into<String>) -> Self {
        Self::UnknownAllocationId(msg.into())
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if the error was caused by the caller's input rather than
    /// the pool's current state.
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRequestSize(_) | Self::UnknownAllocationId(_) | Self::Config(_)
        )
    }

    /// Get error code for logging.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memsim::Error;
    ///
    /// let err = Error::no_suitable_block("pool exhausted");
    /// assert_eq!(err.code(), "NO_SUITABLE_BLOCK");
    /// ```
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequestSize(_) => "INVALID_REQUEST_SIZE",
            Self::NoSuitableBlock(_) => "NO_SUITABLE_BLOCK",
            Self::UnknownAllocationId(_) => "UNKNOWN_ALLOCATION_ID",
            Self::Config(_) => "CONFIG",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRequestSize(msg) => write!(f, "invalid request size: {msg}"),
            Self::NoSuitableBlock(msg) => write!(f, "no suitable block: {msg}"),
            Self::UnknownAllocationId(msg) => write!(f, "unknown allocation id: {msg}"),
            Self::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, Error>;
