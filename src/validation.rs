//! Raw-input validation for presentation layers.
//!
//! Text entry surfaces (CLI prompts, form fields) hand over untrimmed
//! strings; this module parses and bounds-checks them before anything
//! reaches the allocator. Non-positive or non-integer sizes and ids are
//! rejected here, so the core only sees well-formed requests (it still
//! rejects a zero size defensively).
//!
//! # Examples
//!
//! ```rust
//! use memsim::validation::InputValidator;
//!
//! let validator = InputValidator::default();
//!
//! assert_eq!(validator.parse_request_size(" 150 ").unwrap(), 150);
//! assert!(validator.parse_request_size("-3").is_err());
//! assert!(validator.parse_request_size("abc").is_err());
//! ```

use crate::allocator::{AllocationId, Strategy, DEFAULT_PARTITION};
use crate::{Error, Result};

/// Configuration for input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Largest request size accepted from raw input.
    pub max_request_size: u32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        // No single request can exceed the whole default pool.
        Self {
            max_request_size: DEFAULT_PARTITION.iter().sum(),
        }
    }
}

impl ValidationConfig {
    /// Create a config with an explicit request-size cap.
    pub const fn with_max_request_size(max_request_size: u32) -> Self {
        Self { max_request_size }
    }
}

/// Validates and parses raw user input into core request types.
#[derive(Debug, Clone, Default)]
pub struct InputValidator {
    config: ValidationConfig,
}

impl InputValidator {
    /// Create a validator with the given config.
    pub const fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Get the validator configuration.
    pub const fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Parse a request size from raw text.
    ///
    /// Trims whitespace, requires a positive integer no larger than the
    /// configured cap.
    pub fn parse_request_size(&self, raw: &str) -> Result<u32> {
        let trimmed = raw.trim();
        let size: u32 = trimmed.parse().map_err(|_| {
            Error::invalid_request_size(format!(
                "'{trimmed}' is not a positive integer"
            ))
        })?;

        if size == 0 {
            return Err(Error::invalid_request_size(
                "request size must be greater than zero",
            ));
        }
        if size > self.config.max_request_size {
            return Err(Error::invalid_request_size(format!(
                "request size {size} exceeds maximum {}",
                self.config.max_request_size
            )));
        }
        Ok(size)
    }

    /// Parse an allocation id from raw text.
    ///
    /// Id 0 is never issued, so it is rejected up front.
    pub fn parse_allocation_id(&self, raw: &str) -> Result<AllocationId> {
        let trimmed = raw.trim();
        let id: u32 = trimmed.parse().map_err(|_| {
            Error::unknown_allocation_id(format!("'{trimmed}' is not a numeric ID"))
        })?;

        if id == 0 {
            return Err(Error::unknown_allocation_id("ID 0 is never issued"));
        }
        Ok(AllocationId::new(id))
    }

    /// Parse a strategy selector from raw text.
    ///
    /// Accepts the simulator's selector values (`first`, `best`, `worst`)
    /// and their long forms.
    pub fn parse_strategy(&self, raw: &str) -> Result<Strategy> {
        raw.parse()
    }
}
