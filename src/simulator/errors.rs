//! Rejection reasons for simulator operations
//!
//! A [`SimError`] never means the simulator is in a bad state: the operation
//! that produced it was simply not applied.

use thiserror::Error;

/// Why an operation was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Push or argument with a zero byte count
    #[error("Invalid size {size}: sizes must be a positive number of bytes")]
    InvalidSize { size: u32 },

    /// Pop with no slots on the stack
    #[error("Cannot pop: the stack is empty")]
    EmptyStack,

    /// Pop that would move %esp above the frame origin
    #[error("Cannot pop {size} byte(s): %esp at offset {esp} would move past the start address")]
    PopPastOrigin { esp: i64, size: u32 },

    /// Offset or address arithmetic left the representable range
    #[error("Address out of range")]
    AddressOverflow,
}
