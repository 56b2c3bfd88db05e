//! Memory model for the stack visualizer
//!
//! This module provides the data the simulator mutates:
//! - [`value`]: Symbolic slot values (literals, register names, the saved base pointer)
//! - [`stack`]: Stack slots and caller arguments
//!
//! # Addressing
//!
//! Every location is stored as a signed offset from a single start address.
//! The stack grows downward (negative offsets) while caller arguments grow
//! upward from the start address:
//! ```text
//! start + 8   arg 2
//! start + 4   arg 1
//! start       *ret_address
//! start - 4   slot 1
//! start - 8   slot 2   <- %esp
//! ```
//!
//! [`absolute_address`] is the only place an offset is turned into an address.

pub mod stack;
pub mod value;

/// Absolute address in the simulated region
pub type Address = i64;

/// Signed displacement from the start address
pub type Offset = i64;

/// Start address used when none is configured
pub const DEFAULT_START_ADDRESS: Address = 1000;

/// Resolve an offset against a start address.
///
/// Returns `None` when the sum does not fit in an [`Address`].
pub fn absolute_address(start: Address, offset: Offset) -> Option<Address> {
    start.checked_add(offset)
}
