//! Stack slots and caller arguments
//!
//! - [`StackSlot`]: one pushed entry below the start address
//! - [`Argument`]: one caller-pushed entry above the start address

use super::value::SlotValue;
use super::Offset;

/// One pushed stack entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSlot {
    pub size: u32, // Bytes, always > 0
    pub value: SlotValue,
    pub offset: Offset, // Displacement from the start address
}

impl StackSlot {
    pub fn new(size: u32, value: SlotValue, offset: Offset) -> Self {
        StackSlot {
            size,
            value,
            offset,
        }
    }

    /// Check if this slot holds a saved base pointer
    pub fn holds_saved_base_pointer(&self) -> bool {
        self.value.is_saved_base_pointer()
    }
}

/// One caller argument, laid out upward from the start address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub size: u32,
    pub value: SlotValue,
}

impl Argument {
    pub fn new(size: u32, value: SlotValue) -> Self {
        Argument { size, value }
    }
}
