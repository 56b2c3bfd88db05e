//! Stack simulator
//!
//! [`StackSimulator`] owns the complete state of the simulated region:
//! the start address, `%esp` and `%ebp` offsets, the ordered slot list, the
//! base-pointer save history and the caller arguments.
//!
//! # Slot Order
//!
//! Slots are kept in push order (oldest first). A push whose target address
//! already holds a slot overwrites that slot in place instead of appending,
//! so the list position of a slot is not always its depth on the stack.
//!
//! # Base-Pointer Save History
//!
//! Pushing the `%ebp` sentinel saves the current `%ebp`; popping it restores
//! the saved value. The history holds exactly one entry per sentinel slot, in
//! the same order as those slots appear in the slot list. Overwriting a slot
//! in place keeps that pairing intact.

use super::errors::SimError;
use crate::memory::stack::{Argument, StackSlot};
use crate::memory::value::SlotValue;
use crate::memory::{absolute_address, Address, Offset, DEFAULT_START_ADDRESS};
use log::{debug, warn};
use rustc_hash::FxHashMap;

/// Register moves that change the frame without touching the slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOp {
    /// `%ebp ← %esp`
    EbpFromEsp,
    /// `%esp ← %ebp` (does not pop anything)
    EspFromEbp,
    /// `%ebp ← 0`, save history untouched
    ResetBasePointer,
}

/// The simulated stack region
#[derive(Debug, Clone, PartialEq)]
pub struct StackSimulator {
    start_address: Address,
    esp: Offset,
    ebp: Offset,
    slots: Vec<StackSlot>,
    slot_index: FxHashMap<Offset, usize>, // Slot offset -> position in `slots`
    saved_base_pointers: Vec<Offset>,
    arguments: Vec<Argument>,
}

impl StackSimulator {
    /// Create an empty simulator anchored at `start_address`
    pub fn new(start_address: Address) -> Self {
        StackSimulator {
            start_address,
            esp: 0,
            ebp: 0,
            slots: Vec::new(),
            slot_index: FxHashMap::default(),
            saved_base_pointers: Vec::new(),
            arguments: Vec::new(),
        }
    }

    /// Discard all state except the start address
    pub fn reset(&mut self) {
        *self = StackSimulator::new(self.start_address);
        debug!("reset simulator at start address {}", self.start_address);
    }

    /// Move the region. Offsets are kept, so every address shifts uniformly.
    pub fn set_start_address(&mut self, start_address: Address) {
        self.start_address = start_address;
        debug!("start address set to {}", start_address);
    }

    /// Push `size` bytes holding `value`
    pub fn push(&mut self, size: u32, value: SlotValue) -> Result<(), SimError> {
        if size == 0 {
            return Err(rejected("push", SimError::InvalidSize { size }));
        }

        let new_offset = match self.esp.checked_sub(i64::from(size)) {
            Some(offset) if absolute_address(self.start_address, offset).is_some() => offset,
            _ => return Err(rejected("push", SimError::AddressOverflow)),
        };

        let saves_base_pointer = value.is_saved_base_pointer();
        let slot = StackSlot::new(size, value, new_offset);

        match self.slot_index.get(&new_offset).copied() {
            Some(position) => {
                // Overwrite the stale slot at this address, keeping its position
                let entry = self.history_entry_for(position);
                match (self.slots[position].holds_saved_base_pointer(), saves_base_pointer) {
                    (true, true) => self.saved_base_pointers[entry] = self.ebp,
                    (true, false) => {
                        self.saved_base_pointers.remove(entry);
                    }
                    (false, true) => self.saved_base_pointers.insert(entry, self.ebp),
                    (false, false) => {}
                }
                debug!(
                    "push {} byte(s) '{}' overwrote slot at offset {}",
                    size, slot.value, new_offset
                );
                self.slots[position] = slot;
            }
            None => {
                if saves_base_pointer {
                    self.saved_base_pointers.push(self.ebp);
                }
                debug!(
                    "push {} byte(s) '{}' at offset {}",
                    size, slot.value, new_offset
                );
                self.slot_index.insert(new_offset, self.slots.len());
                self.slots.push(slot);
            }
        }

        self.esp = new_offset;
        Ok(())
    }

    /// Pop the most recently pushed slot and return it
    pub fn pop(&mut self) -> Result<StackSlot, SimError> {
        let size = match self.slots.last() {
            Some(top) => top.size,
            None => return Err(rejected("pop", SimError::EmptyStack)),
        };

        let new_esp = match self.esp.checked_add(i64::from(size)) {
            Some(esp) => esp,
            None => return Err(rejected("pop", SimError::AddressOverflow)),
        };
        if new_esp > 0 {
            return Err(rejected(
                "pop",
                SimError::PopPastOrigin {
                    esp: self.esp,
                    size,
                },
            ));
        }

        let slot = match self.slots.pop() {
            Some(slot) => slot,
            None => return Err(SimError::EmptyStack),
        };
        self.slot_index.remove(&slot.offset);

        if slot.holds_saved_base_pointer() {
            self.ebp = match self.saved_base_pointers.pop() {
                Some(saved) => saved,
                None => {
                    warn!("popped %ebp with an empty save history, restoring %ebp to 0");
                    0
                }
            };
        }

        self.esp = new_esp;
        debug!(
            "pop {} byte(s) '{}', esp={} ebp={}",
            slot.size, slot.value, self.esp, self.ebp
        );
        Ok(slot)
    }

    /// Append a caller argument above the start address
    pub fn add_argument(&mut self, size: u32, value: SlotValue) -> Result<(), SimError> {
        if size == 0 {
            return Err(rejected("add argument", SimError::InvalidSize { size }));
        }

        let end = match self.arguments_size().checked_add(i64::from(size)) {
            Some(end) if absolute_address(self.start_address, end).is_some() => end,
            _ => return Err(rejected("add argument", SimError::AddressOverflow)),
        };

        debug!("add argument {} byte(s) '{}' ending at offset {}", size, value, end);
        self.arguments.push(Argument::new(size, value));
        Ok(())
    }

    /// Apply a register move
    pub fn set_frame(&mut self, op: FrameOp) {
        match op {
            FrameOp::EbpFromEsp => self.ebp = self.esp,
            FrameOp::EspFromEbp => self.esp = self.ebp,
            FrameOp::ResetBasePointer => self.ebp = 0,
        }
        debug!("{:?}: esp={} ebp={}", op, self.esp, self.ebp);
    }

    /// `%ebp ← %esp`
    pub fn set_ebp_from_esp(&mut self) {
        self.set_frame(FrameOp::EbpFromEsp);
    }

    /// `%esp ← %ebp`
    pub fn set_esp_from_ebp(&mut self) {
        self.set_frame(FrameOp::EspFromEbp);
    }

    /// `%ebp ← 0`
    pub fn reset_base_pointer(&mut self) {
        self.set_frame(FrameOp::ResetBasePointer);
    }

    pub fn start_address(&self) -> Address {
        self.start_address
    }

    /// `%esp` as an offset from the start address
    pub fn esp(&self) -> Offset {
        self.esp
    }

    /// `%ebp` as an offset from the start address
    pub fn ebp(&self) -> Offset {
        self.ebp
    }

    pub fn esp_address(&self) -> Address {
        self.start_address.saturating_add(self.esp)
    }

    pub fn ebp_address(&self) -> Address {
        self.start_address.saturating_add(self.ebp)
    }

    /// Width of the current frame in bytes (`%ebp - %esp`)
    pub fn frame_size(&self) -> i64 {
        self.ebp.saturating_sub(self.esp)
    }

    /// All slots in push order (oldest first)
    pub fn slots(&self) -> &[StackSlot] {
        &self.slots
    }

    /// The most recently pushed slot
    pub fn top(&self) -> Option<&StackSlot> {
        self.slots.last()
    }

    /// Find the slot stored at an absolute address
    pub fn slot_at(&self, address: Address) -> Option<&StackSlot> {
        let offset = address.checked_sub(self.start_address)?;
        self.slot_index
            .get(&offset)
            .and_then(|&position| self.slots.get(position))
    }

    /// Saved `%ebp` values, oldest first
    pub fn saved_base_pointers(&self) -> &[Offset] {
        &self.saved_base_pointers
    }

    /// Caller arguments in insertion order
    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Total bytes occupied by caller arguments
    pub fn arguments_size(&self) -> i64 {
        self.arguments.iter().map(|arg| i64::from(arg.size)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// History index paired with the sentinel slot at or after `position`
    fn history_entry_for(&self, position: usize) -> usize {
        self.slots[..position]
            .iter()
            .filter(|slot| slot.holds_saved_base_pointer())
            .count()
    }
}

impl Default for StackSimulator {
    fn default() -> Self {
        Self::new(DEFAULT_START_ADDRESS)
    }
}

fn rejected(operation: &str, error: SimError) -> SimError {
    warn!("{} rejected: {}", operation, error);
    error
}
