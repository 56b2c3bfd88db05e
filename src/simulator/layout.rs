//! Address derivation for display
//!
//! These queries turn simulator state into the rows of the stack table
//! without mutating anything:
//!
//! ```text
//! --            (placeholder above the top of the stack)
//! stack rows    most recent push first
//! start         *ret_address
//! argument rows most recent argument first
//! ```

use super::engine::StackSimulator;
use crate::memory::stack::{Argument, StackSlot};
use crate::memory::Address;

/// Register tags attached to a row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowTags {
    pub base_pointer: bool,
    pub stack_pointer: bool,
}

impl RowTags {
    fn at(sim: &StackSimulator, address: Address) -> Self {
        RowTags {
            base_pointer: sim.ebp_address() == address,
            stack_pointer: sim.esp_address() == address,
        }
    }
}

/// One pushed slot with its resolved address
#[derive(Debug, Clone, PartialEq)]
pub struct StackRow<'a> {
    pub address: Address,
    pub slot: &'a StackSlot,
    pub tags: RowTags,
}

/// The synthetic return-address row anchored at the start address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReturnAddressRow {
    pub address: Address,
    pub tags: RowTags,
}

/// One caller argument with its resolved address
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentRow<'a> {
    pub address: Address,
    pub argument: &'a Argument,
}

impl StackSimulator {
    /// Absolute address of a slot
    pub fn slot_address(&self, slot: &StackSlot) -> Address {
        self.start_address().saturating_add(slot.offset)
    }

    /// Slot rows, most recently pushed first
    pub fn stack_rows(&self) -> Vec<StackRow<'_>> {
        self.slots()
            .iter()
            .rev()
            .map(|slot| {
                let address = self.slot_address(slot);
                StackRow {
                    address,
                    slot,
                    tags: RowTags::at(self, address),
                }
            })
            .collect()
    }

    /// The `*ret_address` row at the start address
    pub fn return_address_row(&self) -> ReturnAddressRow {
        ReturnAddressRow {
            address: self.start_address(),
            tags: RowTags {
                base_pointer: self.ebp() == 0,
                stack_pointer: self.esp() == 0,
            },
        }
    }

    /// Argument rows, most recently added first.
    ///
    /// Each argument's address is the start address plus the sizes of every
    /// argument added up to and including it.
    pub fn argument_rows(&self) -> Vec<ArgumentRow<'_>> {
        let mut end = self.start_address();
        let mut rows: Vec<ArgumentRow<'_>> = self
            .arguments()
            .iter()
            .map(|argument| {
                end = end.saturating_add(i64::from(argument.size));
                ArgumentRow {
                    address: end,
                    argument,
                }
            })
            .collect();
        rows.reverse();
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::value::SlotValue;

    #[test]
    fn test_stack_rows_most_recent_first() {
        let mut sim = StackSimulator::default();
        sim.push(4, SlotValue::int(1)).unwrap();
        sim.push(8, SlotValue::int(2)).unwrap();

        let addresses: Vec<Address> = sim.stack_rows().iter().map(|r| r.address).collect();
        assert_eq!(addresses, vec![988, 996]);
    }

    #[test]
    fn test_row_tags() {
        let mut sim = StackSimulator::default();
        sim.push(4, SlotValue::int(1)).unwrap();
        sim.set_ebp_from_esp();
        sim.push(4, SlotValue::int(2)).unwrap();

        let rows = sim.stack_rows();
        assert_eq!(
            rows[0].tags,
            RowTags {
                base_pointer: false,
                stack_pointer: true
            }
        );
        assert_eq!(
            rows[1].tags,
            RowTags {
                base_pointer: true,
                stack_pointer: false
            }
        );
        assert_eq!(sim.return_address_row().tags, RowTags::default());
    }

    #[test]
    fn test_return_address_row_tagged_when_empty() {
        let sim = StackSimulator::new(4096);
        let row = sim.return_address_row();

        assert_eq!(row.address, 4096);
        assert!(row.tags.base_pointer);
        assert!(row.tags.stack_pointer);
    }

    #[test]
    fn test_argument_rows_cumulative_addresses() {
        let mut sim = StackSimulator::default();
        for size in [4, 8, 2] {
            sim.add_argument(size, SlotValue::int(i64::from(size))).unwrap();
        }

        let rows = sim.argument_rows();
        let listed: Vec<(Address, u32)> =
            rows.iter().map(|r| (r.address, r.argument.size)).collect();
        assert_eq!(listed, vec![(1014, 2), (1012, 8), (1004, 4)]);
    }
}
