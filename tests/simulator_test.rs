// Integration tests for the stack simulator

use pretty_assertions::assert_eq;
use rstest::rstest;
use stackviz::memory::stack::StackSlot;
use stackviz::memory::value::SlotValue;
use stackviz::simulator::{FrameOp, SimError, StackSimulator};

#[test]
fn test_classroom_scenario() {
    let mut sim = StackSimulator::new(1000);

    sim.push(4, SlotValue::parse("5")).unwrap();
    assert_eq!(sim.esp(), -4);
    assert_eq!(sim.slots(), &[StackSlot::new(4, SlotValue::int(5), -4)]);

    sim.push(4, SlotValue::parse("%ebp")).unwrap();
    assert_eq!(sim.saved_base_pointers(), &[0]);
    assert_eq!(sim.esp(), -8);
    assert_eq!(
        sim.slots()[1],
        StackSlot::new(4, SlotValue::SavedBasePointer, -8)
    );

    sim.pop().unwrap();
    assert_eq!(sim.ebp(), 0);
    assert_eq!(sim.esp(), -4);
    assert_eq!(sim.slots().len(), 1);

    sim.pop().unwrap();
    assert_eq!(sim.esp(), 0);
    assert!(sim.is_empty());
    assert!(sim.saved_base_pointers().is_empty());
}

#[test]
fn test_function_prologue_and_epilogue() {
    // caller: push args, call; callee: push %ebp; mov %esp, %ebp; sub locals
    let mut sim = StackSimulator::new(2000);
    sim.add_argument(4, SlotValue::int(1)).unwrap();
    sim.add_argument(4, SlotValue::int(2)).unwrap();

    sim.push(4, SlotValue::SavedBasePointer).unwrap();
    sim.set_frame(FrameOp::EbpFromEsp);
    sim.push(4, SlotValue::int(10)).unwrap();
    sim.push(4, SlotValue::register("ebx")).unwrap();
    assert_eq!(sim.frame_size(), 8);
    assert_eq!(sim.ebp_address(), 1996);

    // Release the locals, then pop %ebp
    sim.pop().unwrap();
    sim.pop().unwrap();
    assert_eq!(sim.esp(), sim.ebp());
    let saved = sim.pop().unwrap();
    assert_eq!(saved.value, SlotValue::SavedBasePointer);
    assert_eq!(sim.ebp(), 0);
    assert_eq!(sim.esp(), 0);
    assert!(sim.is_empty());

    // Arguments are untouched by stack operations
    assert_eq!(sim.arguments().len(), 2);
}

#[test]
fn test_pop_takes_most_recent_slot_after_esp_move() {
    let mut sim = StackSimulator::new(1000);
    sim.push(4, SlotValue::SavedBasePointer).unwrap();
    sim.set_frame(FrameOp::EbpFromEsp); // ebp = -4
    sim.push(4, SlotValue::int(10)).unwrap();
    sim.set_frame(FrameOp::EspFromEbp); // esp = -4

    // The most recently pushed slot goes, wherever esp points
    let popped = sim.pop().unwrap();
    assert_eq!(popped.value, SlotValue::int(10));
    assert_eq!(sim.esp(), 0);
    assert_eq!(sim.ebp(), -4);
    assert_eq!(sim.saved_base_pointers(), &[0]);
}

#[test]
fn test_esp_from_ebp_leaves_stale_slots() {
    let mut sim = StackSimulator::new(1000);
    sim.push(4, SlotValue::int(1)).unwrap();
    sim.push(4, SlotValue::int(2)).unwrap();
    sim.reset_base_pointer();
    sim.set_esp_from_ebp();

    // The slots stay, esp no longer points at the top
    assert_eq!(sim.slots().len(), 2);
    assert_eq!(sim.esp(), 0);
    assert_eq!(
        sim.pop(),
        Err(SimError::PopPastOrigin { esp: 0, size: 4 })
    );

    // Pushing again walks over the stale slots in place
    sim.push(4, SlotValue::int(3)).unwrap();
    sim.push(4, SlotValue::int(4)).unwrap();
    let values: Vec<String> = sim.slots().iter().map(|s| s.value.to_string()).collect();
    assert_eq!(values, vec!["3", "4"]);
}

#[test]
fn test_collision_with_different_size_appends() {
    let mut sim = StackSimulator::new(1000);
    sim.push(8, SlotValue::int(1)).unwrap(); // offset -8
    sim.set_esp_from_ebp(); // esp = 0
    sim.push(4, SlotValue::int(2)).unwrap(); // offset -4, no slot there

    assert_eq!(sim.slots().len(), 2);
    assert_eq!(sim.slot_at(996).map(|s| s.size), Some(4));
    assert_eq!(sim.slot_at(992).map(|s| s.size), Some(8));
}

#[test]
fn test_typed_text_shown_as_entered() {
    let mut sim = StackSimulator::new(1000);
    for text in ["007", " 5", "+5", "-0", "12"] {
        sim.push(4, SlotValue::parse(text)).unwrap();
    }

    let values: Vec<String> = sim
        .stack_rows()
        .iter()
        .map(|r| r.slot.value.to_string())
        .collect();
    assert_eq!(values, vec!["12", "-0", "+5", " 5", "007"]);
    assert_eq!(sim.slots()[4].value, SlotValue::int(12));
}

#[rstest]
#[case(&[4, 8, 2], &[1014, 1012, 1004])]
#[case(&[1], &[1001])]
#[case(&[16, 4], &[1020, 1016])]
fn test_argument_addresses(#[case] sizes: &[u32], #[case] expected: &[i64]) {
    let mut sim = StackSimulator::new(1000);
    for &size in sizes {
        sim.add_argument(size, SlotValue::int(0)).unwrap();
    }

    let addresses: Vec<i64> = sim.argument_rows().iter().map(|r| r.address).collect();
    assert_eq!(addresses, expected);
}

#[rstest]
#[case(FrameOp::EbpFromEsp, -12, -12)]
#[case(FrameOp::EspFromEbp, -4, -4)]
#[case(FrameOp::ResetBasePointer, -12, 0)]
fn test_frame_ops(#[case] op: FrameOp, #[case] esp: i64, #[case] ebp: i64) {
    let mut sim = StackSimulator::new(1000);
    sim.push(4, SlotValue::int(1)).unwrap();
    sim.set_ebp_from_esp(); // ebp = -4
    sim.push(8, SlotValue::int(2)).unwrap(); // esp = -12
    let history = sim.saved_base_pointers().to_vec();

    sim.set_frame(op);
    assert_eq!((sim.esp(), sim.ebp()), (esp, ebp));
    assert_eq!(sim.saved_base_pointers(), history.as_slice());
    assert_eq!(sim.slots().len(), 2);
}

#[rstest]
#[case(0)]
fn test_zero_size_rejected_everywhere(#[case] size: u32) {
    let mut sim = StackSimulator::new(1000);
    let before = sim.clone();

    assert_eq!(
        sim.push(size, SlotValue::int(1)),
        Err(SimError::InvalidSize { size })
    );
    assert_eq!(
        sim.add_argument(size, SlotValue::int(1)),
        Err(SimError::InvalidSize { size })
    );
    assert_eq!(sim, before);
}

#[test]
fn test_tags_follow_registers() {
    let mut sim = StackSimulator::new(1000);
    sim.push(4, SlotValue::SavedBasePointer).unwrap();
    sim.set_ebp_from_esp();
    sim.push(4, SlotValue::int(7)).unwrap();

    let rows = sim.stack_rows();
    assert_eq!(rows[0].address, 992);
    assert!(rows[0].tags.stack_pointer);
    assert!(!rows[0].tags.base_pointer);
    assert_eq!(rows[1].address, 996);
    assert!(rows[1].tags.base_pointer);

    let ret = sim.return_address_row();
    assert!(!ret.tags.base_pointer && !ret.tags.stack_pointer);
}
