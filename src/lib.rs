//! # Introduction
//!
//! stackviz simulates a downward-growing call stack around a single start
//! address so the effect of `push`, `pop` and frame-pointer moves can be
//! watched row by row. A terminal UI built with
//! [ratatui](https://docs.rs/ratatui) drives the simulator.
//!
//! ## Pipeline
//!
//! ```text
//! Keys → App → StackSimulator → Timeline (undo/redo) → Panes
//!                    │
//!                    └─ log records → EventLog
//! ```
//!
//! 1. [`memory`] — typed slot values, stack slots and caller arguments.
//! 2. [`simulator`] — the [`simulator::StackSimulator`] state machine and the
//!    address-derivation queries used to lay out the table.
//! 3. [`snapshot`] — [`snapshot::Timeline`] of simulator states for undo/redo
//!    and the [`snapshot::EventLog`] shown in the TUI.
//! 4. [`config`] — command-line and environment configuration.
//! 5. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! use stackviz::memory::value::SlotValue;
//! use stackviz::simulator::StackSimulator;
//!
//! let mut sim = StackSimulator::new(1000);
//! sim.push(4, SlotValue::parse("5")).unwrap();
//! sim.push(4, SlotValue::parse("%ebp")).unwrap();
//! assert_eq!(sim.esp(), -8);
//! assert_eq!(sim.saved_base_pointers(), &[0]);
//!
//! sim.pop().unwrap();
//! assert_eq!(sim.ebp(), 0);
//! assert_eq!(sim.esp_address(), 996);
//! ```

pub mod config;
pub mod memory;
pub mod simulator;
pub mod snapshot;
pub mod ui;
