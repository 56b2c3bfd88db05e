//! Stack simulation state machine
//!
//! This module provides the core of the visualizer:
//! - [`engine`]: [`StackSimulator`], which owns all stack state and applies
//!   push/pop/frame operations
//! - [`layout`]: Pure address-derivation queries used to build table rows
//! - [`errors`]: Reasons an operation was rejected
//!
//! # Operation Model
//!
//! Every operation either applies completely or is rejected with a
//! [`SimError`] and leaves the state untouched. There is no partial mutation
//! and no terminal state.
//!
//! [`StackSimulator`]: engine::StackSimulator
//! [`SimError`]: errors::SimError

pub mod engine;
pub mod errors;
pub mod layout;

pub use engine::{FrameOp, StackSimulator};
pub use errors::SimError;
pub use layout::{ArgumentRow, ReturnAddressRow, RowTags, StackRow};
