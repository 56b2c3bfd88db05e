//! TUI pane rendering modules
//!
//! Each pane module exports a primary `render_*` function plus the data it
//! needs:
//!
//! - [`stack`]: The stack table with `%ebp`/`%esp` tags, slots, the return
//!   address and caller arguments
//! - [`registers`]: Register values, frame size, save history and the
//!   caller/callee-saved reference table
//! - [`controls`]: Start address, value and size fields
//! - [`events`]: Event log fed by the `log` facade
//! - [`status`]: Status bar with keybindings and history position

mod utils;

pub mod controls;
pub mod events;
pub mod registers;
pub mod stack;
pub mod status;

pub use controls::{render_controls_pane, ControlsRenderData};
pub use events::render_log_pane;
pub use registers::render_registers_pane;
pub use stack::{render_stack_pane, StackRenderData, StackScrollState};
pub use status::{render_status_bar, StatusRenderData};
