//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]** — application state, keyboard event loop, field editing, undo/redo
//! - **[`panes`]** — stateless render functions for each visible pane (stack,
//!   controls, registers, event log, status bar)
//! - **[`logger`]** — `log` backend that captures records for the event log pane
//! - **[`theme`]** — centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it with a
//! [`StackSimulator`] and call [`App::run`] to start the event loop.
//!
//! [`StackSimulator`]: crate::simulator::StackSimulator
//! [`App::run`]: app::App::run

pub mod app;
pub mod logger;
pub mod panes;
pub mod theme;

pub use app::App;
