//! Main TUI application state and logic

use crate::config::AddressFormat;
use crate::memory::value::SlotValue;
use crate::simulator::{FrameOp, StackSimulator};
use crate::snapshot::{EventLog, Timeline};
use crate::ui::panes::{
    render_controls_pane, render_log_pane, render_registers_pane, render_stack_pane,
    render_status_bar, ControlsRenderData, StackRenderData, StackScrollState, StatusRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{info, warn};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Stack,
    Log,
}

impl FocusedPane {
    /// Move focus to the next pane
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Stack => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Stack,
        }
    }
}

/// Text fields in the controls pane
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    StartAddress,
    Value,
    Size,
}

/// Whether keys drive operations or type into a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing(InputField),
}

/// The main application state
pub struct App {
    /// The simulator being displayed
    pub simulator: StackSimulator,

    /// Undo/redo history of simulator states
    pub timeline: Timeline,

    /// Records captured from the `log` facade
    pub events: Arc<Mutex<EventLog>>,

    pub address_format: AddressFormat,

    /// Field contents, kept as typed until an operation reads them
    pub start_input: String,
    pub value_input: String,
    pub size_input: String,

    pub input_mode: InputMode,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub stack_scroll: StackScrollState,
    pub log_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the last operation was rejected
    pub last_rejected: bool,
}

impl App {
    /// Create a new app around a simulator
    pub fn new(
        simulator: StackSimulator,
        history_limit: usize,
        events: Arc<Mutex<EventLog>>,
        address_format: AddressFormat,
    ) -> Self {
        App {
            start_input: simulator.start_address().to_string(),
            timeline: Timeline::new(simulator.clone(), history_limit),
            simulator,
            events,
            address_format,
            value_input: String::new(),
            size_input: String::new(),
            input_mode: InputMode::Normal,
            focused_pane: FocusedPane::Stack,
            stack_scroll: StackScrollState {
                offset: 0,
                prev_item_count: 0,
            },
            log_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_rejected: false,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Left column: Stack | Right column: Controls, Registers, Log
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Min(3),
            ])
            .split(columns[1]);

        render_stack_pane(
            frame,
            columns[0],
            StackRenderData {
                simulator: &self.simulator,
                address_format: self.address_format,
            },
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        render_controls_pane(
            frame,
            right_rows[0],
            ControlsRenderData {
                start_address: &self.start_input,
                value: &self.value_input,
                size: &self.size_input,
                editing: match self.input_mode {
                    InputMode::Editing(field) => Some(field),
                    InputMode::Normal => None,
                },
            },
        );

        render_registers_pane(frame, right_rows[1], &self.simulator, self.address_format);

        let events = Arc::clone(&self.events);
        render_log_pane(
            frame,
            right_rows[2],
            &lock_events(&events),
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                history_position: self.timeline.position(),
                history_len: self.timeline.len(),
                is_editing: self.input_mode != InputMode::Normal,
                is_rejection: self.last_rejected,
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match self.input_mode {
            InputMode::Editing(field) => self.handle_edit_key(field, key),
            InputMode::Normal => self.handle_normal_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('p') => self.push(),
            KeyCode::Char('o') => self.pop(),
            KeyCode::Char('a') => self.add_argument(),
            KeyCode::Char('b') => self.set_frame(FrameOp::EbpFromEsp, "%ebp ← %esp"),
            KeyCode::Char('e') => self.set_frame(FrameOp::EspFromEbp, "%esp ← %ebp"),
            KeyCode::Char('r') => self.set_frame(FrameOp::ResetBasePointer, "reset %ebp"),
            KeyCode::Char('v') => self.start_edit(InputField::Value),
            KeyCode::Char('s') => self.start_edit(InputField::Size),
            KeyCode::Char('g') => self.start_edit(InputField::StartAddress),
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('U') => self.redo(),
            KeyCode::Char('X') => self.reset(),
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Stack => {
                    self.stack_scroll.offset = self.stack_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Stack => {
                    self.stack_scroll.offset = self.stack_scroll.offset.saturating_add(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_add(1);
                }
            },
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, field: InputField, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.field_mut(field).push(c),
            KeyCode::Backspace => {
                self.field_mut(field).pop();
            }
            KeyCode::Enter | KeyCode::Esc => self.finish_edit(field),
            _ => {}
        }
    }

    fn field_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::StartAddress => &mut self.start_input,
            InputField::Value => &mut self.value_input,
            InputField::Size => &mut self.size_input,
        }
    }

    fn start_edit(&mut self, field: InputField) {
        self.input_mode = InputMode::Editing(field);
        self.status_message = match field {
            InputField::StartAddress => "Editing start address".to_string(),
            InputField::Value => "Editing value".to_string(),
            InputField::Size => "Editing size".to_string(),
        };
    }

    fn finish_edit(&mut self, field: InputField) {
        self.input_mode = InputMode::Normal;
        if field != InputField::StartAddress {
            self.status_message = "Ready!".to_string();
            return;
        }

        let current = self.simulator.start_address();
        match self.start_input.trim().parse::<i64>() {
            Ok(address) if address == current => {
                self.start_input = address.to_string();
                self.status_message = "Ready!".to_string();
            }
            Ok(address) => {
                self.simulator.set_start_address(address);
                self.start_input = address.to_string();
                self.commit(format!("start address {}", address));
            }
            Err(_) => {
                warn!("start address '{}' is not a whole number", self.start_input);
                self.start_input = current.to_string();
                self.reject("Start address must be a whole number".to_string());
            }
        }
    }

    /// Read the size field as a byte count
    fn parse_size(&self) -> Result<u32, String> {
        let text = self.size_input.trim();
        if text.is_empty() {
            return Err("Enter a size first".to_string());
        }
        text.parse::<u32>()
            .map_err(|_| format!("Size '{}' is not a whole number of bytes", text))
    }

    fn push(&mut self) {
        let size = match self.parse_size() {
            Ok(size) => size,
            Err(message) => {
                warn!("push ignored: {}", message);
                return self.reject(message);
            }
        };
        let value = SlotValue::parse(&self.value_input);
        let label = format!("push {} {}", size, value);

        match self.simulator.push(size, value) {
            Ok(()) => self.commit(label),
            Err(e) => self.reject(e.to_string()),
        }
    }

    fn pop(&mut self) {
        match self.simulator.pop() {
            Ok(slot) => self.commit(format!("pop {} {}", slot.size, slot.value)),
            Err(e) => self.reject(e.to_string()),
        }
    }

    fn add_argument(&mut self) {
        let size = match self.parse_size() {
            Ok(size) => size,
            Err(message) => {
                warn!("add argument ignored: {}", message);
                return self.reject(message);
            }
        };
        let value = SlotValue::parse(&self.value_input);
        let label = format!("argument {} {}", size, value);

        match self.simulator.add_argument(size, value) {
            Ok(()) => self.commit(label),
            Err(e) => self.reject(e.to_string()),
        }
    }

    fn set_frame(&mut self, op: FrameOp, label: &str) {
        let before = (self.simulator.esp(), self.simulator.ebp());
        self.simulator.set_frame(op);
        if (self.simulator.esp(), self.simulator.ebp()) == before {
            self.status_message = format!("{}: no change", label);
            self.last_rejected = false;
        } else {
            self.commit(label.to_string());
        }
    }

    fn reset(&mut self) {
        if self.simulator == StackSimulator::new(self.simulator.start_address()) {
            self.status_message = "Already empty".to_string();
            return;
        }
        self.simulator.reset();
        self.commit("reset".to_string());
    }

    fn undo(&mut self) {
        let undone = self
            .timeline
            .current()
            .map(|s| s.label.clone())
            .unwrap_or_default();
        match self.timeline.undo().map(|s| s.simulator.clone()) {
            Some(simulator) => {
                self.restore(simulator);
                info!("undo {}", undone);
                self.status_message = format!("Undid {}", undone);
            }
            None => self.reject("Nothing to undo".to_string()),
        }
    }

    fn redo(&mut self) {
        match self
            .timeline
            .redo()
            .map(|s| (s.simulator.clone(), s.label.clone()))
        {
            Some((simulator, label)) => {
                self.restore(simulator);
                info!("redo {}", label);
                self.status_message = format!("Redid {}", label);
            }
            None => self.reject("Nothing to redo".to_string()),
        }
    }

    fn restore(&mut self, simulator: StackSimulator) {
        self.start_input = simulator.start_address().to_string();
        self.simulator = simulator;
        self.last_rejected = false;
        self.log_scroll = usize::MAX;
    }

    /// Record the current state as a new history step
    fn commit(&mut self, label: String) {
        info!("{}", label);
        self.timeline.record(self.simulator.clone(), label.clone());
        self.status_message = label;
        self.last_rejected = false;
        // Auto-scroll log to bottom
        self.log_scroll = usize::MAX;
    }

    fn reject(&mut self, message: String) {
        self.status_message = message;
        self.last_rejected = true;
        self.log_scroll = usize::MAX;
    }
}

fn lock_events(events: &Mutex<EventLog>) -> MutexGuard<'_, EventLog> {
    match events.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::stack::StackSlot;
    use pretty_assertions::assert_eq;

    fn new_app() -> App {
        App::new(
            StackSimulator::default(),
            16,
            Arc::new(Mutex::new(EventLog::new())),
            AddressFormat::Decimal,
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_into(app: &mut App, field_key: char, text: &str) {
        press(app, KeyCode::Char(field_key));
        // Clear whatever the field held
        for _ in 0..32 {
            press(app, KeyCode::Backspace);
        }
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_push_and_pop_through_keys() {
        let mut app = new_app();
        type_into(&mut app, 'v', "5");
        type_into(&mut app, 's', "4");
        press(&mut app, KeyCode::Char('p'));

        assert_eq!(
            app.simulator.slots(),
            &[StackSlot::new(4, SlotValue::int(5), -4)]
        );
        assert_eq!(app.status_message, "push 4 5");

        type_into(&mut app, 'v', "%ebp");
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.simulator.saved_base_pointers(), &[0]);

        press(&mut app, KeyCode::Char('o'));
        press(&mut app, KeyCode::Char('o'));
        assert!(app.simulator.is_empty());
        assert_eq!(app.simulator.esp(), 0);
        assert_eq!(app.timeline.len(), 5);
    }

    #[test]
    fn test_quit_key_types_while_editing() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('v'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.value_input, "q");

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_invalid_size_is_rejected() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('p'));
        assert!(app.last_rejected);

        type_into(&mut app, 's', "-4");
        press(&mut app, KeyCode::Char('p'));
        assert!(app.last_rejected);

        type_into(&mut app, 's', "0");
        press(&mut app, KeyCode::Char('a'));
        assert!(app.last_rejected);

        assert!(app.simulator.is_empty());
        assert!(app.simulator.arguments().is_empty());
        assert_eq!(app.timeline.len(), 1);
    }

    #[test]
    fn test_pop_empty_is_rejected() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('o'));

        assert!(app.last_rejected);
        assert_eq!(app.status_message, "Cannot pop: the stack is empty");
    }

    #[test]
    fn test_start_address_edit() {
        let mut app = new_app();
        type_into(&mut app, 'g', "4096");
        assert_eq!(app.simulator.start_address(), 4096);

        type_into(&mut app, 'g', "0x10");
        assert_eq!(app.simulator.start_address(), 4096);
        assert_eq!(app.start_input, "4096");
        assert!(app.last_rejected);
    }

    #[test]
    fn test_frame_keys() {
        let mut app = new_app();
        type_into(&mut app, 's', "8");
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.simulator.ebp(), -8);

        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.simulator.ebp(), 0);

        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.simulator.esp(), 0);

        // Unchanged registers do not add history
        let len = app.timeline.len();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.timeline.len(), len);
    }

    #[test]
    fn test_undo_redo_keys() {
        let mut app = new_app();
        type_into(&mut app, 's', "4");
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.simulator.esp(), -8);

        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.simulator.esp(), -4);
        press(&mut app, KeyCode::Char('u'));
        assert!(app.simulator.is_empty());
        press(&mut app, KeyCode::Char('u'));
        assert!(app.last_rejected);

        press(&mut app, KeyCode::Char('U'));
        assert_eq!(app.simulator.esp(), -4);
        assert_eq!(app.status_message, "Redid push 4 ");
    }

    #[test]
    fn test_reset_key() {
        let mut app = new_app();
        type_into(&mut app, 's', "4");
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char('p'));
        press(&mut app, KeyCode::Char('X'));

        assert_eq!(app.simulator, StackSimulator::default());
        press(&mut app, KeyCode::Char('u'));
        assert_eq!(app.simulator.slots().len(), 1);
    }

    #[test]
    fn test_render_full_layout() {
        use ratatui::backend::TestBackend;

        let mut app = new_app();
        type_into(&mut app, 's', "4");
        press(&mut app, KeyCode::Char('p'));

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("*ret_address"));
        assert!(text.contains("Caller Should Save"));
        assert!(text.contains("Step 2/2"));
    }
}
