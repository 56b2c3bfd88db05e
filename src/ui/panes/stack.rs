//! Stack pane rendering
//!
//! This module renders the stack table: the simulated region around the
//! start address with register tags, addresses and slot values.
//!
//! # Layout
//!
//! Rows run from the lowest address at the top to the highest at the
//! bottom of the stack section:
//! - A `--` placeholder above the top of the stack
//! - Pushed slots, most recent first
//! - `*ret_address` at the start address
//! - Caller arguments, most recent first

use super::utils::border_style;
use crate::config::AddressFormat;
use crate::memory::value::{Literal, SlotValue};
use crate::simulator::{RowTags, StackSimulator};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// Scroll state for the stack pane
pub struct StackScrollState {
    pub offset: usize,
    pub prev_item_count: usize,
}

/// Data needed to render the stack pane
pub struct StackRenderData<'a> {
    pub simulator: &'a StackSimulator,
    pub address_format: AddressFormat,
}

/// What a table row represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Placeholder,
    Slot,
    ReturnAddress,
    Argument,
}

/// One row of the stack table, already formatted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub kind: RowKind,
    pub tags: RowTags,
    pub address: String,
    pub value: String,
    pub slot_value: Option<SlotValue>, // Typed value for slot and argument rows
}

impl TableRow {
    pub fn holds_saved_base_pointer(&self) -> bool {
        self.slot_value
            .as_ref()
            .is_some_and(SlotValue::is_saved_base_pointer)
    }
}

/// Build the stack table top to bottom
pub fn build_table_rows(sim: &StackSimulator, format: AddressFormat) -> Vec<TableRow> {
    let mut rows = vec![TableRow {
        kind: RowKind::Placeholder,
        tags: RowTags::default(),
        address: "--".to_string(),
        value: "--".to_string(),
        slot_value: None,
    }];

    rows.extend(sim.stack_rows().into_iter().map(|row| TableRow {
        kind: RowKind::Slot,
        tags: row.tags,
        address: format.format(row.address),
        value: row.slot.value.to_string(),
        slot_value: Some(row.slot.value.clone()),
    }));

    let ret = sim.return_address_row();
    rows.push(TableRow {
        kind: RowKind::ReturnAddress,
        tags: ret.tags,
        address: format.format(ret.address),
        value: "*ret_address".to_string(),
        slot_value: None,
    });

    rows.extend(sim.argument_rows().into_iter().map(|row| TableRow {
        kind: RowKind::Argument,
        tags: RowTags::default(),
        address: format.format(row.address),
        value: row.argument.value.to_string(),
        slot_value: Some(row.argument.value.clone()),
    }));

    rows
}

/// Render the stack pane
pub fn render_stack_pane(
    frame: &mut Frame,
    area: Rect,
    data: StackRenderData,
    is_focused: bool,
    scroll_state: &mut StackScrollState,
) {
    let block = Block::default()
        .title(" Stack ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    let table_rows = build_table_rows(data.simulator, data.address_format);
    let total_items = table_rows.len();
    // Borders plus the header row
    let visible_height = area.height.saturating_sub(3).max(1) as usize;

    // Follow the top of the stack when rows are added
    if total_items > scroll_state.prev_item_count {
        scroll_state.offset = 0;
    }
    scroll_state.prev_item_count = total_items;

    let max_scroll = total_items.saturating_sub(visible_height);
    scroll_state.offset = scroll_state.offset.min(max_scroll);

    let rows: Vec<Row> = table_rows
        .iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(styled_row)
        .collect();

    let header = Row::new(vec!["", "Addr", "Value"]).style(
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(20),
            Constraint::Min(8),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

fn styled_row(row: &TableRow) -> Row<'static> {
    let mut tags = Vec::new();
    if row.tags.base_pointer {
        tags.push(tag_span("%ebp", DEFAULT_THEME.base_pointer_tag));
        tags.push(Span::raw(" "));
    }
    if row.tags.stack_pointer {
        tags.push(tag_span("%esp", DEFAULT_THEME.stack_pointer_tag));
    }

    let address_style = match row.kind {
        RowKind::ReturnAddress => Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(DEFAULT_THEME.comment),
    };

    let value_style = match (row.kind, &row.slot_value) {
        (RowKind::ReturnAddress, _) => Style::default()
            .fg(DEFAULT_THEME.secondary)
            .add_modifier(Modifier::ITALIC),
        (_, Some(value)) => value_style(value),
        (_, None) => Style::default().fg(DEFAULT_THEME.comment),
    };

    let mut styled = Row::new(vec![
        Cell::from(Line::from(tags)),
        Cell::from(Span::styled(row.address.clone(), address_style)),
        Cell::from(Span::styled(row.value.clone(), value_style)),
    ]);
    if row.kind == RowKind::Argument {
        styled = styled.style(Style::default().bg(DEFAULT_THEME.current_line_bg));
    }
    styled
}

fn tag_span(label: &'static str, bg: Color) -> Span<'static> {
    Span::styled(
        format!(" {} ", label),
        Style::default()
            .bg(bg)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
}

fn value_style(value: &SlotValue) -> Style {
    match value {
        SlotValue::Register(_) => Style::default().fg(DEFAULT_THEME.register),
        SlotValue::SavedBasePointer => Style::default()
            .fg(DEFAULT_THEME.saved_base_pointer)
            .add_modifier(Modifier::BOLD),
        SlotValue::Literal(Literal::Int(_)) => Style::default().fg(DEFAULT_THEME.number),
        SlotValue::Literal(_) => Style::default().fg(DEFAULT_THEME.string),
    }
}
