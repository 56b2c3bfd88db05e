//! Registers pane: %esp, %ebp, the current frame and the save history

use super::utils::border_style;
use crate::config::AddressFormat;
use crate::simulator::StackSimulator;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

/// Caller-saved and callee-saved registers, row by row
pub const SAVE_CONVENTION: [(&str, &str); 4] = [
    ("%eax", "%ebx"),
    ("%ecx", "%ebp"),
    ("%edx", "%esi"),
    ("----", "%edi"),
];

/// Render the registers pane
pub fn render_registers_pane(
    frame: &mut Frame,
    area: Rect,
    simulator: &StackSimulator,
    address_format: AddressFormat,
) {
    let block = Block::default()
        .title(" Registers ")
        .borders(Borders::ALL)
        .border_style(border_style(false));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(0)])
        .split(inner);

    frame.render_widget(Paragraph::new(register_lines(simulator, address_format)), chunks[0]);

    let header = Row::new(vec!["Caller Should Save", "Callee Should Save"]).style(
        Style::default()
            .fg(DEFAULT_THEME.primary)
            .add_modifier(Modifier::BOLD),
    );
    let rows = SAVE_CONVENTION.iter().map(|(caller, callee)| {
        Row::new(vec![*caller, *callee]).style(Style::default().fg(DEFAULT_THEME.register))
    });
    let table = Table::new(rows, [Constraint::Percentage(50), Constraint::Percentage(50)])
        .header(header);
    frame.render_widget(table, chunks[1]);
}

fn register_lines(simulator: &StackSimulator, format: AddressFormat) -> Vec<Line<'static>> {
    let label = Style::default()
        .fg(DEFAULT_THEME.fg)
        .add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(DEFAULT_THEME.comment);

    let saved = if simulator.saved_base_pointers().is_empty() {
        "(none)".to_string()
    } else {
        simulator
            .saved_base_pointers()
            .iter()
            .map(|&offset| format.format(simulator.start_address().saturating_add(offset)))
            .collect::<Vec<_>>()
            .join(", ")
    };

    vec![
        Line::from(vec![
            Span::styled("%esp  ", label),
            Span::styled(
                format.format(simulator.esp_address()),
                Style::default().fg(DEFAULT_THEME.stack_pointer_tag),
            ),
            Span::styled(format!("  (offset {})", simulator.esp()), muted),
        ]),
        Line::from(vec![
            Span::styled("%ebp  ", label),
            Span::styled(
                format.format(simulator.ebp_address()),
                Style::default().fg(DEFAULT_THEME.base_pointer_tag),
            ),
            Span::styled(format!("  (offset {})", simulator.ebp()), muted),
        ]),
        Line::from(vec![
            Span::styled("frame ", label),
            Span::styled(format!("{} byte(s)", simulator.frame_size()), muted),
        ]),
        Line::from(vec![
            Span::styled("saved ", label),
            Span::styled(saved, Style::default().fg(DEFAULT_THEME.saved_base_pointer)),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::value::SlotValue;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_register_lines() {
        let mut sim = StackSimulator::default();
        sim.push(4, SlotValue::SavedBasePointer).unwrap();
        sim.set_ebp_from_esp();
        sim.push(8, SlotValue::int(1)).unwrap();

        let lines = register_lines(&sim, AddressFormat::Decimal);
        assert_eq!(line_text(&lines[0]), "%esp  0x988  (offset -12)");
        assert_eq!(line_text(&lines[1]), "%ebp  0x996  (offset -4)");
        assert_eq!(line_text(&lines[2]), "frame 8 byte(s)");
        assert_eq!(line_text(&lines[3]), "saved 0x1000");
    }
}
