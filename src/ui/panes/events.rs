//! Event log pane rendering

use super::utils::border_style;
use crate::snapshot::EventLog;
use crate::ui::theme::DEFAULT_THEME;
use log::Level;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the event log pane
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    events: &EventLog,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Event Log ")
        .borders(Borders::ALL)
        .border_style(border_style(is_focused));

    if events.is_empty() {
        let paragraph = Paragraph::new("(no events)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
    } else {
        let block = block.padding(Padding::new(1, 0, 0, 0));
        let all_items: Vec<ListItem> = events
            .lines
            .iter()
            .map(|line| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<5} ", line.level), level_style(line.level)),
                    Span::styled(line.text.as_str(), Style::default().fg(DEFAULT_THEME.fg)),
                ]))
            })
            .collect();

        // Calculate visible range for scrolling
        let total_items = all_items.len();
        let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

        // Clamp scroll offset only if content exceeds visible area
        if total_items > visible_height {
            let max_scroll = total_items - visible_height;
            *scroll_offset = (*scroll_offset).min(max_scroll);
        } else {
            *scroll_offset = 0;
        }

        let visible_items: Vec<ListItem> = all_items
            .into_iter()
            .skip(*scroll_offset)
            .take(visible_height)
            .collect();

        let list = List::new(visible_items).block(block);
        frame.render_widget(list, area);
    }
}

fn level_style(level: Level) -> Style {
    let color = match level {
        Level::Error => DEFAULT_THEME.error,
        Level::Warn => DEFAULT_THEME.warning,
        Level::Info => DEFAULT_THEME.success,
        Level::Debug | Level::Trace => DEFAULT_THEME.comment,
    };
    Style::default().fg(color)
}
