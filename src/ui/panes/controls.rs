//! Controls pane: the start address, value and size fields

use super::utils::border_style;
use crate::ui::app::InputField;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Field contents and edit state
pub struct ControlsRenderData<'a> {
    pub start_address: &'a str,
    pub value: &'a str,
    pub size: &'a str,
    pub editing: Option<InputField>,
}

/// Render the controls pane
pub fn render_controls_pane(frame: &mut Frame, area: Rect, data: ControlsRenderData) {
    let block = Block::default()
        .title(" Controls ")
        .borders(Borders::ALL)
        .border_style(border_style(data.editing.is_some()))
        .padding(Padding::new(1, 0, 0, 0));

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default().fg(DEFAULT_THEME.fg);

    let editing = |field| data.editing == Some(field);
    let lines = vec![
        field_line("g", "Start", data.start_address, editing(InputField::StartAddress)),
        field_line("v", "Value", data.value, editing(InputField::Value)),
        field_line("s", "Size ", data.size, editing(InputField::Size)),
        Line::from(""),
        Line::from(vec![
            Span::styled(" p ", key_style),
            Span::styled(" push ", desc_style),
            Span::styled(" o ", key_style),
            Span::styled(" pop ", desc_style),
            Span::styled(" a ", key_style),
            Span::styled(" add argument ", desc_style),
        ]),
        Line::from(vec![
            Span::styled(" b ", key_style),
            Span::styled(" %ebp ← %esp ", desc_style),
            Span::styled(" e ", key_style),
            Span::styled(" %esp ← %ebp ", desc_style),
            Span::styled(" r ", key_style),
            Span::styled(" reset %ebp ", desc_style),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line(key: &'static str, label: &'static str, text: &str, editing: bool) -> Line<'static> {
    let text_style = if editing {
        Style::default()
            .bg(DEFAULT_THEME.current_line_bg)
            .fg(DEFAULT_THEME.warning)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.fg)
    };

    let mut spans = vec![
        Span::styled(format!("[{}] ", key), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(label, Style::default().fg(DEFAULT_THEME.primary)),
        Span::raw(" "),
        Span::styled(text.to_string(), text_style),
    ];
    if editing {
        spans.push(Span::styled("▏", Style::default().fg(DEFAULT_THEME.warning)));
    }
    Line::from(spans)
}
