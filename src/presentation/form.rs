use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    domain::{CarField, FieldKind},
    form::FormController,
};

use super::layout::{popup_rect, truncate};

const FORM_WIDTH: u16 = 64;
const LABEL_WIDTH: usize = 14;
const MARKER: &str = "» ";
const MARKER_WIDTH: usize = 2;

/// Two lines per field: `label value`, then its error or a blank line.
pub fn render_form_popup(frame: &mut Frame<'_>, form: &FormController) {
    let height = CarField::ALL.len() as u16 * 2 + 4;
    let area = popup_rect(frame.area(), FORM_WIDTH, height);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(Span::styled(
            form.title(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    let value_width = (rows[0].width as usize).saturating_sub(LABEL_WIDTH + MARKER_WIDTH + 1);
    let focused = form.focused_field();
    let mut lines = Vec::with_capacity(CarField::ALL.len() * 2);
    let mut cursor = None;

    for (index, field) in CarField::ALL.into_iter().enumerate() {
        let is_focused = field == focused;
        let marker = if is_focused { MARKER } else { "  " };
        let label_style = if is_focused {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let label = format!("{:<width$}", field.label(), width = LABEL_WIDTH);
        let value = field_value(form, field, value_width);
        if is_focused && field.kind() != FieldKind::Bool {
            let typed = form.draft().text(field).unwrap_or_default();
            let column = (MARKER_WIDTH + LABEL_WIDTH + 1 + typed.width().min(value_width)) as u16;
            cursor = Some((
                rows[0].x.saturating_add(column),
                rows[0].y.saturating_add(index as u16 * 2),
            ));
        }
        lines.push(Line::from(vec![
            Span::styled(marker, label_style),
            Span::styled(label, label_style),
            Span::raw(" "),
            value,
        ]));
        lines.push(match form.errors().get(field) {
            Some(message) => Line::from(Span::styled(
                format!("{:indent$}{message}", "", indent = MARKER_WIDTH + LABEL_WIDTH + 1),
                Style::default().fg(Color::Red),
            )),
            None => Line::default(),
        });
    }
    frame.render_widget(Paragraph::new(lines), rows[0]);

    let footer = if form.is_submitting() {
        Line::from(Span::styled(
            "Submitting...",
            Style::default().fg(Color::Gray),
        ))
    } else {
        Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::Yellow)),
            Span::raw(form.submit_label()),
            Span::raw("  "),
            Span::styled("[Esc] ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ])
    };
    frame.render_widget(
        Paragraph::new(footer).block(Block::default().borders(Borders::TOP)),
        rows[1],
    );

    if let Some(position) = cursor
        && !form.is_submitting()
    {
        frame.set_cursor_position(position);
    }
}

fn field_value(form: &FormController, field: CarField, width: usize) -> Span<'static> {
    if field.kind() == FieldKind::Bool {
        let available = form.draft().availability;
        let mark = if available { "[x]" } else { "[ ]" };
        return Span::raw(format!("{mark} Available"));
    }
    let text = form.draft().text(field).unwrap_or_default();
    if text.is_empty() {
        Span::styled(
            truncate(field.placeholder(), width),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(truncate(text, width))
    }
}
