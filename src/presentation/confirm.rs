use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use textwrap::wrap;

use super::layout::popup_rect;

pub const CONFIRM_TITLE: &str = "Are you sure?";
pub const CONFIRM_BODY: &str = "Do you really want to delete this car? This action cannot be undone.";

const CONFIRM_WIDTH: u16 = 48;

pub fn render_confirm_popup(frame: &mut Frame<'_>, car_name: &str, busy: bool) {
    let width = CONFIRM_WIDTH.min(frame.area().width);
    let text_width = width.saturating_sub(4).max(1) as usize;
    let body = wrap(CONFIRM_BODY, text_width);

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled(
            car_name.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    lines.extend(body.into_iter().map(|line| Line::from(line.into_owned())));
    lines.push(Line::default());
    lines.push(if busy {
        Line::from(Span::styled("Deleting...", Style::default().fg(Color::Gray)))
    } else {
        Line::from(vec![
            Span::styled("[Enter] ", Style::default().fg(Color::Yellow)),
            Span::styled("Delete", Style::default().fg(Color::Red)),
            Span::raw("  "),
            Span::styled("[Esc] ", Style::default().fg(Color::Yellow)),
            Span::raw("Cancel"),
        ])
    });

    let height = lines.len() as u16 + 2;
    let area = popup_rect(frame.area(), width, height);
    frame.render_widget(Clear, area);
    let popup = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(CONFIRM_TITLE)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(popup, area);
}
