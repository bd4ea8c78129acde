use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::{Toast, ToastLevel};

use super::UiContext;

pub fn render_header(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let listing = ctx.listing;
    let mut spans = vec![
        Span::styled(
            ctx.title.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(format!("Filter: {}", listing.filter().label())),
        Span::raw(" • "),
        Span::raw(format!("View: {}", ctx.view.label())),
        Span::raw(" • "),
        Span::raw(format!(
            "{} of {} cars",
            listing.visible_len(),
            listing.cars().len()
        )),
    ];
    if !ctx.admin {
        spans.push(Span::raw(" • "));
        spans.push(Span::styled("read-only", Style::default().fg(Color::Gray)));
    }
    if listing.is_refreshing() {
        spans.push(Span::raw(" • "));
        spans.push(Span::styled(
            "refreshing...",
            Style::default().fg(Color::Gray),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(ctx.source_label.to_string()),
    );
    frame.render_widget(header, area);
}

pub fn render_footer(frame: &mut Frame<'_>, area: Rect, ctx: &UiContext<'_>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let actions = ctx.help.unwrap_or(" ");
    let actions_widget = Paragraph::new(format!("Actions: {actions}"))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(actions_widget, rows[0]);

    let mut spans = vec![Span::raw("Status: "), Span::raw(ctx.status.to_string())];
    if let Some(toast) = ctx.toast {
        spans.push(Span::raw(" "));
        spans.extend(toast_spans(toast));
    }
    let status_widget = Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true });
    frame.render_widget(status_widget, rows[1]);
}

fn toast_spans(toast: &Toast) -> [Span<'static>; 2] {
    let color = match toast.level {
        ToastLevel::Success => Color::Green,
        ToastLevel::Error => Color::Red,
    };
    [
        Span::styled(
            format!("[{}]", toast.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", toast.description), Style::default().fg(color)),
    ]
}
