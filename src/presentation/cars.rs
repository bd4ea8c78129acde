use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    domain::Car,
    listing::{CarListing, LoadState, ViewMode},
};

use super::layout::truncate;

pub const EMPTY_LISTING: &str = "No cars available.";
pub const LOADING_LISTING: &str = "Loading cars...";

const CARD_WIDTH: u16 = 32;
const CARD_HEIGHT: u16 = 7;

/// Draws a non-empty, already filtered set of cars.
///
/// Loading, failure and empty states are handled by [`render_listing`], so
/// every renderer shares them.
pub trait CarRenderer {
    fn render_cars(&self, frame: &mut Frame<'_>, area: Rect, cars: &[&Car], selected: Option<usize>);
}

/// Bordered cards laid out in as many columns as fit.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardGrid;

/// One row per car.
#[derive(Debug, Clone, Copy, Default)]
pub struct CarTable;

pub fn renderer_for(view: ViewMode) -> &'static dyn CarRenderer {
    match view {
        ViewMode::Cards => &CardGrid,
        ViewMode::Table => &CarTable,
    }
}

pub fn render_listing(
    frame: &mut Frame<'_>,
    area: Rect,
    listing: &CarListing,
    renderer: &dyn CarRenderer,
) {
    match listing.state() {
        LoadState::Loading => render_placeholder(frame, area, LOADING_LISTING, Style::default()),
        LoadState::Failed(message) => render_placeholder(
            frame,
            area,
            message,
            Style::default().fg(Color::Red),
        ),
        LoadState::Ready => {
            let cars = listing.visible();
            if cars.is_empty() {
                render_placeholder(frame, area, EMPTY_LISTING, Style::default().fg(Color::Gray));
            } else {
                renderer.render_cars(frame, area, &cars, listing.selected());
            }
        }
    }
}

fn render_placeholder(frame: &mut Frame<'_>, area: Rect, text: &str, style: Style) {
    let placeholder = Paragraph::new(text.to_string())
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(placeholder, area);
}

impl CarRenderer for CardGrid {
    fn render_cars(&self, frame: &mut Frame<'_>, area: Rect, cars: &[&Car], selected: Option<usize>) {
        let columns = (area.width / CARD_WIDTH).max(1) as usize;
        let visible_rows = (area.height / CARD_HEIGHT).max(1) as usize;
        let selected_row = selected.unwrap_or(0) / columns;
        let first_row = selected_row.saturating_sub(visible_rows - 1);
        let card_width = area.width / columns as u16;

        for (index, car) in cars
            .iter()
            .enumerate()
            .skip(first_row * columns)
            .take(visible_rows * columns)
        {
            let slot = index - first_row * columns;
            let (row, column) = ((slot / columns) as u16, (slot % columns) as u16);
            let y = area.y + row * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }
            let rect = Rect::new(area.x + column * card_width, y, card_width, height);
            render_card(frame, rect, car, selected == Some(index));
        }
    }
}

fn render_card(frame: &mut Frame<'_>, area: Rect, car: &Car, selected: bool) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let border = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Blue)
    };
    let title = Span::styled(
        truncate(&car.name, inner_width),
        Style::default().add_modifier(Modifier::BOLD),
    );
    let lines = vec![
        Line::from(Span::styled(
            truncate(&format!("{} {}", car.brand, car.model), inner_width),
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center),
        spread(
            car.seats_label(),
            Span::raw(car.rate_label()),
            inner_width,
        ),
        spread(
            car.number_plate.clone(),
            Span::styled(car.availability_label(), availability_style(car.availability)),
            inner_width,
        ),
        Line::from(Span::styled(
            truncate(&car.image, inner_width),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Line::from(title).alignment(Alignment::Center)),
    );
    frame.render_widget(card, area);
}

/// `left` flush left and `right` flush right within `width` columns.
fn spread(left: String, right: Span<'static>, width: usize) -> Line<'static> {
    let right_width = right.content.width();
    let left = truncate(&left, width.saturating_sub(right_width + 1));
    let gap = width.saturating_sub(left.width() + right_width).max(1);
    Line::from(vec![
        Span::styled(left, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" ".repeat(gap)),
        right,
    ])
}

fn availability_style(available: bool) -> Style {
    let color = if available { Color::Green } else { Color::Red };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

impl CarRenderer for CarTable {
    fn render_cars(&self, frame: &mut Frame<'_>, area: Rect, cars: &[&Car], selected: Option<usize>) {
        let header = Row::new(["Name", "Model", "Brand", "Plate", "Seats", "Rate", "Status"])
            .style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        let rows = cars.iter().map(|car| {
            Row::new(vec![
                Cell::from(car.name.clone()),
                Cell::from(car.model.clone()),
                Cell::from(car.brand.clone()),
                Cell::from(car.number_plate.clone()),
                Cell::from(car.seats.to_string()),
                Cell::from(car.rate_label()),
                Cell::from(Span::styled(
                    car.availability_label(),
                    availability_style(car.availability),
                )),
            ])
        });
        let widths = [
            Constraint::Percentage(20),
            Constraint::Percentage(14),
            Constraint::Percentage(14),
            Constraint::Percentage(14),
            Constraint::Percentage(8),
            Constraint::Percentage(13),
            Constraint::Percentage(17),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title("Cars").borders(Borders::ALL))
            .row_highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("» ");
        let mut state = TableState::default();
        state.select(selected);
        frame.render_stateful_widget(table, area, &mut state);
    }
}
