use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::{
    app::Toast,
    form::FormController,
    listing::{CarListing, ViewMode},
};

use super::{
    cars::{render_listing, renderer_for},
    chrome::{render_footer, render_header},
    confirm::render_confirm_popup,
    form::render_form_popup,
};

/// Everything one frame needs, borrowed from the console state.
pub struct UiContext<'a> {
    pub title: &'a str,
    pub source_label: &'a str,
    pub listing: &'a CarListing,
    pub view: ViewMode,
    pub admin: bool,
    pub status: &'a str,
    pub help: Option<&'a str>,
    pub toast: Option<&'a Toast>,
    pub popup: Option<PopupRender<'a>>,
}

pub enum PopupRender<'a> {
    Form(&'a FormController),
    Confirm { car_name: &'a str, busy: bool },
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], &ctx);
    render_listing(frame, chunks[1], ctx.listing, renderer_for(ctx.view));
    render_footer(frame, chunks[2], &ctx);

    match ctx.popup {
        Some(PopupRender::Form(form)) => render_form_popup(frame, form),
        Some(PopupRender::Confirm { car_name, busy }) => render_confirm_popup(frame, car_name, busy),
        None => {}
    }
}
