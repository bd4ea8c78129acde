use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

use crate::{
    domain::CarField,
    form::FormController,
    listing::{CarListing, ViewMode},
    presentation::{
        CONFIRM_TITLE, CarRenderer, CarTable, CardGrid, EMPTY_LISTING, LOADING_LISTING,
        PopupRender, UiContext, draw, render_listing,
    },
    tests::sample_car,
};

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn render(listing: &CarListing, renderer: &dyn CarRenderer) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).expect("terminal");
    terminal
        .draw(|frame| render_listing(frame, frame.area(), listing, renderer))
        .expect("draw");
    buffer_text(terminal.backend().buffer())
}

fn screen(ctx: UiContext<'_>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 32)).expect("terminal");
    terminal.draw(|frame| draw(frame, ctx)).expect("draw");
    buffer_text(terminal.backend().buffer())
}

fn context<'a>(listing: &'a CarListing, popup: Option<PopupRender<'a>>) -> UiContext<'a> {
    UiContext {
        title: "WheelDeal Admin",
        source_label: "http://localhost:5000",
        listing,
        view: ViewMode::Cards,
        admin: true,
        status: "Ready.",
        help: Some("q Quit"),
        toast: None,
        popup,
    }
}

#[test]
fn both_renderers_show_the_empty_state() {
    let mut listing = CarListing::default();
    listing.replace(Vec::new());
    for renderer in [&CardGrid as &dyn CarRenderer, &CarTable] {
        assert!(render(&listing, renderer).contains(EMPTY_LISTING));
    }
}

#[test]
fn loading_and_failure_states_replace_the_cars() {
    let listing = CarListing::default();
    assert!(render(&listing, &CardGrid).contains(LOADING_LISTING));

    let mut listing = CarListing::default();
    listing.fail("Failed to fetch car data. offline");
    assert!(render(&listing, &CarTable).contains("Failed to fetch car data. offline"));
}

#[test]
fn cards_show_rate_seats_and_availability() {
    let mut listing = CarListing::default();
    listing.replace(vec![
        sample_car("1", "Roadster", true),
        sample_car("2", "Wagon", false),
    ]);
    let text = render(&listing, &CardGrid);
    assert!(text.contains("Roadster"));
    assert!(text.contains("$45/Day"));
    assert!(text.contains("4 Seats"));
    assert!(text.contains("Not Available"));
}

#[test]
fn table_lists_one_row_per_visible_car() {
    let mut listing = CarListing::default();
    listing.replace(vec![
        sample_car("1", "Roadster", true),
        sample_car("2", "Wagon", false),
    ]);
    listing.cycle_filter();
    let text = render(&listing, &CarTable);
    assert!(text.contains("Plate"));
    assert!(text.contains("Roadster"));
    assert!(!text.contains("Wagon"));
}

#[test]
fn form_popup_shows_inline_errors() {
    let mut listing = CarListing::default();
    listing.replace(Vec::new());
    let mut form = FormController::for_add();
    form.submit();
    let text = screen(context(&listing, Some(PopupRender::Form(&form))));
    assert!(text.contains("Add New Car"));
    assert!(text.contains(CarField::Name.label()));
    assert!(text.contains("Car Name is required"));
    assert!(text.contains("[Enter] Add Car"));
}

#[test]
fn confirm_popup_asks_before_deleting() {
    let mut listing = CarListing::default();
    listing.replace(vec![sample_car("1", "Roadster", true)]);
    let text = screen(context(
        &listing,
        Some(PopupRender::Confirm {
            car_name: "Roadster",
            busy: true,
        }),
    ));
    assert!(text.contains(CONFIRM_TITLE));
    assert!(text.contains("Deleting..."));
}

#[test]
fn header_counts_visible_cars() {
    let mut listing = CarListing::default();
    listing.replace(vec![
        sample_car("1", "Roadster", true),
        sample_car("2", "Wagon", false),
    ]);
    listing.cycle_filter();
    let text = screen(context(&listing, None));
    assert!(text.contains("Filter: Available"));
    assert!(text.contains("1 of 2 cars"));
    assert!(text.contains("Actions: q Quit"));
}
