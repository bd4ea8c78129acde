use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crate::{
    listing::{CarListing, ViewMode},
    presentation::{self, PopupRender, UiContext},
    store::CarStore,
};

use super::{
    dispatch::{Dispatcher, Operation, RequestHandle},
    keymap::{KeyAction, KeymapContext, KeymapStore},
    options::{ConsoleMode, UiOptions},
    popup::Popup,
    status::StatusLine,
    terminal::TerminalSession,
    toast::Toast,
};

mod completions;

pub(crate) struct App {
    title: String,
    source_label: String,
    mode: ConsoleMode,
    options: UiOptions,
    listing: CarListing,
    view: ViewMode,
    popup: Popup,
    dispatcher: Dispatcher,
    list_request: Option<RequestHandle>,
    status: StatusLine,
    toast: Option<Toast>,
    should_quit: bool,
    keymap_store: Arc<KeymapStore>,
}

impl App {
    pub(crate) fn new(
        store: Arc<dyn CarStore>,
        title: String,
        source_label: String,
        mode: ConsoleMode,
        options: UiOptions,
    ) -> Self {
        let keymap_store = options.keymap_store.clone();
        Self {
            title,
            source_label,
            mode,
            listing: CarListing::new(options.filter),
            view: options.view,
            options,
            popup: Popup::Closed,
            dispatcher: Dispatcher::new(store),
            list_request: None,
            status: StatusLine::new(),
            toast: None,
            should_quit: false,
            keymap_store,
        }
    }

    pub(crate) fn run(&mut self) -> Result<()> {
        let mut terminal = TerminalSession::enter()?;
        self.request_refresh();
        while !self.should_quit {
            self.drain_completions();
            self.expire_toast(Instant::now());
            terminal.draw(|frame| self.draw(frame))?;
            if !event::poll(self.options.tick_rate)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize(width, height) => terminal.resize(width, height)?,
                Event::Mouse(_) => {}
                Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }
        self.shutdown();
        Ok(())
    }

    fn shutdown(&mut self) {
        self.popup.close();
        if let Some(handle) = self.list_request.take() {
            handle.cancel();
        }
        tracing::info!("console closed");
    }

    fn current_help_text(&self) -> Option<String> {
        if !self.options.show_help {
            return None;
        }
        self.keymap_store
            .help_text(self.popup.context(), self.mode.allows_mutations())
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let help = self.current_help_text();
        let popup = match &self.popup {
            Popup::Closed => None,
            Popup::Add(popup) | Popup::Update(popup) => Some(PopupRender::Form(&popup.form)),
            Popup::DeleteConfirm(popup) => Some(PopupRender::Confirm {
                car_name: &popup.name,
                busy: popup.pending.is_some(),
            }),
        };
        presentation::draw(
            frame,
            UiContext {
                title: &self.title,
                source_label: &self.source_label,
                listing: &self.listing,
                view: self.view,
                admin: self.mode.allows_mutations(),
                status: self.status.message(),
                help: help.as_deref(),
                toast: self.toast.as_ref(),
                popup,
            },
        );
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.is_expired(now)) {
            self.toast = None;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let context = self.popup.context();
        let action = self
            .keymap_store
            .classify(context, &key, self.mode.allows_mutations());
        match (context, action) {
            (KeymapContext::List, Some(action)) => self.handle_list_action(action),
            (KeymapContext::Form, Some(action)) => self.handle_form_action(action),
            (KeymapContext::Form, None) => self.handle_field_input(&key),
            (KeymapContext::Confirm, Some(action)) => self.handle_confirm_action(action),
            (_, None) => {}
        }
    }

    fn handle_list_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Refresh => self.request_refresh(),
            KeyAction::SelectStep(delta) => self.listing.select_step(delta),
            KeyAction::CycleFilter => {
                let filter = self.listing.cycle_filter();
                self.status
                    .set_raw(format!("Showing {} cars.", filter.label().to_lowercase()));
            }
            KeyAction::ToggleView => {
                self.view = self.view.toggle();
                self.status
                    .set_raw(format!("Switched to {} view.", self.view.label()));
            }
            KeyAction::AddCar => {
                self.popup.open_add();
                self.status.editing("new car");
            }
            KeyAction::EditCar => {
                if let Some(car) = self.listing.selected_car().cloned() {
                    self.status.editing(&car.name);
                    self.popup.open_update(&car);
                }
            }
            KeyAction::DeleteCar => {
                if let Some(car) = self.listing.selected_car().cloned() {
                    self.status.set_raw(format!("Delete {}?", car.name));
                    self.popup.open_delete(&car);
                }
            }
            KeyAction::FieldStep(_)
            | KeyAction::Submit
            | KeyAction::Cancel
            | KeyAction::Confirm => {}
        }
    }

    fn handle_form_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Cancel => self.close_popup(),
            KeyAction::Submit => self.submit_form(),
            KeyAction::FieldStep(delta) => {
                if let Some(popup) = self.popup.form_popup_mut() {
                    popup.form.focus_step(delta);
                }
            }
            _ => {}
        }
    }

    fn handle_field_input(&mut self, key: &KeyEvent) {
        if let Some(popup) = self.popup.form_popup_mut()
            && popup.form.handle_key(key)
        {
            self.status.editing(popup.form.focused_field().label());
        }
    }

    fn handle_confirm_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Cancel => self.close_popup(),
            KeyAction::Confirm => self.confirm_delete(),
            _ => {}
        }
    }

    fn close_popup(&mut self) {
        self.popup.close();
        self.status.ready();
    }

    /// Starts a fresh list request, superseding any still in flight.
    fn request_refresh(&mut self) {
        if let Some(previous) = self.list_request.take() {
            previous.cancel();
        }
        self.listing.begin_refresh();
        if self.listing.cars().is_empty() {
            self.status.loading();
        }
        self.list_request = Some(self.dispatcher.submit(Operation::List));
    }

    fn drain_completions(&mut self) {
        while let Some(completion) = self.dispatcher.try_next() {
            self.apply_completion(completion);
        }
    }

    fn toast_lifetime(&self) -> Duration {
        self.options.toast_duration
    }
}

#[cfg(test)]
impl App {
    pub(crate) fn with_store(store: Arc<dyn CarStore>, mode: ConsoleMode) -> Self {
        Self::with_options(store, mode, UiOptions::default())
    }

    pub(crate) fn with_options(
        store: Arc<dyn CarStore>,
        mode: ConsoleMode,
        options: UiOptions,
    ) -> Self {
        Self::new(
            store,
            "Test Fleet".to_string(),
            "memory".to_string(),
            mode,
            options,
        )
    }

    pub(crate) fn expire_toast_for_test(&mut self, now: Instant) {
        self.expire_toast(now)
    }

    pub(crate) fn handle_key_for_test(&mut self, key: KeyEvent) {
        self.handle_key(key)
    }

    pub(crate) fn refresh_for_test(&mut self) {
        self.request_refresh()
    }

    /// Applies completions until none arrives within `timeout`.
    pub(crate) fn settle_for_test(&mut self, timeout: Duration) {
        while let Some(completion) = self.dispatcher.wait_next(timeout) {
            self.apply_completion(completion);
        }
    }

    pub(crate) fn listing(&self) -> &CarListing {
        &self.listing
    }

    pub(crate) fn popup(&self) -> &Popup {
        &self.popup
    }

    pub(crate) fn popup_mut(&mut self) -> &mut Popup {
        &mut self.popup
    }

    pub(crate) fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub(crate) fn status_message(&self) -> &str {
        self.status.message()
    }

    pub(crate) fn view(&self) -> ViewMode {
        self.view
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }
}
