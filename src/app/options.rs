use std::{sync::Arc, time::Duration};

use anyhow::{Result, anyhow};

use super::keymap::{self, KeymapStore};
use crate::listing::{AvailabilityFilter, ViewMode};

/// Which surface the console exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConsoleMode {
    /// Listing plus add, update and delete workflows.
    #[default]
    Admin,
    /// Read-only listing.
    Public,
}

impl ConsoleMode {
    pub fn allows_mutations(self) -> bool {
        self == ConsoleMode::Admin
    }
}

#[derive(Debug, Clone)]
pub struct UiOptions {
    pub tick_rate: Duration,
    pub toast_duration: Duration,
    pub show_help: bool,
    pub view: ViewMode,
    pub filter: AvailabilityFilter,
    pub(crate) keymap_store: Arc<KeymapStore>,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
            toast_duration: Duration::from_secs(4),
            show_help: true,
            view: ViewMode::default(),
            filter: AvailabilityFilter::default(),
            keymap_store: keymap::default_store(),
        }
    }
}

impl UiOptions {
    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.toast_duration = duration;
        self
    }

    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_view(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    pub fn with_filter(mut self, filter: AvailabilityFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replaces the built-in key bindings with a keymap document.
    pub fn with_keymap_json(mut self, source: &str) -> Result<Self> {
        let store = KeymapStore::from_json(source).map_err(|err| anyhow!(err))?;
        self.keymap_store = Arc::new(store);
        Ok(self)
    }
}
