use std::sync::Arc;

use anyhow::Result;

use crate::store::CarStore;

use super::{
    options::{ConsoleMode, UiOptions},
    runtime::App,
};

/// Terminal console over a car store: the listing plus, in admin mode, the
/// add, update and delete workflows.
pub struct FleetConsole {
    store: Arc<dyn CarStore>,
    title: Option<String>,
    source_label: Option<String>,
    mode: ConsoleMode,
    options: UiOptions,
}

impl FleetConsole {
    pub fn new(store: impl CarStore + 'static) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(store: Arc<dyn CarStore>) -> Self {
        Self {
            store,
            title: None,
            source_label: None,
            mode: ConsoleMode::default(),
            options: UiOptions::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Shown on the header border, e.g. the store's base URL.
    pub fn with_source_label(mut self, label: impl Into<String>) -> Self {
        self.source_label = Some(label.into());
        self
    }

    pub fn with_mode(mut self, mode: ConsoleMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_options(mut self, options: UiOptions) -> Self {
        self.options = options;
        self
    }

    /// Takes over the terminal until the user quits.
    pub fn run(self) -> Result<()> {
        let FleetConsole {
            store,
            title,
            source_label,
            mode,
            options,
        } = self;

        let title = title.unwrap_or_else(|| match mode {
            ConsoleMode::Admin => "WheelDeal Admin".to_string(),
            ConsoleMode::Public => "WheelDeal Cars".to_string(),
        });
        let source_label = source_label.unwrap_or_else(|| "car store".to_string());
        tracing::info!(?mode, source = %source_label, "starting console");

        let mut app = App::new(store, title, source_label, mode, options);
        app.run()
    }
}
