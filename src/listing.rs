//! View-agnostic listing state: the last fetched cars, the availability filter
//! and the selection. Renderers only read from here.

use crate::domain::Car;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AvailabilityFilter {
    #[default]
    All,
    Available,
    Unavailable,
}

impl AvailabilityFilter {
    pub fn matches(self, car: &Car) -> bool {
        match self {
            AvailabilityFilter::All => true,
            AvailabilityFilter::Available => car.availability,
            AvailabilityFilter::Unavailable => !car.availability,
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            AvailabilityFilter::All => AvailabilityFilter::Available,
            AvailabilityFilter::Available => AvailabilityFilter::Unavailable,
            AvailabilityFilter::Unavailable => AvailabilityFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AvailabilityFilter::All => "All",
            AvailabilityFilter::Available => "Available",
            AvailabilityFilter::Unavailable => "Unavailable",
        }
    }
}

/// Which renderer draws the listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Cards => ViewMode::Table,
            ViewMode::Table => ViewMode::Cards,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Cards => "cards",
            ViewMode::Table => "table",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct CarListing {
    cars: Vec<Car>,
    filter: AvailabilityFilter,
    state: LoadState,
    refreshing: bool,
    selected: usize,
}

impl Default for CarListing {
    fn default() -> Self {
        Self::new(AvailabilityFilter::All)
    }
}

impl CarListing {
    pub fn new(filter: AvailabilityFilter) -> Self {
        Self {
            cars: Vec::new(),
            filter,
            state: LoadState::Loading,
            refreshing: false,
            selected: 0,
        }
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn filter(&self) -> AvailabilityFilter {
        self.filter
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Cars passing the filter, recomputed on every call.
    pub fn visible(&self) -> Vec<&Car> {
        self.cars
            .iter()
            .filter(|car| self.filter.matches(car))
            .collect()
    }

    pub fn visible_len(&self) -> usize {
        self.cars
            .iter()
            .filter(|car| self.filter.matches(car))
            .count()
    }

    /// Index into `visible()`, or `None` when nothing is visible.
    pub fn selected(&self) -> Option<usize> {
        let len = self.visible_len();
        (len > 0).then(|| self.selected.min(len - 1))
    }

    pub fn selected_car(&self) -> Option<&Car> {
        let index = self.selected()?;
        self.visible().get(index).copied()
    }

    pub fn select_step(&mut self, delta: i32) {
        let len = self.visible_len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected.min(len - 1) as i64;
        self.selected = (current + delta as i64).rem_euclid(len as i64) as usize;
    }

    pub fn set_filter(&mut self, filter: AvailabilityFilter) {
        self.filter = filter;
        self.clamp_selection();
    }

    pub fn cycle_filter(&mut self) -> AvailabilityFilter {
        self.set_filter(self.filter.cycle());
        self.filter
    }

    /// Marks a fetch in flight. Already loaded cars stay visible meanwhile.
    pub fn begin_refresh(&mut self) {
        if self.state == LoadState::Ready {
            self.refreshing = true;
        } else {
            self.state = LoadState::Loading;
        }
    }

    /// Replaces the whole list with the store's answer.
    pub fn replace(&mut self, cars: Vec<Car>) {
        let keep = self.selected_car().map(|car| car.id.clone());
        self.cars = cars;
        self.state = LoadState::Ready;
        self.refreshing = false;
        self.selected = keep
            .and_then(|id| self.visible().iter().position(|car| car.id == id))
            .unwrap_or(0);
        self.clamp_selection();
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.refreshing = false;
        if self.state != LoadState::Ready {
            self.state = LoadState::Failed(message.into());
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        self.selected = if len == 0 { 0 } else { self.selected.min(len - 1) };
    }
}
