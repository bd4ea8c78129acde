#![deny(rust_2018_idioms)]

pub mod app;
pub mod domain;
pub mod form;
pub mod listing;
pub mod presentation;
pub mod store;

#[cfg(test)]
mod tests;

pub use app::{ConsoleMode, FleetConsole, UiOptions};
pub use domain::{Car, CarId, CarPatch, NewCar};
pub use listing::{AvailabilityFilter, ViewMode};
pub use store::{CarStore, DEFAULT_API_URL, HttpCarStore, MemoryCarStore, StoreError};

pub mod prelude {
    pub use super::{
        AvailabilityFilter, CarStore, ConsoleMode, FleetConsole, HttpCarStore, MemoryCarStore,
        UiOptions, ViewMode,
    };
}
