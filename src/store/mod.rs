//! Remote car store: the four CRUD operations the console needs, behind a trait
//! so the UI can run against HTTP or an in-process store.

mod http;
mod memory;

use thiserror::Error;

use crate::domain::{Car, CarId, CarPatch, NewCar};

pub use http::{HttpCarStore, HttpCarStoreBuilder};
pub use memory::MemoryCarStore;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("store answered with status {0}")]
    Status(u16),

    #[error("store rejected the credentials (status {0})")]
    Unauthorized(u16),

    #[error("invalid response body: {0}")]
    Decode(String),

    #[error("car {0} not found")]
    NotFound(CarId),
}

impl StoreError {
    /// The store answered, but not with success.
    pub fn is_rejection(&self) -> bool {
        matches!(self, StoreError::Status(_) | StoreError::NotFound(_))
    }
}

/// CRUD access to the authoritative car collection.
///
/// Success is reported only after the store confirmed the operation; callers
/// re-list to observe canonical state.
pub trait CarStore: Send + Sync {
    /// All cars, in the order the store delivers them.
    fn list(&self) -> Result<Vec<Car>, StoreError>;

    /// Persists a new car. The store assigns the id.
    fn create(&self, car: &NewCar) -> Result<Car, StoreError>;

    /// Replaces the fields present in `patch`.
    fn update(&self, id: &CarId, patch: &CarPatch) -> Result<(), StoreError>;

    fn delete(&self, id: &CarId) -> Result<(), StoreError>;
}
