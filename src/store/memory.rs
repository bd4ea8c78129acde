use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::{Car, CarId, CarPatch, NewCar};

use super::{CarStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    cars: Vec<Car>,
    next_id: u64,
}

/// In-process store with sequential ids.
#[derive(Debug, Default)]
pub struct MemoryCarStore {
    inner: Mutex<Inner>,
}

impl MemoryCarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cars(cars: Vec<Car>) -> Self {
        let next_id = cars
            .iter()
            .filter_map(|car| car.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            inner: Mutex::new(Inner { cars, next_id }),
        }
    }

    pub fn snapshot(&self) -> Vec<Car> {
        self.lock().cars.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CarStore for MemoryCarStore {
    fn list(&self) -> Result<Vec<Car>, StoreError> {
        Ok(self.snapshot())
    }

    fn create(&self, car: &NewCar) -> Result<Car, StoreError> {
        let mut inner = self.lock();
        inner.next_id = inner
            .next_id
            .checked_add(1)
            .ok_or_else(|| StoreError::Transport("car id sequence exhausted".into()))?;
        let created = Car::from_new(CarId::new(inner.next_id.to_string()), car.clone());
        inner.cars.push(created.clone());
        Ok(created)
    }

    fn update(&self, id: &CarId, patch: &CarPatch) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let car = inner
            .cars
            .iter_mut()
            .find(|car| &car.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        car.apply(patch);
        Ok(())
    }

    fn delete(&self, id: &CarId) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let before = inner.cars.len();
        inner.cars.retain(|car| &car.id != id);
        if inner.cars.len() == before {
            return Err(StoreError::NotFound(id.clone()));
        }
        Ok(())
    }
}
