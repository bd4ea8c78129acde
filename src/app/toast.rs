use std::time::{Duration, Instant};

use crate::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

/// The mutation a popup performs; drives notification wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Add,
    Update,
    Delete,
}

impl Mutation {
    fn gerund(self) -> &'static str {
        match self {
            Mutation::Add => "adding",
            Mutation::Update => "updating",
            Mutation::Delete => "deleting",
        }
    }

    pub fn progress_label(self) -> &'static str {
        match self {
            Mutation::Add => "Adding",
            Mutation::Update => "Updating",
            Mutation::Delete => "Deleting",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

impl Toast {
    fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        level: ToastLevel,
        lifetime: Duration,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level,
            expires_at: Instant::now() + lifetime,
        }
    }

    pub fn succeeded(mutation: Mutation, lifetime: Duration) -> Self {
        let (title, description) = match mutation {
            Mutation::Add => ("Car Added Successfully!", "The car has been added."),
            Mutation::Update => (
                "Car Updated Successfully!",
                "The car details have been updated.",
            ),
            Mutation::Delete => ("Car Deleted Successfully!", "The car has been removed."),
        };
        Self::new(title, description, ToastLevel::Success, lifetime)
    }

    pub fn failed(mutation: Mutation, error: &StoreError, lifetime: Duration) -> Self {
        if let StoreError::Unauthorized(_) = error {
            return Self::access_denied(lifetime);
        }
        if error.is_rejection() {
            let title = match mutation {
                Mutation::Add => "Error Adding Car",
                Mutation::Update => "Error Updating Car",
                Mutation::Delete => "Error Deleting Car",
            };
            let description = format!("There was an issue {} the car.", mutation.gerund());
            return Self::new(title, description, ToastLevel::Error, lifetime);
        }
        let description = format!(
            "An error occurred while {} the car. {error}",
            mutation.gerund()
        );
        Self::new("Error", description, ToastLevel::Error, lifetime)
    }

    pub fn list_failed(error: &StoreError, lifetime: Duration) -> Self {
        if let StoreError::Unauthorized(_) = error {
            return Self::access_denied(lifetime);
        }
        Self::new(
            "Error",
            format!("Failed to fetch car data. {error}"),
            ToastLevel::Error,
            lifetime,
        )
    }

    fn access_denied(lifetime: Duration) -> Self {
        Self::new(
            "Access Denied",
            "The store rejected the admin token.",
            ToastLevel::Error,
            lifetime,
        )
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
