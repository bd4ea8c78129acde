use crate::form::{SubmitIntent, SubmitOutcome};

use super::super::{
    dispatch::{Completion, Operation, Output},
    popup::Popup,
    toast::{Mutation, Toast},
};
use super::App;

impl App {
    pub(super) fn submit_form(&mut self) {
        let Some(popup) = self.popup.form_popup_mut() else {
            return;
        };
        let operation = match popup.form.submit() {
            SubmitOutcome::Busy => return,
            SubmitOutcome::Invalid(count) => {
                tracing::debug!(count, "form submission blocked by validation");
                self.status.issues_remaining(count);
                return;
            }
            SubmitOutcome::Unchanged => {
                self.popup.close();
                self.status.set_raw("No changes to save.");
                return;
            }
            SubmitOutcome::Ready(SubmitIntent::Create(car)) => Operation::Create(car),
            SubmitOutcome::Ready(SubmitIntent::Update { id, patch }) => {
                Operation::Update(id, patch)
            }
        };
        let verb = match &operation {
            Operation::Create(_) => Mutation::Add,
            _ => Mutation::Update,
        }
        .progress_label();
        self.status.submitting(verb);
        let handle = self.dispatcher.submit(operation);
        self.popup.set_pending(handle);
    }

    pub(super) fn confirm_delete(&mut self) {
        let Popup::DeleteConfirm(popup) = &self.popup else {
            return;
        };
        if popup.pending.is_some() {
            return;
        }
        let handle = self.dispatcher.submit(Operation::Delete(popup.id.clone()));
        self.status.submitting(Mutation::Delete.progress_label());
        self.popup.set_pending(handle);
    }

    pub(super) fn apply_completion(&mut self, completion: Completion) {
        let Completion { ticket, result } = completion;

        if let Some(handle) = &self.list_request
            && handle.ticket() == ticket
        {
            self.list_request = None;
            match result {
                Ok(Output::Listed(cars)) => {
                    tracing::debug!(count = cars.len(), "car list refreshed");
                    self.listing.replace(cars);
                    if self.status.is_loading() {
                        self.status.ready();
                    }
                }
                Ok(other) => {
                    tracing::warn!(?other, "unexpected output for a list request");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to fetch cars");
                    let toast = Toast::list_failed(&err, self.toast_lifetime());
                    self.listing.fail(toast.description.clone());
                    self.toast = Some(toast);
                    self.status.ready();
                }
            }
            return;
        }

        if !self.popup.owns(ticket) {
            tracing::debug!(?ticket, "dropping stale completion");
            return;
        }
        let Some(mutation) = self.popup.mutation() else {
            return;
        };
        match result {
            Ok(output) => {
                if let Output::Created(car) = &output {
                    tracing::info!(id = %car.id, name = %car.name, "car created");
                } else {
                    tracing::info!(?mutation, "car mutation succeeded");
                }
                self.toast = Some(Toast::succeeded(mutation, self.toast_lifetime()));
                self.popup.settle();
                self.popup.close();
                self.status.ready();
                self.request_refresh();
            }
            Err(err) => {
                tracing::warn!(?mutation, error = %err, "car mutation failed");
                self.toast = Some(Toast::failed(mutation, &err, self.toast_lifetime()));
                self.popup.settle();
                self.status
                    .set_raw(format!("{} failed.", mutation.progress_label()));
            }
        }
    }
}
