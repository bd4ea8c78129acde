use crate::{
    domain::{Car, CarId},
    form::FormController,
};

use super::{
    dispatch::{RequestHandle, Ticket},
    keymap::KeymapContext,
    toast::Mutation,
};

pub(crate) struct FormPopup {
    pub(crate) form: FormController,
    pub(crate) pending: Option<RequestHandle>,
}

pub(crate) struct ConfirmPopup {
    pub(crate) id: CarId,
    pub(crate) name: String,
    pub(crate) pending: Option<RequestHandle>,
}

/// At most one modal is open; opening another replaces it.
pub(crate) enum Popup {
    Closed,
    Add(FormPopup),
    Update(FormPopup),
    DeleteConfirm(ConfirmPopup),
}

impl Popup {
    pub(crate) fn open_add(&mut self) {
        self.replace(Popup::Add(FormPopup {
            form: FormController::for_add(),
            pending: None,
        }));
    }

    pub(crate) fn open_update(&mut self, car: &Car) {
        self.replace(Popup::Update(FormPopup {
            form: FormController::for_update(car),
            pending: None,
        }));
    }

    pub(crate) fn open_delete(&mut self, car: &Car) {
        self.replace(Popup::DeleteConfirm(ConfirmPopup {
            id: car.id.clone(),
            name: car.name.clone(),
            pending: None,
        }));
    }

    /// Closes the modal. A request still in flight for it is cancelled.
    pub(crate) fn close(&mut self) {
        self.replace(Popup::Closed);
    }

    fn replace(&mut self, next: Popup) {
        if let Some(handle) = self.pending() {
            tracing::debug!(ticket = ?handle.ticket(), "cancelling request of replaced popup");
            handle.cancel();
        }
        *self = next;
    }

    pub(crate) fn is_open(&self) -> bool {
        !matches!(self, Popup::Closed)
    }

    pub(crate) fn context(&self) -> KeymapContext {
        match self {
            Popup::Closed => KeymapContext::List,
            Popup::Add(_) | Popup::Update(_) => KeymapContext::Form,
            Popup::DeleteConfirm(_) => KeymapContext::Confirm,
        }
    }

    pub(crate) fn mutation(&self) -> Option<Mutation> {
        match self {
            Popup::Closed => None,
            Popup::Add(_) => Some(Mutation::Add),
            Popup::Update(_) => Some(Mutation::Update),
            Popup::DeleteConfirm(_) => Some(Mutation::Delete),
        }
    }

    pub(crate) fn form(&self) -> Option<&FormController> {
        match self {
            Popup::Add(popup) | Popup::Update(popup) => Some(&popup.form),
            _ => None,
        }
    }

    pub(crate) fn form_popup_mut(&mut self) -> Option<&mut FormPopup> {
        match self {
            Popup::Add(popup) | Popup::Update(popup) => Some(popup),
            _ => None,
        }
    }

    pub(crate) fn pending(&self) -> Option<&RequestHandle> {
        match self {
            Popup::Closed => None,
            Popup::Add(popup) | Popup::Update(popup) => popup.pending.as_ref(),
            Popup::DeleteConfirm(popup) => popup.pending.as_ref(),
        }
    }

    pub(crate) fn set_pending(&mut self, handle: RequestHandle) {
        match self {
            Popup::Closed => handle.cancel(),
            Popup::Add(popup) | Popup::Update(popup) => popup.pending = Some(handle),
            Popup::DeleteConfirm(popup) => popup.pending = Some(handle),
        }
    }

    /// Whether `ticket` is the live request of the open popup.
    pub(crate) fn owns(&self, ticket: Ticket) -> bool {
        self.pending()
            .is_some_and(|handle| handle.ticket() == ticket && !handle.is_cancelled())
    }

    /// Clears the pending request after its result arrived.
    pub(crate) fn settle(&mut self) {
        match self {
            Popup::Closed => {}
            Popup::Add(popup) | Popup::Update(popup) => {
                popup.pending = None;
                popup.form.finish_failed();
            }
            Popup::DeleteConfirm(popup) => popup.pending = None,
        }
    }
}
