//! Runs store calls off the UI thread and hands the results back through a
//! channel drained on every tick.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::domain::{Car, CarId, CarPatch, NewCar};
use crate::store::{CarStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Ticket(u64);

/// Tracks one in-flight request. Cancelling drops its result on arrival.
#[derive(Debug, Clone)]
pub(crate) struct RequestHandle {
    ticket: Ticket,
    cancelled: Arc<AtomicBool>,
}

impl RequestHandle {
    pub(crate) fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Operation {
    List,
    Create(NewCar),
    Update(CarId, CarPatch),
    Delete(CarId),
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create(_) => "create",
            Operation::Update(..) => "update",
            Operation::Delete(_) => "delete",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Output {
    Listed(Vec<Car>),
    Created(Car),
    Updated,
    Deleted,
}

#[derive(Debug)]
pub(crate) struct Completion {
    pub(crate) ticket: Ticket,
    pub(crate) result: Result<Output, StoreError>,
}

pub(crate) struct Dispatcher {
    store: Arc<dyn CarStore>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
    next_ticket: u64,
}

impl Dispatcher {
    pub(crate) fn new(store: Arc<dyn CarStore>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            store,
            sender,
            receiver,
            next_ticket: 0,
        }
    }

    /// Starts `operation` on a worker thread.
    pub(crate) fn submit(&mut self, operation: Operation) -> RequestHandle {
        self.next_ticket += 1;
        let handle = RequestHandle {
            ticket: Ticket(self.next_ticket),
            cancelled: Arc::new(AtomicBool::new(false)),
        };
        let name = operation.name();
        tracing::debug!(ticket = handle.ticket.0, operation = name, "dispatching");

        let worker_handle = handle.clone();
        let store = Arc::clone(&self.store);
        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name(format!("wheeldeal-{name}"))
            .spawn(move || run_operation(store.as_ref(), operation, &worker_handle, &sender));
        if let Err(err) = spawned {
            tracing::error!(error = %err, "failed to spawn request worker");
            let _ = self.sender.send(Completion {
                ticket: handle.ticket,
                result: Err(StoreError::Transport(err.to_string())),
            });
        }
        handle
    }

    pub(crate) fn try_next(&self) -> Option<Completion> {
        self.receiver.try_recv().ok()
    }

    pub(crate) fn wait_next(&self, timeout: Duration) -> Option<Completion> {
        match self.receiver.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }
}

fn run_operation(
    store: &dyn CarStore,
    operation: Operation,
    handle: &RequestHandle,
    sender: &Sender<Completion>,
) {
    if handle.is_cancelled() {
        tracing::debug!(ticket = handle.ticket.0, "request cancelled before start");
        return;
    }
    let result = match operation {
        Operation::List => store.list().map(Output::Listed),
        Operation::Create(car) => store.create(&car).map(Output::Created),
        Operation::Update(id, patch) => store.update(&id, &patch).map(|()| Output::Updated),
        Operation::Delete(id) => store.delete(&id).map(|()| Output::Deleted),
    };
    if handle.is_cancelled() {
        tracing::debug!(ticket = handle.ticket.0, "dropping result of cancelled request");
        return;
    }
    // The receiver is gone once the console has shut down.
    let _ = sender.send(Completion {
        ticket: handle.ticket,
        result,
    });
}
