//! A list screen driven by UI events.
//!
//! [`ListSession`] runs a [`ListController`] on a tokio task. Search input is
//! debounced; every other event issues a request at once. Requests run
//! concurrently and only the response to the latest one is shown.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use crate::client::controller::{ListController, ListState, Ticket};
use crate::client::error::TransportError;
use crate::client::transport::{Transport, fetch_page};
use crate::domain::resource::Resource;
use crate::pagination::Page;

/// User input on a list screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListEvent {
    Search(String),
    Filter { field: String, value: String },
    DateRange {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    Sort(String),
    Page(i64),
    PageSize(usize),
    ClearFilters,
    /// Re-issues the current descriptor after a failure.
    Retry,
}

enum Action {
    Fetch,
    Debounce,
    Ignore,
}

type Response<R> = (Ticket, Result<Page<R>, TransportError>);

fn apply<R: Resource>(controller: &mut ListController<R>, event: ListEvent) -> Action {
    let builder = controller.builder_mut();
    match event {
        ListEvent::Search(text) => {
            builder.set_search(&text);
            return Action::Debounce;
        }
        ListEvent::Filter { field, value } => builder.set_filter(&field, &value),
        ListEvent::DateRange { start, end } => {
            if let Err(err) = builder.set_date_range(start, end) {
                log::warn!("Ignoring date range for {}: {err}", R::SCHEMA.path);
                return Action::Ignore;
            }
        }
        ListEvent::Sort(field) => builder.set_sort(&field),
        ListEvent::Page(index) => builder.set_page(index),
        ListEvent::PageSize(size) => builder.set_page_size(size),
        ListEvent::ClearFilters => builder.clear_filters(),
        ListEvent::Retry => {}
    }
    Action::Fetch
}

fn issue<R, T>(
    controller: &mut ListController<R>,
    transport: &Arc<T>,
    responses: &mpsc::UnboundedSender<Response<R>>,
) where
    R: Resource,
    T: Transport + 'static,
{
    let (ticket, query) = controller.begin_request();
    let transport = Arc::clone(transport);
    let responses = responses.clone();
    tokio::spawn(async move {
        let result = fetch_page::<R, T>(transport.as_ref(), &query).await;
        // The session may have closed meanwhile.
        let _ = responses.send((ticket, result));
    });
}

async fn run<R, T>(
    mut controller: ListController<R>,
    transport: Arc<T>,
    debounce: Duration,
    mut events: mpsc::UnboundedReceiver<ListEvent>,
    state: watch::Sender<ListState<R>>,
) where
    R: Resource,
    T: Transport + 'static,
{
    let (responses_tx, mut responses) = mpsc::unbounded_channel::<Response<R>>();
    let mut deadline: Option<Instant> = None;

    issue(&mut controller, &transport, &responses_tx);
    state.send_replace(controller.state().clone());

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                match apply(&mut controller, event) {
                    Action::Fetch => {
                        deadline = None;
                        issue(&mut controller, &transport, &responses_tx);
                        state.send_replace(controller.state().clone());
                    }
                    Action::Debounce => deadline = Some(Instant::now() + debounce),
                    Action::Ignore => {}
                }
            }
            Some((ticket, result)) = responses.recv() => {
                if controller.complete(ticket, result) {
                    state.send_replace(controller.state().clone());
                }
            }
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                issue(&mut controller, &transport, &responses_tx);
                state.send_replace(controller.state().clone());
            }
        }
    }
}

/// Handle to a running list session.
pub struct ListSession<R: Resource> {
    events: mpsc::UnboundedSender<ListEvent>,
    state: watch::Receiver<ListState<R>>,
    task: JoinHandle<()>,
}

impl<R: Resource> ListSession<R> {
    /// Starts the session and immediately loads the first page.
    pub fn spawn<T>(controller: ListController<R>, transport: Arc<T>, debounce: Duration) -> Self
    where
        T: Transport + 'static,
    {
        let (events, events_rx) = mpsc::unbounded_channel();
        let (state_tx, state) = watch::channel(controller.state().clone());
        let task = tokio::spawn(run(controller, transport, debounce, events_rx, state_tx));
        Self {
            events,
            state,
            task,
        }
    }

    /// Queues an event; returns `false` once the session has stopped.
    pub fn send(&self, event: ListEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// Receiver of every visible state change.
    pub fn subscribe(&self) -> watch::Receiver<ListState<R>> {
        self.state.clone()
    }

    pub fn state(&self) -> ListState<R> {
        self.state.borrow().clone()
    }

    /// Stops accepting events and waits for the session task to finish.
    pub async fn close(self) {
        drop(self.events);
        if let Err(err) = self.task.await {
            log::error!("List session for {} ended abnormally: {err}", R::SCHEMA.path);
        }
    }
}
