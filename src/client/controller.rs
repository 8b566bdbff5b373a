//! State of one list screen.

use crate::client::error::TransportError;
use crate::client::transport::{Transport, fetch_page};
use crate::domain::query::QueryDescriptor;
use crate::domain::resource::Resource;
use crate::pagination::{Page, PageLinks};
use crate::query::builder::QueryBuilder;

/// Identifies one request; only the latest ticket may update the state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// What a list screen shows.
#[derive(Clone, Debug, PartialEq)]
pub enum ListState<R> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight; the last page stays on screen meanwhile.
    Loading { previous: Option<Page<R>> },
    Loaded(Page<R>),
    /// The query matched nothing; the screen offers to clear filters.
    Empty(Page<R>),
    /// The request failed; the screen offers to retry.
    Failed(TransportError),
}

impl<R> ListState<R> {
    /// The page to display, if any.
    pub fn page(&self) -> Option<&Page<R>> {
        match self {
            ListState::Loaded(page) | ListState::Empty(page) => Some(page),
            ListState::Loading { previous } => previous.as_ref(),
            ListState::Idle | ListState::Failed(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ListState::Loading { .. })
    }

    fn into_page(self) -> Option<Page<R>> {
        match self {
            ListState::Loaded(page) | ListState::Empty(page) => Some(page),
            ListState::Loading { previous } => previous,
            ListState::Idle | ListState::Failed(_) => None,
        }
    }
}

/// Owns the descriptor and the visible state of a list of `R`.
#[derive(Debug)]
pub struct ListController<R> {
    builder: QueryBuilder,
    state: ListState<R>,
    latest: u64,
}

impl<R: Resource> ListController<R> {
    pub fn new(size: usize) -> Self {
        Self::with_builder(QueryBuilder::new(size))
    }

    pub fn with_builder(builder: QueryBuilder) -> Self {
        Self {
            builder,
            state: ListState::Idle,
            latest: 0,
        }
    }

    pub fn query(&self) -> &QueryDescriptor {
        self.builder.descriptor()
    }

    /// Mutable access to the controls; changes take effect on the next request.
    pub fn builder_mut(&mut self) -> &mut QueryBuilder {
        &mut self.builder
    }

    pub fn state(&self) -> &ListState<R> {
        &self.state
    }

    /// Issues a new ticket for the current descriptor and enters `Loading`.
    pub fn begin_request(&mut self) -> (Ticket, QueryDescriptor) {
        self.latest += 1;
        let previous = std::mem::replace(&mut self.state, ListState::Idle).into_page();
        self.state = ListState::Loading { previous };
        (Ticket(self.latest), self.builder.snapshot())
    }

    /// Applies a response. Returns `false` when the ticket is stale and the
    /// response was dropped.
    pub fn complete(&mut self, ticket: Ticket, result: Result<Page<R>, TransportError>) -> bool {
        if ticket.0 != self.latest {
            log::debug!(
                "Dropping stale {} response (ticket {}, latest {})",
                R::SCHEMA.path,
                ticket.0,
                self.latest
            );
            return false;
        }
        self.state = match result {
            Ok(page) if page.is_empty_result() => ListState::Empty(page),
            Ok(page) => ListState::Loaded(page),
            Err(err) => {
                log::warn!("Loading {} failed: {err}", R::SCHEMA.path);
                ListState::Failed(err)
            }
        };
        true
    }

    /// Fetches the current descriptor and applies the response.
    pub async fn refresh<T: Transport + ?Sized>(&mut self, transport: &T) -> &ListState<R> {
        let (ticket, query) = self.begin_request();
        let result = fetch_page::<R, T>(transport, &query).await;
        self.complete(ticket, result);
        &self.state
    }

    /// Pager for the page on screen.
    pub fn page_links(&self) -> Option<PageLinks> {
        self.state.page().map(PageLinks::for_page)
    }
}
