//! Vector-backed repository evaluating queries in memory.
//!
//! Stands in for the database in route tests and demos; answers are the
//! reference answers the SQL repository must agree with.

use std::sync::{Arc, RwLock};

use crate::domain::invoice::{Invoice, InvoiceStatus};
use crate::domain::query::QueryDescriptor;
use crate::domain::resource::Resource;
use crate::domain::types::InvoiceId;
use crate::pagination::Page;
use crate::query::evaluator::evaluate;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{InvoiceWriter, ResourceReader};

#[derive(Debug)]
pub struct MemoryRepository<R> {
    records: Arc<RwLock<Vec<R>>>,
}

impl<R> Clone for MemoryRepository<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

fn poisoned<E>(_: E) -> RepositoryError {
    RepositoryError::Unexpected("in-memory store lock poisoned".to_string())
}

impl<R> MemoryRepository<R> {
    /// Stores `records` in the given order.
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

impl<R: Resource> ResourceReader<R> for MemoryRepository<R> {
    fn list_records(&self, query: &QueryDescriptor) -> RepositoryResult<Page<R>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(evaluate(&records, query))
    }

    fn get_record(&self, id: i32) -> RepositoryResult<Option<R>> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.iter().find(|record| record.id() == id).cloned())
    }
}

impl InvoiceWriter for MemoryRepository<Invoice> {
    fn cancel_invoice(&self, id: InvoiceId, reason: &str) -> RepositoryResult<Option<Invoice>> {
        let mut records = self.records.write().map_err(poisoned)?;
        let Some(invoice) = records
            .iter_mut()
            .find(|invoice| invoice.id == id && invoice.status.is_cancellable())
        else {
            return Ok(None);
        };

        invoice.status = InvoiceStatus::Cancelled;
        invoice.balance = 0;
        invoice.cancelled_reason = Some(reason.to_string());
        Ok(Some(invoice.clone()))
    }
}
