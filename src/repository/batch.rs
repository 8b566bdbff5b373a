use diesel::prelude::*;
use serde::Deserialize;

use crate::domain::employee::NewEmployee;
use crate::domain::invoice::NewInvoice;
use crate::domain::medical_exam::NewMedicalExam;
use crate::domain::medicine::NewMedicine;
use crate::domain::patient::NewPatient;
use crate::domain::payment::NewPayment;
use crate::domain::schedule::NewSchedule;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, employee, invoice, medical_exam, medicine, patient, payment, schedule,
};

/// Drafts for every resource table, as read from a fixtures file.
///
/// Missing arrays deserialize as empty.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecordBatch {
    pub employees: Vec<NewEmployee>,
    pub patients: Vec<NewPatient>,
    pub invoices: Vec<NewInvoice>,
    pub medicines: Vec<NewMedicine>,
    pub medical_exams: Vec<NewMedicalExam>,
    pub schedules: Vec<NewSchedule>,
    pub payments: Vec<NewPayment>,
}

/// Rows inserted per table by [`BatchWriter::create_batch`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchCounts {
    pub employees: usize,
    pub patients: usize,
    pub invoices: usize,
    pub medicines: usize,
    pub medical_exams: usize,
    pub schedules: usize,
    pub payments: usize,
}

impl BatchCounts {
    pub fn total(&self) -> usize {
        self.employees
            + self.patients
            + self.invoices
            + self.medicines
            + self.medical_exams
            + self.schedules
            + self.payments
    }
}

pub trait BatchWriter {
    /// Inserts the whole batch, parents first, or nothing at all.
    fn create_batch(&self, batch: &RecordBatch) -> RepositoryResult<BatchCounts>;
}

impl BatchWriter for DieselRepository {
    fn create_batch(&self, batch: &RecordBatch) -> RepositoryResult<BatchCounts> {
        let mut conn = self.conn()?;

        conn.transaction::<BatchCounts, RepositoryError, _>(|conn| {
            Ok(BatchCounts {
                employees: employee::insert(conn, &batch.employees)?,
                patients: patient::insert(conn, &batch.patients)?,
                invoices: invoice::insert(conn, &batch.invoices)?,
                medicines: medicine::insert(conn, &batch.medicines)?,
                medical_exams: medical_exam::insert(conn, &batch.medical_exams)?,
                schedules: schedule::insert(conn, &batch.schedules)?,
                payments: payment::insert(conn, &batch.payments)?,
            })
        })
    }
}
