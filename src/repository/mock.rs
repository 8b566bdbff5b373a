//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::invoice::Invoice;
use crate::domain::patient::Patient;
use crate::domain::query::QueryDescriptor;
use crate::domain::types::InvoiceId;
use crate::pagination::Page;
use crate::repository::errors::RepositoryResult;
use crate::repository::{InvoiceWriter, ResourceReader};

mock! {
    pub PatientRepository {}

    impl ResourceReader<Patient> for PatientRepository {
        fn list_records(&self, query: &QueryDescriptor) -> RepositoryResult<Page<Patient>>;
        fn get_record(&self, id: i32) -> RepositoryResult<Option<Patient>>;
    }
}

mock! {
    pub InvoiceRepository {}

    impl ResourceReader<Invoice> for InvoiceRepository {
        fn list_records(&self, query: &QueryDescriptor) -> RepositoryResult<Page<Invoice>>;
        fn get_record(&self, id: i32) -> RepositoryResult<Option<Invoice>>;
    }

    impl InvoiceWriter for InvoiceRepository {
        fn cancel_invoice(
            &self,
            id: InvoiceId,
            reason: &str,
        ) -> RepositoryResult<Option<Invoice>>;
    }
}
