use std::fmt::Debug;

use pushkind_hospital::domain::employee::{Employee, Position};
use pushkind_hospital::domain::invoice::{Invoice, InvoiceStatus};
use pushkind_hospital::domain::medical_exam::MedicalExam;
use pushkind_hospital::domain::medicine::Medicine;
use pushkind_hospital::domain::patient::{Gender, Patient, PatientStatus};
use pushkind_hospital::domain::payment::Payment;
use pushkind_hospital::domain::query::{DateRange, QueryDescriptor, SortKey};
use pushkind_hospital::domain::resource::Resource;
use pushkind_hospital::domain::schedule::Schedule;
use pushkind_hospital::domain::types::InvoiceId;
use pushkind_hospital::pagination::Page;
use pushkind_hospital::query::evaluator::evaluate;
use pushkind_hospital::repository::batch::{BatchWriter, RecordBatch};
use pushkind_hospital::repository::{
    DieselRepository, InvoiceWriter, ResourceReader, ResourceWriter,
};

mod common;

use common::{
    at, date, new_employee, new_invoice, new_medical_exam, new_medicine, new_patient,
    new_payment, new_schedule,
};

const NAMES: [&str; 5] = ["Đặng Thị Ánh", "Nguyễn Văn An", "Lê Minh", "Anna", "Bob"];

/// Runs every query, plus each sortable field in both directions, through
/// SQL and through the evaluator over all stored rows.
fn assert_sql_agrees<R>(repo: &DieselRepository, queries: &[QueryDescriptor])
where
    R: Resource + PartialEq + Debug,
    DieselRepository: ResourceReader<R>,
{
    let all: Page<R> = repo.list_records(&QueryDescriptor::new(0, 100)).unwrap();
    let stored = all.content;
    assert!(!stored.is_empty(), "no {} seeded", R::SCHEMA.path);

    let sorts = R::SCHEMA.sortable.iter().flat_map(|field| {
        [
            QueryDescriptor::new(0, 6).sort(SortKey::asc(*field)),
            QueryDescriptor::new(1, 6).sort(SortKey::desc(*field)),
        ]
    });

    for query in queries.iter().cloned().chain(sorts) {
        let from_sql: Page<R> = repo.list_records(&query).unwrap();
        assert_eq!(
            from_sql,
            evaluate(&stored, &query),
            "{} {query:?}",
            R::SCHEMA.path
        );
    }
}

/// Every resource table, with repeated names, dates and amounts so sorts
/// have ties.
fn hospital_batch() -> RecordBatch {
    let positions = [Position::Doctor, Position::Nurse, Position::Doctor, Position::Pharmacist];
    let medicines = ["Paracetamol", "Amoxicillin", "Vitamin C", "Thuốc ho", "Ibuprofen"];

    RecordBatch {
        employees: (1..=12)
            .map(|n| new_employee(n, NAMES[(n % 5) as usize], positions[(n % 4) as usize]))
            .collect(),
        patients: (1..=6)
            .map(|n| new_patient(n, NAMES[(n % 5) as usize], Gender::Female))
            .collect(),
        invoices: (1..=6)
            .map(|n| {
                new_invoice(
                    n,
                    n as i32,
                    250_000 * i64::from(1 + n % 3),
                    InvoiceStatus::Unpaid,
                    at(2025, 1, n, 9, 0, 0),
                )
            })
            .collect(),
        medicines: (1..=15)
            .map(|n| new_medicine(n, medicines[(n % 5) as usize]))
            .collect(),
        medical_exams: (1..=20)
            .map(|n| {
                let patient = 1 + n % 6;
                new_medical_exam(
                    n,
                    patient as i32,
                    NAMES[(patient % 5) as usize],
                    1 + (n % 12) as i32,
                )
            })
            .collect(),
        schedules: (1..=20)
            .map(|n| {
                let doctor = 1 + n % 12;
                new_schedule(n, doctor as i32, NAMES[(doctor % 5) as usize])
            })
            .collect(),
        payments: (1..=15)
            .map(|n| {
                let invoice = 1 + n % 6;
                new_payment(n, invoice as i32, NAMES[(invoice % 5) as usize])
            })
            .collect(),
    }
}

fn seed_patients(repo: &DieselRepository, count: u32) {
    let patients: Vec<_> = (1..=count)
        .map(|n| {
            let gender = if n % 3 == 0 {
                Gender::Female
            } else {
                Gender::Male
            };
            let name = ["Anna", "Bob", "Nancy", "Linh", "An"][(n % 5) as usize];
            new_patient(n, name, gender)
        })
        .collect();
    assert_eq!(repo.create_records(&patients).unwrap(), count as usize);
}

#[test]
fn test_patient_pages_of_ten() {
    let test_db = common::TestDb::new("test_patient_pages_of_ten.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_patients(&repo, 25);

    let first: Page<Patient> =
        repo.list_records(&QueryDescriptor::new(0, 10)).unwrap();
    assert_eq!(first.content.len(), 10);
    assert_eq!(first.total_elements, 25);
    assert_eq!(first.total_pages, 3);
    assert!(!first.last);

    let third: Page<Patient> =
        repo.list_records(&QueryDescriptor::new(2, 10)).unwrap();
    assert_eq!(third.content.len(), 5);
    assert!(third.last);

    let beyond: Page<Patient> =
        repo.list_records(&QueryDescriptor::new(3, 10)).unwrap();
    assert!(beyond.content.is_empty());
    assert_eq!(beyond.total_elements, 25);
}

#[test]
fn test_patient_search_is_case_insensitive() {
    let test_db = common::TestDb::new("test_patient_search_is_case_insensitive.db");
    let repo = DieselRepository::new(test_db.pool());
    repo.create_records(&[
        new_patient(1, "Anna", Gender::Female),
        new_patient(2, "Bob", Gender::Male),
        new_patient(3, "Nancy", Gender::Female),
    ])
    .unwrap();

    let page: Page<Patient> = repo
        .list_records(&QueryDescriptor::default().search("AN"))
        .unwrap();

    let names: Vec<&str> = page.content.iter().map(|p| p.full_name.as_str()).collect();
    assert_eq!(names, vec!["Anna", "Nancy"]);
}

#[test]
fn test_search_wildcards_are_literal() {
    let test_db = common::TestDb::new("test_search_wildcards_are_literal.db");
    let repo = DieselRepository::new(test_db.pool());
    repo.create_records(&[
        new_patient(1, "Anna 100%", Gender::Female),
        new_patient(2, "Bob", Gender::Male),
    ])
    .unwrap();

    let page: Page<Patient> = repo
        .list_records(&QueryDescriptor::default().search("%"))
        .unwrap();
    assert_eq!(page.total_elements, 1);

    let page: Page<Patient> = repo
        .list_records(&QueryDescriptor::default().search("_"))
        .unwrap();
    assert_eq!(page.total_elements, 0);
}

#[test]
fn test_sql_agrees_with_evaluator() {
    let test_db = common::TestDb::new("test_sql_agrees_with_evaluator.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_patients(&repo, 40);

    assert_sql_agrees::<Patient>(
        &repo,
        &[
            QueryDescriptor::new(0, 10)
                .filter("gender", "FEMALE")
                .filter("status", "ACTIVE"),
            QueryDescriptor::new(1, 5).search("an").sort(SortKey::desc("createdAt")),
            QueryDescriptor::new(0, 50)
                .date_range(DateRange::new(date(2025, 1, 5), date(2025, 1, 12)).unwrap())
                .sort(SortKey::asc("dateOfBirth")),
            QueryDescriptor::new(0, 10).filter("ward", "A"),
            QueryDescriptor::new(9, 10),
        ],
    );
}

#[test]
fn test_sql_agrees_with_evaluator_for_every_resource() {
    let test_db = common::TestDb::new("test_sql_agrees_with_evaluator_for_every_resource.db");
    let repo = DieselRepository::new(test_db.pool());
    let counts = repo.create_batch(&hospital_batch()).unwrap();
    assert_eq!(counts.total(), 12 + 6 + 6 + 15 + 20 + 20 + 15);

    assert_sql_agrees::<Employee>(
        &repo,
        &[
            QueryDescriptor::new(0, 20).filter("departmentId", "2"),
            QueryDescriptor::new(0, 20).filter("departmentId", " 3 "),
            QueryDescriptor::new(0, 20).filter("departmentId", "two"),
            QueryDescriptor::new(0, 20)
                .filter("position", "DOCTOR")
                .filter("status", "ACTIVE"),
            QueryDescriptor::new(0, 20)
                .date_range(DateRange::new(date(2021, 3, 1), date(2022, 6, 30)).unwrap())
                .sort(SortKey::desc("hiredAt")),
            QueryDescriptor::new(0, 20).search("ÁNH"),
            QueryDescriptor::new(0, 20).search("staff1"),
        ],
    );

    assert_sql_agrees::<Invoice>(
        &repo,
        &[
            QueryDescriptor::new(0, 20).filter("patientId", "4"),
            QueryDescriptor::new(0, 20).search("nguyễn"),
        ],
    );

    assert_sql_agrees::<Medicine>(
        &repo,
        &[
            QueryDescriptor::new(0, 20).filter("categoryId", "1"),
            QueryDescriptor::new(0, 20).filter("categoryId", "1.5"),
            QueryDescriptor::new(0, 20).filter("status", "LOW_STOCK"),
            QueryDescriptor::new(0, 20)
                .date_range(DateRange::new(date(2026, 1, 1), date(2026, 12, 31)).unwrap())
                .sort(SortKey::asc("price")),
            QueryDescriptor::new(0, 20).search("THUỐC"),
        ],
    );

    assert_sql_agrees::<MedicalExam>(
        &repo,
        &[
            QueryDescriptor::new(0, 20).filter("patientId", "3"),
            QueryDescriptor::new(0, 20)
                .filter("doctorId", "5")
                .filter("status", "ORDERED"),
            QueryDescriptor::new(0, 20).filter("doctorId", "abc"),
            QueryDescriptor::new(0, 20)
                .date_range(DateRange::new(date(2025, 2, 1), date(2025, 2, 28)).unwrap())
                .sort(SortKey::desc("orderedAt")),
            QueryDescriptor::new(0, 20).search("siêu"),
            QueryDescriptor::new(0, 20).search("x-ray"),
        ],
    );

    assert_sql_agrees::<Schedule>(
        &repo,
        &[
            QueryDescriptor::new(0, 20).filter("doctorId", "7"),
            QueryDescriptor::new(0, 20)
                .filter("departmentId", "1")
                .filter("shift", "MORNING"),
            QueryDescriptor::new(0, 20).filter("status", "FULL"),
            QueryDescriptor::new(0, 20).filter("departmentId", "0"),
            QueryDescriptor::new(0, 20)
                .date_range(DateRange::new(date(2025, 3, 3), date(2025, 3, 6)).unwrap())
                .sort(SortKey::asc("workDate")),
            QueryDescriptor::new(0, 20).search("lê"),
        ],
    );

    assert_sql_agrees::<Payment>(
        &repo,
        &[
            QueryDescriptor::new(0, 20).filter("invoiceId", "2"),
            QueryDescriptor::new(0, 20).filter("invoiceId", "-"),
            QueryDescriptor::new(0, 20)
                .filter("method", "CARD")
                .filter("status", "COMPLETED"),
            QueryDescriptor::new(0, 20)
                .date_range(DateRange::new(date(2025, 1, 15), date(2025, 2, 10)).unwrap())
                .sort(SortKey::desc("amount")),
            QueryDescriptor::new(0, 20).search("HD0003"),
        ],
    );
}

#[test]
fn test_search_folds_vietnamese_case() {
    let test_db = common::TestDb::new("test_search_folds_vietnamese_case.db");
    let repo = DieselRepository::new(test_db.pool());
    repo.create_records(&[
        new_patient(1, "Đặng Thị Ánh", Gender::Female),
        new_patient(2, "Anh Tuấn", Gender::Male),
    ])
    .unwrap();
    let all: Page<Patient> = repo.list_records(&QueryDescriptor::new(0, 10)).unwrap();

    for needle in ["ánh", "ĐẶNG", "thị"] {
        let query = QueryDescriptor::default().search(needle);
        let page: Page<Patient> = repo.list_records(&query).unwrap();
        assert_eq!(page.total_elements, 1, "{needle}");
        assert_eq!(page.content[0].full_name, "Đặng Thị Ánh");
        assert_eq!(page, evaluate(&all.content, &query));
    }
}

#[test]
fn test_batch_is_all_or_nothing() {
    let test_db = common::TestDb::new("test_batch_is_all_or_nothing.db");
    let repo = DieselRepository::new(test_db.pool());

    let mut batch = hospital_batch();
    // Invoice 99 does not exist, so the last table fails its foreign key.
    batch.payments.push(new_payment(16, 99, "Bob"));
    assert!(repo.create_batch(&batch).is_err());

    let patients: Page<Patient> = repo.list_records(&QueryDescriptor::default()).unwrap();
    assert_eq!(patients.total_elements, 0);
    let employees: Page<Employee> = repo.list_records(&QueryDescriptor::default()).unwrap();
    assert_eq!(employees.total_elements, 0);

    batch.payments.pop();
    let counts = repo.create_batch(&batch).unwrap();
    assert_eq!(counts.payments, 15);
    assert_eq!(counts.employees, 12);
}

#[test]
fn test_equal_sort_keys_keep_insertion_order() {
    let test_db = common::TestDb::new("test_equal_sort_keys_keep_insertion_order.db");
    let repo = DieselRepository::new(test_db.pool());
    repo.create_records(&[
        new_patient(1, "Linh", Gender::Female),
        new_patient(2, "An", Gender::Male),
        new_patient(3, "Linh", Gender::Male),
        new_patient(4, "An", Gender::Female),
    ])
    .unwrap();

    for key in [SortKey::asc("fullName"), SortKey::desc("fullName")] {
        let page: Page<Patient> = repo
            .list_records(&QueryDescriptor::default().sort(key))
            .unwrap();
        let linh: Vec<i32> = page
            .content
            .iter()
            .filter(|p| p.full_name == "Linh")
            .map(|p| p.id.get())
            .collect();
        assert_eq!(linh, vec![1, 3]);
    }
}

fn seed_invoices(repo: &DieselRepository) {
    repo.create_records(&[new_patient(1, "Anna", Gender::Female)])
        .unwrap();
    repo.create_records(&[
        new_invoice(1, 1, 500_000, InvoiceStatus::Unpaid, at(2024, 12, 31, 23, 59, 59)),
        new_invoice(2, 1, 1_000_000, InvoiceStatus::Unpaid, at(2025, 1, 1, 0, 0, 0)),
        new_invoice(3, 1, 700_000, InvoiceStatus::Paid, at(2025, 1, 31, 23, 59, 59)),
        new_invoice(4, 1, 200_000, InvoiceStatus::Unpaid, at(2025, 2, 1, 0, 0, 0)),
    ])
    .unwrap();
}

#[test]
fn test_invoice_date_range_covers_end_of_day() {
    let test_db = common::TestDb::new("test_invoice_date_range_covers_end_of_day.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_invoices(&repo);

    let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
    let page: Page<Invoice> = repo
        .list_records(&QueryDescriptor::default().date_range(range))
        .unwrap();

    let codes: Vec<&str> = page.content.iter().map(|i| i.code.as_str()).collect();
    assert_eq!(codes, vec!["HD0002", "HD0003"]);
}

#[test]
fn test_invoice_amounts_sort_by_value() {
    let test_db = common::TestDb::new("test_invoice_amounts_sort_by_value.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_invoices(&repo);

    let page: Page<Invoice> = repo
        .list_records(&QueryDescriptor::default().sort(SortKey::desc("totalAmount")))
        .unwrap();

    let amounts: Vec<i64> = page.content.iter().map(|i| i.total_amount).collect();
    assert_eq!(amounts, vec![1_000_000, 700_000, 500_000, 200_000]);
}

#[test]
fn test_invoice_numeric_filter() {
    let test_db = common::TestDb::new("test_invoice_numeric_filter.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_invoices(&repo);

    let by_patient: Page<Invoice> = repo
        .list_records(&QueryDescriptor::default().filter("patientId", "1"))
        .unwrap();
    assert_eq!(by_patient.total_elements, 4);

    let garbage: Page<Invoice> = repo
        .list_records(&QueryDescriptor::default().filter("patientId", "one"))
        .unwrap();
    assert!(garbage.is_empty_result());
}

#[test]
fn test_cancel_only_unpaid_invoices() {
    let test_db = common::TestDb::new("test_cancel_only_unpaid_invoices.db");
    let repo = DieselRepository::new(test_db.pool());
    seed_invoices(&repo);

    let cancelled = repo
        .cancel_invoice(InvoiceId::new(1).unwrap(), "Duplicate")
        .unwrap()
        .expect("unpaid invoice is cancelled");
    assert_eq!(cancelled.status, InvoiceStatus::Cancelled);
    assert_eq!(cancelled.balance, 0);
    assert_eq!(cancelled.cancelled_reason.as_deref(), Some("Duplicate"));

    assert!(
        repo.cancel_invoice(InvoiceId::new(1).unwrap(), "Again")
            .unwrap()
            .is_none()
    );
    assert!(
        repo.cancel_invoice(InvoiceId::new(3).unwrap(), "Paid already")
            .unwrap()
            .is_none()
    );

    let stored: Option<Invoice> = repo.get_record(1).unwrap();
    assert_eq!(stored.unwrap().status, InvoiceStatus::Cancelled);
    let missing: Option<Invoice> = repo.get_record(99).unwrap();
    assert!(missing.is_none());
}

#[test]
fn test_patient_status_round_trips() {
    let test_db = common::TestDb::new("test_patient_status_round_trips.db");
    let repo = DieselRepository::new(test_db.pool());
    repo.create_records(&[new_patient(2, "Anna", Gender::Female)])
        .unwrap();

    let patient: Option<Patient> = repo.get_record(1).unwrap();
    let patient = patient.unwrap();
    assert_eq!(patient.status, PatientStatus::Active);
    assert_eq!(patient.gender, Gender::Female);
    assert_eq!(patient.code, "BN0002");
}
