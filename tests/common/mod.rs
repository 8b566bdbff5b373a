#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use pushkind_hospital::db::{DbPool, establish_connection_pool};
use pushkind_hospital::domain::employee::{EmploymentStatus, NewEmployee, Position};
use pushkind_hospital::domain::invoice::{InvoiceStatus, NewInvoice};
use pushkind_hospital::domain::medical_exam::{ExamStatus, NewMedicalExam};
use pushkind_hospital::domain::medicine::{MedicineStatus, NewMedicine};
use pushkind_hospital::domain::patient::{Gender, NewPatient, PatientStatus};
use pushkind_hospital::domain::payment::{NewPayment, PaymentMethod, PaymentStatus};
use pushkind_hospital::domain::schedule::{NewSchedule, ScheduleStatus, Shift};
use pushkind_hospital::domain::types::{CategoryId, DepartmentId, EmployeeId, InvoiceId, PatientId};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// A migrated SQLite database living in a temporary directory.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 temp path"))
            .expect("create pool");
        pool.get()
            .expect("get connection")
            .run_pending_migrations(MIGRATIONS)
            .expect("run migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, s).unwrap()
}

pub fn new_patient(n: u32, name: &str, gender: Gender) -> NewPatient {
    NewPatient {
        code: format!("BN{n:04}"),
        full_name: name.to_string(),
        gender,
        date_of_birth: date(1980 + (n % 30) as i32, 1 + n % 12, 1 + n % 28),
        phone: format!("090{n:07}"),
        address: None,
        status: if n % 2 == 0 {
            PatientStatus::Active
        } else {
            PatientStatus::Inactive
        },
        created_at: at(2025, 1, 1 + n % 28, 9, 0, 0),
    }
}

pub fn new_invoice(
    n: u32,
    patient_id: i32,
    total: i64,
    status: InvoiceStatus,
    issued_at: NaiveDateTime,
) -> NewInvoice {
    NewInvoice {
        code: format!("HD{n:04}"),
        patient_id: PatientId::new(patient_id).unwrap(),
        patient_name: "Anna".to_string(),
        total_amount: total,
        paid_amount: if status == InvoiceStatus::Paid { total } else { 0 },
        status,
        issued_at,
    }
}

pub fn new_employee(n: u32, name: &str, position: Position) -> NewEmployee {
    NewEmployee {
        code: format!("NV{n:04}"),
        full_name: name.to_string(),
        email: format!("staff{n}@benhvien.vn"),
        position,
        department_id: DepartmentId::new(1 + (n % 3) as i32).unwrap(),
        status: match n % 3 {
            0 => EmploymentStatus::Active,
            1 => EmploymentStatus::OnLeave,
            _ => EmploymentStatus::Terminated,
        },
        hired_at: date(2020 + (n % 4) as i32, 1 + n % 12, 1 + n % 28),
    }
}

pub fn new_medicine(n: u32, name: &str) -> NewMedicine {
    NewMedicine {
        code: format!("TH{n:04}"),
        name: name.to_string(),
        category_id: CategoryId::new(1 + (n % 4) as i32).unwrap(),
        unit: "box".to_string(),
        price: 10_000 * i64::from(1 + n % 7),
        stock: i64::from((n * 13) % 50),
        expiry_date: date(2025 + (n % 3) as i32, 1 + n % 12, 1 + n % 28),
        status: match n % 4 {
            0 => MedicineStatus::Available,
            1 => MedicineStatus::LowStock,
            2 => MedicineStatus::OutOfStock,
            _ => MedicineStatus::Discontinued,
        },
    }
}

pub fn new_medical_exam(
    n: u32,
    patient_id: i32,
    patient_name: &str,
    doctor_id: i32,
) -> NewMedicalExam {
    NewMedicalExam {
        code: format!("XN{n:04}"),
        patient_id: PatientId::new(patient_id).unwrap(),
        patient_name: patient_name.to_string(),
        doctor_id: EmployeeId::new(doctor_id).unwrap(),
        test_name: ["Blood count", "Chest X-ray", "Siêu âm"][(n % 3) as usize].to_string(),
        status: match n % 4 {
            0 => ExamStatus::Ordered,
            1 => ExamStatus::InProgress,
            2 => ExamStatus::Completed,
            _ => ExamStatus::Cancelled,
        },
        result: None,
        ordered_at: at(2025, 1 + n % 3, 1 + n % 28, 8 + n % 10, 0, 0),
    }
}

pub fn new_schedule(n: u32, doctor_id: i32, doctor_name: &str) -> NewSchedule {
    let (shift, start, end) = match n % 3 {
        0 => (Shift::Morning, 7, 12),
        1 => (Shift::Afternoon, 13, 18),
        _ => (Shift::Night, 18, 23),
    };
    NewSchedule {
        doctor_id: EmployeeId::new(doctor_id).unwrap(),
        doctor_name: doctor_name.to_string(),
        department_id: DepartmentId::new(1 + (n % 3) as i32).unwrap(),
        work_date: date(2025, 3, 1 + n % 10),
        shift,
        start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
        max_patients: 20,
        booked_patients: (n % 21) as i32,
        status: match n % 3 {
            0 => ScheduleStatus::Available,
            1 => ScheduleStatus::Full,
            _ => ScheduleStatus::Cancelled,
        },
    }
}

pub fn new_payment(n: u32, invoice_id: i32, patient_name: &str) -> NewPayment {
    NewPayment {
        invoice_id: InvoiceId::new(invoice_id).unwrap(),
        invoice_code: format!("HD{invoice_id:04}"),
        patient_name: patient_name.to_string(),
        amount: 100_000 * i64::from(1 + n % 5),
        method: match n % 4 {
            0 => PaymentMethod::Cash,
            1 => PaymentMethod::Card,
            2 => PaymentMethod::BankTransfer,
            _ => PaymentMethod::Insurance,
        },
        status: if n % 5 == 0 {
            PaymentStatus::Refunded
        } else {
            PaymentStatus::Completed
        },
        paid_at: at(2025, 1 + n % 2, 1 + n % 28, 10 + n % 8, 30, 0),
    }
}
