//! Domain records and value objects exposed by the hospital service layer.

pub mod auth;
pub mod employee;
pub mod invoice;
pub mod medical_exam;
pub mod medicine;
pub mod patient;
pub mod payment;
pub mod query;
pub mod resource;
pub mod schedule;
pub mod types;
