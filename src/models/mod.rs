//! Database models shared across the hospital repository.

pub mod config;
pub mod employee;
pub mod invoice;
pub mod medical_exam;
pub mod medicine;
pub mod patient;
pub mod payment;
pub mod schedule;
