//! Diesel models for ordered medical exams.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::medical_exam::{
    MedicalExam as DomainMedicalExam, NewMedicalExam as DomainNewMedicalExam,
};
use crate::domain::types::{EmployeeId, MedicalExamId, PatientId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::medical_exams)]
/// Diesel model for [`crate::domain::medical_exam::MedicalExam`].
pub struct MedicalExam {
    pub id: i32,
    pub code: String,
    pub patient_id: i32,
    pub patient_name: String,
    pub doctor_id: i32,
    pub test_name: String,
    pub status: String,
    pub result: Option<String>,
    pub ordered_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::medical_exams)]
pub struct NewMedicalExam<'a> {
    pub code: &'a str,
    pub patient_id: i32,
    pub patient_name: &'a str,
    pub doctor_id: i32,
    pub test_name: &'a str,
    pub status: &'a str,
    pub result: Option<&'a str>,
    pub ordered_at: NaiveDateTime,
}

impl TryFrom<MedicalExam> for DomainMedicalExam {
    type Error = TypeConstraintError;

    fn try_from(exam: MedicalExam) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MedicalExamId::try_from(exam.id)?,
            code: exam.code,
            patient_id: PatientId::try_from(exam.patient_id)?,
            patient_name: exam.patient_name,
            doctor_id: EmployeeId::try_from(exam.doctor_id)?,
            test_name: exam.test_name,
            status: exam.status.parse()?,
            result: exam.result,
            ordered_at: exam.ordered_at,
        })
    }
}

impl<'a> From<&'a DomainNewMedicalExam> for NewMedicalExam<'a> {
    fn from(exam: &'a DomainNewMedicalExam) -> Self {
        Self {
            code: exam.code.as_str(),
            patient_id: exam.patient_id.get(),
            patient_name: exam.patient_name.as_str(),
            doctor_id: exam.doctor_id.get(),
            test_name: exam.test_name.as_str(),
            status: exam.status.as_str(),
            result: exam.result.as_deref(),
            ordered_at: exam.ordered_at,
        }
    }
}
