use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::resource::{EnvelopeStyle, FieldValue, Resource, ResourceSchema};
use crate::domain::types::{EmployeeId, MedicalExamId, PatientId, code_enum};

code_enum!(
    /// Progress of a lab or imaging order.
    ExamStatus, "exam status" {
        Ordered => "ORDERED",
        InProgress => "IN_PROGRESS",
        Completed => "COMPLETED",
        Cancelled => "CANCELLED",
    }
);

/// A lab or imaging order with its result once available.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MedicalExam {
    pub id: MedicalExamId,
    pub code: String,
    pub patient_id: PatientId,
    pub patient_name: String,
    /// Ordering doctor.
    pub doctor_id: EmployeeId,
    pub test_name: String,
    pub status: ExamStatus,
    pub result: Option<String>,
    pub ordered_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicalExam {
    pub code: String,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub doctor_id: EmployeeId,
    pub test_name: String,
    pub status: ExamStatus,
    #[serde(default)]
    pub result: Option<String>,
    pub ordered_at: NaiveDateTime,
}

impl Resource for MedicalExam {
    const SCHEMA: ResourceSchema = ResourceSchema {
        path: "medical-exams",
        searchable: &["code", "patientName", "testName"],
        filterable: &["status", "patientId", "doctorId"],
        sortable: &["id", "code", "patientName", "orderedAt"],
        date_field: Some("orderedAt"),
        role: "clinical",
        envelope: EnvelopeStyle::StatusData,
    };

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value: FieldValue<'_> = match name {
            "id" => self.id.get().into(),
            "code" => self.code.as_str().into(),
            "patientId" => self.patient_id.get().into(),
            "patientName" => self.patient_name.as_str().into(),
            "doctorId" => self.doctor_id.get().into(),
            "testName" => self.test_name.as_str().into(),
            "status" => self.status.as_str().into(),
            "result" => self.result.as_deref().into(),
            "orderedAt" => self.ordered_at.into(),
            _ => return None,
        };
        Some(value)
    }
}
