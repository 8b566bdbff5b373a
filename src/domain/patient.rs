use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::resource::{EnvelopeStyle, FieldValue, Resource, ResourceSchema};
use crate::domain::types::{PatientId, code_enum};

code_enum!(
    /// Administrative gender recorded on the patient card.
    Gender, "gender" {
        Male => "MALE",
        Female => "FEMALE",
        Other => "OTHER",
    }
);

code_enum!(
    /// Whether the patient record is in active use.
    PatientStatus, "patient status" {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    /// Human-facing medical record code, e.g. `BN000123`.
    pub code: String,
    pub full_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub address: Option<String>,
    pub status: PatientStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub code: String,
    pub full_name: String,
    pub gender: Gender,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub address: Option<String>,
    pub status: PatientStatus,
    pub created_at: NaiveDateTime,
}

impl Resource for Patient {
    const SCHEMA: ResourceSchema = ResourceSchema {
        path: "patients",
        searchable: &["code", "fullName", "phone"],
        filterable: &["gender", "status"],
        sortable: &["id", "code", "fullName", "dateOfBirth", "createdAt"],
        date_field: Some("createdAt"),
        role: "clinical",
        envelope: EnvelopeStyle::Plain,
    };

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value: FieldValue<'_> = match name {
            "id" => self.id.get().into(),
            "code" => self.code.as_str().into(),
            "fullName" => self.full_name.as_str().into(),
            "gender" => self.gender.as_str().into(),
            "dateOfBirth" => self.date_of_birth.into(),
            "phone" => self.phone.as_str().into(),
            "address" => self.address.as_deref().into(),
            "status" => self.status.as_str().into(),
            "createdAt" => self.created_at.into(),
            _ => return None,
        };
        Some(value)
    }
}
