use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::resource::{EnvelopeStyle, FieldValue, Resource, ResourceSchema};
use crate::domain::types::{DepartmentId, EmployeeId, code_enum};

code_enum!(
    /// Job position held by a staff member.
    Position, "position" {
        Doctor => "DOCTOR",
        Nurse => "NURSE",
        Receptionist => "RECEPTIONIST",
        Pharmacist => "PHARMACIST",
        LabTechnician => "LAB_TECHNICIAN",
        Accountant => "ACCOUNTANT",
        Administrator => "ADMINISTRATOR",
    }
);

code_enum!(
    EmploymentStatus, "employment status" {
        Active => "ACTIVE",
        OnLeave => "ON_LEAVE",
        Terminated => "TERMINATED",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub code: String,
    pub full_name: String,
    pub email: String,
    pub position: Position,
    pub department_id: DepartmentId,
    pub status: EmploymentStatus,
    pub hired_at: NaiveDate,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub code: String,
    pub full_name: String,
    pub email: String,
    pub position: Position,
    pub department_id: DepartmentId,
    pub status: EmploymentStatus,
    pub hired_at: NaiveDate,
}

impl Resource for Employee {
    const SCHEMA: ResourceSchema = ResourceSchema {
        path: "employees",
        searchable: &["code", "fullName", "email"],
        filterable: &["position", "departmentId", "status"],
        sortable: &["id", "code", "fullName", "hiredAt"],
        date_field: Some("hiredAt"),
        role: "hr",
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
            "email" => self.email.as_str().into(),
            "position" => self.position.as_str().into(),
            "departmentId" => self.department_id.get().into(),
            "status" => self.status.as_str().into(),
            "hiredAt" => self.hired_at.into(),
            _ => return None,
        };
        Some(value)
    }
}
