use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::resource::{EnvelopeStyle, FieldValue, Resource, ResourceSchema};
use crate::domain::types::{DepartmentId, EmployeeId, ScheduleId, code_enum};

code_enum!(
    Shift, "shift" {
        Morning => "MORNING",
        Afternoon => "AFTERNOON",
        Night => "NIGHT",
    }
);

code_enum!(
    /// Booking state of a schedule slot block.
    ScheduleStatus, "schedule status" {
        Available => "AVAILABLE",
        Full => "FULL",
        Cancelled => "CANCELLED",
    }
);

/// A doctor's working block on one day, with its appointment capacity.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ScheduleId,
    pub doctor_id: EmployeeId,
    pub doctor_name: String,
    pub department_id: DepartmentId,
    pub work_date: NaiveDate,
    pub shift: Shift,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_patients: i32,
    pub booked_patients: i32,
    pub status: ScheduleStatus,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
    pub doctor_id: EmployeeId,
    pub doctor_name: String,
    pub department_id: DepartmentId,
    pub work_date: NaiveDate,
    pub shift: Shift,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_patients: i32,
    #[serde(default)]
    pub booked_patients: i32,
    pub status: ScheduleStatus,
}

impl Resource for Schedule {
    const SCHEMA: ResourceSchema = ResourceSchema {
        path: "schedules",
        searchable: &["doctorName"],
        filterable: &["doctorId", "departmentId", "shift", "status"],
        sortable: &["id", "workDate", "doctorName"],
        date_field: Some("workDate"),
        role: "clinical",
        envelope: EnvelopeStyle::Plain,
    };

    fn id(&self) -> i32 {
        self.id.get()
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        let value: FieldValue<'_> = match name {
            "id" => self.id.get().into(),
            "doctorId" => self.doctor_id.get().into(),
            "doctorName" => self.doctor_name.as_str().into(),
            "departmentId" => self.department_id.get().into(),
            "workDate" => self.work_date.into(),
            "shift" => self.shift.as_str().into(),
            "maxPatients" => self.max_patients.into(),
            "bookedPatients" => self.booked_patients.into(),
            "status" => self.status.as_str().into(),
            _ => return None,
        };
        Some(value)
    }
}
