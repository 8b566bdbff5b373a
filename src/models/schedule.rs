//! Diesel models for doctor schedules.

use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;

use crate::domain::schedule::{NewSchedule as DomainNewSchedule, Schedule as DomainSchedule};
use crate::domain::types::{DepartmentId, EmployeeId, ScheduleId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::schedules)]
/// Diesel model for [`crate::domain::schedule::Schedule`].
pub struct Schedule {
    pub id: i32,
    pub doctor_id: i32,
    pub doctor_name: String,
    pub department_id: i32,
    pub work_date: NaiveDate,
    pub shift: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_patients: i32,
    pub booked_patients: i32,
    pub status: String,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::schedules)]
pub struct NewSchedule<'a> {
    pub doctor_id: i32,
    pub doctor_name: &'a str,
    pub department_id: i32,
    pub work_date: NaiveDate,
    pub shift: &'a str,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub max_patients: i32,
    pub booked_patients: i32,
    pub status: &'a str,
}

impl TryFrom<Schedule> for DomainSchedule {
    type Error = TypeConstraintError;

    fn try_from(schedule: Schedule) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ScheduleId::try_from(schedule.id)?,
            doctor_id: EmployeeId::try_from(schedule.doctor_id)?,
            doctor_name: schedule.doctor_name,
            department_id: DepartmentId::try_from(schedule.department_id)?,
            work_date: schedule.work_date,
            shift: schedule.shift.parse()?,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            max_patients: schedule.max_patients,
            booked_patients: schedule.booked_patients,
            status: schedule.status.parse()?,
        })
    }
}

impl<'a> From<&'a DomainNewSchedule> for NewSchedule<'a> {
    fn from(schedule: &'a DomainNewSchedule) -> Self {
        Self {
            doctor_id: schedule.doctor_id.get(),
            doctor_name: schedule.doctor_name.as_str(),
            department_id: schedule.department_id.get(),
            work_date: schedule.work_date,
            shift: schedule.shift.as_str(),
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            max_patients: schedule.max_patients,
            booked_patients: schedule.booked_patients,
            status: schedule.status.as_str(),
        }
    }
}
