//! Diesel models for hospital staff.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::employee::{Employee as DomainEmployee, NewEmployee as DomainNewEmployee};
use crate::domain::types::{DepartmentId, EmployeeId, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::employees)]
/// Diesel model for [`crate::domain::employee::Employee`].
pub struct Employee {
    pub id: i32,
    pub code: String,
    pub full_name: String,
    pub email: String,
    pub position: String,
    pub department_id: i32,
    pub status: String,
    pub hired_at: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::employees)]
/// Insertable form of [`Employee`].
pub struct NewEmployee<'a> {
    pub code: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub position: &'a str,
    pub department_id: i32,
    pub status: &'a str,
    pub hired_at: NaiveDate,
}

impl TryFrom<Employee> for DomainEmployee {
    type Error = TypeConstraintError;

    fn try_from(employee: Employee) -> Result<Self, Self::Error> {
        Ok(Self {
            id: EmployeeId::try_from(employee.id)?,
            code: employee.code,
            full_name: employee.full_name,
            email: employee.email,
            position: employee.position.parse()?,
            department_id: DepartmentId::try_from(employee.department_id)?,
            status: employee.status.parse()?,
            hired_at: employee.hired_at,
        })
    }
}

impl<'a> From<&'a DomainNewEmployee> for NewEmployee<'a> {
    fn from(employee: &'a DomainNewEmployee) -> Self {
        Self {
            code: employee.code.as_str(),
            full_name: employee.full_name.as_str(),
            email: employee.email.as_str(),
            position: employee.position.as_str(),
            department_id: employee.department_id.get(),
            status: employee.status.as_str(),
            hired_at: employee.hired_at,
        }
    }
}
