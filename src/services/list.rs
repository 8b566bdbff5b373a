//! Listing, lookup and export of any [`Resource`].

use crate::domain::auth::AuthenticatedUser;
use crate::domain::query::QueryDescriptor;
use crate::domain::resource::Resource;
use crate::pagination::Page;
use crate::repository::ResourceReader;
use crate::services::{ServiceError, ServiceResult, ensure_access};

/// Returns the requested page of `R` visible to the user.
pub fn list_records<R, Repo>(
    repo: &Repo,
    user: &AuthenticatedUser,
    query: &QueryDescriptor,
) -> ServiceResult<Page<R>>
where
    R: Resource,
    Repo: ResourceReader<R> + ?Sized,
{
    ensure_access(user, &R::SCHEMA)?;
    R::SCHEMA.check(query)?;

    let page = repo.list_records(query).map_err(|err| {
        log::error!("Failed to list {}: {err}", R::SCHEMA.path);
        err
    })?;

    Ok(page)
}

pub fn get_record<R, Repo>(repo: &Repo, user: &AuthenticatedUser, id: i32) -> ServiceResult<R>
where
    R: Resource,
    Repo: ResourceReader<R> + ?Sized,
{
    ensure_access(user, &R::SCHEMA)?;

    repo.get_record(id)
        .map_err(|err| {
            log::error!("Failed to load {} {id}: {err}", R::SCHEMA.path);
            err
        })?
        .ok_or(ServiceError::NotFound)
}

/// Renders every record matching `query` as CSV, ignoring its page and
/// size and returning at most `limit` rows.
pub fn export_records<R, Repo>(
    repo: &Repo,
    user: &AuthenticatedUser,
    query: &QueryDescriptor,
    limit: usize,
) -> ServiceResult<String>
where
    R: Resource,
    Repo: ResourceReader<R> + ?Sized,
{
    let export_query = QueryDescriptor {
        page: 0,
        size: limit.max(1),
        ..query.clone()
    };
    let page = list_records::<R, Repo>(repo, user, &export_query)?;

    if page.total_elements > page.content.len() {
        log::warn!(
            "Export of {} truncated to {} of {} rows",
            R::SCHEMA.path,
            page.content.len(),
            page.total_elements
        );
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in &page.content {
        writer
            .serialize(record)
            .map_err(|err| ServiceError::Internal(format!("CSV serialization failed: {err}")))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|err| ServiceError::Internal(format!("CSV flush failed: {err}")))?;

    String::from_utf8(bytes).map_err(|err| ServiceError::Internal(err.to_string()))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::auth::{SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE};
    use crate::domain::patient::{Gender, Patient, PatientStatus};
    use crate::domain::query::{QueryError, SortKey};
    use crate::domain::types::PatientId;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockPatientRepository;

    fn user(roles: &[&str]) -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "7".to_string(),
            email: "nurse@example.com".to_string(),
            name: "Nurse".to_string(),
            roles: roles.iter().map(|role| role.to_string()).collect(),
            exp: 0,
        }
    }

    fn clinical_user() -> AuthenticatedUser {
        user(&[SERVICE_ACCESS_ROLE, "clinical"])
    }

    fn patient(id: i32, name: &str) -> Patient {
        Patient {
            id: PatientId::new(id).unwrap(),
            code: format!("BN{id:04}"),
            full_name: name.to_string(),
            gender: Gender::Female,
            date_of_birth: NaiveDate::from_ymd_opt(1992, 3, 4).unwrap(),
            phone: "0900000000".to_string(),
            address: None,
            status: PatientStatus::Active,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 2)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn list_requires_resource_role() {
        let mut repo = MockPatientRepository::new();
        repo.expect_list_records().times(0);

        let result = list_records::<Patient, _>(
            &repo,
            &user(&[SERVICE_ACCESS_ROLE, "billing"]),
            &QueryDescriptor::default(),
        );

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn admin_role_reads_any_resource() {
        let mut repo = MockPatientRepository::new();
        repo.expect_list_records()
            .times(1)
            .returning(|query| Ok(Page::new(vec![], query.page, query.size, 0)));

        let result = list_records::<Patient, _>(
            &repo,
            &user(&[SERVICE_ACCESS_ROLE, SERVICE_ADMIN_ROLE]),
            &QueryDescriptor::default(),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn unsortable_field_never_reaches_repository() {
        let mut repo = MockPatientRepository::new();
        repo.expect_list_records().times(0);

        let query = QueryDescriptor::default().sort(SortKey::asc("phone"));
        let result = list_records::<Patient, _>(&repo, &clinical_user(), &query);

        assert!(matches!(
            result,
            Err(ServiceError::Query(QueryError::UnsortableField(field))) if field == "phone"
        ));
    }

    #[test]
    fn descriptor_is_passed_through_unchanged() {
        let mut repo = MockPatientRepository::new();
        let expected = QueryDescriptor::new(2, 5)
            .search("an")
            .filter("gender", "FEMALE")
            .sort(SortKey::desc("fullName"));
        let seen = expected.clone();
        repo.expect_list_records()
            .withf(move |query| QueryDescriptor::clone(query) == seen)
            .times(1)
            .returning(|query| {
                Ok(Page::new(
                    vec![patient(1, "Anna")],
                    query.page,
                    query.size,
                    11,
                ))
            });

        let page = list_records::<Patient, _>(&repo, &clinical_user(), &expected).unwrap();

        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 3);
        assert!(page.last);
    }

    #[test]
    fn missing_record_is_not_found() {
        let mut repo = MockPatientRepository::new();
        repo.expect_get_record().returning(|_| Ok(None));

        let result = get_record::<Patient, _>(&repo, &clinical_user(), 99);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn repository_failures_surface_as_repository_errors() {
        let mut repo = MockPatientRepository::new();
        repo.expect_list_records()
            .returning(|_| Err(RepositoryError::ConnectionError("pool closed".into())));

        let result =
            list_records::<Patient, _>(&repo, &clinical_user(), &QueryDescriptor::default());

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }

    #[test]
    fn export_ignores_paging_and_writes_csv() {
        let mut repo = MockPatientRepository::new();
        repo.expect_list_records()
            .withf(|query| {
                query.page == 0 && query.size == 1000 && query.search.as_deref() == Some("an")
            })
            .times(1)
            .returning(|query| {
                Ok(Page::new(
                    vec![patient(1, "Anna"), patient(3, "Nancy")],
                    query.page,
                    query.size,
                    2,
                ))
            });

        let query = QueryDescriptor::new(4, 10).search("an");
        let csv = export_records::<Patient, _>(&repo, &clinical_user(), &query, 1000).unwrap();

        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("id,code,fullName,gender"));
        assert!(lines.next().unwrap().contains("Anna"));
        assert!(lines.next().unwrap().contains("Nancy"));
        assert!(lines.next().is_none());
    }
}
