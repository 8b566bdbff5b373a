//! JSON list endpoints under `/api/v1`.

use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, Responder, Scope, get, web};
use serde_json::json;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::employee::Employee;
use crate::domain::invoice::Invoice;
use crate::domain::medical_exam::MedicalExam;
use crate::domain::medicine::Medicine;
use crate::domain::patient::Patient;
use crate::domain::payment::Payment;
use crate::domain::resource::Resource;
use crate::domain::schedule::Schedule;
use crate::dto::api::{ApiEnvelope, ErrorBody, parse_list_query};
use crate::forms::invoices::CancelInvoiceForm;
use crate::models::config::ServerConfig;
use crate::repository::{InvoiceWriter, ResourceReader};
use crate::routes::service_error_response;
use crate::services::{ServiceError, invoices as invoices_service, list as list_service};

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// `GET /api/v1/<path>`: one page of `R`, wrapped per its envelope style.
pub async fn list_records<R, Repo>(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<Repo>,
) -> HttpResponse
where
    R: Resource,
    Repo: ResourceReader<R> + 'static,
{
    let result = parse_list_query(&R::SCHEMA, req.query_string())
        .map_err(ServiceError::from)
        .and_then(|query| list_service::list_records::<R, Repo>(repo.get_ref(), &user, &query));

    match result {
        Ok(page) => HttpResponse::Ok().json(ApiEnvelope::wrap(R::SCHEMA.envelope, page)),
        Err(err) => service_error_response(&err),
    }
}

/// `GET /api/v1/<path>/export`: the whole filtered, sorted list as CSV.
pub async fn export_records<R, Repo>(
    req: HttpRequest,
    user: AuthenticatedUser,
    repo: web::Data<Repo>,
    config: web::Data<ServerConfig>,
) -> HttpResponse
where
    R: Resource,
    Repo: ResourceReader<R> + 'static,
{
    let result = parse_list_query(&R::SCHEMA, req.query_string())
        .map_err(ServiceError::from)
        .and_then(|query| {
            list_service::export_records::<R, Repo>(
                repo.get_ref(),
                &user,
                &query,
                config.export_limit,
            )
        });

    match result {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .insert_header((
                header::CONTENT_DISPOSITION,
                ContentDisposition {
                    disposition: DispositionType::Attachment,
                    parameters: vec![DispositionParam::Filename(format!(
                        "{}.csv",
                        R::SCHEMA.path
                    ))],
                },
            ))
            .body(csv),
        Err(err) => service_error_response(&err),
    }
}

/// `GET /api/v1/<path>/{id}`.
pub async fn get_record<R, Repo>(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<Repo>,
) -> HttpResponse
where
    R: Resource,
    Repo: ResourceReader<R> + 'static,
{
    match list_service::get_record::<R, Repo>(repo.get_ref(), &user, id.into_inner()) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(err) => service_error_response(&err),
    }
}

/// `POST /api/v1/invoices/{id}/cancel`.
pub async fn cancel_invoice<Repo>(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<Repo>,
    web::Json(form): web::Json<CancelInvoiceForm>,
) -> HttpResponse
where
    Repo: ResourceReader<Invoice> + InvoiceWriter + 'static,
{
    match invoices_service::cancel_invoice(repo.get_ref(), &user, id.into_inner(), form) {
        Ok(invoice) => HttpResponse::Ok().json(invoice),
        Err(err) => service_error_response(&err),
    }
}

/// Rejects malformed JSON bodies with the API error shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            HttpResponse::BadRequest().json(ErrorBody::new(message)),
        )
        .into()
    })
}

/// List, export and lookup routes of `R`, mounted at `/<path>`.
pub fn resource_scope<R, Repo>() -> Scope
where
    R: Resource,
    Repo: ResourceReader<R> + 'static,
{
    web::scope(&format!("/{}", R::SCHEMA.path))
        .route("", web::get().to(list_records::<R, Repo>))
        .route("/export", web::get().to(export_records::<R, Repo>))
        .route("/{id:\\d+}", web::get().to(get_record::<R, Repo>))
}

/// Routes of the invoice list plus cancellation.
pub fn invoice_scope<Repo>() -> Scope
where
    Repo: ResourceReader<Invoice> + InvoiceWriter + 'static,
{
    resource_scope::<Invoice, Repo>()
        .route("/{id:\\d+}/cancel", web::post().to(cancel_invoice::<Repo>))
}

/// Mounts every resource under `/api/v1`, all served by one repository.
pub fn api_v1<Repo>() -> Scope
where
    Repo: ResourceReader<Patient>
        + ResourceReader<Invoice>
        + ResourceReader<Employee>
        + ResourceReader<Medicine>
        + ResourceReader<MedicalExam>
        + ResourceReader<Schedule>
        + ResourceReader<Payment>
        + InvoiceWriter
        + 'static,
{
    web::scope("/api/v1")
        .app_data(json_config())
        .service(resource_scope::<Patient, Repo>())
        .service(invoice_scope::<Repo>())
        .service(resource_scope::<Employee, Repo>())
        .service(resource_scope::<Medicine, Repo>())
        .service(resource_scope::<MedicalExam, Repo>())
        .service(resource_scope::<Schedule, Repo>())
        .service(resource_scope::<Payment, Repo>())
}
