//! Bearer token authentication for the API.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::domain::auth::AuthenticatedUser;
use crate::dto::api::ErrorBody;
use crate::models::config::ServerConfig;

fn unauthorized(message: &str) -> actix_web::Error {
    InternalError::from_response(
        message.to_string(),
        HttpResponse::Unauthorized().json(ErrorBody::new(message)),
    )
    .into()
}

/// Decodes and verifies an HS256 token signed with `secret`.
pub fn decode_token(token: &str, secret: &str) -> Result<AuthenticatedUser, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<AuthenticatedUser>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

/// Signs `user` as an HS256 token; used by tooling and tests.
pub fn encode_token(
    user: &AuthenticatedUser,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::new(Algorithm::HS256),
        user,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, actix_web::Error> {
    let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
        log::error!("Server config missing from app data");
        return Err(actix_web::error::ErrorInternalServerError(
            "authentication unavailable",
        ));
    };

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("missing bearer token"))?;

    decode_token(token, &config.secret).map_err(|err| {
        log::warn!("Rejected bearer token: {err}");
        unauthorized("invalid or expired token")
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
