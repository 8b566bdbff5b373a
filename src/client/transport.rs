//! Sending descriptors to the list API.

use async_trait::async_trait;
use serde_json::Value;

use crate::client::ClientConfig;
use crate::client::endpoint::{Endpoint, normalize};
use crate::client::error::TransportError;
use crate::domain::query::QueryDescriptor;
use crate::domain::resource::Resource;
use crate::pagination::Page;

/// Fetches the raw body of a list endpoint.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(
        &self,
        endpoint: &Endpoint,
        params: Vec<(String, String)>,
    ) -> Result<Value, TransportError>;
}

/// [`Transport`] over HTTP with an optional bearer token.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}/api/v1/{}", self.base_url, endpoint.path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(
        &self,
        endpoint: &Endpoint,
        params: Vec<(String, String)>,
    ) -> Result<Value, TransportError> {
        let mut request = self.client.get(self.url(endpoint)).query(&params);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let reason = response.json::<Value>().await.ok().and_then(|body| {
                body.get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            });
            log::warn!("{} answered {status}", endpoint.path);
            return Err(TransportError::Server {
                status: status.as_u16(),
                reason,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| TransportError::Decode(e.to_string()))
    }
}

/// Validates `query` for `R`, sends it and normalizes the response.
///
/// An invalid descriptor fails with [`TransportError::Validation`] without
/// calling the transport.
pub async fn fetch_page<R, T>(transport: &T, query: &QueryDescriptor) -> Result<Page<R>, TransportError>
where
    R: Resource,
    T: Transport + ?Sized,
{
    fetch_page_from(transport, &Endpoint::of::<R>(), query).await
}

/// [`fetch_page`] against an explicit endpoint.
pub async fn fetch_page_from<R, T>(
    transport: &T,
    endpoint: &Endpoint,
    query: &QueryDescriptor,
) -> Result<Page<R>, TransportError>
where
    R: Resource,
    T: Transport + ?Sized,
{
    R::SCHEMA.check(query)?;
    let body = transport.fetch(endpoint, query.to_query_pairs()).await?;
    normalize(endpoint.envelope, body, query)
}
