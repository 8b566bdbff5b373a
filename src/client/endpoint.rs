//! Per-endpoint envelope normalization.
//!
//! Endpoints wrap the page differently (see [`EnvelopeStyle`]); everything
//! past this module sees only the canonical [`Page`].

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::error::TransportError;
use crate::domain::query::QueryDescriptor;
use crate::domain::resource::{EnvelopeStyle, Resource};
use crate::pagination::Page;

/// Where a resource list lives and how it is wrapped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub envelope: EnvelopeStyle,
}

impl Endpoint {
    pub fn of<R: Resource>() -> Self {
        Self {
            path: R::SCHEMA.path,
            envelope: R::SCHEMA.envelope,
        }
    }

    /// Same path, wrapped differently; for backends that publish a resource
    /// in another style than this crate's server.
    pub fn with_envelope(self, envelope: EnvelopeStyle) -> Self {
        Self { envelope, ..self }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePage<T> {
    content: Vec<T>,
    page: usize,
    size: usize,
    total_elements: usize,
    #[serde(default)]
    total_pages: Option<usize>,
    #[serde(default)]
    last: Option<bool>,
}

impl<T> WirePage<T> {
    /// Rebuilds the derived fields, logging a server that disagrees.
    fn into_page(self) -> Page<T> {
        let reported_pages = self.total_pages;
        let reported_last = self.last;
        let page = Page::new(self.content, self.page, self.size, self.total_elements);
        if reported_pages.is_some_and(|pages| pages != page.total_pages)
            || reported_last.is_some_and(|last| last != page.last)
        {
            log::warn!(
                "Envelope disagrees with its own counts (totalPages {:?}, last {:?}); using {} and {}",
                reported_pages,
                reported_last,
                page.total_pages,
                page.last
            );
        }
        page
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, TransportError> {
    serde_json::from_value(value).map_err(|e| TransportError::Decode(e.to_string()))
}

fn take_data(body: Value) -> Result<Value, TransportError> {
    match body {
        Value::Object(mut map) => map
            .remove("data")
            .ok_or_else(|| TransportError::Decode("missing `data`".to_string())),
        _ => Err(TransportError::Decode("expected a JSON object".to_string())),
    }
}

/// Turns a response body into the canonical page.
///
/// `DataArray` endpoints return every match unpaginated; the requested page
/// is cut out locally.
pub fn normalize<T: DeserializeOwned>(
    style: EnvelopeStyle,
    body: Value,
    query: &QueryDescriptor,
) -> Result<Page<T>, TransportError> {
    match style {
        EnvelopeStyle::Plain => decode::<WirePage<T>>(body).map(WirePage::into_page),
        EnvelopeStyle::Data => decode::<WirePage<T>>(take_data(body)?).map(WirePage::into_page),
        EnvelopeStyle::StatusData => {
            let status = body.get("status").and_then(Value::as_str).unwrap_or("");
            if status != "success" {
                let reason = body
                    .get("message")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                return Err(TransportError::Server { status: 200, reason });
            }
            decode::<WirePage<T>>(take_data(body)?).map(WirePage::into_page)
        }
        EnvelopeStyle::DataArray => {
            let items: Vec<T> = decode(take_data(body)?)?;
            Ok(Page::slice(items, query.page, query.size))
        }
    }
}
