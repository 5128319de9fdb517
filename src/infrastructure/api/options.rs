//! Per-request options.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use serde_json::Value;

/// Request payload.
pub enum RequestBody {
    /// No body.
    Empty,
    /// JSON document, sent with the default `Content-Type`.
    Json(Value),
    /// Multipart form. The transport supplies the `Content-Type` with its boundary.
    Multipart(Form),
}

/// Method, headers and body of a single API call.
pub struct RequestOptions {
    pub(crate) method: Method,
    pub(crate) headers: HeaderMap,
    pub(crate) body: RequestBody,
    pub(crate) omit_content_type: bool,
}

impl RequestOptions {
    /// Creates options for the given method with no body.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
            omit_content_type: false,
        }
    }

    /// `GET` with no body.
    #[must_use]
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    /// `POST` with no body.
    #[must_use]
    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    /// `PUT` with no body.
    #[must_use]
    pub fn put() -> Self {
        Self::new(Method::PUT)
    }

    /// `PATCH` with no body.
    #[must_use]
    pub fn patch() -> Self {
        Self::new(Method::PATCH)
    }

    /// `DELETE` with no body.
    #[must_use]
    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json(mut self, body: impl Into<Value>) -> Self {
        self.body = RequestBody::Json(body.into());
        self
    }

    /// Sets a multipart body and drops the default `Content-Type`.
    #[must_use]
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self.omit_content_type = true;
        self
    }

    /// Adds a header, overriding the default of the same name.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sends the request without the default `Content-Type`.
    #[must_use]
    pub fn without_content_type(mut self) -> Self {
        self.omit_content_type = true;
        self
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}
