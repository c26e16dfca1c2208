use std::collections::BTreeMap;
use std::fmt;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::backend::{HttpBackend, HttpRequest, HttpResponse, ReqwestBackend};
use crate::error::ApiError;
use crate::url::{endpoint_url, QueryArg};
use crate::value::{self, StoredValue, JSON_CONTENT_TYPE};

/// User-agent header sent with every request.
pub const USER_AGENT: &str = "tagstore-api";

pub const HEADER_USER_AGENT: &str = "user-agent";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_CONTENT_TYPE: &str = "content-type";

/// A structured response from the service.
///
/// The status is data, not an error: a 404 from a lookup comes back here
/// just like a 200 does. Bodies are decoded JSON when present.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ApiResponse {
    /// A named field of the response body, when the body is an object.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.body.as_ref().and_then(|body| body.get(name))
    }

    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// A field holding a list of strings, such as the child-name listings
    /// on namespace responses. Non-string elements are skipped.
    #[must_use]
    pub fn string_list_field(&self, name: &str) -> Option<Vec<String>> {
        let items = self.field(name)?.as_array()?;
        Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect(),
        )
    }
}

/// A response from the tag-value endpoints.
///
/// On a 200 the value has been decoded per its content type. On other
/// statuses any body the service sent is kept verbatim as an opaque value.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueResponse {
    pub status: StatusCode,
    pub value: Option<StoredValue>,
}

/// The HTTP session with a Tagstore endpoint.
///
/// Owns the base URL, the headers applied to every request, and the
/// backend that performs the I/O. Credentials are plain state: `login`
/// installs a basic-auth header and `logout` removes it, affecting every
/// request made afterwards.
pub struct Transport {
    base_url: String,
    headers: BTreeMap<String, String>,
    backend: Box<dyn HttpBackend>,
}

impl Transport {
    /// A transport over the production `reqwest` backend.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self::with_backend(base_url, Box::new(ReqwestBackend::new()?)))
    }

    /// A transport over a caller-supplied backend.
    #[must_use]
    pub fn with_backend(base_url: impl Into<String>, backend: Box<dyn HttpBackend>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(HEADER_USER_AGENT.to_owned(), USER_AGENT.to_owned());
        Self {
            base_url: base_url.into(),
            headers,
            backend,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Install basic-auth credentials for all subsequent requests.
    pub fn login(&mut self, username: &str, password: &str) {
        let credentials = BASE64_STANDARD.encode(format!("{username}:{password}"));
        self.headers.insert(
            HEADER_AUTHORIZATION.to_owned(),
            format!("Basic {credentials}"),
        );
    }

    /// Drop credentials; requests become anonymous again.
    pub fn logout(&mut self) {
        self.headers.remove(HEADER_AUTHORIZATION);
    }

    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.headers.contains_key(HEADER_AUTHORIZATION)
    }

    /// Perform a structured request against a non-value endpoint.
    ///
    /// The payload must be a JSON object or absent; objects are sent as an
    /// `application/json` body. The response body, when non-empty, is
    /// decoded as JSON.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
        query: &[(&str, QueryArg)],
    ) -> Result<ApiResponse, ApiError> {
        let (body, content_type) = prepare_json_body(payload)?;
        let response = self.execute(self.build_request(method, path, body, content_type, query)?)?;
        let body = if response.body.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&response.body)?)
        };
        Ok(ApiResponse {
            status: response.status,
            body,
        })
    }

    /// Store a tag value, returning only the resulting status.
    ///
    /// Without a `content_type` the value is encoded as a primitive; with
    /// one it passes through uninterpreted under that type.
    pub fn put_value(
        &self,
        path: &str,
        payload: &Value,
        content_type: Option<&str>,
    ) -> Result<StatusCode, ApiError> {
        let (body, content_type) = value::encode(payload, content_type)?;
        let request =
            self.build_request(Method::PUT, path, Some(body), Some(&content_type), &[])?;
        Ok(self.execute(request)?.status)
    }

    /// Fetch a tag value, decoding primitives back into JSON values.
    pub fn get_value(&self, path: &str) -> Result<ValueResponse, ApiError> {
        let response = self.execute(self.build_request(Method::GET, path, None, None, &[])?)?;
        let value = if response.status == StatusCode::OK {
            Some(value::decode(response.content_type.as_deref(), response.body)?)
        } else if response.body.is_empty() {
            None
        } else {
            Some(StoredValue::Opaque {
                content_type: response
                    .content_type
                    .unwrap_or_else(|| value::OCTET_STREAM_CONTENT_TYPE.to_owned()),
                body: response.body,
            })
        };
        Ok(ValueResponse {
            status: response.status,
            value,
        })
    }

    /// Assemble the request that would be sent, without sending it.
    ///
    /// A content type may only accompany an actual body; supplying one
    /// without a payload is a usage error.
    pub fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        content_type: Option<&str>,
        query: &[(&str, QueryArg)],
    ) -> Result<HttpRequest, ApiError> {
        if let Some(content_type) = content_type {
            if body.is_none() {
                return Err(ApiError::content_type_without_payload(content_type));
            }
        }

        let mut headers = self.headers.clone();
        if let Some(content_type) = content_type {
            headers.insert(HEADER_CONTENT_TYPE.to_owned(), content_type.to_owned());
        }

        Ok(HttpRequest {
            method,
            url: endpoint_url(&self.base_url, path, query),
            headers,
            body,
        })
    }

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method.clone();
        let url = request.url.clone();
        let response = self.backend.execute(request)?;
        debug!(%method, %url, status = response.status.as_u16(), "request completed");
        Ok(response)
    }
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

fn prepare_json_body(payload: Option<&Value>) -> Result<(Option<Vec<u8>>, Option<&str>), ApiError> {
    match payload {
        None => Ok((None, None)),
        Some(value @ Value::Object(_)) => {
            Ok((Some(serde_json::to_vec(value)?), Some(JSON_CONTENT_TYPE)))
        }
        Some(other) => Err(ApiError::invalid_request_payload(value::json_type_name(
            other,
        ))),
    }
}
