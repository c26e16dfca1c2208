use thiserror::Error;

/// Failures raised by the client itself.
///
/// HTTP status codes are never turned into errors here. The service reports
/// outcomes through statuses, and callers decide what a 404 or 412 means for
/// them, so every response that made it back over the wire is returned as
/// data. The variants below cover transport failures and misuse of the
/// client API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to decode response body as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot store a {type_name} as a primitive tag value")]
    UnsupportedValue { type_name: &'static str },

    #[error("list tag values must contain only strings, found {element}")]
    NonStringListElement { element: String },

    #[error("content type {content_type} was supplied without a payload")]
    ContentTypeWithoutPayload { content_type: String },

    #[error("a {type_name} payload is not valid for a JSON request body")]
    InvalidRequestPayload { type_name: &'static str },
}

impl ApiError {
    #[must_use]
    pub fn unsupported_value(type_name: &'static str) -> Self {
        Self::UnsupportedValue { type_name }
    }

    #[must_use]
    pub fn non_string_list_element(element: impl Into<String>) -> Self {
        Self::NonStringListElement {
            element: element.into(),
        }
    }

    #[must_use]
    pub fn content_type_without_payload(content_type: impl Into<String>) -> Self {
        Self::ContentTypeWithoutPayload {
            content_type: content_type.into(),
        }
    }

    #[must_use]
    pub fn invalid_request_payload(type_name: &'static str) -> Self {
        Self::InvalidRequestPayload { type_name }
    }

    /// True when the error is a misuse of the client rather than a
    /// transport or decoding failure.
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedValue { .. }
                | Self::NonStringListElement { .. }
                | Self::ContentTypeWithoutPayload { .. }
                | Self::InvalidRequestPayload { .. }
        )
    }
}
