use serde_json::Value;

use crate::error::ApiError;

/// Media type marking a body as a primitive tag value.
///
/// Values sent under this content type are JSON-encoded null, booleans,
/// numbers, strings, or lists of strings. Anything else stored on a tag is
/// an opaque blob travelling under its own content type.
pub const PRIMITIVE_CONTENT_TYPE: &str = "application/vnd.tagstore.value+json";

/// Content type for structured JSON request bodies on the non-value
/// endpoints.
pub const JSON_CONTENT_TYPE: &str = "application/json";

pub(crate) const OCTET_STREAM_CONTENT_TYPE: &str = "application/octet-stream";

/// A tag value fetched from the service.
///
/// Primitive values carry no logical content type of their own; the
/// primitive media type is transport detail and is stripped during
/// decoding. Everything else keeps the content type it was stored with.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    /// A decoded primitive: null, boolean, number, string, or a list of
    /// strings.
    Primitive(Value),
    /// An uninterpreted payload and the content type it travels under.
    Opaque { content_type: String, body: Vec<u8> },
}

impl StoredValue {
    /// The logical content type: `None` for primitives, the stored media
    /// type for opaque values.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::Primitive(_) => None,
            Self::Opaque { content_type, .. } => Some(content_type),
        }
    }

    #[must_use]
    pub fn as_primitive(&self) -> Option<&Value> {
        match self {
            Self::Primitive(value) => Some(value),
            Self::Opaque { .. } => None,
        }
    }

    /// The value as a string slice, when it is a primitive string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_primitive().and_then(Value::as_str)
    }
}

/// Encode a tag value into a request body and its content type.
///
/// With an explicit content type the value passes through uninterpreted:
/// strings are sent as raw bytes, anything else as its JSON encoding.
/// Without one the value must be primitive, and is JSON-encoded under
/// [`PRIMITIVE_CONTENT_TYPE`]. Lists qualify only when every element is a
/// string.
pub fn encode(value: &Value, content_type: Option<&str>) -> Result<(Vec<u8>, String), ApiError> {
    if let Some(content_type) = content_type {
        let body = match value {
            Value::String(text) => text.clone().into_bytes(),
            other => serde_json::to_vec(other)?,
        };
        return Ok((body, content_type.to_owned()));
    }

    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        Value::Array(items) => {
            if let Some(element) = items.iter().find(|item| !item.is_string()) {
                return Err(ApiError::non_string_list_element(element.to_string()));
            }
        }
        Value::Object(_) => {
            return Err(ApiError::unsupported_value(json_type_name(value)));
        }
    }

    Ok((serde_json::to_vec(value)?, PRIMITIVE_CONTENT_TYPE.to_owned()))
}

/// Decode a fetched tag value from its content type and body.
///
/// Bodies under the primitive media type are parsed back into JSON values;
/// any other content type is preserved as an opaque payload. A response
/// without a content-type header decodes as an octet stream.
pub fn decode(content_type: Option<&str>, body: Vec<u8>) -> Result<StoredValue, ApiError> {
    match content_type {
        Some(found) if found == PRIMITIVE_CONTENT_TYPE => {
            Ok(StoredValue::Primitive(serde_json::from_slice(&body)?))
        }
        Some(found) => Ok(StoredValue::Opaque {
            content_type: found.to_owned(),
            body,
        }),
        None => Ok(StoredValue::Opaque {
            content_type: OCTET_STREAM_CONTENT_TYPE.to_owned(),
            body,
        }),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
