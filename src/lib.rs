//! Synchronous client for the Tagstore HTTP API.
//!
//! The crate is deliberately thin: it encodes requests, decodes responses,
//! and otherwise stays out of the way. HTTP statuses are returned as data
//! rather than mapped into errors, because what a 404 means depends
//! entirely on what the caller was asking.
//!
//! Three layers build on each other:
//!
//! - [`Transport`] performs requests and owns credentials and the
//!   primitive-value codec,
//! - the accessors in [`api`] mirror the service's URL hierarchy verb by
//!   verb,
//! - the mapped types in [`mapping`] wrap namespaces, tags and objects in
//!   path-aware handles.
//!
//! A [`Session`] ties the layers to one endpoint. Sessions are explicit
//! everywhere; nothing in the crate consults global state.

pub mod api;
pub mod backend;
pub mod dev;
pub mod error;
pub mod mapping;
pub mod paths;
pub mod session;
pub mod transport;
pub mod url;
pub mod value;

pub use backend::{HttpBackend, HttpRequest, HttpResponse, ReqwestBackend};
pub use error::ApiError;
pub use mapping::{Namespace, Object, Tag, TagRelationField, TagValueField};
pub use paths::{path_child, path_split};
pub use session::Session;
pub use transport::{ApiResponse, Transport, ValueResponse, USER_AGENT};
pub use url::{endpoint_url, QueryArg, DEFAULT_BASE_URL};
pub use value::{StoredValue, JSON_CONTENT_TYPE, PRIMITIVE_CONTENT_TYPE};

pub use reqwest::{Method, StatusCode};
