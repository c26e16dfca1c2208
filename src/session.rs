use reqwest::Method;
use serde_json::Value;

use crate::api::{
    NamespacesApi, ObjectsApi, PermissionsApi, PoliciesApi, TagsApi, UsersApi,
};
use crate::error::ApiError;
use crate::mapping::{Namespace, Object, Tag};
use crate::transport::{ApiResponse, Transport};
use crate::url::{QueryArg, DEFAULT_BASE_URL};

/// A connection to one Tagstore endpoint.
///
/// The session owns the transport and hands out accessors and mapped
/// resources borrowing from it. There is no ambient global; code that
/// talks to two endpoints holds two sessions, and everything built from a
/// session says which one it belongs to.
#[derive(Debug)]
pub struct Session {
    transport: Transport,
}

impl Session {
    /// A session against a specific endpoint.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            transport: Transport::new(base_url)?,
        })
    }

    /// A session against the production endpoint.
    pub fn default_endpoint() -> Result<Self, ApiError> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// A session over an existing transport, scripted backends included.
    #[must_use]
    pub fn with_transport(transport: Transport) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Install basic-auth credentials on the underlying transport.
    pub fn login(&mut self, username: &str, password: &str) {
        self.transport.login(username, password);
    }

    pub fn logout(&mut self) {
        self.transport.logout();
    }

    /// Raw escape hatch: perform a request against any path.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        payload: Option<&Value>,
        query: &[(&str, QueryArg)],
    ) -> Result<ApiResponse, ApiError> {
        self.transport.request(method, path, payload, query)
    }

    #[must_use]
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(&self.transport)
    }

    #[must_use]
    pub fn namespaces(&self) -> NamespacesApi<'_> {
        NamespacesApi::new(&self.transport)
    }

    #[must_use]
    pub fn tags(&self) -> TagsApi<'_> {
        TagsApi::new(&self.transport)
    }

    #[must_use]
    pub fn objects(&self) -> ObjectsApi<'_> {
        ObjectsApi::new(&self.transport)
    }

    #[must_use]
    pub fn permissions(&self) -> PermissionsApi<'_> {
        PermissionsApi::new(&self.transport)
    }

    #[must_use]
    pub fn policies(&self) -> PoliciesApi<'_> {
        PoliciesApi::new(&self.transport)
    }

    /// A mapped namespace at `path`.
    #[must_use]
    pub fn namespace(&self, path: impl Into<String>) -> Namespace<'_> {
        Namespace::new(self, path)
    }

    /// A mapped tag at `path`.
    #[must_use]
    pub fn tag(&self, path: impl Into<String>) -> Tag<'_> {
        Tag::new(self, path)
    }

    /// A mapped object with a known id.
    #[must_use]
    pub fn object(&self, uid: impl Into<String>) -> Object<'_> {
        Object::with_uid(self, uid)
    }

    /// A mapped object with no id yet; call [`Object::create`] to mint
    /// one.
    #[must_use]
    pub fn new_object(&self) -> Object<'_> {
        Object::new(self)
    }
}
