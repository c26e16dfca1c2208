//! Thin accessors over the service's URL hierarchy.
//!
//! Each top-level resource root has an accessor handing out per-resource
//! handles, and each handle exposes one method per HTTP verb the endpoint
//! supports. Methods return the service's response as data; no status is
//! interpreted here beyond JSON decoding.

use reqwest::{Method, StatusCode};
use serde_json::json;
use serde_json::Value;

use crate::error::ApiError;
use crate::transport::{ApiResponse, Transport, ValueResponse};
use crate::url::QueryArg;

const USERS_ROOT: &str = "/users";
const NAMESPACES_ROOT: &str = "/namespaces";
const TAGS_ROOT: &str = "/tags";
const OBJECTS_ROOT: &str = "/objects";
const POLICIES_ROOT: &str = "/policies";

fn rooted(root: &str, path: &str) -> String {
    if path.is_empty() {
        root.to_owned()
    } else {
        format!("{root}/{path}")
    }
}

/// Accessor for `/users`.
#[derive(Debug, Clone, Copy)]
pub struct UsersApi<'a> {
    transport: &'a Transport,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn username(&self, username: &str) -> UserApi<'a> {
        UserApi {
            transport: self.transport,
            username: username.to_owned(),
        }
    }
}

/// A single user resource.
#[derive(Debug, Clone)]
pub struct UserApi<'a> {
    transport: &'a Transport,
    username: String,
}

impl UserApi<'_> {
    /// `GET /users/{username}`: the user's profile, including their object
    /// id.
    pub fn get(&self) -> Result<ApiResponse, ApiError> {
        self.transport.request(
            Method::GET,
            &rooted(USERS_ROOT, &self.username),
            None,
            &[],
        )
    }
}

/// Accessor for `/namespaces`.
#[derive(Debug, Clone, Copy)]
pub struct NamespacesApi<'a> {
    transport: &'a Transport,
}

impl<'a> NamespacesApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn path(&self, path: &str) -> NamespaceApi<'a> {
        NamespaceApi {
            transport: self.transport,
            path: path.to_owned(),
        }
    }
}

/// A single namespace resource.
#[derive(Debug, Clone)]
pub struct NamespaceApi<'a> {
    transport: &'a Transport,
    path: String,
}

impl NamespaceApi<'_> {
    /// `GET /namespaces/{path}`: namespace details. Each flag asks the
    /// service to include the matching field in the body.
    pub fn get(
        &self,
        return_description: bool,
        return_namespaces: bool,
        return_tags: bool,
    ) -> Result<ApiResponse, ApiError> {
        let query = [
            ("returnDescription", QueryArg::from(return_description)),
            ("returnNamespaces", QueryArg::from(return_namespaces)),
            ("returnTags", QueryArg::from(return_tags)),
        ];
        self.transport
            .request(Method::GET, &self.full_path(), None, &query)
    }

    /// `POST /namespaces/{path}`: create a child namespace here.
    pub fn post(&self, name: &str, description: &str) -> Result<ApiResponse, ApiError> {
        let payload = json!({ "name": name, "description": description });
        self.transport
            .request(Method::POST, &self.full_path(), Some(&payload), &[])
    }

    /// `PUT /namespaces/{path}`: update the description.
    pub fn put(&self, description: &str) -> Result<ApiResponse, ApiError> {
        let payload = json!({ "description": description });
        self.transport
            .request(Method::PUT, &self.full_path(), Some(&payload), &[])
    }

    /// `DELETE /namespaces/{path}`.
    pub fn delete(&self) -> Result<ApiResponse, ApiError> {
        self.transport
            .request(Method::DELETE, &self.full_path(), None, &[])
    }

    fn full_path(&self) -> String {
        rooted(NAMESPACES_ROOT, &self.path)
    }
}

/// Accessor for `/tags`.
#[derive(Debug, Clone, Copy)]
pub struct TagsApi<'a> {
    transport: &'a Transport,
}

impl<'a> TagsApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn path(&self, path: &str) -> TagApi<'a> {
        TagApi {
            transport: self.transport,
            path: path.to_owned(),
        }
    }
}

/// A single tag resource. The path addresses the tag itself, not a value
/// stored on an object.
#[derive(Debug, Clone)]
pub struct TagApi<'a> {
    transport: &'a Transport,
    path: String,
}

impl TagApi<'_> {
    /// `GET /tags/{path}`: tag details.
    pub fn get(&self, return_description: bool) -> Result<ApiResponse, ApiError> {
        let query = [("returnDescription", QueryArg::from(return_description))];
        self.transport
            .request(Method::GET, &self.full_path(), None, &query)
    }

    /// `POST /tags/{path}`: create a tag named `name` in the namespace at
    /// this path. Indexed tags are searchable through object queries.
    pub fn post(
        &self,
        name: &str,
        description: &str,
        indexed: bool,
    ) -> Result<ApiResponse, ApiError> {
        let payload = json!({
            "name": name,
            "description": description,
            "indexed": indexed,
        });
        self.transport
            .request(Method::POST, &self.full_path(), Some(&payload), &[])
    }

    /// `PUT /tags/{path}`: update the description.
    pub fn put(&self, description: &str) -> Result<ApiResponse, ApiError> {
        let payload = json!({ "description": description });
        self.transport
            .request(Method::PUT, &self.full_path(), Some(&payload), &[])
    }

    /// `DELETE /tags/{path}`.
    pub fn delete(&self) -> Result<ApiResponse, ApiError> {
        self.transport
            .request(Method::DELETE, &self.full_path(), None, &[])
    }

    fn full_path(&self) -> String {
        rooted(TAGS_ROOT, &self.path)
    }
}

/// Accessor for `/objects`.
#[derive(Debug, Clone, Copy)]
pub struct ObjectsApi<'a> {
    transport: &'a Transport,
}

impl<'a> ObjectsApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// `GET /objects?query=...`: ids of objects matching a query
    /// expression.
    pub fn get(&self, query: &str) -> Result<ApiResponse, ApiError> {
        let query = [("query", QueryArg::from(query))];
        self.transport
            .request(Method::GET, OBJECTS_ROOT, None, &query)
    }

    /// `POST /objects`: create an object, optionally with an `about`
    /// value. The response carries the new object's id.
    pub fn post(&self, about: Option<&str>) -> Result<ApiResponse, ApiError> {
        let payload = match about {
            Some(about) => json!({ "about": about }),
            None => json!({}),
        };
        self.transport
            .request(Method::POST, OBJECTS_ROOT, Some(&payload), &[])
    }

    #[must_use]
    pub fn id(&self, uid: &str) -> ObjectApi<'a> {
        ObjectApi {
            transport: self.transport,
            uid: uid.to_owned(),
        }
    }
}

/// A single object resource, addressed by id.
#[derive(Debug, Clone)]
pub struct ObjectApi<'a> {
    transport: &'a Transport,
    uid: String,
}

impl<'a> ObjectApi<'a> {
    /// `GET /objects/{id}`: the object's tag paths, with its about value
    /// when `show_about` is set.
    pub fn get(&self, show_about: bool) -> Result<ApiResponse, ApiError> {
        let query = [("showAbout", QueryArg::from(show_about))];
        self.transport
            .request(Method::GET, &rooted(OBJECTS_ROOT, &self.uid), None, &query)
    }

    /// A handle on one tag of this object.
    #[must_use]
    pub fn tag(&self, tag_path: &str) -> ObjectTagApi<'a> {
        ObjectTagApi {
            transport: self.transport,
            path: format!("{}/{}", self.uid, tag_path),
        }
    }
}

/// A tag value on one object: `/objects/{id}/{tag_path}`.
#[derive(Debug, Clone)]
pub struct ObjectTagApi<'a> {
    transport: &'a Transport,
    path: String,
}

impl ObjectTagApi<'_> {
    /// `GET`: fetch the stored value. Primitive bodies come back decoded;
    /// anything else is opaque under its stored content type.
    pub fn get(&self) -> Result<ValueResponse, ApiError> {
        self.transport.get_value(&self.full_path())
    }

    /// `HEAD`: presence check without fetching the value.
    pub fn head(&self) -> Result<ApiResponse, ApiError> {
        self.transport
            .request(Method::HEAD, &self.full_path(), None, &[])
    }

    /// `PUT`: store a value. With `content_type` the payload passes
    /// through under that type; without it the value must be primitive.
    pub fn put(&self, value: &Value, content_type: Option<&str>) -> Result<StatusCode, ApiError> {
        self.transport
            .put_value(&self.full_path(), value, content_type)
    }

    /// `DELETE`: remove the value from this object.
    pub fn delete(&self) -> Result<ApiResponse, ApiError> {
        self.transport
            .request(Method::DELETE, &self.full_path(), None, &[])
    }

    fn full_path(&self) -> String {
        rooted(OBJECTS_ROOT, &self.path)
    }
}

/// Accessor for `/permissions`, split by the kind of resource the
/// permissions govern.
#[derive(Debug, Clone, Copy)]
pub struct PermissionsApi<'a> {
    transport: &'a Transport,
}

impl<'a> PermissionsApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Permissions on namespaces themselves.
    #[must_use]
    pub fn namespaces(&self) -> ResourcePermissionsApi<'a> {
        ResourcePermissionsApi {
            transport: self.transport,
            root: "/permissions/namespaces",
        }
    }

    /// Permissions on tag declarations.
    #[must_use]
    pub fn tags(&self) -> ResourcePermissionsApi<'a> {
        ResourcePermissionsApi {
            transport: self.transport,
            root: "/permissions/tags",
        }
    }

    /// Permissions on the values stored under a tag.
    #[must_use]
    pub fn tag_values(&self) -> ResourcePermissionsApi<'a> {
        ResourcePermissionsApi {
            transport: self.transport,
            root: "/permissions/tag-values",
        }
    }
}

/// One permission category, ready to address a specific resource path.
#[derive(Debug, Clone, Copy)]
pub struct ResourcePermissionsApi<'a> {
    transport: &'a Transport,
    root: &'static str,
}

impl<'a> ResourcePermissionsApi<'a> {
    #[must_use]
    pub fn path(&self, path: &str) -> PermissionApi<'a> {
        PermissionApi {
            transport: self.transport,
            root: self.root,
            path: path.to_owned(),
        }
    }
}

/// The permission set on one resource.
#[derive(Debug, Clone)]
pub struct PermissionApi<'a> {
    transport: &'a Transport,
    root: &'static str,
    path: String,
}

impl PermissionApi<'_> {
    /// `GET {root}/{path}?action=...`: the policy and exceptions for one
    /// action.
    pub fn get(&self, action: &str) -> Result<ApiResponse, ApiError> {
        let query = [("action", QueryArg::from(action))];
        self.transport
            .request(Method::GET, &self.full_path(), None, &query)
    }

    /// `PUT {root}/{path}?action=...`: replace the policy and exception
    /// list for one action.
    pub fn put(
        &self,
        action: &str,
        policy: &str,
        exceptions: &[&str],
    ) -> Result<ApiResponse, ApiError> {
        let query = [("action", QueryArg::from(action))];
        let payload = json!({ "policy": policy, "exceptions": exceptions });
        self.transport
            .request(Method::PUT, &self.full_path(), Some(&payload), &query)
    }

    fn full_path(&self) -> String {
        rooted(self.root, &self.path)
    }
}

/// Accessor for `/policies`.
#[derive(Debug, Clone, Copy)]
pub struct PoliciesApi<'a> {
    transport: &'a Transport,
}

impl<'a> PoliciesApi<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// The default policy one user applies to an action within a
    /// category, such as `("alice", "namespaces", "create")`.
    #[must_use]
    pub fn policy(&self, username: &str, category: &str, action: &str) -> PolicyApi<'a> {
        PolicyApi {
            transport: self.transport,
            path: format!("{username}/{category}/{action}"),
        }
    }
}

/// One user/category/action policy resource.
#[derive(Debug, Clone)]
pub struct PolicyApi<'a> {
    transport: &'a Transport,
    path: String,
}

impl PolicyApi<'_> {
    /// `GET /policies/{username}/{category}/{action}`.
    pub fn get(&self) -> Result<ApiResponse, ApiError> {
        self.transport
            .request(Method::GET, &self.full_path(), None, &[])
    }

    /// `PUT /policies/{username}/{category}/{action}`: replace the policy
    /// and its exception list.
    pub fn put(&self, policy: &str, exceptions: &[&str]) -> Result<ApiResponse, ApiError> {
        let payload = json!({ "policy": policy, "exceptions": exceptions });
        self.transport
            .request(Method::PUT, &self.full_path(), Some(&payload), &[])
    }

    fn full_path(&self) -> String {
        rooted(POLICIES_ROOT, &self.path)
    }
}
