//! Mapped views of namespaces, tags and objects.
//!
//! The accessors in [`crate::api`] mirror the URL hierarchy one verb at a
//! time. The types here sit one level up: a [`Namespace`] knows its path
//! and can create children, list its contents, or read its description
//! with a single call. Every mapped value borrows the [`Session`] it was
//! made from, so which endpoint a resource lives on is always explicit.

use reqwest::StatusCode;
use serde_json::Value;

use crate::api::NamespaceApi;
use crate::error::ApiError;
use crate::paths::{path_child, path_split};
use crate::session::Session;
use crate::transport::ApiResponse;
use crate::value::StoredValue;

/// A namespace at a known path.
#[derive(Debug, Clone)]
pub struct Namespace<'a> {
    session: &'a Session,
    path: String,
}

impl<'a> Namespace<'a> {
    #[must_use]
    pub fn new(session: &'a Session, path: impl Into<String>) -> Self {
        Self {
            session,
            path: path.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    fn api(&self) -> NamespaceApi<'a> {
        self.session.namespaces().path(&self.path)
    }

    /// Create this namespace under its parent.
    ///
    /// A path without a separator is created at the root.
    pub fn create(&self, description: &str) -> Result<ApiResponse, ApiError> {
        let (parent, name) = path_split(&self.path).unwrap_or(("", self.path.as_str()));
        self.session.namespaces().path(parent).post(name, description)
    }

    /// Create a child namespace and return a mapped handle on it.
    ///
    /// Returns `None` whenever the service answers with anything other
    /// than a 201, so a permission failure and a name collision look the
    /// same here. Callers that need the actual status should go through
    /// [`NamespaceApi::post`] instead.
    pub fn create_namespace(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Option<Namespace<'a>>, ApiError> {
        let response = self.api().post(name, description)?;
        if response.status == StatusCode::CREATED {
            Ok(Some(Namespace::new(
                self.session,
                path_child(&self.path, name),
            )))
        } else {
            Ok(None)
        }
    }

    /// Create a tag inside this namespace.
    pub fn create_tag(
        &self,
        name: &str,
        description: &str,
        indexed: bool,
    ) -> Result<ApiResponse, ApiError> {
        self.session
            .tags()
            .path(&self.path)
            .post(name, description, indexed)
    }

    pub fn delete(&self) -> Result<ApiResponse, ApiError> {
        self.api().delete()
    }

    /// The namespace description, when the service returned one.
    pub fn description(&self) -> Result<Option<String>, ApiError> {
        let response = self.api().get(true, false, false)?;
        Ok(response.str_field("description").map(str::to_owned))
    }

    pub fn set_description(&self, description: &str) -> Result<ApiResponse, ApiError> {
        self.api().put(description)
    }

    /// Names of the tags declared directly in this namespace.
    pub fn tag_names(&self) -> Result<Option<Vec<String>>, ApiError> {
        let response = self.api().get(false, false, true)?;
        Ok(response.string_list_field("tagNames"))
    }

    /// Full paths of the tags declared directly in this namespace.
    pub fn tag_paths(&self) -> Result<Option<Vec<String>>, ApiError> {
        Ok(self.tag_names()?.map(|names| {
            names
                .iter()
                .map(|name| path_child(&self.path, name))
                .collect()
        }))
    }

    /// Mapped handles on the tags declared directly in this namespace.
    pub fn tags(&self) -> Result<Option<Vec<Tag<'a>>>, ApiError> {
        Ok(self.tag_paths()?.map(|paths| {
            paths
                .into_iter()
                .map(|path| Tag::new(self.session, path))
                .collect()
        }))
    }

    /// Names of the child namespaces.
    pub fn namespace_names(&self) -> Result<Option<Vec<String>>, ApiError> {
        let response = self.api().get(false, true, false)?;
        Ok(response.string_list_field("namespaceNames"))
    }

    /// Full paths of the child namespaces.
    pub fn namespace_paths(&self) -> Result<Option<Vec<String>>, ApiError> {
        Ok(self.namespace_names()?.map(|names| {
            names
                .iter()
                .map(|name| path_child(&self.path, name))
                .collect()
        }))
    }

    /// Mapped handles on the child namespaces.
    pub fn namespaces(&self) -> Result<Option<Vec<Namespace<'a>>>, ApiError> {
        Ok(self.namespace_paths()?.map(|paths| {
            paths
                .into_iter()
                .map(|path| Namespace::new(self.session, path))
                .collect()
        }))
    }

    /// A mapped handle on a tag named `name` inside this namespace.
    #[must_use]
    pub fn tag(&self, name: &str) -> Tag<'a> {
        Tag::new(self.session, path_child(&self.path, name))
    }

    /// A mapped handle on a child namespace named `name`.
    #[must_use]
    pub fn namespace(&self, name: &str) -> Namespace<'a> {
        Namespace::new(self.session, path_child(&self.path, name))
    }
}

/// A tag declaration at a known path.
#[derive(Debug, Clone)]
pub struct Tag<'a> {
    session: &'a Session,
    path: String,
}

impl<'a> Tag<'a> {
    #[must_use]
    pub fn new(session: &'a Session, path: impl Into<String>) -> Self {
        Self {
            session,
            path: path.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The tag description, when the service returned one.
    pub fn description(&self) -> Result<Option<String>, ApiError> {
        let response = self.session.tags().path(&self.path).get(true)?;
        Ok(response.str_field("description").map(str::to_owned))
    }

    pub fn set_description(&self, description: &str) -> Result<ApiResponse, ApiError> {
        self.session.tags().path(&self.path).put(description)
    }

    pub fn delete(&self) -> Result<ApiResponse, ApiError> {
        self.session.tags().path(&self.path).delete()
    }
}

/// An object, identified by the id the service minted for it.
///
/// Objects are never deleted and carry no name; all state lives in the
/// tag values attached to them. A freshly constructed object has no id
/// until [`Object::create`] asks the service for one.
#[derive(Debug, Clone)]
pub struct Object<'a> {
    session: &'a Session,
    uid: Option<String>,
}

impl<'a> Object<'a> {
    /// An object with no id yet.
    #[must_use]
    pub fn new(session: &'a Session) -> Self {
        Self { session, uid: None }
    }

    /// An object whose id is already known.
    #[must_use]
    pub fn with_uid(session: &'a Session, uid: impl Into<String>) -> Self {
        Self {
            session,
            uid: Some(uid.into()),
        }
    }

    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    fn require_uid(&self) -> &str {
        self.uid
            .as_deref()
            .expect("object has no id; call create() or construct it with with_uid()")
    }

    /// Mint an id for this object, optionally attaching an about value.
    ///
    /// On success the object adopts the id from the response.
    pub fn create(&mut self, about: Option<&str>) -> Result<ApiResponse, ApiError> {
        let response = self.session.objects().post(about)?;
        if let Some(id) = response.str_field("id") {
            self.uid = Some(id.to_owned());
        }
        Ok(response)
    }

    /// Fetch the value stored under `tag_path` on this object.
    ///
    /// Returns `None` when the service answers with anything other than
    /// a 200, absent values included.
    ///
    /// # Panics
    ///
    /// Panics when the object has no id.
    pub fn get(&self, tag_path: &str) -> Result<Option<StoredValue>, ApiError> {
        let response = self
            .session
            .objects()
            .id(self.require_uid())
            .tag(tag_path)
            .get()?;
        if response.status == StatusCode::OK {
            Ok(response.value)
        } else {
            Ok(None)
        }
    }

    /// Store a value under `tag_path` on this object.
    ///
    /// # Panics
    ///
    /// Panics when the object has no id, and when the service answers a
    /// write with anything other than a 204. An unacknowledged write
    /// means the caller's view of the object no longer matches the
    /// service, which this mapping treats as unrecoverable.
    pub fn set(
        &self,
        tag_path: &str,
        value: &Value,
        content_type: Option<&str>,
    ) -> Result<(), ApiError> {
        let status = self
            .session
            .objects()
            .id(self.require_uid())
            .tag(tag_path)
            .put(value, content_type)?;
        assert_eq!(
            status,
            StatusCode::NO_CONTENT,
            "tag write to {tag_path} was not acknowledged"
        );
        Ok(())
    }

    /// Whether this object carries a value under `tag_path`.
    ///
    /// # Panics
    ///
    /// Panics when the object has no id.
    pub fn has(&self, tag_path: &str) -> Result<bool, ApiError> {
        let response = self
            .session
            .objects()
            .id(self.require_uid())
            .tag(tag_path)
            .head()?;
        Ok(response.status == StatusCode::OK)
    }

    /// Delete the value stored under `tag_path` from this object.
    ///
    /// # Panics
    ///
    /// Panics when the object has no id.
    pub fn delete(&self, tag_path: &str) -> Result<ApiResponse, ApiError> {
        self.session
            .objects()
            .id(self.require_uid())
            .tag(tag_path)
            .delete()
    }

    /// Paths of every tag that has a value on this object.
    ///
    /// # Panics
    ///
    /// Panics when the object has no id.
    pub fn tag_paths(&self) -> Result<Option<Vec<String>>, ApiError> {
        let response = self.session.objects().id(self.require_uid()).get(false)?;
        Ok(response.string_list_field("tagPaths"))
    }

    /// Mapped handles on every tag that has a value on this object.
    pub fn tags(&self) -> Result<Option<Vec<Tag<'a>>>, ApiError> {
        Ok(self.tag_paths()?.map(|paths| {
            paths
                .into_iter()
                .map(|path| Tag::new(self.session, path))
                .collect()
        }))
    }

    /// A field-style view of one tag holding a plain value.
    #[must_use]
    pub fn value_field(&self, tag_path: impl Into<String>) -> TagValueField<'_, 'a> {
        TagValueField {
            object: self,
            tag_path: tag_path.into(),
        }
    }

    /// A field-style view of one tag holding another object's id.
    #[must_use]
    pub fn relation_field(&self, tag_path: impl Into<String>) -> TagRelationField<'_, 'a> {
        TagRelationField {
            field: self.value_field(tag_path),
        }
    }
}

/// One tag of one object, read and written like a field.
///
/// The pairing of object and tag path is fixed at construction, so call
/// sites read as `rating.get()` rather than repeating the path.
#[derive(Debug, Clone)]
pub struct TagValueField<'o, 'a> {
    object: &'o Object<'a>,
    tag_path: String,
}

impl TagValueField<'_, '_> {
    #[must_use]
    pub fn tag_path(&self) -> &str {
        &self.tag_path
    }

    /// Fetch the field value; `None` when the object has no value here.
    pub fn get(&self) -> Result<Option<StoredValue>, ApiError> {
        self.object.get(&self.tag_path)
    }

    /// Store a primitive value in the field.
    ///
    /// # Panics
    ///
    /// Panics when the write is not acknowledged with a 204, as
    /// [`Object::set`] does.
    pub fn set(&self, value: &Value) -> Result<(), ApiError> {
        self.object.set(&self.tag_path, value, None)
    }
}

/// One tag of one object holding a reference to another object.
///
/// The stored representation is the target's id as a primitive string;
/// reading the field resolves it back into a mapped [`Object`].
#[derive(Debug, Clone)]
pub struct TagRelationField<'o, 'a> {
    field: TagValueField<'o, 'a>,
}

impl<'a> TagRelationField<'_, 'a> {
    #[must_use]
    pub fn tag_path(&self) -> &str {
        self.field.tag_path()
    }

    /// Resolve the referenced object; `None` when no value is stored.
    ///
    /// # Panics
    ///
    /// Panics when the stored value is not a primitive string. A relation
    /// tag holding anything else means the data was not written through
    /// this mapping, and resolving it silently would hand back a bogus
    /// object.
    pub fn get(&self) -> Result<Option<Object<'a>>, ApiError> {
        let Some(value) = self.field.get()? else {
            return Ok(None);
        };
        let uid = match &value {
            StoredValue::Primitive(Value::String(uid)) => uid.clone(),
            StoredValue::Primitive(other) => {
                panic!(
                    "relation tag {} holds a non-string value: {other}",
                    self.field.tag_path
                )
            }
            StoredValue::Opaque { content_type, .. } => {
                panic!(
                    "relation tag {} holds an opaque {content_type} value",
                    self.field.tag_path
                )
            }
        };
        Ok(Some(Object::with_uid(self.field.object.session, uid)))
    }

    /// Store a reference to `target`.
    ///
    /// # Panics
    ///
    /// Panics when `target` has no id, and when the write is not
    /// acknowledged with a 204.
    pub fn set(&self, target: &Object<'_>) -> Result<(), ApiError> {
        let uid = target
            .uid()
            .expect("relation target has no id; create it first");
        self.field.set(&Value::String(uid.to_owned()))
    }
}
