//! Implements [OpenAPI Path Object][paths] types.
//!
//! Unlike a hand written document, normalized paths keep the HTTP method exactly as the route
//! declared it, so [`PathItem`] is keyed by method string rather than by a fixed set of fields.
//!
//! [paths]: https://spec.openapis.org/oas/latest.html#paths-object
use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{builder, extensions::Extensions, set_value, Deprecated, ExternalDocs};

#[cfg(not(feature = "preserve_path_order"))]
#[allow(missing_docs)]
#[doc(hidden)]
pub type PathsMap<K, V> = std::collections::BTreeMap<K, V>;
#[cfg(feature = "preserve_path_order")]
#[allow(missing_docs)]
#[doc(hidden)]
pub type PathsMap<K, V> = indexmap::IndexMap<K, V>;

/// Map of HTTP status codes to opaque [Response Objects][response].
///
/// [response]: https://spec.openapis.org/oas/latest.html#response-object
pub type Responses = BTreeMap<String, Value>;

/// [Security Requirement Object][security]: security scheme name mapped to required scopes.
///
/// [security]: https://spec.openapis.org/oas/latest.html#security-requirement-object
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

builder! {
    PathsBuilder;

    /// Implements [OpenAPI Paths Object][paths].
    ///
    /// Holds relative paths to matching endpoints and operations.
    ///
    /// [paths]: https://spec.openapis.org/oas/latest.html#paths-object
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    pub struct Paths {
        /// Map of relative paths with [`PathItem`]s holding [`Operation`]s matching
        /// api endpoints.
        #[serde(flatten)]
        pub paths: PathsMap<String, PathItem>,
    }
}

impl Paths {
    /// Construct a new empty [`Paths`] object.
    pub fn new() -> Self {
        Default::default()
    }

    /// Return _`Option`_ of reference to [`PathItem`] by given relative path _`P`_ if one exists
    /// in [`Paths::paths`] map. Otherwise will return `None`.
    ///
    /// # Examples
    ///
    /// _**Get cats path item.**_
    /// ```rust
    /// # use swagger_paths::openapi::path::Paths;
    /// # let paths = Paths::new();
    /// let path_item = paths.get_path_item("/cats/:id");
    /// ```
    pub fn get_path_item<P: AsRef<str>>(&self, path: P) -> Option<&PathItem> {
        self.paths.get(path.as_ref())
    }

    /// Return _`Option`_ of reference to [`Operation`] from map of paths or `None` if not found.
    ///
    /// * First will try to find [`PathItem`] by given relative path _`P`_ e.g. `"/cats/:id"`.
    /// * Then tries to find [`Operation`] from [`PathItem`]'s operations by given [`HttpMethod`]
    ///   ignoring the case the method was declared with.
    pub fn get_path_operation<P: AsRef<str>>(
        &self,
        path: P,
        http_method: HttpMethod,
    ) -> Option<&Operation> {
        self.paths
            .get(path.as_ref())
            .and_then(|path_item| path_item.get_operation(http_method))
    }

    /// Number of distinct paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if there are no paths.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Merge _`other_paths`_ into `self`. On conflicting path the path item operations will be
    /// merged into existing [`PathItem`]. Otherwise path with [`PathItem`] will be appended to
    /// `self`.
    pub fn merge(&mut self, other_paths: Paths) {
        for (path, that) in other_paths.paths {
            if let Some(this) = self.paths.get_mut(&path) {
                this.merge_operations(that);
            } else {
                self.paths.insert(path, that);
            }
        }
    }
}

impl PathsBuilder {
    /// Append [`PathItem`] with path to map of paths. If path already exists it will merge
    /// [`Operation`]s of [`PathItem`] with already found path item operations.
    pub fn path<I: Into<String>>(mut self, path: I, item: PathItem) -> Self {
        let path_string = path.into();
        if let Some(existing_item) = self.paths.get_mut(&path_string) {
            existing_item.merge_operations(item);
        } else {
            self.paths.insert(path_string, item);
        }

        self
    }
}

impl<P: Into<String>> FromIterator<(P, PathItem)> for Paths {
    fn from_iter<T: IntoIterator<Item = (P, PathItem)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(PathsBuilder::new(), |paths, (path, item)| {
                paths.path(path, item)
            })
            .build()
    }
}

builder! {
    PathItemBuilder;

    /// Implements [OpenAPI Path Item Object][path_item] what describes [`Operation`]s available
    /// on a single path.
    ///
    /// Operations are keyed by the HTTP method string of the route that declared them.
    ///
    /// [path_item]: https://spec.openapis.org/oas/latest.html#path-item-object
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    pub struct PathItem {
        /// Operations of this path by HTTP method.
        #[serde(flatten)]
        pub operations: PathsMap<String, Operation>,
    }
}

impl PathItem {
    /// Construct a new [`PathItem`] with provided [`Operation`] mapped to given method.
    pub fn new<M: Into<String>, O: Into<Operation>>(method: M, operation: O) -> Self {
        let mut path_item = Self::default();
        path_item.operations.insert(method.into(), operation.into());

        path_item
    }

    /// Get [`Operation`] by [`HttpMethod`] regardless of the case the method was declared with.
    pub fn get_operation(&self, http_method: HttpMethod) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|(method, _)| method.eq_ignore_ascii_case(http_method.as_str()))
            .map(|(_, operation)| operation)
    }

    /// Merge all [`Operation`]s from given [`PathItem`] to `self` if `self` does not have
    /// existing operation for the same method.
    pub fn merge_operations(&mut self, path_item: PathItem) {
        for (method, operation) in path_item.operations {
            if !self.operations.contains_key(&method) {
                self.operations.insert(method, operation);
            }
        }
    }
}

impl PathItemBuilder {
    /// Append a new [`Operation`] by method to this [`PathItem`]. Path items can hold only one
    /// operation per method; a later one replaces the earlier.
    pub fn operation<M: Into<String>, O: Into<Operation>>(
        mut self,
        method: M,
        operation: O,
    ) -> Self {
        self.operations.insert(method.into(), operation.into());

        self
    }
}

/// HTTP method of the operation.
///
/// List of supported HTTP methods <https://spec.openapis.org/oas/latest.html#path-item-object>
#[derive(Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Clone, Copy)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "debug", derive(Debug))]
pub enum HttpMethod {
    /// Type mapping for HTTP _GET_ request.
    Get,
    /// Type mapping for HTTP _POST_ request.
    Post,
    /// Type mapping for HTTP _PUT_ request.
    Put,
    /// Type mapping for HTTP _DELETE_ request.
    Delete,
    /// Type mapping for HTTP _OPTIONS_ request.
    Options,
    /// Type mapping for HTTP _HEAD_ request.
    Head,
    /// Type mapping for HTTP _PATCH_ request.
    Patch,
    /// Type mapping for HTTP _TRACE_ request.
    Trace,
}

impl HttpMethod {
    /// Lowercase name of the method as used for keys of a [`PathItem`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

builder! {
    OperationBuilder;

    /// Implements [OpenAPI Operation Object][operation] object.
    ///
    /// Everything besides the typed identity fields is kept as opaque JSON since schema
    /// generation happens before routes reach this crate.
    ///
    /// [operation]: https://spec.openapis.org/oas/latest.html#operation-object
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    #[serde(rename_all = "camelCase")]
    pub struct Operation {
        /// List of tags used for grouping operations.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub tags: Option<Vec<String>>,

        /// Short summary what [`Operation`] does.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub summary: Option<String>,

        /// Long explanation of [`Operation`] behaviour. Markdown syntax is supported.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,

        /// Unique identifier for the API [`Operation`]. Most typically this is mapped to handler
        /// function name.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub operation_id: Option<String>,

        /// Additional external documentation for this operation.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub external_docs: Option<ExternalDocs>,

        /// List of applicable parameters for this [`Operation`]. Each entry is an opaque
        /// Parameter or Reference Object kept exactly as the route declared it.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub parameters: Option<Vec<Value>>,

        /// Optional request body for this [`Operation`].
        #[serde(skip_serializing_if = "Option::is_none")]
        pub request_body: Option<Value>,

        /// List of possible responses returned by the [`Operation`]. An explicitly declared
        /// empty map is kept.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub responses: Option<Responses>,

        /// Out-of-band callbacks related to this operation.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub callbacks: Option<Value>,

        /// Define whether the operation is deprecated or not and thus should be avoided consuming.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub deprecated: Option<Deprecated>,

        /// Declaration which security mechanisms can be used for for the operation. Only one
        /// [`SecurityRequirement`] must be met.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub security: Option<Vec<SecurityRequirement>>,

        /// Alternative servers for this [`Operation`].
        #[serde(skip_serializing_if = "Option::is_none")]
        pub servers: Option<Vec<Value>>,

        /// Version the route was declared under. Only carried over when routes are grouped
        /// without version resolution.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub version: Option<String>,

        /// Optional extensions "x-something".
        #[serde(skip_serializing_if = "Option::is_none", flatten)]
        pub extensions: Option<Extensions>,
    }
}

impl Operation {
    /// Construct a new API [`Operation`].
    pub fn new() -> Self {
        Default::default()
    }
}

impl OperationBuilder {
    /// Add or change short summary of the [`Operation`].
    pub fn summary<S: Into<String>>(mut self, summary: Option<S>) -> Self {
        set_value!(self summary summary.map(|summary| summary.into()))
    }

    /// Add or change operation id of the [`Operation`].
    pub fn operation_id<S: Into<String>>(mut self, operation_id: Option<S>) -> Self {
        set_value!(self operation_id operation_id.map(|operation_id| operation_id.into()))
    }

    /// Append an opaque parameter to [`Operation`] parameters.
    pub fn parameter(mut self, parameter: Value) -> Self {
        self.parameters.get_or_insert_with(Vec::new).push(parameter);

        self
    }

    /// Append status code and a response to the [`Operation`] responses map.
    pub fn response<S: Into<String>>(mut self, code: S, response: Value) -> Self {
        self.responses
            .get_or_insert_with(Responses::new)
            .insert(code.into(), response);

        self
    }

    /// Add or change the version the [`Operation`] was declared under.
    pub fn version<S: Into<String>>(mut self, version: Option<S>) -> Self {
        set_value!(self version version.map(|version| version.into()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn path_builder_merges_methods_of_same_path() {
        let paths = PathsBuilder::new()
            .path("/cats", PathItem::new("get", OperationBuilder::new()))
            .path("/cats", PathItem::new("post", OperationBuilder::new()))
            .path("/cats/:id", PathItem::new("delete", OperationBuilder::new()))
            .build();

        let cats = paths.get_path_item("/cats").expect("/cats should exist");
        assert_eq!(cats.operations.len(), 2);
        assert!(paths
            .get_path_operation("/cats/:id", HttpMethod::Delete)
            .is_some());
    }

    #[test]
    fn path_item_merge_keeps_existing_operation() {
        let mut path_item = PathItem::new(
            "get",
            OperationBuilder::new().summary(Some("existing")),
        );
        path_item.merge_operations(
            PathItemBuilder::new()
                .operation("get", OperationBuilder::new().summary(Some("ignored")))
                .operation("put", OperationBuilder::new().summary(Some("added")))
                .build(),
        );

        assert_eq!(
            path_item.operations["get"].summary.as_deref(),
            Some("existing")
        );
        assert_eq!(path_item.operations["put"].summary.as_deref(), Some("added"));
    }

    #[test]
    fn get_operation_ignores_declared_case() {
        let path_item = PathItem::new("GET", Operation::new());

        assert!(path_item.get_operation(HttpMethod::Get).is_some());
        assert!(path_item.get_operation(HttpMethod::Post).is_none());
    }

    #[test]
    fn operation_serializes_camel_case_and_skips_unset() -> Result<(), serde_json::Error> {
        let operation = OperationBuilder::new()
            .operation_id(Some("findCat"))
            .parameter(json!({ "name": "id", "in": "path", "required": true }))
            .response("200", json!({ "description": "The cat" }))
            .version(Some("2"))
            .build();

        assert_eq!(
            serde_json::to_value(&operation)?,
            json!({
                "operationId": "findCat",
                "parameters": [{ "name": "id", "in": "path", "required": true }],
                "responses": { "200": { "description": "The cat" } },
                "version": "2"
            })
        );
        Ok(())
    }

    #[test]
    fn operation_keeps_parameters_verbatim() -> Result<(), serde_json::Error> {
        let parameters = json!([
            { "name": "ids", "in": "query", "style": "form", "explode": false,
              "allowReserved": true, "schema": { "type": "array" } },
            { "$ref": "#/components/parameters/Page" }
        ]);

        let declared = json!({ "parameters": parameters });

        let operation: Operation = serde_json::from_value(declared.clone())?;

        assert_eq!(serde_json::to_value(&operation)?, declared);
        Ok(())
    }

    #[test]
    fn paths_merge_appends_new_paths() {
        let mut paths = Paths::from_iter([("/cats", PathItem::new("get", Operation::new()))]);
        paths.merge(Paths::from_iter([
            ("/cats", PathItem::new("post", Operation::new())),
            ("/dogs", PathItem::new("get", Operation::new())),
        ]));

        assert_eq!(paths.len(), 2);
        assert_eq!(paths.paths["/cats"].operations.len(), 2);
    }
}
