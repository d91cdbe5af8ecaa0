//! Flat route records handed over by route discovery.
//!
//! A record is split into two layers of operation fields. [`RootFields`] hold the route
//! identity (method, path, version) together with the operation fields declared by the route
//! decorators, and [`RouteRecord::overrides`] hold the fields declared on the record itself.
//! When a record is turned into an [`Operation`] the layers are merged field by field with
//! [`OperationFields::layered`]: a field present in the overrides replaces the root field of
//! the same name as a whole; `x-` extensions are merged key by key with the same precedence.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::openapi::{
    builder,
    path::{Responses, SecurityRequirement},
    set_value, Deprecated, Extensions, ExternalDocs, Operation,
};

builder! {
    OperationFieldsBuilder;

    /// One layer of [OpenAPI Operation Object][operation] fields where every field is optional.
    ///
    /// [operation]: https://spec.openapis.org/oas/latest.html#operation-object
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    #[serde(rename_all = "camelCase", default)]
    pub struct OperationFields {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub tags: Option<Vec<String>>,

        #[serde(skip_serializing_if = "Option::is_none")]
        pub summary: Option<String>,

        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,

        #[serde(skip_serializing_if = "Option::is_none")]
        pub operation_id: Option<String>,

        #[serde(skip_serializing_if = "Option::is_none")]
        pub external_docs: Option<ExternalDocs>,

        #[serde(skip_serializing_if = "Option::is_none")]
        pub parameters: Option<Vec<Value>>,

        #[serde(skip_serializing_if = "Option::is_none")]
        pub request_body: Option<Value>,

        #[serde(skip_serializing_if = "Option::is_none")]
        pub responses: Option<Responses>,

        #[serde(skip_serializing_if = "Option::is_none")]
        pub callbacks: Option<Value>,

        #[serde(skip_serializing_if = "Option::is_none")]
        pub deprecated: Option<Deprecated>,

        #[serde(skip_serializing_if = "Option::is_none")]
        pub security: Option<Vec<SecurityRequirement>>,

        #[serde(skip_serializing_if = "Option::is_none")]
        pub servers: Option<Vec<Value>>,

        /// Optional extensions "x-something".
        #[serde(skip_serializing_if = "Option::is_none", flatten)]
        pub extensions: Option<Extensions>,
    }
}

impl OperationFields {
    /// Construct a new empty layer of operation fields.
    pub fn new() -> Self {
        Default::default()
    }

    /// Merge _`overrides`_ over _`root`_.
    ///
    /// Every field is taken from _`overrides`_ when it is set there and from _`root`_ otherwise.
    /// Values are never merged deeply, e.g. override `responses` replace root `responses`
    /// entirely, even with an empty map. Extensions are the exception: both maps are combined
    /// and override keys win.
    ///
    /// A field declared as `null` is read as unset, so it falls back to the root value instead
    /// of clearing it.
    pub fn layered(root: &OperationFields, overrides: &OperationFields) -> OperationFields {
        OperationFields {
            tags: overrides.tags.clone().or_else(|| root.tags.clone()),
            summary: overrides.summary.clone().or_else(|| root.summary.clone()),
            description: overrides
                .description
                .clone()
                .or_else(|| root.description.clone()),
            operation_id: overrides
                .operation_id
                .clone()
                .or_else(|| root.operation_id.clone()),
            external_docs: overrides
                .external_docs
                .clone()
                .or_else(|| root.external_docs.clone()),
            parameters: overrides
                .parameters
                .clone()
                .or_else(|| root.parameters.clone()),
            request_body: overrides
                .request_body
                .clone()
                .or_else(|| root.request_body.clone()),
            responses: overrides
                .responses
                .clone()
                .or_else(|| root.responses.clone()),
            callbacks: overrides.callbacks.clone().or_else(|| root.callbacks.clone()),
            deprecated: overrides
                .deprecated
                .clone()
                .or_else(|| root.deprecated.clone()),
            security: overrides.security.clone().or_else(|| root.security.clone()),
            servers: overrides.servers.clone().or_else(|| root.servers.clone()),
            extensions: Extensions::layered(
                root.extensions.as_ref(),
                overrides.extensions.as_ref(),
            ),
        }
    }
}

impl From<OperationFields> for Operation {
    fn from(fields: OperationFields) -> Self {
        Operation {
            tags: fields.tags,
            summary: fields.summary,
            description: fields.description,
            operation_id: fields.operation_id,
            external_docs: fields.external_docs,
            parameters: fields.parameters,
            request_body: fields.request_body,
            responses: fields.responses,
            callbacks: fields.callbacks,
            deprecated: fields.deprecated,
            security: fields.security,
            servers: fields.servers,
            version: None,
            extensions: fields.extensions,
        }
    }
}

impl OperationFieldsBuilder {
    /// Append tag to the tags of this layer.
    pub fn tag<S: Into<String>>(mut self, tag: S) -> Self {
        self.tags.get_or_insert_with(Vec::new).push(tag.into());

        self
    }

    /// Add or change short summary.
    pub fn summary<S: Into<String>>(mut self, summary: Option<S>) -> Self {
        set_value!(self summary summary.map(|summary| summary.into()))
    }

    /// Add or change description.
    pub fn description<S: Into<String>>(mut self, description: Option<S>) -> Self {
        set_value!(self description description.map(|description| description.into()))
    }

    /// Add or change operation id.
    pub fn operation_id<S: Into<String>>(mut self, operation_id: Option<S>) -> Self {
        set_value!(self operation_id operation_id.map(|operation_id| operation_id.into()))
    }

    /// Append an opaque parameter to the parameters of this layer.
    pub fn parameter(mut self, parameter: Value) -> Self {
        self.parameters.get_or_insert_with(Vec::new).push(parameter);

        self
    }

    /// Add or change request body.
    pub fn request_body(mut self, request_body: Option<Value>) -> Self {
        set_value!(self request_body request_body)
    }

    /// Append status code and a response to the responses of this layer.
    pub fn response<S: Into<String>>(mut self, code: S, response: Value) -> Self {
        self.responses
            .get_or_insert_with(Responses::new)
            .insert(code.into(), response);

        self
    }

    /// Add or change deprecated status.
    pub fn deprecated(mut self, deprecated: Option<Deprecated>) -> Self {
        set_value!(self deprecated deprecated)
    }

    /// Add openapi extensions (x-something).
    pub fn extensions(mut self, extensions: Option<Extensions>) -> Self {
        set_value!(self extensions extensions)
    }
}

builder! {
    RootFieldsBuilder;

    /// Route identity of a [`RouteRecord`] together with the operation fields the route
    /// declared.
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    pub struct RootFields {
        /// HTTP method as declared by the route, e.g. `"get"` or `"GET"`.
        pub method: String,

        /// Route path. May still contain escaped parameter markers, see
        /// [`unescape_colons_in_path`][crate::unescape_colons_in_path].
        pub path: String,

        /// Opaque API version the route was declared under.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub version: Option<String>,

        /// Operation fields declared together with the route.
        #[serde(flatten)]
        pub operation: OperationFields,
    }
}

impl RootFields {
    /// Construct new [`RootFields`] for given method and path.
    pub fn new<M: Into<String>, P: Into<String>>(method: M, path: P) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }
}

impl RootFieldsBuilder {
    /// Add HTTP method of the route.
    pub fn method<S: Into<String>>(mut self, method: S) -> Self {
        set_value!(self method method.into())
    }

    /// Add path of the route.
    pub fn path<S: Into<String>>(mut self, path: S) -> Self {
        set_value!(self path path.into())
    }

    /// Add or change version of the route.
    pub fn version<S: Into<String>>(mut self, version: Option<S>) -> Self {
        set_value!(self version version.map(|version| version.into()))
    }

    /// Add operation fields declared together with the route.
    pub fn operation<O: Into<OperationFields>>(mut self, operation: O) -> Self {
        set_value!(self operation operation.into())
    }
}

builder! {
    RouteRecordBuilder;

    /// One flattened route definition.
    ///
    /// Serialized form is the route's own operation fields with the identity nested under
    /// `root`:
    ///
    /// ```json
    /// {
    ///   "root": { "method": "get", "path": "/cats/[:]id", "version": "2", "summary": "Find cat" },
    ///   "responses": { "200": { "description": "The cat" } }
    /// }
    /// ```
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    pub struct RouteRecord {
        /// Route identity; records without one are skipped by aggregation.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub root: Option<RootFields>,

        /// Operation fields declared at the record level. These take precedence over
        /// [`RootFields::operation`].
        #[serde(flatten)]
        pub overrides: OperationFields,
    }
}

impl RouteRecord {
    /// Construct a new [`RouteRecord`] with given root and no record level fields.
    pub fn new(root: RootFields) -> Self {
        Self {
            root: Some(root),
            overrides: OperationFields::default(),
        }
    }

    /// Path of the route, `None` for records without route identity.
    pub fn path(&self) -> Option<&str> {
        self.root.as_ref().map(|root| root.path.as_str())
    }

    /// Method of the route, `None` for records without route identity.
    pub fn method(&self) -> Option<&str> {
        self.root.as_ref().map(|root| root.method.as_str())
    }

    /// Version of the route if the route has identity and declared one.
    pub fn version(&self) -> Option<&str> {
        self.root.as_ref().and_then(|root| root.version.as_deref())
    }

    /// Merge root and record level fields into a single [`Operation`].
    ///
    /// With _`keep_version`_ the root version is carried into [`Operation::version`].
    /// Returns `None` for records without route identity.
    pub fn to_operation(&self, keep_version: bool) -> Option<Operation> {
        self.root.as_ref().map(|root| {
            let mut operation: Operation =
                OperationFields::layered(&root.operation, &self.overrides).into();
            if keep_version {
                operation.version = root.version.clone();
            }

            operation
        })
    }

    /// Parse a JSON array of route records.
    pub fn list_from_json(json: &str) -> Result<Vec<RouteRecord>, crate::error::Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a YAML sequence of route records.
    #[cfg(feature = "yaml")]
    #[cfg_attr(doc_cfg, doc(cfg(feature = "yaml")))]
    pub fn list_from_yaml(yaml: &str) -> Result<Vec<RouteRecord>, crate::error::Error> {
        Ok(serde_norway::from_str(yaml)?)
    }
}

impl RouteRecordBuilder {
    /// Add route identity of the record.
    pub fn root<R: Into<RootFields>>(mut self, root: R) -> Self {
        set_value!(self root Some(root.into()))
    }

    /// Add record level operation fields.
    pub fn overrides<O: Into<OperationFields>>(mut self, overrides: O) -> Self {
        set_value!(self overrides overrides.into())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn record_fields_take_precedence_over_root_fields() {
        let record = RouteRecordBuilder::new()
            .root(
                RootFieldsBuilder::new()
                    .method("get")
                    .path("/cats")
                    .operation(
                        OperationFieldsBuilder::new()
                            .summary(Some("from root"))
                            .operation_id(Some("listCats")),
                    ),
            )
            .overrides(OperationFieldsBuilder::new().summary(Some("from record")))
            .build();

        let operation = record.to_operation(false).expect("record has root");

        assert_eq!(operation.summary.as_deref(), Some("from record"));
        assert_eq!(operation.operation_id.as_deref(), Some("listCats"));
    }

    #[test]
    fn override_responses_replace_root_responses_entirely() {
        let root = OperationFieldsBuilder::new()
            .response("200", json!({ "description": "ok" }))
            .response("404", json!({ "description": "missing" }))
            .build();
        let overrides = OperationFieldsBuilder::new()
            .response("201", json!({ "description": "created" }))
            .build();

        let merged = OperationFields::layered(&root, &overrides);
        let responses = merged.responses.expect("responses should be set");

        assert_eq!(responses.len(), 1);
        assert!(responses.contains_key("201"));
    }

    #[test]
    fn empty_override_responses_clear_root_responses() -> Result<(), serde_json::Error> {
        let record: RouteRecord = serde_json::from_value(json!({
            "root": {
                "method": "delete",
                "path": "/cats/:id",
                "summary": "Remove cat",
                "responses": { "204": { "description": "Removed" } }
            },
            "summary": null,
            "responses": {}
        }))?;

        let operation = record.to_operation(false).expect("record has root");

        assert_eq!(
            serde_json::to_value(&operation)?,
            json!({ "summary": "Remove cat", "responses": {} })
        );
        Ok(())
    }

    #[test]
    fn parameters_pass_through_untouched() -> Result<(), crate::error::Error> {
        let records = RouteRecord::list_from_json(
            r##"[{
                "root": { "method": "get", "path": "/cats" },
                "parameters": [
                    { "name": "ids", "in": "query", "style": "form", "explode": false },
                    { "$ref": "#/components/parameters/Page" }
                ]
            }]"##,
        )?;

        let operation = records[0].to_operation(false).expect("record has root");

        assert_eq!(
            serde_json::to_value(&operation)?,
            json!({
                "parameters": [
                    { "name": "ids", "in": "query", "style": "form", "explode": false },
                    { "$ref": "#/components/parameters/Page" }
                ]
            })
        );
        Ok(())
    }

    #[test]
    fn to_operation_keeps_version_only_on_request() {
        let record = RouteRecord::new(
            RootFieldsBuilder::new()
                .method("get")
                .path("/cats")
                .version(Some("2"))
                .build(),
        );

        assert_eq!(
            record.to_operation(true).and_then(|operation| operation.version),
            Some(String::from("2"))
        );
        assert_eq!(
            record.to_operation(false).and_then(|operation| operation.version),
            None
        );
    }

    #[test]
    fn record_without_root_has_no_identity() {
        let record = RouteRecordBuilder::new()
            .overrides(OperationFieldsBuilder::new().summary(Some("orphan")))
            .build();

        assert!(record.path().is_none());
        assert!(record.method().is_none());
        assert!(record.to_operation(false).is_none());
    }

    #[test]
    fn deserialize_record_with_nested_root() -> Result<(), serde_json::Error> {
        let record: RouteRecord = serde_json::from_value(json!({
            "root": {
                "method": "get",
                "path": "/cats/[:]id",
                "version": "2",
                "summary": "Find cat",
                "operationId": "findCat"
            },
            "responses": { "200": { "description": "The cat" } }
        }))?;

        assert_eq!(record.method(), Some("get"));
        assert_eq!(record.path(), Some("/cats/[:]id"));
        assert_eq!(record.version(), Some("2"));

        let root = record.root.as_ref().expect("root should be parsed");
        assert_eq!(root.operation.summary.as_deref(), Some("Find cat"));
        assert_eq!(root.operation.operation_id.as_deref(), Some("findCat"));
        assert!(record.overrides.responses.is_some());
        Ok(())
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn route_records_from_yaml() {
        let records = RouteRecord::list_from_yaml(
            "- root:\n    method: post\n    path: /cats\n  summary: Create cat\n- summary: orphan\n",
        )
        .expect("records should parse");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].method(), Some("post"));
        assert_eq!(records[0].overrides.summary.as_deref(), Some("Create cat"));
        assert!(records[1].root.is_none());
    }
}
