//! OpenAPI object types produced by path normalization.
//!
//! Only the parts of the OpenAPI document this crate writes are modeled here: the
//! [Paths Object][paths] with its path items and operations, plus the [`Info`] metadata the
//! aggregation reads its global version from.
//!
//! [paths]: https://spec.openapis.org/oas/latest.html#paths-object

use serde::{Deserialize, Serialize, Serializer};

pub use self::{
    extensions::Extensions,
    external_docs::{ExternalDocs, ExternalDocsBuilder},
    info::{Info, InfoBuilder},
    path::{
        HttpMethod, Operation, OperationBuilder, PathItem, Paths, PathsBuilder, Responses,
        SecurityRequirement,
    },
};

pub mod extensions;
pub mod external_docs;
pub mod info;
pub mod path;

builder! {
    NormalizedDocumentBuilder;

    /// Result of path normalization: the `paths` section of an OpenAPI document.
    ///
    /// The caller merges this into the rest of its document (`info`, `components` etc.)
    /// before serving it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use swagger_paths::openapi::NormalizedDocument;
    /// let document = NormalizedDocument::default();
    /// assert_eq!(document.to_json().unwrap(), r#"{"paths":{}}"#);
    /// ```
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    pub struct NormalizedDocument {
        /// Available paths and operations grouped by path and method.
        pub paths: Paths,
    }
}

impl NormalizedDocument {
    /// Construct a new [`NormalizedDocument`] from given [`Paths`].
    pub fn new<P: Into<Paths>>(paths: P) -> Self {
        Self {
            paths: paths.into(),
        }
    }

    /// Converts this [`NormalizedDocument`] to JSON String. This method essentially calls
    /// [`serde_json::to_string`] method.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Converts this [`NormalizedDocument`] to pretty JSON String.
    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Converts this [`NormalizedDocument`] to YAML String. This method essentially calls
    /// [`serde_norway::to_string`] method.
    #[cfg(feature = "yaml")]
    #[cfg_attr(doc_cfg, doc(cfg(feature = "yaml")))]
    pub fn to_yaml(&self) -> Result<String, serde_norway::Error> {
        serde_norway::to_string(self)
    }
}

impl NormalizedDocumentBuilder {
    /// Add [`Paths`] of the document.
    pub fn paths<P: Into<Paths>>(mut self, paths: P) -> Self {
        set_value!(self paths paths.into())
    }
}

/// Value used to indicate whether an operation is deprecated.
///
/// The value will serialize to boolean.
#[derive(PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "debug", derive(Debug))]
#[allow(missing_docs)]
pub enum Deprecated {
    True,
    #[default]
    False,
}

impl Serialize for Deprecated {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_bool(matches!(self, Self::True))
    }
}

impl<'de> Deserialize<'de> for Deprecated {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        bool::deserialize(deserializer).map(Deprecated::from)
    }
}

impl From<bool> for Deprecated {
    fn from(value: bool) -> Self {
        if value {
            Self::True
        } else {
            Self::False
        }
    }
}

macro_rules! build_fn {
    ( $vis:vis $name:ident $( $field:ident ),+ ) => {
        #[doc = concat!("Constructs a new [`", stringify!($name),"`] taking all fields values from this object.")]
        $vis fn build(self) -> $name {
            $name {
                $(
                    $field: self.$field,
                )*
            }
        }
    };
}
pub(crate) use build_fn;

macro_rules! set_value {
    ( $self:ident $field:ident $value:expr ) => {{
        $self.$field = $value;

        $self
    }};
}
pub(crate) use set_value;

macro_rules! new {
    ( $vis:vis $name:ident ) => {
        #[doc = concat!("Constructs a new [`", stringify!($name),"`].")]
        $vis fn new() -> $name {
            $name {
                ..Default::default()
            }
        }
    };
}
pub(crate) use new;

macro_rules! from {
    ( $name:ident $to:ident $( $field:ident ),+ ) => {
        impl From<$name> for $to {
            fn from(value: $name) -> Self {
                Self {
                    $( $field: value.$field, )*
                }
            }
        }

        impl From<$to> for $name {
            fn from(value: $to) -> Self {
                value.build()
            }
        }
    };
}
pub(crate) use from;

macro_rules! builder {
    ( $( #[$builder_meta:meta] )* $builder_name:ident; $(#[$meta:meta])* $vis:vis $key:ident $name:ident $( $tt:tt )* ) => {
        builder!( @type_impl $builder_name $( #[$meta] )* $vis $key $name $( $tt )* );
        builder!( @builder_impl $( #[$builder_meta] )* $builder_name $( #[$meta] )* $vis $key $name $( $tt )* );
    };

    ( @type_impl $builder_name:ident $( #[$meta:meta] )* $vis:vis $key:ident $name:ident
        { $( $( #[$field_meta:meta] )* $field_vis:vis $field:ident: $field_ty:ty, )* }
    ) => {
        $( #[$meta] )*
        $vis $key $name {
            $( $( #[$field_meta] )* $field_vis $field: $field_ty, )*
        }

        impl $name {
            #[doc = concat!("Construct a new ", stringify!($builder_name), ".")]
            #[doc = ""]
            #[doc = concat!("This is effectively same as calling [`", stringify!($builder_name), "::new`]")]
            $vis fn builder() -> $builder_name {
                $builder_name::new()
            }
        }
    };

    ( @builder_impl $( #[$builder_meta:meta] )* $builder_name:ident $( #[$meta:meta] )* $vis:vis $key:ident $name:ident
        { $( $( #[$field_meta:meta] )* $field_vis:vis $field:ident: $field_ty:ty, )* }
    ) => {
        #[doc = concat!("Builder for [`", stringify!($name),
            "`] with chainable configuration methods to create a new [`", stringify!($name) , "`].")]
        $( #[$builder_meta] )*
        #[cfg_attr(feature = "debug", derive(Debug))]
        $vis $key $builder_name {
            $( $field: $field_ty, )*
        }

        impl Default for $builder_name {
            fn default() -> Self {
                let meta_default: $name = $name::default();
                Self {
                    $( $field: meta_default.$field, )*
                }
            }
        }

        impl $builder_name {
            crate::openapi::new!($vis $builder_name);
            crate::openapi::build_fn!($vis $name $( $field ),* );
        }

        crate::openapi::from!($name $builder_name $( $field ),* );
    };
}
pub(crate) use builder;

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn serialize_empty_normalized_document() -> Result<(), serde_json::Error> {
        let document = NormalizedDocument::new(Paths::new());

        assert_json_eq!(serde_json::to_value(&document)?, json!({ "paths": {} }));
        Ok(())
    }

    #[test]
    fn serialize_normalized_document_with_paths() -> Result<(), serde_json::Error> {
        let document = NormalizedDocumentBuilder::new()
            .paths(
                PathsBuilder::new()
                    .path(
                        "/cats/:id",
                        PathItem::new(
                            "get",
                            OperationBuilder::new().summary(Some("Find cat by id")),
                        ),
                    )
                    .path(
                        "/cats",
                        PathItem::new("post", OperationBuilder::new().operation_id(Some("create"))),
                    ),
            )
            .build();

        assert_json_eq!(
            serde_json::to_value(&document)?,
            json!({
                "paths": {
                    "/cats": { "post": { "operationId": "create" } },
                    "/cats/:id": { "get": { "summary": "Find cat by id" } }
                }
            })
        );
        Ok(())
    }

    #[test]
    fn deprecated_serializes_to_bool() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_value(Deprecated::True)?, json!(true));
        assert_eq!(serde_json::to_value(Deprecated::from(false))?, json!(false));
        assert_eq!(serde_json::from_value::<Deprecated>(json!(true))?, Deprecated::True);
        Ok(())
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn normalized_document_to_yaml() {
        let document = NormalizedDocument::new(
            PathsBuilder::new().path("/health", PathItem::new("get", Operation::new())),
        );

        let yaml = document.to_yaml().expect("document should serialize to yaml");
        assert!(yaml.contains("/health"));
        assert!(yaml.contains("get"));
    }
}
