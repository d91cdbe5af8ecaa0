//! Normalize route metadata into the `paths` section of an OpenAPI document.
//!
//! Route discovery produces a flat list of [`RouteRecord`]s, one per decorated handler and API
//! version. This crate turns that list into OpenAPI [`Paths`][openapi::Paths] grouped by path and
//! method:
//!
//! 1. [`unescape_colons_in_path`] undoes the colon escaping the HTTP adapter needed while the
//!    routes were registered, e.g. `/cats/[:]id` or `/cats/:{id}` become `/cats/:id`.
//! 2. [`normalize_paths`] groups the records and keeps exactly one operation per path and
//!    method. Which record wins is decided by a [`GroupingStrategy`]:
//!    * [`DefaultGrouping`] keeps the last declared record.
//!    * [`VersionedGrouping`] asks a [`VersionExtractor`] for candidate versions of the document
//!      version and keeps the first record matching a candidate, or the first declared record if
//!      none matches.
//!
//! Both steps are pure functions and never fail; records without route identity are skipped
//! and paths without escape markers are left untouched.
//!
//! # Examples
//!
//! _**Render version `2` of an API where `/cats/:id` is declared for versions `1` and `2`.**_
//! ```rust
//! use swagger_paths::{
//!     normalize_paths, unescape_colons_in_path, AdapterFlavor, DocumentConfig,
//!     OperationFieldsBuilder, RootFieldsBuilder, RouteRecord, VersionedGrouping,
//! };
//! use swagger_paths::openapi::{HttpMethod, Info};
//!
//! let route = |version: &str, summary: &str| {
//!     RouteRecord::new(
//!         RootFieldsBuilder::new()
//!             .method("get")
//!             .path("/cats/[:]id")
//!             .version(Some(version))
//!             .operation(OperationFieldsBuilder::new().summary(Some(summary)))
//!             .build(),
//!     )
//! };
//! let records = unescape_colons_in_path(
//!     &[route("1", "Find cat"), route("2", "Find cat with owner")],
//!     AdapterFlavor::Express,
//! );
//!
//! let config = DocumentConfig::new(Info::new("Cats", "2"));
//! let grouping = VersionedGrouping::new(|version: &str| vec![version.to_string()]);
//! let document = normalize_paths(&records, &config, &grouping);
//!
//! let operation = document
//!     .paths
//!     .get_path_operation("/cats/:id", HttpMethod::Get)
//!     .unwrap();
//! assert_eq!(operation.summary.as_deref(), Some("Find cat with owner"));
//! ```
//!
//! # Crate features
//!
//! * **`yaml`** Enables [`serde_norway`] to read configuration and route records from YAML and
//!   to write [`NormalizedDocument`][openapi::NormalizedDocument] as YAML.
//! * **`preserve_path_order`** Keep paths and methods in the order they were first declared
//!   instead of sorting them.
//! * **`debug`** Derive `Debug` for the public types.
#![cfg_attr(doc_cfg, feature(doc_cfg))]

pub mod error;
pub mod grouping;
pub mod openapi;
pub mod route;
pub mod transformer;
pub mod unescape;

pub use self::{
    error::Error,
    grouping::{DefaultGrouping, Grouping, GroupingStrategy, VersionExtractor, VersionedGrouping},
    route::{
        OperationFields, OperationFieldsBuilder, RootFields, RootFieldsBuilder, RouteRecord,
        RouteRecordBuilder,
    },
    transformer::{
        normalize_paths, unescape_and_normalize, DocumentConfig, DocumentConfigBuilder,
        DocumentOptions,
    },
    unescape::{unescape_colon, unescape_colons_in_path, AdapterFlavor},
};
