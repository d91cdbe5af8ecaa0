//! Implements [OpenAPI Info Object][info] types.
//!
//! [info]: https://spec.openapis.org/oas/latest.html#info-object
use serde::{Deserialize, Serialize};

use super::{builder, set_value};

builder! {
    InfoBuilder;

    /// Metadata of the API the normalized paths belong to.
    ///
    /// Path normalization only reads [`Info::version`]: it is the global version handed to a
    /// [`VersionExtractor`][crate::VersionExtractor].
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    #[serde(rename_all = "camelCase")]
    pub struct Info {
        /// Title of the API.
        pub title: String,

        /// Optional description of the API. Supports markdown syntax.
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,

        /// Document version, e.g. `"2"` or `"1.0.0"`.
        pub version: String,
    }
}

impl Info {
    /// Construct a new [`Info`] object with given title and version.
    pub fn new<S: Into<String>>(title: S, version: S) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            ..Default::default()
        }
    }
}

impl InfoBuilder {
    /// Add title of the API.
    pub fn title<I: Into<String>>(mut self, title: I) -> Self {
        set_value!(self title title.into())
    }

    /// Add version of the API.
    pub fn version<I: Into<String>>(mut self, version: I) -> Self {
        set_value!(self version version.into())
    }

    /// Add description of the API.
    pub fn description<S: Into<String>>(mut self, description: Option<S>) -> Self {
        set_value!(self description description.map(|description| description.into()))
    }
}
