//! Aggregate flat route records into normalized OpenAPI paths.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    error::Error,
    grouping::{Grouping, GroupingStrategy, VersionExtractor},
    openapi::{builder, set_value, Info, NormalizedDocument, PathItem, Paths},
    route::RouteRecord,
    unescape::AdapterFlavor,
};

builder! {
    DocumentConfigBuilder;

    /// Base configuration of the document the normalized paths are rendered for.
    ///
    /// Only [`Info::version`] affects aggregation. The configuration can be loaded from JSON or
    /// YAML, e.g. `{ "info": { "title": "Cats", "version": "2" }, "adapter": "fastify" }`.
    #[non_exhaustive]
    #[derive(Serialize, Deserialize, Default, Clone, PartialEq)]
    #[cfg_attr(feature = "debug", derive(Debug))]
    #[serde(rename_all = "camelCase")]
    pub struct DocumentConfig {
        /// Metadata of the API. The version is the global version of the document.
        pub info: Info,

        /// Adapter the routes were registered with.
        #[serde(default)]
        pub adapter: AdapterFlavor,
    }
}

impl DocumentConfig {
    /// Construct a new [`DocumentConfig`] with given [`Info`] and the default adapter.
    pub fn new(info: Info) -> Self {
        Self {
            info,
            ..Default::default()
        }
    }

    /// Global version of the document.
    pub fn version(&self) -> &str {
        &self.info.version
    }

    /// Read [`DocumentConfig`] from JSON string.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read [`DocumentConfig`] from YAML string.
    #[cfg(feature = "yaml")]
    #[cfg_attr(doc_cfg, doc(cfg(feature = "yaml")))]
    pub fn from_yaml(yaml: &str) -> Result<Self, Error> {
        Ok(serde_norway::from_str(yaml)?)
    }
}

impl DocumentConfigBuilder {
    /// Add [`Info`] metadata of the API.
    pub fn info<I: Into<Info>>(mut self, info: I) -> Self {
        set_value!(self info info.into())
    }

    /// Add adapter the routes were registered with.
    pub fn adapter(mut self, adapter: AdapterFlavor) -> Self {
        set_value!(self adapter adapter)
    }
}

/// Options recognized by path normalization.
///
/// Having a version extractor selects [`Grouping::Versioned`], otherwise
/// [`Grouping::Default`] is used.
#[derive(Default)]
pub struct DocumentOptions {
    version_extractor: Option<Box<dyn VersionExtractor + Send + Sync>>,
}

impl DocumentOptions {
    /// Construct empty [`DocumentOptions`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Set the [`VersionExtractor`] used to resolve route versions.
    pub fn version_extractor<E: VersionExtractor + Send + Sync + 'static>(
        mut self,
        extractor: E,
    ) -> Self {
        self.version_extractor = Some(Box::new(extractor));

        self
    }

    /// Resolve the [`Grouping`] these options select.
    pub fn into_grouping(self) -> Grouping {
        match self.version_extractor {
            Some(extractor) => Grouping::versioned(move |version: &str| extractor.extract(version)),
            None => Grouping::default(),
        }
    }
}

impl From<DocumentOptions> for Grouping {
    fn from(options: DocumentOptions) -> Self {
        options.into_grouping()
    }
}

/// Group _`records`_ into [`Paths`] by path and method.
///
/// Records without route identity are skipped. Per path and method exactly one record is kept,
/// chosen by _`strategy`_ with the version of _`config`_ as the global version, and its root and
/// record level fields are merged into the resulting [`Operation`][crate::openapi::Operation].
///
/// # Examples
///
/// ```rust
/// # use swagger_paths::{
/// #     normalize_paths, DefaultGrouping, DocumentConfig, RootFields, RouteRecord,
/// # };
/// # use swagger_paths::openapi::{HttpMethod, Info};
/// let records = vec![RouteRecord::new(RootFields::new("get", "/cats/:id"))];
/// let config = DocumentConfig::new(Info::new("Cats", "1"));
///
/// let document = normalize_paths(&records, &config, &DefaultGrouping);
///
/// assert!(document.paths.get_path_operation("/cats/:id", HttpMethod::Get).is_some());
/// ```
pub fn normalize_paths<S: GroupingStrategy + ?Sized>(
    records: &[RouteRecord],
    config: &DocumentConfig,
    strategy: &S,
) -> NormalizedDocument {
    let global_version = config.version();

    let mut by_path: IndexMap<&str, IndexMap<&str, Vec<&RouteRecord>>> = IndexMap::new();
    let mut skipped = 0usize;
    for record in records {
        let Some(root) = record.root.as_ref() else {
            skipped += 1;
            continue;
        };
        by_path
            .entry(root.path.as_str())
            .or_default()
            .entry(root.method.as_str())
            .or_default()
            .push(record);
    }
    if skipped > 0 {
        tracing::trace!(skipped, "skipped route records without route identity");
    }

    let mut paths = Paths::new();
    for (path, methods) in by_path {
        let mut path_item = PathItem::default();
        for (method, routes) in methods {
            let operation = strategy
                .select(global_version, &routes)
                .and_then(|route| route.to_operation(strategy.keeps_version()));
            if let Some(operation) = operation {
                path_item.operations.insert(method.to_string(), operation);
            }
        }
        paths.paths.insert(path.to_string(), path_item);
    }

    tracing::debug!(
        records = records.len(),
        paths = paths.len(),
        global_version,
        "normalized route records into paths"
    );

    NormalizedDocument::new(paths)
}

/// Unescape route paths for the adapter of _`config`_ and then [`normalize_paths`] them.
pub fn unescape_and_normalize<S: GroupingStrategy + ?Sized>(
    records: &[RouteRecord],
    config: &DocumentConfig,
    strategy: &S,
) -> NormalizedDocument {
    let records = crate::unescape::unescape_colons_in_path(records, config.adapter);
    normalize_paths(&records, config, strategy)
}
