use std::fmt::Display;

/// Errors from reading configuration or route records. Path normalization itself never fails.
#[derive(Debug)]
pub enum Error {
    Json(serde_json::Error),
    #[cfg(feature = "yaml")]
    Yaml(serde_norway::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(error) => write!(f, "json: {error}"),
            #[cfg(feature = "yaml")]
            Self::Yaml(error) => write!(f, "yaml: {error}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(error) => Some(error),
            #[cfg(feature = "yaml")]
            Self::Yaml(error) => Some(error),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(json: serde_json::Error) -> Self {
        Self::Json(json)
    }
}

#[cfg(feature = "yaml")]
impl From<serde_norway::Error> for Error {
    fn from(yaml: serde_norway::Error) -> Self {
        Self::Yaml(yaml)
    }
}
