use thiserror::Error;

/// Boxed cause attached to a [`LoadError::SourceUnavailable`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures that abort a load. No partial table is ever produced.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {location}: {source}")]
    SourceUnavailable {
        location: String,
        #[source]
        source: BoxError,
    },

    #[error("missing required column(s): {}", missing.join(", "))]
    SchemaInvalid { missing: Vec<String> },
}

impl LoadError {
    pub(crate) fn unavailable(location: impl Into<String>, source: impl Into<BoxError>) -> Self {
        LoadError::SourceUnavailable {
            location: location.into(),
            source: source.into(),
        }
    }
}
