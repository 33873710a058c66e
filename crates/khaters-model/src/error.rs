use thiserror::Error;

/// Terminal load failure. Either kind aborts the whole load — no partial
/// model state is ever installed.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The artifact could not be retrieved at all.
    #[error("artifact '{name}' unavailable: {source}")]
    Unavailable {
        name: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// The artifact was retrieved but does not have its expected shape.
    #[error("artifact '{name}' malformed: {reason}")]
    Malformed { name: &'static str, reason: String },
}

impl LoadError {
    /// Name of the offending artifact.
    pub fn artifact(&self) -> &'static str {
        match self {
            Self::Unavailable { name, .. } | Self::Malformed { name, .. } => name,
        }
    }
}
