//! Error taxonomy for search and fetch operations

/// Errors surfaced by the Hudu adapter
///
/// Shape problems in upstream payloads are deliberately absent from this enum:
/// they are absorbed as zero results (see [`crate::assets::ShapeAnomaly`]).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HuduError {
    /// Missing or blank caller input, raised before any upstream call
    #[error("{0}")]
    Input(String),

    /// A fetch matched zero assets
    #[error("Asset id '{0}' not found")]
    NotFound(String),

    /// Non-2xx status, network failure, timeout or undecodable body
    #[error("Hudu API request failed: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HuduError {
    /// Short machine readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            HuduError::Input(_) => "input",
            HuduError::NotFound(_) => "not_found",
            HuduError::Upstream { .. } => "upstream",
            HuduError::Serialization(_) => "serialization",
        }
    }

    /// HTTP status returned by Hudu, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            HuduError::Upstream { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HuduError {
    fn from(err: serde_json::Error) -> Self {
        HuduError::Serialization(err.to_string())
    }
}
