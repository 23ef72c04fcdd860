use thiserror::Error;

/// Failures the catalog layer can produce. None of them is fatal: callers
/// degrade to an empty catalog, a redirect, or an "oldest" sort key.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("failed to load catalog from {location}: {reason}")]
    Load { location: String, reason: String },

    #[error("catalog entry not found: {}", .id.as_deref().unwrap_or("<no id supplied>"))]
    NotFound { id: Option<String> },

    #[error("unparseable date: {0:?}")]
    InvalidDate(String),
}

impl CatalogError {
    pub fn load(location: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        CatalogError::Load { location: location.into(), reason: reason.to_string() }
    }

    pub fn not_found(id: Option<&str>) -> Self {
        CatalogError::NotFound { id: id.map(str::to_string) }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
