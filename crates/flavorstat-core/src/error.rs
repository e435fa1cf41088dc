use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot access {resource} ({})", path.display())]
    ResourceUnavailable {
        resource: &'static str,
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("There are no recipes with ingredient '{0}'")]
    IngredientNotFound(String),

    #[error("Invalid data at {location}: {message}")]
    InvalidData { location: String, message: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Plot failed: {0}")]
    Plot(String),
}

impl Error {
    pub fn unavailable(resource: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::ResourceUnavailable { resource, path: path.into(), source: None }
    }

    pub fn unreadable(resource: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ResourceUnavailable { resource, path: path.into(), source: Some(source) }
    }

    pub fn invalid_data(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidData { location: location.into(), message: message.into() }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
