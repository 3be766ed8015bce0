use std::path::PathBuf;
use thiserror::Error;

use super::TypeName;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("required catalog file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read catalog file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse catalog file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to parse catalog: {0}")]
    DeserializeError(#[from] toml::de::Error),

    #[error("type '{0}' is registered more than once in the same catalog")]
    DuplicateType(TypeName),

    #[error("invalid descriptor for '{type_name}.{member}': {reason}")]
    InvalidDescriptor {
        type_name: TypeName,
        member: String,
        reason: &'static str,
    },
}
