use std::fmt;

use thiserror::Error;

use crate::catalog::{CatalogError, MemberKind, TypeName};

/// Failures of a plan build. Every variant aborts the whole build.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlanError {
    #[error(
        "invalid binding path '{path}' on '{destination_type}.{destination}' from \
         '{source_type}': no member '{segment}' after '{matched}'"
    )]
    InvalidBindingPath {
        source_type: TypeName,
        destination_type: TypeName,
        /// Destination endpoint name, `member` or `member.parameter`.
        destination: String,
        path: String,
        /// Longest prefix that resolved, segments joined with `.`.
        matched: String,
        /// First segment that did not resolve.
        segment: String,
    },

    #[error(
        "member '{}' of kind {} cannot take part in a mapping route{}",
        qualified(.type_name, .member),
        .kind,
        reached_from(.binding)
    )]
    UnsupportedMemberKind {
        /// Declaring type, when the member was registered on one.
        type_name: Option<TypeName>,
        member: String,
        kind: MemberKind,
        /// Set when the member was reached through a binding path.
        binding: Option<Binding>,
    },

    #[error("types '{source_type}' and '{destination_type}' cannot be mapped")]
    InvalidMappingTypes {
        source_type: TypeName,
        destination_type: TypeName,
    },

    #[error("the plan builder requires at least one registered catalog")]
    NoCatalogs,

    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl PlanError {
    /// Ties a source-side failure to the binding that led to it.
    pub(crate) fn with_binding(self, binding: &Binding) -> Self {
        match self {
            Self::UnsupportedMemberKind {
                type_name,
                member,
                kind,
                binding: None,
            } => Self::UnsupportedMemberKind {
                type_name,
                member,
                kind,
                binding: Some(binding.clone()),
            },
            other => other,
        }
    }
}

/// A destination endpoint together with the source path bound to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub source_type: TypeName,
    pub destination_type: TypeName,
    /// Destination endpoint name, `member` or `member.parameter`.
    pub destination: String,
    pub path: String,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}.{}' bound to '{}' on '{}'",
            self.destination_type, self.destination, self.path, self.source_type
        )
    }
}

fn qualified(type_name: &Option<TypeName>, member: &str) -> String {
    match type_name {
        Some(ty) => format!("{ty}.{member}"),
        None => member.to_string(),
    }
}

fn reached_from(binding: &Option<Binding>) -> String {
    binding
        .as_ref()
        .map(|binding| format!(" (reached from {binding})"))
        .unwrap_or_default()
}
