//! Dot-path resolution over catalog types.
//!
//! A path such as `Address.City` is resolved from a root type one segment at
//! a time: each segment names a member of the current type, and the member's
//! declared value type becomes the type searched by the next segment.

use thiserror::Error;

use super::{Binding, PlanError};
use crate::catalog::{Member, MemberKind, TypeCatalog, TypeName};

/// A successfully resolved path.
#[derive(Debug, Clone)]
pub struct ResolvedPath<'c> {
    /// The member named by the last segment.
    pub member: &'c Member,
    /// Types whose members were searched, root first.
    pub visited: Vec<TypeName>,
}

/// Path failures before they are tied to a model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("no member '{segment}' after '{matched}'")]
    Unresolved { matched: String, segment: String },

    #[error("cannot traverse member '{member}' of kind {kind}")]
    UnsupportedHop {
        type_name: Option<TypeName>,
        member: String,
        kind: MemberKind,
    },
}

impl PathError {
    /// Attaches the binding being resolved to produce a plan error.
    pub fn into_plan_error(self, binding: &Binding) -> PlanError {
        match self {
            Self::Unresolved { matched, segment } => PlanError::InvalidBindingPath {
                source_type: binding.source_type.clone(),
                destination_type: binding.destination_type.clone(),
                destination: binding.destination.clone(),
                path: binding.path.clone(),
                matched,
                segment,
            },
            Self::UnsupportedHop {
                type_name,
                member,
                kind,
            } => PlanError::UnsupportedMemberKind {
                type_name,
                member,
                kind,
                binding: Some(binding.clone()),
            },
        }
    }
}

/// Resolves `path` starting at `root`.
///
/// Only fields and properties can be traversed; a method or constructor may
/// only appear as the last segment. Empty segments never match, so a path
/// resolves only when re-joining its matched segments gives back the input.
pub fn resolve_path<'c, C>(
    catalog: &'c C,
    root: &TypeName,
    path: &str,
) -> Result<ResolvedPath<'c>, PathError>
where
    C: TypeCatalog + ?Sized,
{
    let mut segments = path.split('.');
    let mut matched: Vec<&str> = Vec::new();
    let mut visited = vec![root.clone()];

    // `split` always yields a first segment, empty for an empty path.
    let first = segments.next().unwrap_or_default();
    let mut member = lookup(catalog, root, first, &matched)?;
    matched.push(first);

    for segment in segments {
        let next = hop_type(member)?;
        visited.push(next.clone());
        member = lookup(catalog, next, segment, &matched)?;
        matched.push(segment);
    }

    Ok(ResolvedPath { member, visited })
}

fn lookup<'c, C>(
    catalog: &'c C,
    ty: &TypeName,
    segment: &str,
    matched: &[&str],
) -> Result<&'c Member, PathError>
where
    C: TypeCatalog + ?Sized,
{
    let member = if segment.is_empty() {
        None
    } else {
        catalog.member(ty, segment)
    };

    member.ok_or_else(|| PathError::Unresolved {
        matched: matched.join("."),
        segment: segment.to_string(),
    })
}

/// The type searched after `member`.
fn hop_type(member: &Member) -> Result<&TypeName, PathError> {
    member
        .value_type()
        .filter(|_| member.kind().has_value())
        .ok_or_else(|| PathError::UnsupportedHop {
            type_name: member.declaring_type().cloned(),
            member: member.name().to_string(),
            kind: member.kind(),
        })
}
