use serde::Serialize;

use super::PlanError;
use crate::catalog::{Member, MemberKind, Parameter, TypeName};

/// Which end of a route an endpoint sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EndpointSide {
    Source,
    Destination,
}

/// Structural kind of an endpoint, taken from the owning member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum EndpointType {
    Field,
    Property,
    MethodParameter,
    ConstructorParameter,
}

impl EndpointType {
    /// Maps a member kind to its endpoint type, `None` for unroutable kinds.
    pub fn from_kind(kind: MemberKind) -> Option<Self> {
        match kind {
            MemberKind::Field => Some(Self::Field),
            MemberKind::Property => Some(Self::Property),
            MemberKind::Method => Some(Self::MethodParameter),
            MemberKind::Constructor => Some(Self::ConstructorParameter),
            MemberKind::Event | MemberKind::NestedType | MemberKind::Custom => None,
        }
    }
}

/// One side of a route: a named, typed access point.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Endpoint {
    name: String,
    value_type: TypeName,
    endpoint_type: EndpointType,
    side: EndpointSide,
}

impl Endpoint {
    /// Member name, or `member.parameter` for parameter endpoints.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> &TypeName {
        &self.value_type
    }

    pub fn endpoint_type(&self) -> EndpointType {
        self.endpoint_type
    }

    pub fn side(&self) -> EndpointSide {
        self.side
    }
}

/// Builds the endpoint for a field or property.
///
/// Methods and constructors have no single value type, so they are rejected
/// here along with every unroutable kind.
pub fn member_endpoint(member: &Member, side: EndpointSide) -> Result<Endpoint, PlanError> {
    let endpoint_type = endpoint_type(member)?;
    let value_type = member
        .value_type()
        .filter(|_| member.kind().has_value())
        .ok_or_else(|| unsupported(member))?;

    Ok(Endpoint {
        name: member.name().to_string(),
        value_type: value_type.clone(),
        endpoint_type,
        side,
    })
}

/// Builds the endpoint for a parameter of `owner`.
///
/// The value type comes from the parameter; the endpoint type from the owner.
pub fn parameter_endpoint(
    owner: &Member,
    parameter: &Parameter,
    side: EndpointSide,
) -> Result<Endpoint, PlanError> {
    Ok(Endpoint {
        name: format!("{}.{}", owner.name(), parameter.name()),
        value_type: parameter.value_type().clone(),
        endpoint_type: endpoint_type(owner)?,
        side,
    })
}

fn endpoint_type(member: &Member) -> Result<EndpointType, PlanError> {
    EndpointType::from_kind(member.kind()).ok_or_else(|| unsupported(member))
}

pub(crate) fn unsupported(member: &Member) -> PlanError {
    PlanError::UnsupportedMemberKind {
        type_name: member.declaring_type().cloned(),
        member: member.name().to_string(),
        kind: member.kind(),
        binding: None,
    }
}
