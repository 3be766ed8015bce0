use serde::Serialize;

use super::endpoint::{member_endpoint, parameter_endpoint, Endpoint, EndpointSide};
use super::path::resolve_path;
use super::{Binding, Model, PlanError, Policy};
use crate::catalog::{Member, Parameter, TypeCatalog, TypeName};

/// Topology of a route, from where each endpoint is declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RouteType {
    /// Both endpoints sit directly on the model's types.
    Direct,
    /// A nested source value feeds a top-level destination member.
    FlattenedRoute,
    /// A top-level source value feeds a member the destination does not declare itself.
    UnflattenedRoute,
    /// Neither endpoint sits directly on the model's types.
    FullyUnflattenedRoute,
}

impl RouteType {
    pub fn classify(source_on_source_type: bool, destination_on_destination_type: bool) -> Self {
        match (source_on_source_type, destination_on_destination_type) {
            (true, true) => Self::Direct,
            (true, false) => Self::UnflattenedRoute,
            (false, true) => Self::FlattenedRoute,
            (false, false) => Self::FullyUnflattenedRoute,
        }
    }
}

/// One binding: the destination endpoint receives the source endpoint's value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Route {
    route_type: RouteType,
    source: Endpoint,
    destination: Endpoint,
    source_path: String,
    model: usize,
    policies: Vec<Policy>,
}

impl Route {
    pub fn route_type(&self) -> RouteType {
        self.route_type
    }

    pub fn source(&self) -> &Endpoint {
        &self.source
    }

    pub fn destination(&self) -> &Endpoint {
        &self.destination
    }

    /// The binding path, relative to the model's source type.
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Index of the owning model in [`Plan::models`](super::Plan::models).
    pub fn model(&self) -> usize {
        self.model
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }
}

/// Builds the route for a bound destination member, or for one bound
/// parameter of a destination method or constructor.
pub(crate) fn build_route<C>(
    catalog: &C,
    model: &Model,
    path: &str,
    destination: &Member,
    parameter: Option<&Parameter>,
) -> Result<Route, PlanError>
where
    C: TypeCatalog + ?Sized,
{
    let destination_endpoint = match parameter {
        Some(parameter) => parameter_endpoint(destination, parameter, EndpointSide::Destination)?,
        None => member_endpoint(destination, EndpointSide::Destination)?,
    };
    let binding = Binding {
        source_type: model.source_type().clone(),
        destination_type: model.destination_type().clone(),
        destination: destination_endpoint.name().to_string(),
        path: path.to_string(),
    };

    let resolved = resolve_path(catalog, model.source_type(), path)
        .map_err(|e| e.into_plan_error(&binding))?;
    let source = member_endpoint(resolved.member, EndpointSide::Source)
        .map_err(|e| e.with_binding(&binding))?;

    let route_type = RouteType::classify(
        declared_on(resolved.member, model.source_type()),
        declared_on(destination, model.destination_type()),
    );

    tracing::trace!(
        source_type = %model.source_type(),
        destination_type = %model.destination_type(),
        source = source.name(),
        destination = destination_endpoint.name(),
        ?route_type,
        "resolved route"
    );

    Ok(Route {
        route_type,
        source,
        destination: destination_endpoint,
        source_path: binding.path,
        model: model.index(),
        policies: Vec::new(),
    })
}

fn declared_on(member: &Member, ty: &TypeName) -> bool {
    member.declaring_type() == Some(ty)
}
