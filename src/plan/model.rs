use serde::Serialize;

use super::endpoint::unsupported;
use super::route::build_route;
use super::{PlanError, Policy, Route};
use crate::catalog::{TypeCatalog, TypeName};

/// "Destination type D is populated from source type S."
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Model {
    index: usize,
    source_type: TypeName,
    destination_type: TypeName,
    routes: Vec<Route>,
    policies: Vec<Policy>,
}

impl Model {
    /// Position of this model in [`Plan::models`](super::Plan::models).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn source_type(&self) -> &TypeName {
        &self.source_type
    }

    pub fn destination_type(&self) -> &TypeName {
        &self.destination_type
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    /// The route feeding the destination endpoint with this name.
    pub fn route_to(&self, destination: &str) -> Option<&Route> {
        self.routes
            .iter()
            .find(|route| route.destination().name() == destination)
    }
}

/// Builds the model for one (source, destination) pair.
///
/// Every member visible on the destination type is inspected. Bound fields and
/// properties yield one route each, methods and constructors one route per
/// bound parameter. Any member kind that cannot be routed fails the build,
/// bound or not.
pub(crate) fn build_model<C>(
    catalog: &C,
    index: usize,
    source_type: TypeName,
    destination_type: TypeName,
    policies: Vec<Policy>,
) -> Result<Model, PlanError>
where
    C: TypeCatalog + ?Sized,
{
    let invalid_types = || PlanError::InvalidMappingTypes {
        source_type: source_type.clone(),
        destination_type: destination_type.clone(),
    };

    if catalog.descriptor(&source_type).is_none() {
        return Err(invalid_types());
    }
    let members = catalog.members_of(&destination_type).ok_or_else(invalid_types)?;

    let mut model = Model {
        index,
        source_type,
        destination_type,
        routes: Vec::new(),
        policies,
    };

    let mut routes = Vec::new();
    for member in members {
        let kind = member.kind();

        if kind.has_value() {
            if let Some(path) = member.binding() {
                routes.push(build_route(catalog, &model, path, member, None)?);
            }
        } else if kind.is_callable() {
            for parameter in member.parameters() {
                if let Some(path) = parameter.binding() {
                    routes.push(build_route(catalog, &model, path, member, Some(parameter))?);
                }
            }
        } else {
            return Err(unsupported(member));
        }
    }

    model.routes = routes;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Member, MemberKind, Parameter, TypeDescriptor};
    use crate::plan::{EndpointType, RouteType};

    fn source_types() -> Vec<TypeDescriptor> {
        vec![
            TypeDescriptor::new("S")
                .with_member(Member::property("Name", "string"))
                .with_member(Member::property("Address", "Address")),
            TypeDescriptor::new("Address").with_member(Member::property("City", "string")),
        ]
    }

    fn build(destination: TypeDescriptor) -> Result<Model, PlanError> {
        let catalog = Catalog::builder()
            .with_types(source_types())
            .with_type(destination)
            .build()
            .unwrap();
        build_model(&catalog, 0, "S".into(), "D".into(), Vec::new())
    }

    #[test]
    fn test_direct_route() {
        let model = build(
            TypeDescriptor::new("D")
                .with_member(Member::property("Name", "string").bound_to("Name")),
        )
        .unwrap();

        assert_eq!(model.routes().len(), 1);
        let route = &model.routes()[0];
        assert_eq!(route.route_type(), RouteType::Direct);
        assert_eq!(route.source().name(), "Name");
        assert_eq!(route.destination().name(), "Name");
        assert_eq!(route.model(), 0);
    }

    #[test]
    fn test_flattened_route() {
        let model = build(
            TypeDescriptor::new("D")
                .with_member(Member::property("CityName", "string").bound_to("Address.City")),
        )
        .unwrap();

        let route = model.route_to("CityName").unwrap();
        assert_eq!(route.route_type(), RouteType::FlattenedRoute);
        assert_eq!(route.source().name(), "City");
        assert_eq!(route.source().value_type().as_str(), "string");
    }

    #[test]
    fn test_inherited_destination_member_is_unflattened() {
        let catalog = Catalog::builder()
            .with_types(source_types())
            .with_type(
                TypeDescriptor::new("Named")
                    .with_member(Member::field("Name", "string").bound_to("Name")),
            )
            .with_type(
                TypeDescriptor::new("D")
                    .extends("Named")
                    .with_member(Member::field("City", "string").bound_to("Address.City")),
            )
            .build()
            .unwrap();

        let model = build_model(&catalog, 0, "S".into(), "D".into(), Vec::new()).unwrap();

        assert_eq!(
            model.route_to("City").unwrap().route_type(),
            RouteType::FlattenedRoute
        );
        assert_eq!(
            model.route_to("Name").unwrap().route_type(),
            RouteType::UnflattenedRoute
        );
    }

    #[test]
    fn test_inherited_on_both_sides_is_fully_unflattened() {
        let catalog = Catalog::builder()
            .with_type(TypeDescriptor::new("Base").with_member(Member::property("Id", "int")))
            .with_type(TypeDescriptor::new("S").extends("Base"))
            .with_type(TypeDescriptor::new("DtoBase").with_member(
                Member::property("Id", "int").bound_to("Id"),
            ))
            .with_type(TypeDescriptor::new("D").extends("DtoBase"))
            .build()
            .unwrap();

        let model = build_model(&catalog, 0, "S".into(), "D".into(), Vec::new()).unwrap();

        assert_eq!(
            model.routes()[0].route_type(),
            RouteType::FullyUnflattenedRoute
        );
    }

    #[test]
    fn test_constructor_with_two_bound_parameters() {
        let model = build(
            TypeDescriptor::new("D").with_member(Member::constructor(
                "new",
                [
                    Parameter::new("name", "string").bound_to("Name"),
                    Parameter::new("note", "string"),
                    Parameter::new("city", "string").bound_to("Address.City"),
                ],
            )),
        )
        .unwrap();

        assert_eq!(model.routes().len(), 2);

        let name = model.route_to("new.name").unwrap();
        assert_eq!(name.route_type(), RouteType::Direct);
        assert_eq!(
            name.destination().endpoint_type(),
            EndpointType::ConstructorParameter
        );

        let city = model.route_to("new.city").unwrap();
        assert_eq!(city.route_type(), RouteType::FlattenedRoute);
    }

    #[test]
    fn test_unbound_members_contribute_nothing() {
        let model = build(
            TypeDescriptor::new("D")
                .with_member(Member::property("Name", "string"))
                .with_member(Member::field("Cache", "string"))
                .with_member(Member::method("Reset", [Parameter::new("hard", "bool")])),
        )
        .unwrap();

        assert!(model.routes().is_empty());
    }

    #[test]
    fn test_unsupported_member_kind_aborts() {
        let result = build(
            TypeDescriptor::new("D")
                .with_member(Member::property("Name", "string").bound_to("Name"))
                .with_member(Member::other("Changed", MemberKind::Event)),
        );

        assert!(matches!(
            result,
            Err(PlanError::UnsupportedMemberKind { kind: MemberKind::Event, .. })
        ));
    }

    #[test]
    fn test_missing_member_reports_prefix_and_segment() {
        let catalog = Catalog::builder()
            .with_type(TypeDescriptor::new("S").with_member(Member::property("Name", "string")))
            .with_type(
                TypeDescriptor::new("D")
                    .with_member(Member::property("City", "string").bound_to("Address.City")),
            )
            .build()
            .unwrap();

        let err = build_model(&catalog, 0, "S".into(), "D".into(), Vec::new()).unwrap_err();

        match err {
            PlanError::InvalidBindingPath {
                matched, segment, ..
            } => {
                assert_eq!(matched, "");
                assert_eq!(segment, "Address");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    fn method_source(binding: &str) -> Result<Model, PlanError> {
        let catalog = Catalog::builder()
            .with_type(
                TypeDescriptor::new("S")
                    .with_member(Member::method("Load", Vec::new()))
                    .with_member(Member::method("Locate", [Parameter::new("zone", "string")])),
            )
            .with_type(
                TypeDescriptor::new("D")
                    .with_member(Member::property("Target", "string").bound_to(binding)),
            )
            .build()
            .unwrap();

        build_model(&catalog, 0, "S".into(), "D".into(), Vec::new())
    }

    #[test]
    fn test_method_source_rejected() {
        let err = method_source("Load").unwrap_err();

        match &err {
            PlanError::UnsupportedMemberKind {
                member,
                kind: MemberKind::Method,
                binding: Some(binding),
                ..
            } => {
                assert_eq!(member, "Load");
                assert_eq!(binding.destination_type.as_str(), "D");
                assert_eq!(binding.destination, "Target");
                assert_eq!(binding.path, "Load");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(
            err.to_string(),
            "member 'S.Load' of kind method cannot take part in a mapping route \
             (reached from 'D.Target' bound to 'Load' on 'S')"
        );
    }

    #[test]
    fn test_method_hop_names_the_destination() {
        let err = method_source("Locate.City").unwrap_err();

        match &err {
            PlanError::UnsupportedMemberKind {
                type_name,
                member,
                binding: Some(binding),
                ..
            } => {
                assert_eq!(type_name.as_ref().map(TypeName::as_str), Some("S"));
                assert_eq!(member, "Locate");
                assert_eq!(binding.destination, "Target");
                assert_eq!(binding.path, "Locate.City");
            }
            other => panic!("unexpected error: {}", other),
        }
        assert!(err.to_string().contains("'D.Target' bound to 'Locate.City'"));
    }

    #[test]
    fn test_destination_member_error_has_no_binding() {
        let result = build(
            TypeDescriptor::new("D").with_member(Member::other("Changed", MemberKind::Event)),
        );

        assert!(matches!(
            result,
            Err(PlanError::UnsupportedMemberKind { binding: None, .. })
        ));
    }

    #[test]
    fn test_unknown_source_type() {
        let catalog = Catalog::builder()
            .with_type(TypeDescriptor::new("D"))
            .build()
            .unwrap();

        let result = build_model(&catalog, 0, "Missing".into(), "D".into(), Vec::new());

        assert!(matches!(
            result,
            Err(PlanError::InvalidMappingTypes { ref source_type, .. })
                if source_type.as_str() == "Missing"
        ));
    }
}
