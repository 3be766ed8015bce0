//! Mapping plans: models, routes and endpoints resolved from a type catalog.

mod builder;
mod discover;
mod endpoint;
mod error;
mod model;
mod path;
mod route;

use serde::Serialize;

pub use builder::PlanBuilder;
pub use discover::{build_plan, Plan};
pub use endpoint::{member_endpoint, parameter_endpoint, Endpoint, EndpointSide, EndpointType};
pub use error::{Binding, PlanError};
pub use model::Model;
pub use path::{resolve_path, PathError, ResolvedPath};
pub use route::{Route, RouteType};

/// An opaque named setting carried by a plan, model or route.
///
/// Policies are never interpreted here; mapping engines read them.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Policy {
    name: String,
    value: toml::Value,
}

impl Policy {
    pub fn new(name: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &toml::Value {
        &self.value
    }
}
