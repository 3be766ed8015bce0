pub mod catalog;
mod error;
pub mod plan;
pub mod service;

pub use catalog::{Catalog, CatalogError, TypeCatalog, TypeName};
pub use error::Error;
pub use plan::{build_plan, Plan, PlanBuilder, PlanError, Policy, RouteType};
pub use service::{MappingService, MappingServiceProvider};
