//! Type catalog: the read-only metadata the plan resolver queries.

mod descriptor;
mod error;
mod file;
mod source;

pub use descriptor::{Member, MemberKind, Parameter, TypeDescriptor, TypeName};
pub use error::CatalogError;
pub use file::{parse_catalog, CatalogFile};
pub use source::{Catalog, CatalogBuilder, CatalogSet, TypeCatalog};
