use std::collections::HashMap;

use super::{CatalogError, Member, TypeDescriptor, TypeName};

/// Read-only metadata queries over a set of type declarations.
///
/// Implementors only need to enumerate types and hand out descriptors; member
/// lookup through base types is derived from those two queries.
pub trait TypeCatalog: std::fmt::Debug {
    /// Every type in enumeration order. The same name may appear more than
    /// once when the catalog aggregates several sources.
    fn type_names(&self) -> Vec<&TypeName>;

    fn descriptor(&self, ty: &TypeName) -> Option<&TypeDescriptor>;

    /// Members visible on `ty`: its own members first, then the members of
    /// each base type in turn. Returns `None` if `ty` is unknown.
    fn members_of(&self, ty: &TypeName) -> Option<Vec<&Member>> {
        let mut current = self.descriptor(ty)?;
        let mut seen = vec![current.name()];
        let mut members: Vec<&Member> = current.members().iter().collect();

        while let Some(base) = current.base() {
            // A cyclic chain stops at the first repeat.
            if seen.contains(&base) {
                break;
            }
            let Some(next) = self.descriptor(base) else {
                break;
            };
            seen.push(next.name());
            members.extend(next.members());
            current = next;
        }

        Some(members)
    }

    /// First visible member of `ty` named exactly `name`.
    fn member(&self, ty: &TypeName, name: &str) -> Option<&Member> {
        self.members_of(ty)?
            .into_iter()
            .find(|member| member.name() == name)
    }
}

/// In-memory catalog populated through [`Catalog::builder`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    types: Vec<TypeDescriptor>,
    index: HashMap<TypeName, usize>,
}

impl Catalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }
}

impl TypeCatalog for Catalog {
    fn type_names(&self) -> Vec<&TypeName> {
        self.types.iter().map(TypeDescriptor::name).collect()
    }

    fn descriptor(&self, ty: &TypeName) -> Option<&TypeDescriptor> {
        self.index.get(ty).map(|&i| &self.types[i])
    }
}

/// Registration API for [`Catalog`].
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct CatalogBuilder {
    types: Vec<TypeDescriptor>,
}

impl CatalogBuilder {
    pub fn with_type(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    pub fn with_types(mut self, descriptors: impl IntoIterator<Item = TypeDescriptor>) -> Self {
        self.types.extend(descriptors);
        self
    }

    /// Builds the catalog. Fails if a type name is registered twice.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut index = HashMap::with_capacity(self.types.len());

        for (i, descriptor) in self.types.iter().enumerate() {
            if index.insert(descriptor.name().clone(), i).is_some() {
                return Err(CatalogError::DuplicateType(descriptor.name().clone()));
            }
        }

        Ok(Catalog {
            types: self.types,
            index,
        })
    }
}

/// Several catalogs queried as one, in registration order.
///
/// Descriptor lookups return the first catalog that knows the type, while
/// [`type_names`](TypeCatalog::type_names) concatenates every catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSet {
    catalogs: Vec<Catalog>,
}

impl CatalogSet {
    pub fn new(catalogs: impl IntoIterator<Item = Catalog>) -> Self {
        Self {
            catalogs: catalogs.into_iter().collect(),
        }
    }

    pub fn push(&mut self, catalog: Catalog) {
        self.catalogs.push(catalog);
    }

    pub fn catalogs(&self) -> &[Catalog] {
        &self.catalogs
    }
}

impl TypeCatalog for CatalogSet {
    fn type_names(&self) -> Vec<&TypeName> {
        self.catalogs
            .iter()
            .flat_map(|catalog| catalog.type_names())
            .collect()
    }

    fn descriptor(&self, ty: &TypeName) -> Option<&TypeDescriptor> {
        self.catalogs
            .iter()
            .find_map(|catalog| catalog.descriptor(ty))
    }
}
