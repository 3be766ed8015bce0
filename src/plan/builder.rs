use std::path::Path;

use super::discover::Discovery;
use super::{Plan, PlanError, Policy};
use crate::catalog::{Catalog, CatalogFile, CatalogSet, TypeName};

/// A catalog source in the loading pipeline.
#[derive(Debug, PartialEq)]
enum CatalogSource {
    Memory(Catalog),
    File(CatalogFile),
}

/// A model defined explicitly rather than discovered from a marker.
#[derive(Debug)]
struct ModelDefinition {
    source_type: TypeName,
    destination_type: TypeName,
    policies: Vec<Policy>,
}

/// Builder for a [`Plan`] over one or more catalogs.
///
/// Catalogs are queried in registration order. Explicitly defined models are
/// built before marker discovery runs, so discovery reuses them instead of
/// building the same pair again; they are also the only way to attach
/// model-scoped policies.
///
/// ## Example
///
/// ```no_run
/// use dragon_mapper::{Plan, PlanBuilder, Policy};
///
/// let plan: Plan = PlanBuilder::new()
///     .with_catalog_file("catalog/domain.toml", true)
///     .with_catalog_file("catalog/local.toml", false)
///     .with_policy(Policy::new("null_handling", "skip"))
///     .build()?;
/// # Ok::<(), dragon_mapper::PlanError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct PlanBuilder {
    sources: Vec<CatalogSource>,
    policies: Vec<Policy>,
    models: Vec<ModelDefinition>,
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an in-memory catalog. Registering an identical catalog again
    /// has no effect.
    pub fn with_catalog(self, catalog: Catalog) -> Self {
        self.with_source(CatalogSource::Memory(catalog))
    }

    /// Adds a TOML catalog file to be loaded.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_catalog_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(CatalogSource::File(CatalogFile::new(path, required)))
    }

    fn with_source(mut self, source: CatalogSource) -> Self {
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
        self
    }

    /// Adds a plan-wide policy.
    pub fn with_policy(mut self, policy: Policy) -> Self {
        self.policies.push(policy);
        self
    }

    /// Defines a model explicitly, with its own policies.
    ///
    /// Defining the same pair twice keeps the first definition.
    pub fn with_model(
        mut self,
        source_type: impl Into<TypeName>,
        destination_type: impl Into<TypeName>,
        policies: impl IntoIterator<Item = Policy>,
    ) -> Self {
        self.models.push(ModelDefinition {
            source_type: source_type.into(),
            destination_type: destination_type.into(),
            policies: policies.into_iter().collect(),
        });
        self
    }

    /// Loads every catalog, builds explicit models, then discovers the rest.
    pub fn build(self) -> Result<Plan, PlanError> {
        if self.sources.is_empty() {
            return Err(PlanError::NoCatalogs);
        }

        let mut catalogs = CatalogSet::default();
        for source in self.sources {
            match source {
                CatalogSource::Memory(catalog) => catalogs.push(catalog),
                CatalogSource::File(file) => {
                    if let Some(catalog) = file.load()? {
                        catalogs.push(catalog);
                    }
                }
            }
        }

        let mut discovery = Discovery::default();
        for definition in self.models {
            discovery.define_model(
                &catalogs,
                &definition.source_type,
                &definition.destination_type,
                definition.policies,
            )?;
        }
        discovery.discover(&catalogs)?;

        Ok(discovery.finish(self.policies))
    }
}
