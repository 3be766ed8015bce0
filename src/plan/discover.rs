//! Plan discovery over a type catalog.

use std::collections::HashMap;

use serde::Serialize;

use super::model::build_model;
use super::{Model, PlanError, Policy, Route};
use crate::catalog::{TypeCatalog, TypeName};

/// The resolved mapping plan: one model per (source, destination) pair, in
/// discovery order, plus plan-wide policies.
///
/// A plan is immutable once built and can be shared freely between readers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Plan {
    models: Vec<Model>,
    policies: Vec<Policy>,
}

impl Plan {
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Plan-wide policies, handed to mapping engines untouched.
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn model(&self, source_type: &TypeName, destination_type: &TypeName) -> Option<&Model> {
        self.models.iter().find(|model| {
            model.source_type() == source_type && model.destination_type() == destination_type
        })
    }

    /// Every model reading from `source_type`.
    pub fn models_from<'a>(
        &'a self,
        source_type: &'a TypeName,
    ) -> impl Iterator<Item = &'a Model> + 'a {
        self.models
            .iter()
            .filter(move |model| model.source_type() == source_type)
    }

    /// The model owning `route`, `None` if the route comes from another plan.
    pub fn model_of(&self, route: &Route) -> Option<&Model> {
        self.models.get(route.model())
    }
}

/// Discovers every model declared in `catalog`.
///
/// Each type carrying a model marker yields one model; a pair discovered again
/// reuses the first model. The first failure aborts the whole build.
pub fn build_plan<C>(catalog: &C, general_policies: Vec<Policy>) -> Result<Plan, PlanError>
where
    C: TypeCatalog + ?Sized,
{
    let mut discovery = Discovery::default();
    discovery.discover(catalog)?;
    Ok(discovery.finish(general_policies))
}

/// Models collected so far, unique by (source, destination).
#[derive(Debug, Default)]
pub(crate) struct Discovery {
    models: Vec<Model>,
    index: HashMap<(TypeName, TypeName), usize>,
}

impl Discovery {
    /// Returns the index of the model for the pair, building it on first use.
    pub(crate) fn define_model<C>(
        &mut self,
        catalog: &C,
        source_type: &TypeName,
        destination_type: &TypeName,
        policies: Vec<Policy>,
    ) -> Result<usize, PlanError>
    where
        C: TypeCatalog + ?Sized,
    {
        let key = (source_type.clone(), destination_type.clone());
        if let Some(&index) = self.index.get(&key) {
            tracing::debug!(%source_type, %destination_type, "model already defined, reusing");
            return Ok(index);
        }

        let index = self.models.len();
        let model = build_model(
            catalog,
            index,
            source_type.clone(),
            destination_type.clone(),
            policies,
        )?;
        tracing::debug!(
            %source_type,
            %destination_type,
            routes = model.routes().len(),
            "built model"
        );

        self.models.push(model);
        self.index.insert(key, index);
        Ok(index)
    }

    /// Defines a model for every type carrying a model marker.
    pub(crate) fn discover<C>(&mut self, catalog: &C) -> Result<(), PlanError>
    where
        C: TypeCatalog + ?Sized,
    {
        for destination_type in catalog.type_names() {
            let Some(source_type) = catalog
                .descriptor(destination_type)
                .and_then(|descriptor| descriptor.source_type())
            else {
                continue;
            };

            self.define_model(catalog, source_type, destination_type, Vec::new())?;
        }
        Ok(())
    }

    pub(crate) fn finish(self, policies: Vec<Policy>) -> Plan {
        Plan {
            models: self.models,
            policies,
        }
    }
}
