//! Contract for the mapping engines that consume a plan.
//!
//! This crate only resolves plans. Copying data and rewriting expressions is
//! left to a [`MappingServiceProvider`], which [`MappingService`] hands the
//! plan to.

use crate::catalog::TypeName;
use crate::plan::Plan;
use crate::Error;

/// Turns a source value into a destination value following a plan.
pub trait DataMapper {
    type Value;
    type Error: std::error::Error;

    fn map(
        &self,
        source: &Self::Value,
        source_type: &TypeName,
        destination_type: &TypeName,
    ) -> Result<Self::Value, Self::Error>;
}

/// Rewrites an expression over the source type into one over the destination type.
pub trait ExpressionMapper {
    type Expression;
    type Error: std::error::Error;

    fn map(
        &self,
        expression: &Self::Expression,
        source_type: &TypeName,
        destination_type: &TypeName,
    ) -> Result<Self::Expression, Self::Error>;
}

/// A mapping engine able to execute plans.
pub trait MappingServiceProvider {
    type DataMapper: DataMapper;
    type ExpressionMapper: ExpressionMapper;

    fn data_mapper(&self, plan: &Plan) -> Self::DataMapper;

    fn expression_mapper(&self, plan: &Plan) -> Self::ExpressionMapper;
}

type DataMapperOf<P> = <P as MappingServiceProvider>::DataMapper;
type ExpressionMapperOf<P> = <P as MappingServiceProvider>::ExpressionMapper;
type ValueOf<P> = <DataMapperOf<P> as DataMapper>::Value;
type ValueErrorOf<P> = <DataMapperOf<P> as DataMapper>::Error;
type ExpressionOf<P> = <ExpressionMapperOf<P> as ExpressionMapper>::Expression;
type ExpressionErrorOf<P> = <ExpressionMapperOf<P> as ExpressionMapper>::Error;

/// A plan paired with the provider that executes it.
///
/// ## Example
///
/// ```ignore
/// use dragon_mapper::{MappingService, PlanBuilder};
///
/// let service = MappingService::builder()
///     .with_plan(PlanBuilder::new().with_catalog_file("catalog.toml", true).build()?)
///     .with_provider(MyEngine::default())
///     .build()?;
///
/// let dto = service.map(&customer, &"Customer".into(), &"CustomerDto".into())?;
/// ```
#[derive(Debug)]
pub struct MappingService<P> {
    plan: Plan,
    provider: P,
}

impl<P> MappingService<P> {
    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl MappingService<()> {
    /// Creates a new builder for constructing a `MappingService`.
    pub fn builder() -> MappingServiceBuilder<()> {
        MappingServiceBuilder {
            plan: None,
            provider: (),
        }
    }
}

impl<P: MappingServiceProvider> MappingService<P> {
    /// Maps `source` using the service's plan.
    pub fn map(
        &self,
        source: &ValueOf<P>,
        source_type: &TypeName,
        destination_type: &TypeName,
    ) -> Result<ValueOf<P>, ValueErrorOf<P>> {
        self.map_with(&self.plan, source, source_type, destination_type)
    }

    /// Maps `source` using `plan` instead of the service's plan.
    pub fn map_with(
        &self,
        plan: &Plan,
        source: &ValueOf<P>,
        source_type: &TypeName,
        destination_type: &TypeName,
    ) -> Result<ValueOf<P>, ValueErrorOf<P>> {
        self.provider
            .data_mapper(plan)
            .map(source, source_type, destination_type)
    }

    pub fn map_expression(
        &self,
        expression: &ExpressionOf<P>,
        source_type: &TypeName,
        destination_type: &TypeName,
    ) -> Result<ExpressionOf<P>, ExpressionErrorOf<P>> {
        self.map_expression_with(&self.plan, expression, source_type, destination_type)
    }

    pub fn map_expression_with(
        &self,
        plan: &Plan,
        expression: &ExpressionOf<P>,
        source_type: &TypeName,
        destination_type: &TypeName,
    ) -> Result<ExpressionOf<P>, ExpressionErrorOf<P>> {
        self.provider
            .expression_mapper(plan)
            .map(expression, source_type, destination_type)
    }
}

/// Builder for constructing a [`MappingService`].
///
/// The builder starts without a provider (`MappingServiceBuilder<()>`) and
/// transitions to `MappingServiceBuilder<P>` when
/// [`with_provider`](Self::with_provider) is called.
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct MappingServiceBuilder<P> {
    plan: Option<Plan>,
    provider: P,
}

impl MappingServiceBuilder<()> {
    /// Attaches the engine that will execute the plan.
    pub fn with_provider<P: MappingServiceProvider>(self, provider: P) -> MappingServiceBuilder<P> {
        MappingServiceBuilder {
            plan: self.plan,
            provider,
        }
    }
}

impl<P> MappingServiceBuilder<P> {
    /// Attaches the plan, normally the result of
    /// [`PlanBuilder::build`](crate::PlanBuilder::build).
    pub fn with_plan(mut self, plan: Plan) -> Self {
        self.plan = Some(plan);
        self
    }
}

impl<P: MappingServiceProvider> MappingServiceBuilder<P> {
    /// Builds the service. Returns an error if no plan was provided.
    pub fn build(self) -> Result<MappingService<P>, Error> {
        Ok(MappingService {
            plan: self.plan.ok_or(Error::MissingPlan)?,
            provider: self.provider,
        })
    }
}
