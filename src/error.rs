use crate::catalog::CatalogError;
use crate::plan::PlanError;
use thiserror::Error;

/// Top-level error type for the dragon-mapper library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("plan error: {0}")]
    Plan(#[from] PlanError),

    #[error("mapping service requires a plan")]
    MissingPlan,
}
