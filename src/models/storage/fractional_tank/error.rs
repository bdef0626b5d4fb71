use thiserror::Error;

use crate::support::constraint::ConstraintError;

/// Errors raised by tanks and their thermal engines.
///
/// Running out of room or out of fluid is never an error. Fills and drains
/// report those cases through a smaller-than-requested result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TankError {
    /// The tank or thermal engine was constructed with unusable parameters.
    ///
    /// Raised only at construction.
    #[error("invalid configuration: {context}")]
    InvalidConfiguration { context: String },

    /// A temperature or energy was queried for a fluid the compartment does not hold.
    #[error("{fluid} not present in compartment {compartment}")]
    FluidNotPresent { compartment: usize, fluid: String },

    /// A compartment index was outside the tank.
    #[error("compartment {index} out of range for a tank of {count}")]
    CompartmentOutOfRange { index: usize, count: usize },
}

impl TankError {
    /// Creates a configuration error with context.
    pub(crate) fn invalid(context: impl Into<String>) -> Self {
        let context = context.into();
        tracing::warn!(%context, "rejected tank configuration");
        Self::InvalidConfiguration { context }
    }

    /// Creates a configuration error describing a failed numeric constraint.
    pub(crate) fn constraint(what: impl std::fmt::Display, err: ConstraintError) -> Self {
        Self::invalid(format!("{what}: {err}"))
    }

    pub(crate) fn fluid_not_present(compartment: usize, fluid: &impl std::fmt::Debug) -> Self {
        Self::FluidNotPresent {
            compartment,
            fluid: format!("{fluid:?}"),
        }
    }
}
