//! Fluid identity and the vocabulary shared by tanks and their drivers.
//!
//! Tanks never own a fluid registry. A driver supplies its own fluid type and
//! describes each kind through [`StratifiedFluid`]: a density that decides
//! where the fluid settles, and a base temperature the thermal model measures
//! energy against.

mod action;
mod end;
mod stack;

#[cfg(test)]
pub(crate) mod test_support;

pub use action::FluidAction;
pub use end::End;
pub use stack::FluidStack;

use std::{cmp::Ordering, fmt::Debug};

use uom::si::f64::{MassDensity, ThermodynamicTemperature};

/// A fluid kind that can be stored in a density-stratified compartment.
///
/// The `Ord` implementation is the fluid's identity. It is only consulted to
/// break ties between kinds of equal density, so that layer order stays
/// deterministic.
pub trait StratifiedFluid: Clone + Ord + Debug {
    /// Returns the density used to order layers, densest at the bottom.
    fn density(&self) -> MassDensity;

    /// Returns the temperature of this fluid when it carries no thermal energy.
    fn temperature(&self) -> ThermodynamicTemperature;
}

/// Orders two fluid kinds from the bottom of a compartment to the top.
///
/// Denser fluids sort first. Kinds of equal density fall back to their `Ord`.
pub(crate) fn stratum_order<F: StratifiedFluid>(lower: &F, upper: &F) -> Ordering {
    upper
        .density()
        .value
        .total_cmp(&lower.density().value)
        .then_with(|| lower.cmp(upper))
}
