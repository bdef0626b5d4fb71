//! Multi-compartment tanks whose fluids stratify by density.
//!
//! A [`FractionalTank`] is divided into a fixed number of [`Compartment`]s.
//! Each compartment can hold several immiscible fluids at once, sorted with
//! the densest at the bottom. Fluid goes in and out either through the tank
//! as a whole, which walks compartments in order, or through a
//! [`CompartmentAccess`] view scoped to one compartment and one [`End`].
//!
//! # Example
//!
//! ```
//! use fractional_tanks::models::storage::fractional_tank::FractionalTank;
//! use fractional_tanks::support::fluid::{End, FluidAction, FluidStack, StratifiedFluid};
//! use uom::si::{
//!     f64::{MassDensity, ThermodynamicTemperature},
//!     mass_density::kilogram_per_cubic_meter,
//!     thermodynamic_temperature::kelvin,
//! };
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
//! enum Fluid { Water, Oil }
//!
//! impl StratifiedFluid for Fluid {
//!     fn density(&self) -> MassDensity {
//!         let value = match self { Fluid::Water => 1000.0, Fluid::Oil => 800.0 };
//!         MassDensity::new::<kilogram_per_cubic_meter>(value)
//!     }
//!     fn temperature(&self) -> ThermodynamicTemperature {
//!         ThermodynamicTemperature::new::<kelvin>(300.0)
//!     }
//! }
//!
//! let mut tank = FractionalTank::new(1, &[1000]).unwrap();
//! assert_eq!(tank.fill(&FluidStack::new(Fluid::Oil, 600), End::Top, FluidAction::Execute), 600);
//! assert_eq!(tank.fill(&FluidStack::new(Fluid::Water, 600), End::Top, FluidAction::Execute), 400);
//!
//! // Water sank beneath the oil.
//! let bottom = tank.fluid_at(0, End::Bottom).unwrap().unwrap();
//! assert_eq!(bottom, &FluidStack::new(Fluid::Water, 400));
//! ```

mod access;
mod compartment;
mod drained;
mod error;
mod validity;

pub use access::CompartmentAccess;
pub use compartment::Compartment;
pub use drained::Drained;
pub use error::TankError;
pub use validity::{AcceptAll, FluidValidity};

use crate::support::{
    constraint::StrictlyPositive,
    fluid::{End, FluidAction, FluidStack, StratifiedFluid},
};

/// Volume of one standard fluid unit, used when no capacity is configured.
pub const BUCKET_VOLUME: u32 = 1000;

/// A fixed set of density-stratified compartments.
///
/// The validity strategy `V` decides which fluids each compartment accepts.
/// It is fixed at construction.
#[derive(Debug, Clone)]
pub struct FractionalTank<F, V = AcceptAll> {
    compartments: Vec<Compartment<F>>,
    validity: V,
}

impl<F: StratifiedFluid> FractionalTank<F, AcceptAll> {
    /// Creates a tank of `count` compartments that accepts any fluid anywhere.
    ///
    /// `capacities` may be empty (every compartment holds [`BUCKET_VOLUME`]),
    /// hold one value applied to every compartment, or hold exactly `count`
    /// values, one per compartment.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::InvalidConfiguration`] if `count` is zero, a
    /// capacity is zero, or the number of capacities is neither 0, 1, nor `count`.
    pub fn new(count: usize, capacities: &[u32]) -> Result<Self, TankError> {
        Self::with_validity(count, capacities, AcceptAll)
    }
}

impl<F: StratifiedFluid, V: FluidValidity<F>> FractionalTank<F, V> {
    /// Creates a tank whose fills are restricted by `validity`.
    ///
    /// # Errors
    ///
    /// See [`FractionalTank::new`].
    pub fn with_validity(count: usize, capacities: &[u32], validity: V) -> Result<Self, TankError> {
        let capacities = per_compartment(count, capacities, BUCKET_VOLUME, "capacities")?;
        let compartments = capacities
            .into_iter()
            .enumerate()
            .map(|(index, capacity)| {
                StrictlyPositive::new(capacity)
                    .map(|capacity| Compartment::new(capacity.into_inner()))
                    .map_err(|err| TankError::constraint(format!("capacity of compartment {index}"), err))
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            count,
            capacities = ?compartments.iter().map(Compartment::capacity).collect::<Vec<_>>(),
            "built fractional tank"
        );
        Ok(Self {
            compartments,
            validity,
        })
    }

    /// Returns the number of compartments.
    #[must_use]
    pub fn compartment_count(&self) -> usize {
        self.compartments.len()
    }

    /// Returns the compartment at `index`, if it exists.
    #[must_use]
    pub fn compartment(&self, index: usize) -> Option<&Compartment<F>> {
        self.compartments.get(index)
    }

    /// Iterates over the compartments in tank order.
    pub fn compartments(&self) -> impl Iterator<Item = &Compartment<F>> {
        self.compartments.iter()
    }

    /// Returns the capacity of a compartment.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn capacity(&self, index: usize) -> Result<u32, TankError> {
        self.get(index).map(Compartment::capacity)
    }

    /// Returns the total amount held by a compartment.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn amount(&self, index: usize) -> Result<u32, TankError> {
        self.get(index).map(Compartment::amount)
    }

    /// Returns the contents of a compartment from bottom to top.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn contents(&self, index: usize) -> Result<&[FluidStack<F>], TankError> {
        self.get(index).map(Compartment::layers)
    }

    /// Returns the amount of `fluid` in a compartment, or zero if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn amount_of(&self, index: usize, fluid: &F) -> Result<u32, TankError> {
        self.get(index).map(|compartment| compartment.amount_of(fluid))
    }

    /// Returns the layer exposed at `end` of a compartment.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn fluid_at(&self, index: usize, end: End) -> Result<Option<&FluidStack<F>>, TankError> {
        self.get(index).map(|compartment| compartment.fluid_at(end))
    }

    /// Returns `true` if `fluid` may be placed in a compartment through `end`.
    #[must_use]
    pub fn is_valid(&self, index: usize, end: End, fluid: &F) -> bool {
        self.validity.is_valid(index, end, fluid)
    }

    /// Fills compartments in tank order, returning the amount accepted.
    ///
    /// Compartments that reject the fluid are skipped. The result never
    /// exceeds `resource.amount`, and a short result means the tank ran out
    /// of room.
    pub fn fill(&mut self, resource: &FluidStack<F>, end: End, action: FluidAction) -> u32 {
        let mut remaining = resource.amount;
        for index in 0..self.compartments.len() {
            if remaining == 0 {
                break;
            }
            remaining -= self.fill_compartment(index, resource.with_amount(remaining), end, action);
        }
        resource.amount - remaining
    }

    /// Drains up to `resource.amount` of exactly `resource.fluid`, walking
    /// compartments in tank order.
    pub fn drain_fluid(&mut self, resource: &FluidStack<F>, action: FluidAction) -> Drained<F> {
        let mut drained = Drained::default();
        let mut remaining = resource.amount;
        for index in 0..self.compartments.len() {
            if remaining == 0 {
                break;
            }
            let taken = self.drain_compartment_fluid(index, &resource.with_amount(remaining), action);
            remaining -= taken.amount();
            drained.extend(taken);
        }
        drained
    }

    /// Drains up to `max` units of whatever is exposed at `end`.
    ///
    /// Within a compartment the drain takes a contiguous run of layers
    /// starting at `end`. It moves on to the next compartment only once the
    /// current one is empty.
    ///
    /// Each later compartment is drained from whatever is exposed at its own
    /// `end`. The drain does not keep following the fluid kind taken from the
    /// first compartment. To collect one kind across compartments, use
    /// [`FractionalTank::drain_fluid`].
    pub fn drain(&mut self, max: u32, end: End, action: FluidAction) -> Drained<F> {
        let mut drained = Drained::default();
        let mut remaining = max;
        for index in 0..self.compartments.len() {
            if remaining == 0 {
                break;
            }
            let taken = self.drain_compartment(index, remaining, end, action);
            remaining -= taken.amount();
            drained.extend(taken);
        }
        drained
    }

    /// Returns a read/write view of one compartment through one end.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn access(&mut self, index: usize, end: End) -> Result<CompartmentAccess<'_, F, V>, TankError> {
        self.get(index)?;
        Ok(CompartmentAccess::new(self, index, end))
    }

    pub(crate) fn fill_compartment(
        &mut self,
        index: usize,
        resource: FluidStack<F>,
        end: End,
        action: FluidAction,
    ) -> u32 {
        if !self.validity.is_valid(index, end, &resource.fluid) {
            return 0;
        }
        let accepted = self.compartments[index].fill(&resource, action);
        if action.execute() && accepted > 0 {
            tracing::trace!(compartment = index, fluid = ?resource.fluid, accepted, "filled");
        }
        accepted
    }

    pub(crate) fn drain_compartment_fluid(
        &mut self,
        index: usize,
        resource: &FluidStack<F>,
        action: FluidAction,
    ) -> Drained<F> {
        let taken = self.compartments[index].drain_fluid(&resource.fluid, resource.amount, action);
        if action.execute() && taken > 0 {
            tracing::trace!(compartment = index, fluid = ?resource.fluid, taken, "drained fluid");
        }
        let mut drained = Drained::default();
        drained.push(resource.fluid.clone(), taken);
        drained
    }

    pub(crate) fn drain_compartment(
        &mut self,
        index: usize,
        max: u32,
        end: End,
        action: FluidAction,
    ) -> Drained<F> {
        let drained = self.compartments[index].drain_from(end, max, action);
        if action.execute() && !drained.is_empty() {
            tracing::trace!(compartment = index, ?end, taken = drained.amount(), "drained");
        }
        drained
    }

    /// Returns the compartment at an index already known to be in range.
    pub(crate) fn compartment_at(&self, index: usize) -> &Compartment<F> {
        &self.compartments[index]
    }

    fn get(&self, index: usize) -> Result<&Compartment<F>, TankError> {
        self.compartments
            .get(index)
            .ok_or(TankError::CompartmentOutOfRange {
                index,
                count: self.compartments.len(),
            })
    }
}

/// Expands a "none, one, or one per compartment" list into one value per
/// compartment.
pub(crate) fn per_compartment<T: Copy>(
    count: usize,
    values: &[T],
    default: T,
    what: &str,
) -> Result<Vec<T>, TankError> {
    let count = StrictlyPositive::new(count)
        .map_err(|err| TankError::constraint("compartment count", err))?
        .into_inner();
    match values {
        [] => Ok(vec![default; count]),
        [value] => Ok(vec![*value; count]),
        values if values.len() == count => Ok(values.to_vec()),
        values => Err(TankError::invalid(format!(
            "expected no {what}, one, or {count}; got {}",
            values.len()
        ))),
    }
}
