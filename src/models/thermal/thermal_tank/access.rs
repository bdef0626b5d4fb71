use crate::models::storage::fractional_tank::{Compartment, Drained, FluidValidity};
use crate::support::fluid::{End, FluidAction, FluidStack, StratifiedFluid};

use super::{ConductivityLookup, ThermalTank, exchange, layer_kelvin};

/// A read/write view of one thermal compartment through one end.
///
/// Behaves like
/// [`CompartmentAccess`](crate::models::storage::fractional_tank::CompartmentAccess),
/// and additionally keeps the compartment's thermal ledger in step with every
/// committed fill or drain.
#[derive(Debug)]
pub struct ThermalAccess<'a, F, V, C> {
    thermal: &'a mut ThermalTank<F, V, C>,
    index: usize,
    end: End,
}

impl<'a, F, V, C> ThermalAccess<'a, F, V, C>
where
    F: StratifiedFluid,
    V: FluidValidity<F>,
    C: ConductivityLookup<F>,
{
    /// The caller has already checked that `index` is in range.
    pub(super) fn new(thermal: &'a mut ThermalTank<F, V, C>, index: usize, end: End) -> Self {
        Self {
            thermal,
            index,
            end,
        }
    }

    /// Returns the index of the viewed compartment.
    #[must_use]
    pub fn compartment(&self) -> usize {
        self.index
    }

    /// Returns the end this view operates from.
    #[must_use]
    pub fn end(&self) -> End {
        self.end
    }

    /// Returns the layer currently exposed at this view's end.
    #[must_use]
    pub fn fluid(&self) -> Option<&FluidStack<F>> {
        self.inner().fluid_at(self.end)
    }

    /// Returns the temperature of the layer exposed at this view's end.
    #[must_use]
    pub fn temperature(&self) -> Option<i32> {
        let layer = self.fluid()?;
        let ledger = &self.thermal.ledgers[self.index];
        Some(exchange::to_kelvin(layer_kelvin(ledger, layer)))
    }

    /// Returns the total amount held by the compartment.
    #[must_use]
    pub fn amount(&self) -> u32 {
        self.inner().amount()
    }

    /// Returns the compartment's capacity.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.inner().capacity()
    }

    /// Returns the compartment's contents from bottom to top.
    #[must_use]
    pub fn contents(&self) -> &[FluidStack<F>] {
        self.inner().layers()
    }

    /// Fills only this compartment, returning the amount accepted.
    pub fn fill(&mut self, resource: &FluidStack<F>, action: FluidAction) -> u32 {
        let (index, end) = (self.index, self.end);
        self.thermal.mutate_compartment(index, action, |tank| {
            tank.fill_compartment(index, resource.clone(), end, action)
        })
    }

    /// Drains up to `max` units starting from this view's end.
    pub fn drain(&mut self, max: u32, action: FluidAction) -> Drained<F> {
        let (index, end) = (self.index, self.end);
        self.thermal.mutate_compartment(index, action, |tank| {
            tank.drain_compartment(index, max, end, action)
        })
    }

    /// Drains up to `resource.amount` of exactly `resource.fluid` from this compartment.
    pub fn drain_fluid(&mut self, resource: &FluidStack<F>, action: FluidAction) -> Drained<F> {
        let index = self.index;
        self.thermal.mutate_compartment(index, action, |tank| {
            tank.drain_compartment_fluid(index, resource, action)
        })
    }

    fn inner(&self) -> &Compartment<F> {
        self.thermal.tank.compartment_at(self.index)
    }
}
