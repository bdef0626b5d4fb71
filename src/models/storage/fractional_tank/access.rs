use crate::support::fluid::{End, FluidAction, FluidStack, StratifiedFluid};

use super::{Compartment, Drained, FluidValidity, FractionalTank};

/// A read/write view of one compartment through one end.
///
/// The view borrows its tank and never owns the compartment, so it cannot
/// outlive the tank. Fills still respect the tank's validity strategy and the
/// compartment's shared capacity.
#[derive(Debug)]
pub struct CompartmentAccess<'a, F, V> {
    tank: &'a mut FractionalTank<F, V>,
    index: usize,
    end: End,
}

impl<'a, F: StratifiedFluid, V: FluidValidity<F>> CompartmentAccess<'a, F, V> {
    /// The caller has already checked that `index` is in range.
    pub(super) fn new(tank: &'a mut FractionalTank<F, V>, index: usize, end: End) -> Self {
        Self { tank, index, end }
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
        self.tank
            .fill_compartment(self.index, resource.clone(), self.end, action)
    }

    /// Drains up to `max` units starting from this view's end.
    pub fn drain(&mut self, max: u32, action: FluidAction) -> Drained<F> {
        self.tank
            .drain_compartment(self.index, max, self.end, action)
    }

    /// Drains up to `resource.amount` of exactly `resource.fluid` from this compartment.
    pub fn drain_fluid(&mut self, resource: &FluidStack<F>, action: FluidAction) -> Drained<F> {
        self.tank
            .drain_compartment_fluid(self.index, resource, action)
    }

    fn inner(&self) -> &Compartment<F> {
        self.tank.compartment_at(self.index)
    }
}
