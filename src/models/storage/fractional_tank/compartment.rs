use crate::support::fluid::{End, FluidAction, FluidStack, StratifiedFluid, stratum_order};

use super::Drained;

/// One independently managed, density-stratified storage unit.
///
/// Layers are kept sorted from the bottom (densest) to the top (lightest).
/// Every layer holds a strictly positive amount, and the layers together never
/// exceed the compartment's capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compartment<F> {
    capacity: u32,
    layers: Vec<FluidStack<F>>,
}

impl<F: StratifiedFluid> Compartment<F> {
    /// Creates an empty compartment.
    ///
    /// The caller has already validated `capacity` as strictly positive.
    pub(super) fn new(capacity: u32) -> Self {
        Self {
            capacity,
            layers: Vec::new(),
        }
    }

    /// Returns the maximum total amount this compartment can hold.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Returns the total amount held across all layers.
    #[must_use]
    pub fn amount(&self) -> u32 {
        self.layers.iter().map(|layer| layer.amount).sum()
    }

    /// Returns the room left before the compartment is full.
    #[must_use]
    pub fn free_space(&self) -> u32 {
        self.capacity.saturating_sub(self.amount())
    }

    /// Returns `true` if the compartment holds no fluid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns the layers from bottom to top.
    #[must_use]
    pub fn layers(&self) -> &[FluidStack<F>] {
        &self.layers
    }

    /// Returns the amount of `fluid` held, or zero if it is absent.
    #[must_use]
    pub fn amount_of(&self, fluid: &F) -> u32 {
        self.position(fluid)
            .map_or(0, |index| self.layers[index].amount)
    }

    /// Returns the layer exposed at `end`, if any.
    #[must_use]
    pub fn fluid_at(&self, end: End) -> Option<&FluidStack<F>> {
        match end {
            End::Bottom => self.layers.first(),
            End::Top => self.layers.last(),
        }
    }

    /// Places as much of `resource` as fits, returning the amount accepted.
    pub(super) fn fill(&mut self, resource: &FluidStack<F>, action: FluidAction) -> u32 {
        let accepted = resource.amount.min(self.free_space());
        if accepted == 0 || action.simulate() {
            return accepted;
        }

        match self
            .layers
            .binary_search_by(|layer| stratum_order(&layer.fluid, &resource.fluid))
        {
            Ok(index) => self.layers[index].amount += accepted,
            Err(index) => self
                .layers
                .insert(index, resource.with_amount(accepted)),
        }
        accepted
    }

    /// Removes up to `max` units of exactly `fluid`, returning the amount removed.
    pub(super) fn drain_fluid(&mut self, fluid: &F, max: u32, action: FluidAction) -> u32 {
        let Some(index) = self.position(fluid) else {
            return 0;
        };
        self.take(index, max, action)
    }

    /// Removes up to `max` units starting at `end`.
    ///
    /// Drains a contiguous run of layers: the next layer toward the opposite
    /// end is only touched once the current one is used up.
    pub(super) fn drain_from(&mut self, end: End, max: u32, action: FluidAction) -> Drained<F> {
        let mut drained = Drained::default();
        let mut remaining = max;
        let run: Box<dyn Iterator<Item = &FluidStack<F>>> = match end {
            End::Bottom => Box::new(self.layers.iter()),
            End::Top => Box::new(self.layers.iter().rev()),
        };
        for layer in run {
            if remaining == 0 {
                break;
            }
            let taken = layer.amount.min(remaining);
            drained.push(layer.fluid.clone(), taken);
            remaining -= taken;
        }

        if action.execute() {
            for stack in drained.stacks() {
                self.drain_fluid(&stack.fluid, stack.amount, action);
            }
        }
        drained
    }

    fn take(&mut self, index: usize, max: u32, action: FluidAction) -> u32 {
        let layer = &mut self.layers[index];
        let taken = layer.amount.min(max);
        if action.execute() {
            if taken == layer.amount {
                self.layers.remove(index);
            } else {
                layer.amount -= taken;
            }
        }
        taken
    }

    fn position(&self, fluid: &F) -> Option<usize> {
        self.layers
            .binary_search_by(|layer| stratum_order(&layer.fluid, fluid))
            .ok()
    }
}
