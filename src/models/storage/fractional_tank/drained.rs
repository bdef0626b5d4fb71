use crate::support::fluid::FluidStack;

/// Fluid removed by a drain.
///
/// Stacks appear in the order they were removed, with repeated kinds merged
/// into their first appearance. An empty result is a normal outcome: the drain
/// found nothing to remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drained<F> {
    stacks: Vec<FluidStack<F>>,
}

impl<F> Default for Drained<F> {
    fn default() -> Self {
        Self { stacks: Vec::new() }
    }
}

impl<F: PartialEq> Drained<F> {
    /// Records `amount` units of `fluid` as removed.
    pub(crate) fn push(&mut self, fluid: F, amount: u32) {
        if amount == 0 {
            return;
        }
        match self.stacks.iter_mut().find(|stack| stack.fluid == fluid) {
            Some(stack) => stack.amount += amount,
            None => self.stacks.push(FluidStack::new(fluid, amount)),
        }
    }

    /// Folds another drain result into this one.
    pub(crate) fn extend(&mut self, other: Self) {
        for stack in other.stacks {
            self.push(stack.fluid, stack.amount);
        }
    }

    /// Returns the amount of `fluid` that was removed.
    #[must_use]
    pub fn amount_of(&self, fluid: &F) -> u32 {
        self.stacks
            .iter()
            .find(|stack| &stack.fluid == fluid)
            .map_or(0, |stack| stack.amount)
    }
}

impl<F> Drained<F> {
    /// Returns the total amount removed across all fluid kinds.
    #[must_use]
    pub fn amount(&self) -> u32 {
        self.stacks.iter().map(|stack| stack.amount).sum()
    }

    /// Returns `true` if nothing was removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// Returns the removed stacks in removal order.
    #[must_use]
    pub fn stacks(&self) -> &[FluidStack<F>] {
        &self.stacks
    }

    /// Consumes the result and returns the removed stacks.
    #[must_use]
    pub fn into_stacks(self) -> Vec<FluidStack<F>> {
        self.stacks
    }
}
