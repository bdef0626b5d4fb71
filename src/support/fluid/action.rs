/// Whether a fill or drain commits its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FluidAction {
    /// Computes the outcome without changing any state.
    Simulate,
    /// Computes the outcome and applies it.
    Execute,
}

impl FluidAction {
    /// Returns `true` for a dry run.
    #[must_use]
    pub fn simulate(self) -> bool {
        self == Self::Simulate
    }

    /// Returns `true` when the call commits.
    #[must_use]
    pub fn execute(self) -> bool {
        self == Self::Execute
    }
}
