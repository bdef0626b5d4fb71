/// A quantity of a single fluid kind.
///
/// Amounts are in the driver's volume unit (typically millibuckets, where
/// [`BUCKET_VOLUME`](crate::models::storage::fractional_tank::BUCKET_VOLUME)
/// is one standard unit).
///
/// # Example
///
/// ```
/// use fractional_tanks::support::fluid::FluidStack;
///
/// let stack = FluidStack::new("water", 250);
/// assert_eq!(stack.with_amount(100).amount, 100);
/// assert!(!stack.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FluidStack<F> {
    pub fluid: F,
    pub amount: u32,
}

impl<F> FluidStack<F> {
    /// Creates a stack of `amount` units of `fluid`.
    #[must_use]
    pub fn new(fluid: F, amount: u32) -> Self {
        Self { fluid, amount }
    }

    /// Returns a new stack of the same fluid with the given amount.
    #[must_use]
    pub fn with_amount(&self, amount: u32) -> Self
    where
        F: Clone,
    {
        Self {
            fluid: self.fluid.clone(),
            amount,
        }
    }

    /// Returns `true` if the stack holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }
}
