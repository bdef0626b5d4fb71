use crate::support::fluid::End;

/// Decides which fluids a compartment accepts through a given end.
///
/// Every fill consults this strategy before placing fluid in a compartment.
/// Drains do not. Closures of the form `Fn(usize, End, &F) -> bool` implement
/// it directly.
///
/// # Example
///
/// ```
/// use fractional_tanks::models::storage::fractional_tank::FluidValidity;
/// use fractional_tanks::support::fluid::End;
///
/// // Only the first compartment may be filled, and only from the top.
/// let rule = |compartment: usize, end: End, _fluid: &&str| compartment == 0 && end == End::Top;
/// assert!(rule.is_valid(0, End::Top, &"water"));
/// assert!(!rule.is_valid(1, End::Top, &"water"));
/// ```
pub trait FluidValidity<F> {
    /// Returns `true` if `fluid` may be placed in `compartment` through `end`.
    fn is_valid(&self, compartment: usize, end: End, fluid: &F) -> bool;
}

impl<F, T> FluidValidity<F> for T
where
    T: Fn(usize, End, &F) -> bool,
{
    fn is_valid(&self, compartment: usize, end: End, fluid: &F) -> bool {
        self(compartment, end, fluid)
    }
}

/// Accepts every fluid in every compartment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl<F> FluidValidity<F> for AcceptAll {
    fn is_valid(&self, _compartment: usize, _end: End, _fluid: &F) -> bool {
        true
    }
}
