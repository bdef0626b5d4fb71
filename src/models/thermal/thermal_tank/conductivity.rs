/// Supplies the thermal conductivity of each fluid kind.
///
/// Closures of the form `Fn(&F) -> f64` implement it directly.
pub trait ConductivityLookup<F> {
    /// Returns the conductivity of `fluid`.
    fn conductivity(&self, fluid: &F) -> f64;
}

impl<F, T> ConductivityLookup<F> for T
where
    T: Fn(&F) -> f64,
{
    fn conductivity(&self, fluid: &F) -> f64 {
        self(fluid)
    }
}

/// Gives every fluid a conductivity of one.
///
/// This is a stand-in until fluids carry real conductivities. Supply a
/// different [`ConductivityLookup`] to refine the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaceholderConductivity;

impl<F> ConductivityLookup<F> for PlaceholderConductivity {
    fn conductivity(&self, _fluid: &F) -> f64 {
        1.0
    }
}
