use crate::support::fluid::FluidStack;

/// Snapshot of one compartment, for drivers that display or log tank state.
#[derive(Debug, Clone, PartialEq)]
pub struct CompartmentReport<F> {
    pub capacity: u32,
    pub amount: u32,
    pub target_temperature: i32,
    pub shell_temperature: i32,
    /// Layers from bottom to top.
    pub layers: Vec<LayerReport<F>>,
}

/// One fluid layer within a [`CompartmentReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayerReport<F> {
    pub stack: FluidStack<F>,
    pub temperature: i32,
    pub energy: i64,
}
