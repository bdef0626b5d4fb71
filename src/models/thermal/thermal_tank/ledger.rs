use std::collections::BTreeMap;

use crate::support::fluid::{FluidStack, StratifiedFluid};

/// Thermal state of one compartment.
///
/// Energies are offsets from each material's base temperature. A fluid has an
/// energy entry exactly when the compartment holds a layer of it.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ThermalLedger<F> {
    pub(super) target_temperature: i32,
    pub(super) shell_energy: i64,
    pub(super) shell_volume: i64,
    pub(super) conductivity: f64,
    pub(super) fluid_energy: BTreeMap<F, i64>,
}

impl<F: StratifiedFluid> ThermalLedger<F> {
    pub(super) fn new(
        target_temperature: i32,
        shell_volume: i64,
        conductivity: u32,
        layers: &[FluidStack<F>],
    ) -> Self {
        Self {
            target_temperature,
            shell_energy: 0,
            shell_volume,
            conductivity: f64::from(conductivity),
            fluid_energy: layers
                .iter()
                .map(|layer| (layer.fluid.clone(), 0))
                .collect(),
        }
    }

    /// Returns the energy held by `fluid`, or zero if it has no entry.
    pub(super) fn energy(&self, fluid: &F) -> i64 {
        self.fluid_energy.get(fluid).copied().unwrap_or(0)
    }

    /// Adds energy from the surroundings to the shell.
    pub(super) fn inject(&mut self, amount: i64) {
        self.shell_energy = self.shell_energy.saturating_add(amount);
    }

    /// Moves `amount` of energy from the shell into `fluid`.
    ///
    /// Arithmetic saturates. Tiny layers under a conductive shell can
    /// oscillate with growing amplitude, and that must not overflow.
    pub(super) fn shell_to_fluid(&mut self, fluid: &F, amount: i64) {
        self.shell_energy = self.shell_energy.saturating_sub(amount);
        let energy = self.fluid_energy.entry(fluid.clone()).or_insert(0);
        *energy = energy.saturating_add(amount);
    }

    /// Moves `amount` of energy from `source` into `sink`.
    pub(super) fn fluid_to_fluid(&mut self, source: &F, sink: &F, amount: i64) {
        let energy = self.fluid_energy.entry(source.clone()).or_insert(0);
        *energy = energy.saturating_sub(amount);
        let energy = self.fluid_energy.entry(sink.clone()).or_insert(0);
        *energy = energy.saturating_add(amount);
    }

    /// Brings the fluid entries back in step with the compartment's layers.
    ///
    /// Only presence changes here. A new layer starts with no energy, so added
    /// fluid arrives at its base temperature, and a layer that disappeared
    /// loses its entry. Energy values are left to the tick.
    pub(super) fn reconcile(&mut self, layers: &[FluidStack<F>]) {
        self.fluid_energy
            .retain(|fluid, _| layers.iter().any(|layer| &layer.fluid == fluid));
        for layer in layers {
            self.fluid_energy.entry(layer.fluid.clone()).or_insert(0);
        }
    }

    /// Sum of the shell's and every fluid's energy.
    #[cfg(test)]
    pub(super) fn total_energy(&self) -> i64 {
        self.shell_energy + self.fluid_energy.values().sum::<i64>()
    }
}
