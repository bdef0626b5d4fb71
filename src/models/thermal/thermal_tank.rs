//! Fractional tanks that exchange heat with their surroundings.
//!
//! A [`ThermalTank`] wraps a [`FractionalTank`] and gives each compartment a
//! thermal ledger. The ledger has a target temperature set by the driver, the
//! energy stored in the compartment's shell, and the energy stored in each
//! fluid layer.
//!
//! # Tick
//!
//! Every call to [`ThermalTank::tick`] walks the compartments in order and,
//! for each one:
//!
//! 1. Moves the shell toward the target temperature at a rate set by the
//!    shell's conductivity, never past it.
//! 2. Exchanges heat between the shell and the bottom (densest) layer.
//! 3. Exchanges heat between each pair of adjacent layers, bottom to top.
//!
//! Each exchange in steps 2 and 3 moves energy from one ledger entry to
//! another, so it is conserved between the two. Only step 1 adds or removes
//! energy from outside.
//!
//! # Temperature
//!
//! Temperatures are whole kelvin. The shell sits at
//! `base + shell_energy / shell_volume`, with integer division truncating
//! toward zero. A fluid sits at `base + energy / amount`, computed in floating
//! point and then truncated, where `base` is the fluid's own
//! [`temperature`](StratifiedFluid::temperature).
//!
//! The shell volume approximates the compartment as a cube of fluid inside a
//! slightly larger cube (see [`ThermalConfig::wall_scale`]). It is a coarse
//! thermal mass, not a geometric model.

mod access;
mod conductivity;
mod config;
mod exchange;
mod ledger;
mod report;

pub use access::ThermalAccess;
pub use conductivity::{ConductivityLookup, PlaceholderConductivity};
pub use config::ThermalConfig;
pub use report::{CompartmentReport, LayerReport};

use crate::models::storage::fractional_tank::{
    AcceptAll, Drained, FluidValidity, FractionalTank, TankError, per_compartment,
};
use crate::support::{
    constraint::StrictlyPositive,
    fluid::{End, FluidAction, FluidStack, StratifiedFluid},
};

use ledger::ThermalLedger;

/// Outcome of one [`ThermalTank::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Number of nonzero energy transfers applied.
    pub exchanges: usize,
    /// Net energy the surroundings added to all shells.
    pub external_energy: i64,
}

/// A fractional tank whose compartments exchange heat.
///
/// All fills and drains go through this type so the thermal ledgers stay in
/// step with the layers they describe. The underlying tank is readable
/// through [`ThermalTank::tank`].
#[derive(Debug, Clone)]
pub struct ThermalTank<F, V = AcceptAll, C = PlaceholderConductivity> {
    tank: FractionalTank<F, V>,
    ledgers: Vec<ThermalLedger<F>>,
    lookup: C,
    config: ThermalConfig,
}

impl<F: StratifiedFluid> ThermalTank<F, AcceptAll, PlaceholderConductivity> {
    /// Creates a thermal tank of `count` compartments.
    ///
    /// `capacities` and `conductivities` each accept no value (defaults), one
    /// value for every compartment, or exactly `count` values.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::InvalidConfiguration`] for any invalid count,
    /// capacity, or conductivity, or if a compartment is too small to have a
    /// shell.
    pub fn new(count: usize, capacities: &[u32], conductivities: &[u32]) -> Result<Self, TankError> {
        let tank = FractionalTank::new(count, capacities)?;
        Self::from_tank(tank, conductivities, PlaceholderConductivity)
    }
}

impl<F, V, C> ThermalTank<F, V, C>
where
    F: StratifiedFluid,
    V: FluidValidity<F>,
    C: ConductivityLookup<F>,
{
    /// Adds thermal ledgers to an existing tank using the default [`ThermalConfig`].
    ///
    /// # Errors
    ///
    /// See [`ThermalTank::with_config`].
    pub fn from_tank(
        tank: FractionalTank<F, V>,
        conductivities: &[u32],
        lookup: C,
    ) -> Result<Self, TankError> {
        Self::with_config(tank, conductivities, lookup, ThermalConfig::default())
    }

    /// Adds thermal ledgers to an existing tank.
    ///
    /// Fluid already in the tank starts at its base temperature.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::InvalidConfiguration`] if a conductivity is zero,
    /// the number of conductivities is neither 0, 1, nor the compartment
    /// count, `config.wall_scale` is not strictly positive, or a compartment
    /// is too small to have a shell.
    pub fn with_config(
        tank: FractionalTank<F, V>,
        conductivities: &[u32],
        lookup: C,
        config: ThermalConfig,
    ) -> Result<Self, TankError> {
        StrictlyPositive::new(config.wall_scale)
            .map_err(|err| TankError::constraint("wall scale", err))?;
        let conductivities = per_compartment(
            tank.compartment_count(),
            conductivities,
            config.default_conductivity,
            "conductivities",
        )?;

        let ledgers = tank
            .compartments()
            .zip(conductivities)
            .enumerate()
            .map(|(index, (compartment, conductivity))| -> Result<_, TankError> {
                let conductivity = StrictlyPositive::new(conductivity).map_err(|err| {
                    TankError::constraint(format!("conductivity of compartment {index}"), err)
                })?;
                let capacity = compartment.capacity();
                let shell_volume = StrictlyPositive::new(exchange::shell_volume(
                    capacity,
                    config.wall_scale,
                ))
                .map_err(|err| {
                    TankError::constraint(
                        format!("shell volume of compartment {index} (capacity {capacity})"),
                        err,
                    )
                })?;
                Ok(ThermalLedger::new(
                    config.base_temperature,
                    shell_volume.into_inner(),
                    conductivity.into_inner(),
                    compartment.layers(),
                ))
            })
            .collect::<Result<Vec<_>, TankError>>()?;

        tracing::debug!(
            count = ledgers.len(),
            shell_volumes = ?ledgers.iter().map(|ledger| ledger.shell_volume).collect::<Vec<_>>(),
            "built thermal tank"
        );
        Ok(Self {
            tank,
            ledgers,
            lookup,
            config,
        })
    }

    /// Returns the underlying tank for read-only queries.
    #[must_use]
    pub fn tank(&self) -> &FractionalTank<F, V> {
        &self.tank
    }

    /// Returns the thermal constants in use.
    #[must_use]
    pub fn config(&self) -> &ThermalConfig {
        &self.config
    }

    /// Returns the number of compartments.
    #[must_use]
    pub fn compartment_count(&self) -> usize {
        self.tank.compartment_count()
    }

    /// Returns the temperature a compartment's shell is trending toward.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn target_temperature(&self, index: usize) -> Result<i32, TankError> {
        self.ledger(index).map(|ledger| ledger.target_temperature)
    }

    /// Sets the temperature a compartment's shell trends toward.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn set_target_temperature(
        &mut self,
        index: usize,
        temperature: i32,
    ) -> Result<&mut Self, TankError> {
        let count = self.ledgers.len();
        let ledger = self
            .ledgers
            .get_mut(index)
            .ok_or(TankError::CompartmentOutOfRange { index, count })?;
        ledger.target_temperature = temperature;
        Ok(self)
    }

    /// Returns a compartment's current shell temperature.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn shell_temperature(&self, index: usize) -> Result<i32, TankError> {
        self.ledger(index)
            .map(|ledger| exchange::to_kelvin(self.shell_kelvin(ledger)))
    }

    /// Returns the thermal energy stored in a compartment's shell.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn shell_energy(&self, index: usize) -> Result<i64, TankError> {
        self.ledger(index).map(|ledger| ledger.shell_energy)
    }

    /// Returns the estimated volume of a compartment's shell.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn shell_volume(&self, index: usize) -> Result<i64, TankError> {
        self.ledger(index).map(|ledger| ledger.shell_volume)
    }

    /// Returns the conductivity of a compartment's shell.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn shell_conductivity(&self, index: usize) -> Result<f64, TankError> {
        self.ledger(index).map(|ledger| ledger.conductivity)
    }

    /// Returns the temperature of a fluid layer.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::FluidNotPresent`] if the compartment holds none of
    /// `fluid`, or [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn fluid_temperature(&self, index: usize, fluid: &F) -> Result<i32, TankError> {
        let ledger = self.ledger(index)?;
        let amount = self.present_amount(index, fluid)?;
        Ok(exchange::to_kelvin(exchange::fluid_temperature(
            fluid.temperature(),
            ledger.energy(fluid),
            amount,
        )))
    }

    /// Returns the thermal energy stored in a fluid layer.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::FluidNotPresent`] if the compartment holds none of
    /// `fluid`, or [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn fluid_energy(&self, index: usize, fluid: &F) -> Result<i64, TankError> {
        let ledger = self.ledger(index)?;
        self.present_amount(index, fluid)?;
        Ok(ledger.energy(fluid))
    }

    /// Returns the conductivity of a fluid kind.
    #[must_use]
    pub fn fluid_conductivity(&self, fluid: &F) -> f64 {
        self.lookup.conductivity(fluid)
    }

    /// Returns a snapshot of one compartment's contents and temperatures.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn report(&self, index: usize) -> Result<CompartmentReport<F>, TankError> {
        let ledger = self.ledger(index)?;
        let layers = self.tank.contents(index)?;
        Ok(CompartmentReport {
            capacity: self.tank.capacity(index)?,
            amount: self.tank.amount(index)?,
            target_temperature: ledger.target_temperature,
            shell_temperature: exchange::to_kelvin(self.shell_kelvin(ledger)),
            layers: layers
                .iter()
                .map(|layer| LayerReport {
                    stack: layer.clone(),
                    temperature: exchange::to_kelvin(layer_kelvin(ledger, layer)),
                    energy: ledger.energy(&layer.fluid),
                })
                .collect(),
        })
    }

    /// Fills compartments in tank order, returning the amount accepted.
    ///
    /// See [`FractionalTank::fill`].
    pub fn fill(&mut self, resource: &FluidStack<F>, end: End, action: FluidAction) -> u32 {
        self.mutate(action, |tank| tank.fill(resource, end, action))
    }

    /// Drains up to `resource.amount` of exactly `resource.fluid`.
    ///
    /// See [`FractionalTank::drain_fluid`].
    pub fn drain_fluid(&mut self, resource: &FluidStack<F>, action: FluidAction) -> Drained<F> {
        self.mutate(action, |tank| tank.drain_fluid(resource, action))
    }

    /// Drains up to `max` units of whatever is exposed at `end`.
    ///
    /// See [`FractionalTank::drain`].
    pub fn drain(&mut self, max: u32, end: End, action: FluidAction) -> Drained<F> {
        self.mutate(action, |tank| tank.drain(max, end, action))
    }

    /// Returns a read/write view of one compartment through one end.
    ///
    /// # Errors
    ///
    /// Returns [`TankError::CompartmentOutOfRange`] for an unknown index.
    pub fn access(&mut self, index: usize, end: End) -> Result<ThermalAccess<'_, F, V, C>, TankError> {
        self.ledger(index)?;
        Ok(ThermalAccess::new(self, index, end))
    }

    /// Advances every compartment's heat exchange by one step.
    pub fn tick(&mut self) -> TickSummary {
        let mut summary = TickSummary::default();
        let base = self.config.base_temperature;

        for (index, (compartment, ledger)) in self
            .tank
            .compartments()
            .zip(self.ledgers.iter_mut())
            .enumerate()
        {
            // Surroundings to shell.
            let shell = exchange::shell_temperature(base, ledger.shell_energy, ledger.shell_volume);
            let injected = exchange::external(
                shell,
                i64::from(ledger.target_temperature),
                ledger.conductivity,
                ledger.shell_volume,
            );
            if injected != 0 {
                ledger.inject(injected);
                summary.external_energy = summary.external_energy.saturating_add(injected);
                summary.exchanges += 1;
            }

            let layers = compartment.layers();
            let Some(bottom) = layers.first() else {
                tracing::trace!(compartment = index, injected, "thermal tick, no fluid");
                continue;
            };

            // Shell to bottom layer.
            let shell = exchange::shell_temperature(base, ledger.shell_energy, ledger.shell_volume);
            let moved = exchange::conduct(
                shell,
                layer_kelvin(ledger, bottom),
                ledger.conductivity,
                self.lookup.conductivity(&bottom.fluid),
            );
            if moved != 0 {
                ledger.shell_to_fluid(&bottom.fluid, moved);
                summary.exchanges += 1;
            }

            // Up through the layers.
            for pair in layers.windows(2) {
                let (lower, upper) = (&pair[0], &pair[1]);
                let moved = exchange::conduct(
                    layer_kelvin(ledger, lower),
                    layer_kelvin(ledger, upper),
                    self.lookup.conductivity(&lower.fluid),
                    self.lookup.conductivity(&upper.fluid),
                );
                if moved != 0 {
                    ledger.fluid_to_fluid(&lower.fluid, &upper.fluid, moved);
                    summary.exchanges += 1;
                }
            }

            tracing::trace!(
                compartment = index,
                injected,
                shell_temperature = exchange::shell_temperature(
                    base,
                    ledger.shell_energy,
                    ledger.shell_volume
                ),
                layers = layers.len(),
                "thermal tick"
            );
        }
        summary
    }

    /// Runs a tank operation and reconciles every ledger afterward.
    fn mutate<R>(
        &mut self,
        action: FluidAction,
        operation: impl FnOnce(&mut FractionalTank<F, V>) -> R,
    ) -> R {
        if action.simulate() {
            return operation(&mut self.tank);
        }
        let result = operation(&mut self.tank);
        for (ledger, compartment) in self.ledgers.iter_mut().zip(self.tank.compartments()) {
            ledger.reconcile(compartment.layers());
        }
        result
    }

    /// Runs a tank operation that touches only compartment `index`.
    ///
    /// `index` must already be known to be in range.
    fn mutate_compartment<R>(
        &mut self,
        index: usize,
        action: FluidAction,
        operation: impl FnOnce(&mut FractionalTank<F, V>) -> R,
    ) -> R {
        if action.simulate() {
            return operation(&mut self.tank);
        }
        let result = operation(&mut self.tank);
        if let (Some(ledger), Some(compartment)) =
            (self.ledgers.get_mut(index), self.tank.compartment(index))
        {
            ledger.reconcile(compartment.layers());
        }
        result
    }

    fn ledger(&self, index: usize) -> Result<&ThermalLedger<F>, TankError> {
        self.ledgers
            .get(index)
            .ok_or(TankError::CompartmentOutOfRange {
                index,
                count: self.ledgers.len(),
            })
    }

    fn shell_kelvin(&self, ledger: &ThermalLedger<F>) -> i64 {
        exchange::shell_temperature(
            self.config.base_temperature,
            ledger.shell_energy,
            ledger.shell_volume,
        )
    }

    fn present_amount(&self, index: usize, fluid: &F) -> Result<u32, TankError> {
        match self.tank.amount_of(index, fluid)? {
            0 => Err(TankError::fluid_not_present(index, fluid)),
            amount => Ok(amount),
        }
    }
}

fn layer_kelvin<F: StratifiedFluid>(ledger: &ThermalLedger<F>, layer: &FluidStack<F>) -> i64 {
    exchange::fluid_temperature(
        layer.fluid.temperature(),
        ledger.energy(&layer.fluid),
        layer.amount,
    )
}
