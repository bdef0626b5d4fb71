//! # Fractional Tanks
//!
//! Multi-compartment fluid tanks whose contents stratify by density, with a
//! tick-based model of heat exchange between the surroundings, the tank shell,
//! and each fluid layer.
//!
//! ## Crate layout
//!
//! - [`models`]: The tank models themselves.
//!   - [`models::storage::fractional_tank`]: Capacity-bounded fill and drain
//!     over density-ordered layers.
//!   - [`models::thermal::thermal_tank`]: Thermal ledgers and the per-tick
//!     exchange update layered over a fractional tank.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Driving a tank
//!
//! The crate never decides when a tick happens or which fluids exist. A
//! driver owns each tank, supplies fluid kinds through
//! [`support::fluid::StratifiedFluid`], moves fluid with fill and drain calls,
//! and calls [`ThermalTank::tick`](models::thermal::thermal_tank::ThermalTank::tick)
//! once per simulation step.
//!
//! Everything is synchronous and single-threaded. A tank assumes exclusive
//! access and carries no internal locking.
//!
//! ## Logging
//!
//! Construction, committed fills and drains, and ticks emit [`tracing`] events.
//! Installing a subscriber is left to the driver.

pub mod models;
pub mod support;
