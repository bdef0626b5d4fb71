//! Integer energy steps between the surroundings, the shell, and fluid layers.
//!
//! Temperatures and energies are integers. Every nonzero temperature gap
//! moves at least one unit of energy per step, so gaps always close.

use uom::si::{f64::ThermodynamicTemperature, thermodynamic_temperature::kelvin};

/// Energy the surroundings add to the shell in one step.
///
/// The step is `conductivity × gap`, but at least one unit toward the target
/// and never more than `shell_volume × gap`, which would carry the shell past
/// the target.
pub(super) fn external(
    shell_temperature: i64,
    target_temperature: i64,
    conductivity: f64,
    shell_volume: i64,
) -> i64 {
    let difference = target_temperature.saturating_sub(shell_temperature);
    let change = (difference as f64 * conductivity) as i64;
    let limit = difference.saturating_mul(shell_volume);
    match difference.signum() {
        1 => change.max(1).min(limit),
        -1 => change.min(-1).max(limit),
        _ => 0,
    }
}

/// Energy flowing from `source` into `sink` in one step.
///
/// Positive values flow from source to sink. The rate uses the mean of the
/// two conductivities and moves at least one unit while the temperatures differ.
pub(super) fn conduct(
    source_temperature: i64,
    sink_temperature: i64,
    source_conductivity: f64,
    sink_conductivity: f64,
) -> i64 {
    let difference = source_temperature.saturating_sub(sink_temperature);
    let change = (difference as f64 * (source_conductivity + sink_conductivity) / 2.0) as i64;
    match difference.signum() {
        1 => change.max(1),
        -1 => change.min(-1),
        _ => 0,
    }
}

/// Shell temperature, truncating the energy quotient toward zero.
///
/// Saturates, like every step here, since an unstable layer can drive its
/// ledger to the ends of the `i64` range.
pub(super) fn shell_temperature(base_temperature: i32, energy: i64, shell_volume: i64) -> i64 {
    i64::from(base_temperature).saturating_add(energy / shell_volume)
}

/// Fluid temperature, computed in floating point and truncated toward zero.
pub(super) fn fluid_temperature(
    base_temperature: ThermodynamicTemperature,
    energy: i64,
    amount: u32,
) -> i64 {
    (base_temperature.get::<kelvin>() + energy as f64 / f64::from(amount)) as i64
}

/// Estimates the shell volume surrounding a compartment.
///
/// Treats the fluid as a cube and the shell as a larger cube whose edge is
/// `1 / wall_scale` times longer. This is a rough stand-in for wall mass, not
/// real geometry.
pub(super) fn shell_volume(capacity: u32, wall_scale: f64) -> i64 {
    let capacity = f64::from(capacity);
    let edge = capacity.powf(1.0 / 3.0) / wall_scale;
    (edge.powi(3) - capacity) as i64
}

/// Clamps an internal temperature into the public integer range.
pub(super) fn to_kelvin(temperature: i64) -> i32 {
    i32::try_from(temperature).unwrap_or(if temperature < 0 { i32::MIN } else { i32::MAX })
}
