use uom::si::{
    f64::{MassDensity, ThermodynamicTemperature},
    mass_density::kilogram_per_cubic_meter,
    thermodynamic_temperature::kelvin,
};

use super::StratifiedFluid;

/// Fluid kinds used throughout the unit tests.
///
/// `Water` and `Milk` deliberately share a density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) enum MockFluid {
    Lava,
    Brine,
    Water,
    Milk,
    Oil,
}

impl StratifiedFluid for MockFluid {
    fn density(&self) -> MassDensity {
        let value = match self {
            Self::Lava => 3100.0,
            Self::Brine => 1200.0,
            Self::Water | Self::Milk => 1000.0,
            Self::Oil => 800.0,
        };
        MassDensity::new::<kilogram_per_cubic_meter>(value)
    }

    fn temperature(&self) -> ThermodynamicTemperature {
        let value = match self {
            Self::Lava => 1300.0,
            Self::Milk => 280.0,
            Self::Brine | Self::Water | Self::Oil => 300.0,
        };
        ThermodynamicTemperature::new::<kelvin>(value)
    }
}
