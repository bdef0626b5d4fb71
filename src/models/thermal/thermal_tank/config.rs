/// Constants of the thermal model.
///
/// The defaults are an ambient baseline of 300 K and a shell conductivity of
/// 5, with walls that scale a compartment's enclosing cube edge by `1 / 0.95`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalConfig {
    /// Shell temperature when it holds no thermal energy, and the initial
    /// target temperature of every compartment, in kelvin.
    pub base_temperature: i32,

    /// Shell conductivity used when none is configured.
    pub default_conductivity: u32,

    /// Ratio of the fluid cube's edge to the enclosing shell's edge.
    ///
    /// Must be strictly positive. Values at or above one leave no room for a
    /// shell and fail construction.
    pub wall_scale: f64,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            base_temperature: 300,
            default_conductivity: 5,
            wall_scale: 0.95,
        }
    }
}
