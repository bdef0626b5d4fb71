//! Thermal systems models.
//!
//! This module contains models that move thermal energy between a container,
//! its surroundings, and the fluids it stores.

pub mod thermal_tank;
