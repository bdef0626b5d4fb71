//! Fluid storage models.
//!
//! This module contains models for holding fluids, starting with
//! density-stratified multi-compartment tanks.

pub mod fractional_tank;
