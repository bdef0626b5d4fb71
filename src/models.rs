//! Public tank models.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules:
//!
//! - [`storage`]: Where fluid is held and how it is filled and drained.
//! - [`thermal`]: How that fluid and its container exchange heat.
//!
//! Thermal models wrap storage models rather than extending them, so a tank
//! can be used without any thermal bookkeeping at all.

pub mod storage;
pub mod thermal;
