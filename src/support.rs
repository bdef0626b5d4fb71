//! Supporting utilities used by the tank models.
//!
//! - [`constraint`]: Construction-time numeric validation.
//! - [`fluid`]: Fluid identity, stacks, tank ends and fill/drain actions.

pub mod constraint;
pub mod fluid;
