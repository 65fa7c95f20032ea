//! The physics for the mass-spring system.

mod integrator;
mod mass;
mod query;
mod spring;
mod system;

pub use mass::Mass;
pub use spring::Spring;
pub use system::SpringSystem;

/// The type of the identifiers given to `Mass`es and `Spring`s by the caller.
pub type Id = i32;
