//! Simulation of point masses connected by Hookean springs.
//!
//! A [`SpringSystem`] owns an ordered collection of [`Mass`]es and an ordered collection of [`Spring`]s. Stepping the system in time runs an explicit-Euler
//! integrator over the forces exerted by the springs, breaks any breakable spring whose stress goes over its bounds, and moves every free mass.
//! [`SpringSystem::step_to_rest`] repeats this until the system reaches mechanical equilibrium or a time limit is hit.
//!
//! ## Modules
//!
//! - [`physics`]: The entities and the system, along with the integrator, the equilibrium solver and the spatial queries.
//! - [`persistence`]: A deterministic, line-oriented text encoding of a [`SpringSystem`].
//! - [`utils`]: The insertion-ordered collection used to store the entities, and the numeric tolerance shared across the crate.
//!
//! ## Features
//!
//! - `serde`: Derives `Serialize` and `Deserialize` for the entities and the system using the [`serde`](https://docs.rs/serde) crate.
//!
//! ## Example
//!
//! ```
//! use springsys::{Mass, Spring, SpringSystem};
//!
//! let mut sys = SpringSystem::new(1)?;
//! sys.add_mass(Mass::new(0).with_fixed(true))?;
//! sys.add_mass(Mass::new(1).with_position([2.0, 0.0, 0.0]))?;
//! sys.add_spring(Spring::new(0, [0, 1]).with_rest_length(1.0))?;
//!
//! let t = sys.step_to_rest(0.1, 1000.0);
//! assert!(t <= 1000.0);
//! # Ok::<(), springsys::SpringSysError>(())
//! ```

mod error;
pub mod persistence;
pub mod physics;
pub mod utils;

pub use error::SpringSysError;
pub use physics::{Id, Mass, Spring, SpringSystem};
pub use utils::{EPSILON, OrderedSet};
