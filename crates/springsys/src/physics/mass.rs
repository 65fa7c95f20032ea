//! Masses in the mass-spring system.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Id;

/// A point `Mass` in the mass-spring system.
///
/// A `Mass` is defined by its:
///
/// - `id`: An identifier chosen by the caller. `Spring`s refer to their end-points by this identifier.
/// - `position`: The position of the `Mass`.
/// - `velocity`: The velocity of the `Mass`.
/// - `stress`: The acceleration due to the `Spring`s, accumulated during each time-step.
/// - `mass`: The inertial mass, which must not be negative.
/// - `fixed`: Whether the `Mass` is anchored. The integrator never moves a fixed `Mass`.
///
/// Vectors always have three components. Only the first `nb_dim` components, as set by the owning `SpringSystem`, take part in the simulation and the rest
/// are expected to stay at zero.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mass {
    /// The identifier of the `Mass`.
    id: Id,
    /// The position of the `Mass`.
    position: [f64; 3],
    /// The velocity of the `Mass`.
    velocity: [f64; 3],
    /// The acceleration due to the `Spring`s.
    stress: [f64; 3],
    /// The inertial mass.
    mass: f64,
    /// Whether the `Mass` is anchored in place.
    fixed: bool,
}

impl Default for Mass {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Mass {
    /// Creates a new free `Mass` at the origin, at rest, with an inertial mass of `1.0`.
    pub const fn new(id: Id) -> Self {
        Self {
            id,
            position: [0.0; 3],
            velocity: [0.0; 3],
            stress: [0.0; 3],
            mass: 1.0,
            fixed: false,
        }
    }

    /// Sets the identifier of the `Mass`.
    pub const fn with_id(mut self, id: Id) -> Self {
        self.id = id;
        self
    }

    /// Sets the position of the `Mass`.
    pub const fn with_position(mut self, position: [f64; 3]) -> Self {
        self.position = position;
        self
    }

    /// Sets the velocity of the `Mass`.
    pub const fn with_velocity(mut self, velocity: [f64; 3]) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the accumulated stress of the `Mass`.
    pub const fn with_stress(mut self, stress: [f64; 3]) -> Self {
        self.stress = stress;
        self
    }

    /// Sets the inertial mass.
    pub const fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Sets whether the `Mass` is anchored in place.
    pub const fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }

    /// Returns the identifier of the `Mass`.
    #[must_use]
    pub const fn id(&self) -> Id {
        self.id
    }

    /// Returns the position of the `Mass`.
    #[must_use]
    pub const fn position(&self) -> &[f64; 3] {
        &self.position
    }

    /// Returns the velocity of the `Mass`.
    #[must_use]
    pub const fn velocity(&self) -> &[f64; 3] {
        &self.velocity
    }

    /// Returns the stress accumulated on the `Mass` during the last time-step.
    #[must_use]
    pub const fn stress(&self) -> &[f64; 3] {
        &self.stress
    }

    /// Returns the inertial mass.
    #[must_use]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    /// Returns whether the `Mass` is anchored in place.
    #[must_use]
    pub const fn is_fixed(&self) -> bool {
        self.fixed
    }

    /// Sets the position of the `Mass`.
    ///
    /// It is the user's responsibility to ensure that the `position` has no `NaN` or `Infinite` values.
    pub const fn set_position(&mut self, position: [f64; 3]) {
        self.position = position;
    }

    /// Returns the position of the `Mass` as mutable, e.g. to resolve a collision against a ground plane between two time-steps.
    pub const fn position_mut(&mut self) -> &mut [f64; 3] {
        &mut self.position
    }

    /// Sets the velocity of the `Mass`.
    pub const fn set_velocity(&mut self, velocity: [f64; 3]) {
        self.velocity = velocity;
    }

    /// Returns the velocity of the `Mass` as mutable, e.g. to apply an external force such as gravity between two time-steps.
    pub const fn velocity_mut(&mut self) -> &mut [f64; 3] {
        &mut self.velocity
    }

    /// Resets the velocity of the `Mass` to the zero vector.
    pub const fn reset_velocity(&mut self) {
        self.velocity = [0.0; 3];
    }

    /// Sets whether the `Mass` is anchored in place.
    pub const fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
    }

    /// Returns the norm of the velocity over the first `nb_dim` components.
    #[must_use]
    pub fn speed(&self, nb_dim: usize) -> f64 {
        self.velocity.iter().take(nb_dim).map(|v| v.powi(2)).sum::<f64>().sqrt()
    }

    /// Zeroes the first `nb_dim` components of the accumulated stress.
    pub(crate) fn reset_stress(&mut self, nb_dim: usize) {
        self.stress.iter_mut().take(nb_dim).for_each(|s| *s = 0.0);
    }

    /// Adds to one component of the accumulated stress.
    pub(crate) fn add_stress(&mut self, dim: usize, stress: f64) {
        self.stress[dim] += stress;
    }

    /// Moves the `Mass` under the stress it accumulated, for one time-step.
    ///
    /// The velocity first decays by the factor `(1 - dissipation)^dt`, then the stress is applied to the velocity and the velocity to the position.
    ///
    /// # Arguments
    ///
    /// - `nb_dim`: The number of active dimensions.
    /// - `dissipation`: The fraction of velocity lost per unit of time, in `[0, 1]`.
    /// - `dt`: The size of the time-step.
    pub(crate) fn integrate(&mut self, nb_dim: usize, dissipation: f64, dt: f64) {
        let decay = (1.0 - dissipation).powf(dt);
        for ((p, v), &s) in self
            .position
            .iter_mut()
            .zip(self.velocity.iter_mut())
            .zip(self.stress.iter())
            .take(nb_dim)
        {
            *v *= decay;
            *v += s * dt;
            *p += *v * dt;
        }
    }
}

impl std::fmt::Display for Mass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [px, py, pz] = self.position;
        let [vx, vy, vz] = self.velocity;
        let [sx, sy, sz] = self.stress;
        write!(
            f,
            "#{}, pos({px:.3},{py:.3},{pz:.3}), speed({vx:.3},{vy:.3},{vz:.3}), stress({sx:.3},{sy:.3},{sz:.3}), mass({:.3}), fixed({})",
            self.id,
            self.mass,
            u8::from(self.fixed)
        )
    }
}
