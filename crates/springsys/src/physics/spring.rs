//! The spring for the mass-spring system.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::Id;

/// A `Spring` connects two `Mass`es and pulls or pushes them towards its rest length.
///
/// The spring is defined by its:
///
/// - spring constant `k`, i.e. the stiffness of the `Spring`,
/// - rest length, i.e. the length at which the `Spring` exerts no stress,
/// - current length, i.e. the distance between the two connected `Mass`es, updated at each time-step,
/// - stress, i.e. `(length - rest_length) * k`. Positive is tension and negative is compression.
///
/// A breakable `Spring` is removed from its system during the time-step in which its stress reaches `max_stress` in tension or `min_stress` in
/// compression.
#[must_use]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spring {
    /// The identifier of the `Spring`.
    id: Id,
    /// The identifiers of the `Mass`es at the two ends.
    masses: [Id; 2],
    /// The current length.
    length: f64,
    /// The spring constant.
    k: f64,
    /// The length at rest.
    rest_length: f64,
    /// The current stress.
    stress: f64,
    /// The stress at which the `Spring` breaks in compression (negative) and in tension (positive).
    stress_bounds: [f64; 2],
    /// Whether the `Spring` breaks when its stress goes out of bounds.
    breakable: bool,
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(0, [0, 0])
    }
}

impl Spring {
    /// The default stress bounds, wide enough to never be reached in practice.
    pub const DEFAULT_STRESS_BOUNDS: [f64; 2] = [-1_000_000.0, 1_000_000.0];

    /// Creates a new unbreakable `Spring` between two `Mass`es, with unit length, unit rest length and unit stiffness.
    pub const fn new(id: Id, masses: [Id; 2]) -> Self {
        Self {
            id,
            masses,
            length: 1.0,
            k: 1.0,
            rest_length: 1.0,
            stress: 0.0,
            stress_bounds: Self::DEFAULT_STRESS_BOUNDS,
            breakable: false,
        }
    }

    /// Sets the identifier of the `Spring`.
    pub const fn with_id(mut self, id: Id) -> Self {
        self.id = id;
        self
    }

    /// Sets the identifiers of the `Mass`es at the two ends.
    pub const fn with_masses(mut self, masses: [Id; 2]) -> Self {
        self.masses = masses;
        self
    }

    /// Sets the current length.
    pub const fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Sets the spring constant.
    pub const fn with_stiffness(mut self, k: f64) -> Self {
        self.k = k;
        self
    }

    /// Sets the rest length.
    pub const fn with_rest_length(mut self, rest_length: f64) -> Self {
        self.rest_length = rest_length;
        self
    }

    /// Sets the current stress.
    pub const fn with_stress(mut self, stress: f64) -> Self {
        self.stress = stress;
        self
    }

    /// Sets the stress bounds as `[min_stress, max_stress]`.
    ///
    /// A `SpringSystem` only accepts bounds with `min_stress < 0 < max_stress`.
    pub const fn with_stress_bounds(mut self, stress_bounds: [f64; 2]) -> Self {
        self.stress_bounds = stress_bounds;
        self
    }

    /// Sets whether the `Spring` breaks when its stress goes out of bounds.
    pub const fn with_breakable(mut self, breakable: bool) -> Self {
        self.breakable = breakable;
        self
    }

    /// Returns the identifier of the `Spring`.
    #[must_use]
    pub const fn id(&self) -> Id {
        self.id
    }

    /// Returns the identifiers of the `Mass`es at the two ends.
    #[must_use]
    pub const fn masses(&self) -> [Id; 2] {
        self.masses
    }

    /// Returns whether the given `Mass` is at one of the ends.
    #[must_use]
    pub fn connects(&self, mass_id: Id) -> bool {
        self.masses.contains(&mass_id)
    }

    /// Returns the length as of the last time-step.
    #[must_use]
    pub const fn length(&self) -> f64 {
        self.length
    }

    /// Returns the spring constant.
    #[must_use]
    pub const fn k(&self) -> f64 {
        self.k
    }

    /// Returns the rest length.
    #[must_use]
    pub const fn rest_length(&self) -> f64 {
        self.rest_length
    }

    /// Returns the stress as of the last time-step.
    #[must_use]
    pub const fn stress(&self) -> f64 {
        self.stress
    }

    /// Returns the stress bounds as `[min_stress, max_stress]`.
    #[must_use]
    pub const fn stress_bounds(&self) -> [f64; 2] {
        self.stress_bounds
    }

    /// Returns whether the `Spring` breaks when its stress goes out of bounds.
    #[must_use]
    pub const fn is_breakable(&self) -> bool {
        self.breakable
    }

    /// Sets the spring constant.
    pub const fn set_stiffness(&mut self, k: f64) {
        self.k = k;
    }

    /// Sets the rest length.
    pub const fn set_rest_length(&mut self, rest_length: f64) {
        self.rest_length = rest_length;
    }

    /// Sets whether the `Spring` breaks when its stress goes out of bounds.
    pub const fn set_breakable(&mut self, breakable: bool) {
        self.breakable = breakable;
    }

    /// Checks the invariants that do not depend on the rest of the system.
    ///
    /// # Errors
    ///
    /// - If both ends are the same `Mass`.
    /// - If the length, the rest length or the spring constant is negative or `NaN`.
    /// - If the stress bounds do not satisfy `min_stress < 0 < max_stress`.
    pub(crate) fn validate(&self) -> Result<(), String> {
        let [a, b] = self.masses;
        let [min_stress, max_stress] = self.stress_bounds;
        let straddles_zero = min_stress < 0.0 && 0.0 < max_stress;
        if a == b {
            Err(format!("Spring #{} connects mass #{a} to itself", self.id))
        } else if self.length.is_nan() || self.length < 0.0 {
            Err(format!("Spring #{} has an invalid length: {}", self.id, self.length))
        } else if self.k.is_nan() || self.k < 0.0 {
            Err(format!("Spring #{} has an invalid stiffness: {}", self.id, self.k))
        } else if self.rest_length.is_nan() || self.rest_length < 0.0 {
            Err(format!("Spring #{} has an invalid rest length: {}", self.id, self.rest_length))
        } else if !straddles_zero {
            Err(format!(
                "Spring #{} has stress bounds that do not straddle zero: [{min_stress}, {max_stress}]",
                self.id
            ))
        } else {
            Ok(())
        }
    }

    /// Recalculates the length and the stress from the given length.
    pub(crate) fn update_length(&mut self, length: f64) {
        self.length = length;
        self.stress = (self.length - self.rest_length) * self.k;
    }

    /// Returns whether the `Spring` is breakable and its stress has reached one of its bounds.
    #[must_use]
    pub fn is_ruptured(&self) -> bool {
        let [min_stress, max_stress] = self.stress_bounds;
        self.breakable && ((self.stress > 0.0 && self.stress >= max_stress) || (self.stress < 0.0 && self.stress <= min_stress))
    }
}

impl std::fmt::Display for Spring {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b] = self.masses;
        let [min_stress, max_stress] = self.stress_bounds;
        write!(
            f,
            "#{}, {a}-{b}, length({:.3}), stress({:.3}), k({:.3}), restLength({:.3}), maxStress({min_stress:.3},{max_stress:.3}), breakable({})",
            self.id,
            self.length,
            self.stress,
            self.k,
            self.rest_length,
            u8::from(self.breakable)
        )
    }
}
