//! The mass-spring system.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    SpringSysError,
    utils::{IterMut, OrderedSet},
};

use super::{Id, Mass, Spring};

/// The `SpringSystem` of `Mass`es and `Spring`s.
///
/// The system owns its entities: `add_mass` and `add_spring` take them by value after checking them against the invariants of the system, so the caller
/// never holds an alias into the system. Both collections keep their insertion order, which decides ties in the spatial queries and the order in which
/// `Spring`s apply their stress during a time-step.
///
/// Clones are deep and independent.
///
/// With the `serde` feature, deserialization rebuilds the system through [`new`](Self::new), [`add_mass`](Self::add_mass) and
/// [`add_spring`](Self::add_spring), so it fails on the same inputs they reject. A dissipation outside `[0, 1]` is also rejected.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(try_from = "RawSpringSystem"))]
pub struct SpringSystem {
    /// The number of active dimensions, in `1..=3`.
    pub(super) nb_dim: usize,
    /// The fraction of velocity the masses lose per unit of time, in `[0, 1]`.
    pub(super) dissipation: f64,
    /// The `Mass`es, in insertion order.
    pub(super) masses: OrderedSet<Mass>,
    /// The `Spring`s, in insertion order.
    pub(super) springs: OrderedSet<Spring>,
}

impl SpringSystem {
    /// The dissipation of a new system.
    pub const DEFAULT_DISSIPATION: f64 = 0.1;

    /// Creates an empty `SpringSystem` with the given number of dimensions.
    ///
    /// # Errors
    ///
    /// - If `nb_dim` is not in `1..=3`.
    pub fn new(nb_dim: usize) -> Result<Self, SpringSysError> {
        if !(1..=3).contains(&nb_dim) {
            return Err(SpringSysError::InvalidArgument(format!(
                "The number of dimensions must be 1, 2 or 3, got {nb_dim}"
            )));
        }

        Ok(Self {
            nb_dim,
            dissipation: Self::DEFAULT_DISSIPATION,
            masses: OrderedSet::new(),
            springs: OrderedSet::new(),
        })
    }

    /// Returns the number of active dimensions.
    #[must_use]
    pub const fn nb_dim(&self) -> usize {
        self.nb_dim
    }

    /// Returns the dissipation coefficient.
    #[must_use]
    pub const fn dissipation(&self) -> f64 {
        self.dissipation
    }

    /// Sets the dissipation coefficient.
    ///
    /// Values outside `[0, 1]`, and `NaN`, are ignored and leave the coefficient unchanged.
    pub fn set_dissipation(&mut self, dissipation: f64) {
        if (0.0..=1.0).contains(&dissipation) {
            self.dissipation = dissipation;
        }
    }

    /// Returns the number of `Mass`es.
    #[must_use]
    pub const fn n_masses(&self) -> usize {
        self.masses.len()
    }

    /// Returns the number of `Spring`s.
    #[must_use]
    pub const fn n_springs(&self) -> usize {
        self.springs.len()
    }

    /// Returns the `Mass`es, in insertion order.
    #[must_use]
    pub const fn masses(&self) -> &OrderedSet<Mass> {
        &self.masses
    }

    /// Returns the `Mass`es as mutable, in insertion order.
    ///
    /// This lets a caller apply external forces or resolve collisions between two time-steps.
    pub fn masses_mut(&mut self) -> IterMut<'_, Mass> {
        self.masses.iter_mut()
    }

    /// Returns the `Spring`s, in insertion order.
    #[must_use]
    pub const fn springs(&self) -> &OrderedSet<Spring> {
        &self.springs
    }

    /// Returns the first `Mass` with the given identifier.
    #[must_use]
    pub fn get_mass(&self, id: Id) -> Option<&Mass> {
        self.masses.find(|m| m.id() == id)
    }

    /// Returns the first `Mass` with the given identifier, as mutable.
    #[must_use]
    pub fn get_mass_mut(&mut self, id: Id) -> Option<&mut Mass> {
        self.masses.find_mut(|m| m.id() == id)
    }

    /// Returns the first `Spring` with the given identifier.
    #[must_use]
    pub fn get_spring(&self, id: Id) -> Option<&Spring> {
        self.springs.find(|s| s.id() == id)
    }

    /// Returns the first `Spring` with the given identifier, as mutable.
    #[must_use]
    pub fn get_spring_mut(&mut self, id: Id) -> Option<&mut Spring> {
        self.springs.find_mut(|s| s.id() == id)
    }

    /// Adds a `Mass` to the `SpringSystem`. This does not add any `Spring`s.
    ///
    /// Identifiers are not checked for uniqueness. Lookups by identifier return the first `Mass` added with that identifier.
    ///
    /// # Errors
    ///
    /// - If the inertial mass of the `Mass` is negative or `NaN`.
    pub fn add_mass(&mut self, mass: Mass) -> Result<(), SpringSysError> {
        if mass.mass().is_nan() || mass.mass() < 0.0 {
            let msg = format!("Mass #{} has a negative mass: {}", mass.id(), mass.mass());
            ftlog::warn!("{msg}");
            return Err(SpringSysError::Validation(msg));
        }

        self.masses.push(mass);
        Ok(())
    }

    /// Adds a `Spring` between two `Mass`es already in the `SpringSystem`.
    ///
    /// # Errors
    ///
    /// - If both ends are the same `Mass`.
    /// - If either end is not in the `SpringSystem`.
    /// - If the length, the rest length or the spring constant is negative or `NaN`.
    /// - If the stress bounds do not satisfy `min_stress < 0 < max_stress`.
    pub fn add_spring(&mut self, spring: Spring) -> Result<(), SpringSysError> {
        let missing = spring.masses().into_iter().find(|&id| self.get_mass(id).is_none());
        let checked = spring.validate().and_then(|()| {
            missing.map_or(Ok(()), |id| {
                Err(format!("Spring #{} is attached to mass #{id}, which is not in the system", spring.id()))
            })
        });

        match checked {
            Ok(()) => {
                self.springs.push(spring);
                Ok(())
            }
            Err(msg) => {
                ftlog::warn!("{msg}");
                Err(SpringSysError::Validation(msg))
            }
        }
    }

    /// Removes every `Mass` with the given identifier, along with every `Spring` attached to it.
    ///
    /// Does nothing if there is no such `Mass`.
    pub fn remove_mass(&mut self, id: Id) {
        self.masses.retain(|m| m.id() != id);
        self.springs.retain(|s| !s.connects(id));
    }

    /// Removes every `Spring` with the given identifier.
    ///
    /// Does nothing if there is no such `Spring`.
    pub fn remove_spring(&mut self, id: Id) {
        self.springs.retain(|s| s.id() != id);
    }
}

/// The fields of a serialized `SpringSystem`, before they are checked.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawSpringSystem {
    /// The number of active dimensions.
    nb_dim: usize,
    /// The dissipation coefficient.
    dissipation: f64,
    /// The `Mass`es, in insertion order.
    masses: Vec<Mass>,
    /// The `Spring`s, in insertion order.
    springs: Vec<Spring>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSpringSystem> for SpringSystem {
    type Error = SpringSysError;

    fn try_from(raw: RawSpringSystem) -> Result<Self, Self::Error> {
        let mut sys = Self::new(raw.nb_dim)?;

        if !(0.0..=1.0).contains(&raw.dissipation) {
            return Err(SpringSysError::InvalidArgument(format!(
                "The dissipation must be in [0, 1], got {}",
                raw.dissipation
            )));
        }
        sys.set_dissipation(raw.dissipation);

        for mass in raw.masses {
            sys.add_mass(mass)?;
        }
        for spring in raw.springs {
            sys.add_spring(spring)?;
        }

        Ok(sys)
    }
}

impl std::fmt::Display for SpringSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Number of dimension: {}", self.nb_dim)?;
        writeln!(f, "Dissipation: {:.3}", self.dissipation)?;
        writeln!(f, "Masses:")?;
        for m in &self.masses {
            writeln!(f, "{m}")?;
        }
        writeln!(f, "Springs:")?;
        for s in &self.springs {
            writeln!(f, "{s}")?;
        }
        Ok(())
    }
}
