//! Nearest-neighbor queries by position.

use crate::utils::distance;

use super::{Mass, Spring, SpringSystem};

/// Spatial queries over the `SpringSystem`.
impl SpringSystem {
    /// Returns the `Mass` nearest to the given position.
    ///
    /// Distances are Euclidean over the active dimensions. Ties go to the `Mass` added first.
    ///
    /// Returns `None` if there are no `Mass`es.
    #[must_use]
    pub fn get_mass_by_pos(&self, pos: &[f64; 3]) -> Option<&Mass> {
        nearest(self.masses.iter().map(|m| (m, distance(m.position(), pos, self.nb_dim))))
    }

    /// Returns the `Spring` whose midpoint is nearest to the given position.
    ///
    /// Distances are Euclidean over the active dimensions. Ties go to the `Spring` added first. `Spring`s with a missing end are skipped.
    ///
    /// Returns `None` if there are no such `Spring`s.
    #[must_use]
    pub fn get_spring_by_pos(&self, pos: &[f64; 3]) -> Option<&Spring> {
        nearest(self.springs.iter().filter_map(|s| {
            self.midpoint(s).map(|mid| (s, distance(&mid, pos, self.nb_dim)))
        }))
    }

    /// Returns the midpoint of the two ends of a `Spring`, if both are in the system.
    #[must_use]
    pub fn midpoint(&self, spring: &Spring) -> Option<[f64; 3]> {
        let [a, b] = spring.masses();
        let (a, b) = (self.get_mass(a)?, self.get_mass(b)?);

        let mut mid = [0.0; 3];
        for ((m, &pa), &pb) in mid.iter_mut().zip(a.position()).zip(b.position()).take(self.nb_dim) {
            *m = (pa + pb) / 2.0;
        }
        Some(mid)
    }
}

/// Returns the first item with the smallest distance.
fn nearest<'a, T>(candidates: impl Iterator<Item = (&'a T, f64)>) -> Option<&'a T> {
    candidates
        .fold(None, |best: Option<(&T, f64)>, (item, d)| match best {
            Some((_, best_d)) if d < best_d => Some((item, d)),
            Some(_) => best,
            None => Some((item, d)),
        })
        .map(|(item, _)| item)
}
