//! Utilities for the crate.

mod ordered_set;

pub use ordered_set::{Iter, IterMut, OrderedSet};

/// The tolerance used both to guard against near-zero denominators and to detect equilibrium.
pub const EPSILON: f64 = 1e-7;

/// Returns the Euclidean distance between two points over their first `nb_dim` components.
pub(crate) fn distance(a: &[f64; 3], b: &[f64; 3], nb_dim: usize) -> f64 {
    a.iter()
        .zip(b.iter())
        .take(nb_dim)
        .map(|(&x, &y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
