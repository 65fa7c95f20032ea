//! Systems shared by the tests.

use rand::prelude::*;
use springsys::{Mass, Spring, SpringSystem};

/// A line of masses along the x-axis at the given positions, with a unit spring between each consecutive pair. The first mass is fixed.
pub fn chain(xs: &[f64], rest_length: f64) -> Result<SpringSystem, String> {
    let mut sys = SpringSystem::new(1)?;
    for (id, &x) in (0..).zip(xs) {
        sys.add_mass(Mass::new(id).with_position([x, 0.0, 0.0]).with_fixed(id == 0))?;
    }
    let n = i32::try_from(xs.len()).map_err(|e| e.to_string())?;
    for id in 1..n {
        sys.add_spring(Spring::new(id - 1, [id - 1, id]).with_rest_length(rest_length))?;
    }
    Ok(sys)
}

/// A `side x side` square lattice in two dimensions, with each mass jittered off its grid point and a spring to its right and upper neighbors. The four
/// corners are fixed.
pub fn lattice(side: i32, jitter: f64, seed: u64) -> Result<SpringSystem, String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut sys = SpringSystem::new(2)?;

    let corners = [0, side - 1, side * (side - 1), side * side - 1];
    for y in 0..side {
        for x in 0..side {
            let id = y * side + x;
            let pos = [
                f64::from(x) + rng.random_range(-jitter..=jitter),
                f64::from(y) + rng.random_range(-jitter..=jitter),
                0.0,
            ];
            sys.add_mass(Mass::new(id).with_position(pos).with_fixed(corners.contains(&id)))?;
        }
    }

    let mut spring_id = 0;
    for y in 0..side {
        for x in 0..side {
            let id = y * side + x;
            if x + 1 < side {
                sys.add_spring(Spring::new(spring_id, [id, id + 1]))?;
                spring_id += 1;
            }
            if y + 1 < side {
                sys.add_spring(Spring::new(spring_id, [id, id + side]))?;
                spring_id += 1;
            }
        }
    }

    Ok(sys)
}

/// The masses of the system, in insertion order.
pub fn masses(sys: &SpringSystem) -> Vec<Mass> {
    sys.masses().iter().cloned().collect()
}

/// The springs of the system, in insertion order.
pub fn springs(sys: &SpringSystem) -> Vec<Spring> {
    sys.springs().iter().cloned().collect()
}
