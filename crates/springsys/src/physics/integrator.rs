//! Stepping a `SpringSystem` in time.

use std::collections::HashMap;

use crate::{EPSILON, utils::distance};

use super::{Id, SpringSystem};

/// A snapshot of one end of a `Spring`, taken before any stress is applied.
struct End {
    /// The slot of the `Mass` in the system.
    slot: usize,
    /// The position of the `Mass`.
    position: [f64; 3],
    /// The inertial mass.
    mass: f64,
    /// Whether the `Mass` is anchored in place.
    fixed: bool,
}

/// Methods for the explicit-Euler integrator and the equilibrium solver.
impl SpringSystem {
    /// Updates the `SpringSystem` by one time-step.
    ///
    /// The update proceeds strictly in this order:
    ///
    /// 1. The stress of every free `Mass` is reset to zero.
    /// 2. Each `Spring`, in insertion order, recalculates its length and stress from the current positions. A breakable `Spring` whose stress has reached
    ///    its bounds is removed and applies no stress. Any other `Spring` adds its stress to each free end, divided by `length * (1 + mass)`.
    /// 3. Every free `Mass` moves: its velocity decays by `(1 - dissipation)^dt`, then takes the stress, then moves the position.
    ///
    /// `dt` must be chosen with care. Too large a step makes the simulation diverge, which tends to rupture springs, especially stiff ones.
    ///
    /// Does nothing if `dt` is not strictly positive.
    pub fn step(&mut self, dt: f64) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }

        let nb_dim = self.nb_dim;
        for m in self.masses.iter_mut().filter(|m| !m.is_fixed()) {
            m.reset_stress(nb_dim);
        }

        // The slots of the first `Mass` with each identifier. Nothing adds or removes a `Mass` during the step, so these stay valid.
        let mut mass_slots = HashMap::with_capacity(self.masses.len());
        for (slot, m) in self.masses.iter_slots() {
            mass_slots.entry(m.id()).or_insert(slot);
        }

        let mut cursor = self.springs.first_slot();
        while let Some(slot) = cursor {
            self.apply_spring(slot, &mass_slots);
            cursor = self.springs.next_slot(slot);
        }
        if self.springs.n_tombstones() > 0 {
            self.springs.compact();
        }

        let dissipation = self.dissipation;
        for m in self.masses.iter_mut().filter(|m| !m.is_fixed()) {
            m.integrate(nb_dim, dissipation, dt);
        }
    }

    /// Updates the `Spring` in the given slot and distributes its stress to its ends, or removes it if it ruptures.
    fn apply_spring(&mut self, slot: usize, mass_slots: &HashMap<Id, usize>) {
        let nb_dim = self.nb_dim;
        let Some(spring) = self.springs.get_mut(slot) else {
            return;
        };

        let end = |id: Id| {
            mass_slots.get(&id).and_then(|&slot| {
                self.masses.get(slot).map(|m| End {
                    slot,
                    position: *m.position(),
                    mass: m.mass(),
                    fixed: m.is_fixed(),
                })
            })
        };
        let [a, b] = spring.masses();
        let (Some(a), Some(b)) = (end(a), end(b)) else {
            return;
        };

        spring.update_length(distance(&a.position, &b.position, nb_dim));
        if spring.is_ruptured() {
            ftlog::debug!(
                "Spring #{} ruptured with stress {} outside {:?}",
                spring.id(),
                spring.stress(),
                spring.stress_bounds()
            );
            self.springs.remove_at(slot);
            return;
        }

        let (length, stress) = (spring.length(), spring.stress());
        let ends = [(&a, &b), (&b, &a)];
        for dim in 0..nb_dim {
            for (this, other) in ends {
                let d = length * (1.0 + this.mass);
                if !this.fixed
                    && d > EPSILON
                    && let Some(m) = self.masses.get_mut(this.slot)
                {
                    m.add_stress(dim, stress * (other.position[dim] - this.position[dim]) / d);
                }
            }
        }
    }

    /// Steps the `SpringSystem` until it reaches equilibrium or the time limit.
    ///
    /// The system is at equilibrium when, after a step, the momentum is at most [`EPSILON`] and the total stress changed by at most [`EPSILON`] since the
    /// previous step. The total stress before the first step is taken as zero.
    ///
    /// # Arguments
    ///
    /// - `dt`: The size of each time-step.
    /// - `t_max`: The time limit.
    ///
    /// # Returns
    ///
    /// The elapsed time. A value at most `t_max` means the system reached equilibrium. A value greater than `t_max` means it did not, or that the
    /// arguments were invalid (`dt <= 0` or `t_max <= dt`), in which case `t_max + dt` is returned without stepping.
    pub fn step_to_rest(&mut self, dt: f64, t_max: f64) -> f64 {
        if dt.is_nan() || t_max.is_nan() || dt <= 0.0 || t_max <= dt {
            return t_max + dt;
        }

        let mut t = 0.0;
        let mut stress = 0.0;
        loop {
            let previous_stress = stress;
            self.step(dt);
            let momentum = self.momentum();
            stress = self.total_stress();
            t += dt;

            let at_rest = momentum <= EPSILON && (stress - previous_stress).abs() <= EPSILON;
            if at_rest || t > t_max {
                if at_rest {
                    ftlog::debug!("Reached equilibrium after {t} with total stress {stress}");
                } else {
                    ftlog::debug!("No equilibrium after {t}, momentum is still {momentum}");
                }
                return t;
            }
        }
    }

    /// Returns the momentum of the `SpringSystem`, i.e. the sum over all `Mass`es of the norm of their velocity.
    #[must_use]
    pub fn momentum(&self) -> f64 {
        self.masses.iter().map(|m| m.speed(self.nb_dim)).sum()
    }

    /// Returns the total stress of the `SpringSystem`, i.e. the sum over all `Spring`s of the absolute value of their stress.
    #[must_use]
    pub fn total_stress(&self) -> f64 {
        self.springs.iter().map(|s| s.stress().abs()).sum()
    }
}
