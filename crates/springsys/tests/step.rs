//! Tests for the integrator and the equilibrium solver.

use float_eq::assert_float_eq;
use springsys::{EPSILON, Mass, Spring, SpringSystem};
use test_case::test_case;

mod common;

#[test]
fn fixed_point() -> Result<(), String> {
    let mut sys = SpringSystem::new(2)?;
    sys.set_dissipation(0.0);
    sys.add_mass(Mass::new(0).with_position([0.0, 0.0, 0.0]))?;
    sys.add_mass(Mass::new(1).with_position([0.6, 0.8, 0.0]))?;
    sys.add_spring(Spring::new(0, [0, 1]).with_rest_length(1.0).with_stiffness(5.0))?;

    let before = common::masses(&sys);
    sys.step(0.1);
    let after = common::masses(&sys);

    for (b, a) in before.iter().zip(&after) {
        assert_float_eq!(*a.position(), *b.position(), abs_all <= 1e-12);
        assert_float_eq!(*a.velocity(), *b.velocity(), abs_all <= 1e-12);
    }
    let spring = sys.get_spring(0).ok_or("The spring should not break")?;
    assert_float_eq!(spring.stress(), 0.0, abs <= 1e-12);

    Ok(())
}

#[test]
fn forces() -> Result<(), String> {
    let mut sys = common::chain(&[0.0, 2.0], 1.0)?;
    sys.set_dissipation(0.0);
    sys.step(0.5);

    let spring = sys.get_spring(0).ok_or("The spring should not break")?;
    assert_float_eq!(spring.length(), 2.0, abs <= 1e-12);
    assert_float_eq!(spring.stress(), 1.0, abs <= 1e-12);

    // stress * (0 - 2) / (2 * (1 + 1))
    let m = sys.get_mass(1).ok_or("Mass #1 should be in the system")?;
    assert_float_eq!(m.stress()[0], -0.5, abs <= 1e-12);
    assert_float_eq!(m.velocity()[0], -0.25, abs <= 1e-12);
    assert_float_eq!(m.position()[0], 2.0 - 0.125, abs <= 1e-12);

    let anchor = sys.get_mass(0).ok_or("Mass #0 should be in the system")?;
    assert_eq!(anchor.stress(), &[0.0; 3], "A fixed mass should not accumulate stress");
    assert_eq!(anchor.position(), &[0.0; 3]);

    Ok(())
}

#[test]
fn velocity_decay() -> Result<(), String> {
    let mut sys = SpringSystem::new(3)?;
    sys.set_dissipation(0.75);
    sys.add_mass(Mass::new(0).with_velocity([1.0, -2.0, 4.0]))?;
    sys.step(0.5);

    // (1 - 0.75) ^ 0.5
    let m = sys.get_mass(0).ok_or("Mass #0 should be in the system")?;
    assert_float_eq!(*m.velocity(), [0.5, -1.0, 2.0], abs_all <= 1e-12);
    assert_float_eq!(*m.position(), [0.25, -0.5, 1.0], abs_all <= 1e-12);

    Ok(())
}

#[test]
fn inactive_dims() -> Result<(), String> {
    let mut sys = SpringSystem::new(1)?;
    sys.add_mass(Mass::new(0).with_velocity([1.0, 1.0, 1.0]))?;
    sys.step(1.0);

    let m = sys.get_mass(0).ok_or("Mass #0 should be in the system")?;
    assert_float_eq!(m.position()[0], 0.9, abs <= 1e-12);
    assert_eq!(&m.position()[1..], &[0.0, 0.0], "Only the active dimensions should move");

    Ok(())
}

#[test_case([3.0, 0.0, 0.0], 2.0, [-1.0, 1.0]; "tension")]
#[test_case([0.2, 0.0, 0.0], -8.0, [-5.0, 5.0]; "compression")]
#[test_case([2.0, 0.0, 0.0], 1.0, [-1.0, 1.0]; "at the bound")]
fn rupture(pos: [f64; 3], stress: f64, bounds: [f64; 2]) -> Result<(), String> {
    let mut sys = SpringSystem::new(1)?;
    sys.add_mass(Mass::new(0).with_fixed(true))?;
    sys.add_mass(Mass::new(1).with_position(pos))?;
    sys.add_mass(Mass::new(2).with_position([1.0, 0.0, 0.0]))?;
    let k = if stress < 0.0 { 10.0 } else { 1.0 };
    sys.add_spring(
        Spring::new(0, [0, 1])
            .with_stiffness(k)
            .with_stress_bounds(bounds)
            .with_breakable(true),
    )?;
    sys.add_spring(Spring::new(1, [0, 2]).with_rest_length(0.5))?;

    sys.step(0.1);

    assert_eq!(sys.n_springs(), 1, "Exactly one spring should rupture");
    assert!(sys.get_spring(0).is_none());
    let m = sys.get_mass(1).ok_or("Mass #1 should be in the system")?;
    assert_eq!(m.velocity(), &[0.0; 3], "A ruptured spring should apply no stress");
    assert_eq!(m.position(), &pos);

    let next = sys.get_spring(1).ok_or("The next spring should not break")?;
    assert_float_eq!(next.stress(), 0.5, abs <= 1e-12, "The spring after a rupture should still be updated");

    Ok(())
}

#[test]
fn unbreakable() -> Result<(), String> {
    let mut sys = common::chain(&[0.0, 3.0], 1.0)?;
    if let Some(s) = sys.get_spring_mut(0) {
        s.set_stiffness(100.0);
    }
    sys.step(0.1);

    let spring = sys.get_spring(0).ok_or("An unbreakable spring should never break")?;
    assert_float_eq!(spring.stress(), 200.0, abs <= 1e-9);
    assert!(!spring.is_ruptured());

    Ok(())
}

#[test_case(0.0; "zero")]
#[test_case(-0.1; "negative")]
#[test_case(f64::NAN; "nan")]
fn step_ignores_bad_dt(dt: f64) -> Result<(), String> {
    let mut sys = common::chain(&[0.0, 0.5, 1.0, 1.5], 1.0)?;
    let (masses, springs) = (common::masses(&sys), common::springs(&sys));

    sys.step(dt);

    assert_eq!(common::masses(&sys), masses);
    assert_eq!(common::springs(&sys), springs);

    Ok(())
}

#[test]
fn fixed_masses_stay_put() -> Result<(), String> {
    let mut sys = common::lattice(6, 0.3, 42)?;
    let fixed = common::masses(&sys).into_iter().filter(Mass::is_fixed).collect::<Vec<_>>();
    assert_eq!(fixed.len(), 4);

    for _ in 0..100 {
        sys.step(0.05);
    }

    for f in &fixed {
        let m = sys.get_mass(f.id()).ok_or("Fixed masses should not be removed")?;
        assert_eq!(m, f, "A fixed mass should never change");
    }
    assert!(
        common::masses(&sys).iter().any(|m| !m.is_fixed() && m.velocity() != &[0.0; 3]),
        "The free masses should have moved"
    );

    Ok(())
}

#[test]
fn deterministic() -> Result<(), String> {
    let mut a = common::lattice(5, 0.2, 7)?;
    let mut b = a.clone();

    for _ in 0..50 {
        a.step(0.1);
        b.step(0.1);
    }

    assert_eq!(common::masses(&a), common::masses(&b));
    assert_eq!(common::springs(&a), common::springs(&b));

    Ok(())
}

#[test]
fn momentum_and_stress() -> Result<(), String> {
    let mut sys = SpringSystem::new(2)?;
    sys.add_mass(Mass::new(0).with_velocity([3.0, 4.0, 0.0]))?;
    sys.add_mass(Mass::new(1).with_velocity([0.0, -1.0, 0.0]).with_position([1.0, 0.0, 0.0]))?;
    sys.add_spring(Spring::new(0, [0, 1]).with_stress(-2.0))?;
    sys.add_spring(Spring::new(1, [1, 0]).with_stress(0.5))?;

    assert_float_eq!(sys.momentum(), 6.0, abs <= 1e-12);
    assert_float_eq!(sys.total_stress(), 2.5, abs <= 1e-12);

    Ok(())
}

/// Five masses on a line, spaced by the rest length of the springs between them.
#[test]
fn end_to_end() -> Result<(), String> {
    let xs = [0.0, 0.5, 1.0, 1.5, 2.0];
    let mut sys = common::chain(&xs, 0.5)?;

    for _ in 0..100 {
        sys.step(0.1);
    }

    for (m, &x) in sys.masses_mut().zip(&xs) {
        m.set_position([x, 0.0, 0.0]);
        m.reset_velocity();
    }
    let t = sys.step_to_rest(0.1, 1000.0);

    assert!(t <= 1000.0, "The chain should come to rest, but t = {t}");
    assert!(sys.momentum() <= EPSILON);
    assert_eq!(sys.n_springs(), 4);

    Ok(())
}

#[test]
fn relax_compressed_chain() -> Result<(), String> {
    let mut sys = common::chain(&[0.0, 0.5, 1.0, 1.5, 2.0], 1.0)?;

    let t = sys.step_to_rest(0.1, 10_000.0);

    assert!(t <= 10_000.0, "The chain should come to rest, but t = {t}");
    assert!(t > 1.0, "The chain starts out of equilibrium");
    assert!(sys.momentum() <= EPSILON);
    for (m, x) in sys.masses().iter().zip([0.0, 1.0, 2.0, 3.0, 4.0]) {
        assert_float_eq!(m.position()[0], x, abs <= 1e-3, "{sys}");
    }

    Ok(())
}

#[test_case(0.0, 10.0; "zero dt")]
#[test_case(-1.0, 10.0; "negative dt")]
#[test_case(0.1, 0.1; "t_max equal to dt")]
#[test_case(0.5, 0.1; "t_max below dt")]
fn step_to_rest_bad_args(dt: f64, t_max: f64) -> Result<(), String> {
    let mut sys = common::chain(&[0.0, 0.5, 1.0], 1.0)?;
    let masses = common::masses(&sys);

    let t = sys.step_to_rest(dt, t_max);

    assert_float_eq!(t, t_max + dt, abs <= 0.0);
    assert_eq!(common::masses(&sys), masses, "No step should be taken");

    Ok(())
}

#[test]
fn step_to_rest_time_limit() -> Result<(), String> {
    let mut sys = common::chain(&[0.0, 0.5, 1.0], 1.0)?;
    sys.set_dissipation(0.0);

    let t = sys.step_to_rest(0.1, 5.0);

    assert!(t > 5.0, "An undamped chain cannot reach rest, but t = {t}");
    assert!(t < 5.0 + 0.2);

    Ok(())
}
