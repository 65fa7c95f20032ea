//! Running the simulation.

use std::path::Path;

use springsys::SpringSystem;

/// Prints the system along with its momentum and total stress.
pub fn show(sys: &SpringSystem) {
    print!("{sys}");
    println!("Momentum: {:.6}", sys.momentum());
    println!("Total stress: {:.6}", sys.total_stress());
}

/// Sets the dissipation, if one was given, and fails if it is out of range.
fn configure(sys: &mut SpringSystem, dissipation: Option<f64>) -> Result<(), String> {
    if let Some(dissipation) = dissipation {
        if !(0.0..=1.0).contains(&dissipation) {
            return Err(format!("Dissipation must be in [0, 1], got {dissipation}"));
        }
        sys.set_dissipation(dissipation);
    }
    ftlog::info!("Using a dissipation of {}", sys.dissipation());
    Ok(())
}

/// Steps the system `steps` times and saves it to `out_path`.
///
/// # Errors
///
/// - If `dt` is not strictly positive.
/// - If the dissipation is out of range.
/// - If the system could not be saved.
pub fn step<P: AsRef<Path>>(mut sys: SpringSystem, dt: f64, steps: usize, dissipation: Option<f64>, out_path: P) -> Result<(), String> {
    if dt.is_nan() || dt <= 0.0 {
        return Err(format!("The time-step must be positive, got {dt}"));
    }
    configure(&mut sys, dissipation)?;

    let n_springs = sys.n_springs();
    let start = std::time::Instant::now();
    for _ in 0..steps {
        sys.step(dt);
    }
    let elapsed = start.elapsed().as_secs_f32();
    ftlog::info!(
        "Took {steps} steps of {dt} in {elapsed:.2e} seconds. {} springs ruptured. Momentum is now {:.6}.",
        n_springs - sys.n_springs(),
        sys.momentum()
    );

    ftlog::info!("Saving system to {:?}", out_path.as_ref());
    sys.write_to(out_path)?;

    Ok(())
}

/// Steps the system until it comes to rest or `t_max` is reached, and saves it to `out_path`.
///
/// # Errors
///
/// - If `dt` is not strictly positive, or `t_max` is not greater than `dt`.
/// - If the dissipation is out of range.
/// - If the system could not be saved.
pub fn relax<P: AsRef<Path>>(mut sys: SpringSystem, dt: f64, t_max: f64, dissipation: Option<f64>, out_path: P) -> Result<(), String> {
    if dt.is_nan() || dt <= 0.0 || t_max.is_nan() || t_max <= dt {
        return Err(format!("Expected 0 < dt < t_max, got dt = {dt} and t_max = {t_max}"));
    }
    configure(&mut sys, dissipation)?;

    let t = sys.step_to_rest(dt, t_max);
    if t <= t_max {
        ftlog::info!("Came to rest at t = {t}");
        println!("Came to rest at t = {t:.3}");
    } else {
        ftlog::warn!("Did not come to rest by t_max = {t_max}. Momentum is {}", sys.momentum());
        println!("Did not come to rest by t = {t_max:.3}, momentum is {:.6}", sys.momentum());
    }

    ftlog::info!("Saving system to {:?}", out_path.as_ref());
    sys.write_to(out_path)?;

    Ok(())
}
