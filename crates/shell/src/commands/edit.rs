//! Editing a system.

use std::path::Path;

use springsys::{Id, SpringSystem};

/// Removes every mass with the given identifier, and the springs attached to them, then saves the system to `out_path`.
///
/// # Errors
///
/// - If there is no such mass.
/// - If the system could not be saved.
pub fn remove_mass<P: AsRef<Path>>(mut sys: SpringSystem, id: Id, out_path: P) -> Result<(), String> {
    if sys.get_mass(id).is_none() {
        return Err(format!("There is no mass #{id} in the system"));
    }

    let n_springs = sys.n_springs();
    sys.remove_mass(id);
    ftlog::info!("Removed mass #{id} and {} springs attached to it.", n_springs - sys.n_springs());

    sys.write_to(out_path)?;
    Ok(())
}

/// Removes every spring with the given identifier, then saves the system to `out_path`.
///
/// # Errors
///
/// - If there is no such spring.
/// - If the system could not be saved.
pub fn remove_spring<P: AsRef<Path>>(mut sys: SpringSystem, id: Id, out_path: P) -> Result<(), String> {
    if sys.get_spring(id).is_none() {
        return Err(format!("There is no spring #{id} in the system"));
    }

    sys.remove_spring(id);
    ftlog::info!("Removed spring #{id}.");

    sys.write_to(out_path)?;
    Ok(())
}
