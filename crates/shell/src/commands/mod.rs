//! The commands under the `springsys` CLI.

mod edit;
mod simulate;

use clap::Subcommand;
use springsys::Id;

pub use edit::{remove_mass, remove_spring};
pub use simulate::{relax, show, step};

/// The subcommands of the CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the system along with its momentum and total stress.
    Show,
    /// Step the system a fixed number of times and save the result.
    Step {
        /// The size of each time-step.
        #[arg(short('t'), long)]
        dt: f64,

        /// The number of time-steps to take.
        #[arg(short('n'), long)]
        steps: usize,

        /// The fraction of velocity lost per unit of time. The dissipation is not saved with the system.
        #[arg(short('d'), long)]
        dissipation: Option<f64>,
    },
    /// Step the system until it comes to rest or reaches the time limit, and save the result.
    Relax {
        /// The size of each time-step.
        #[arg(short('t'), long)]
        dt: f64,

        /// The time limit.
        #[arg(short('m'), long)]
        t_max: f64,

        /// The fraction of velocity lost per unit of time. The dissipation is not saved with the system.
        #[arg(short('d'), long)]
        dissipation: Option<f64>,
    },
    /// Remove a mass, and every spring attached to it, and save the result.
    RemoveMass {
        /// The identifier of the mass.
        #[arg(long)]
        id: Id,
    },
    /// Remove a spring and save the result.
    RemoveSpring {
        /// The identifier of the spring.
        #[arg(long)]
        id: Id,
    },
}
