//! CLI for SpringSys, the mass-spring simulator.

mod commands;
pub mod utils;

use std::path::PathBuf;

use clap::Parser;
use springsys::SpringSystem;

use commands::Commands;

/// The arguments to the CLI.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The path to the file holding the input system.
    #[arg(short('i'), long)]
    inp_path: PathBuf,

    /// The path to the file to which the resulting system is saved. Required by every subcommand except `show`.
    #[arg(short('o'), long)]
    out_path: Option<PathBuf>,

    /// The name of the log-file to use.
    #[arg(short('l'), long, default_value = "springsys.log")]
    log_name: String,

    /// The subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let (_guard, log_path) = utils::configure_logger(&args.log_name)?;
    ftlog::info!("Log file: {log_path:?}");

    ftlog::info!("Reading system from {:?}", args.inp_path);
    let sys = SpringSystem::read_from(&args.inp_path)?;
    ftlog::info!("Read a system with {} masses and {} springs.", sys.n_masses(), sys.n_springs());

    match args.command {
        Commands::Show => {
            commands::show(&sys);
            Ok(())
        }
        Commands::Step { dt, steps, dissipation } => {
            let out_path = utils::require_out_path(args.out_path)?;
            commands::step(sys, dt, steps, dissipation, &out_path)
        }
        Commands::Relax { dt, t_max, dissipation } => {
            let out_path = utils::require_out_path(args.out_path)?;
            commands::relax(sys, dt, t_max, dissipation, &out_path)
        }
        Commands::RemoveMass { id } => {
            let out_path = utils::require_out_path(args.out_path)?;
            commands::remove_mass(sys, id, &out_path)
        }
        Commands::RemoveSpring { id } => {
            let out_path = utils::require_out_path(args.out_path)?;
            commands::remove_spring(sys, id, &out_path)
        }
    }
}
