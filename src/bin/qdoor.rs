use clap::{Parser, Subcommand};
use qdoor::host::session::MAX_SESSION_DIMENSIONS;
use qdoor::host::{Espeak, HostError, LineInput, Session, Silent, Speech};
use qdoor::{Simulator, SimulatorConfig};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qdoor", version, about = "Collapse a register and see whether the doorway opens")]
struct Cli {
    /// Seed for the simulator's random number generator
    #[arg(long, global = true, env = "QDOOR_SEED")]
    seed: Option<u64>,

    /// Do not speak announcements
    #[arg(long, global = true)]
    silent: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer the questions and try to open a doorway (default)
    Interactive,
    /// Run create -> transform every qubit -> collapse without questions
    Simulate {
        /// Number of qubits in the register
        #[arg(long, short = 'q', allow_negative_numbers = true)]
        qubits: i64,
        /// Number of independent runs
        #[arg(long, short = 't', default_value_t = 1)]
        trials: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SimulatorConfig {
        seed: cli.seed,
        ..SimulatorConfig::default()
    };

    let result = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive if cli.silent => interactive(config, Silent),
        Commands::Interactive => interactive(config, Espeak::default()),
        Commands::Simulate { qubits, trials } => simulate(config, qubits, trials),
    };
    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn interactive<S: Speech>(config: SimulatorConfig, speech: S) -> Result<(), HostError> {
    let mut session = Session::new(LineInput::stdio(), speech, io::stdout(), Simulator::with_config(config));
    session.run().map(|_| ())
}

fn simulate(config: SimulatorConfig, qubits: i64, trials: usize) -> Result<(), HostError> {
    if qubits > MAX_SESSION_DIMENSIONS {
        return Err(HostError::DimensionsOutOfRange { dimensions: qubits, max: MAX_SESSION_DIMENSIONS });
    }
    let mut simulator = Simulator::with_config(config);
    for _ in 0..trials {
        let result = simulator.run(qubits)?;
        println!("{}", result);
    }
    Ok(())
}
