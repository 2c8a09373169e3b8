use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use mlq_sched::generate::{random_workload, WorkloadProfile};
use mlq_sched::models::{Discipline, SimulationConfig, Ticks, BAND_COUNT};
use mlq_sched::scheduler::{SchedulingEngine, TickOutcome};

#[derive(Parser, Debug)]
#[command(name = "mlq-sim", version, about = "Multilevel queue CPU scheduling simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a workload file
    Run {
        /// Workload file (count, quantum, processes, band codes)
        #[arg(default_value = "data.txt")]
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Simulate a generated workload
    Random {
        /// Number of processes
        #[arg(short = 'n', long, default_value_t = 8)]
        count: usize,
        /// RNG seed
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        /// Round-robin quantum
        #[arg(short, long, default_value_t = 2)]
        quantum: Ticks,
        /// Band disciplines, band 0 first (codes or names)
        #[arg(short, long, value_delimiter = ',', default_value = "0,1,2,3")]
        disciplines: Vec<Discipline>,
        /// Latest arrival tick
        #[arg(long, default_value_t = 10)]
        max_arrival: Ticks,
        /// Write the generated workload to this file
        #[arg(long)]
        save: Option<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Print the final engine snapshot as JSON
    #[arg(long)]
    json: bool,
    /// Print every tick
    #[arg(long)]
    trace: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run { file, output } => {
            let engine = SchedulingEngine::from_file(&file)
                .with_context(|| format!("failed to load {}", file.display()))?;
            simulate(engine, &output)
        }
        Command::Random {
            count,
            seed,
            quantum,
            disciplines,
            max_arrival,
            save,
            output,
        } => {
            let Ok(disciplines) = <[Discipline; BAND_COUNT]>::try_from(disciplines) else {
                bail!("exactly {BAND_COUNT} band disciplines are required");
            };
            let profile = WorkloadProfile::default().with_max_arrival(max_arrival);
            let config = SimulationConfig::new(disciplines)
                .with_quantum(quantum)
                .with_processes(random_workload(count, &profile, seed));
            let engine = SchedulingEngine::initialize(config)?;
            if let Some(path) = save {
                engine
                    .save(&path)
                    .with_context(|| format!("failed to save {}", path.display()))?;
            }
            simulate(engine, &output)
        }
    }
}

fn simulate(mut engine: SchedulingEngine, output: &OutputArgs) -> anyhow::Result<()> {
    println!("=== Multilevel Queue Scheduler ===");
    for (index, band) in engine.queues().bands().iter().enumerate() {
        let members = band
            .members
            .iter()
            .map(|pid| format!("P{pid}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!("Queue {index} ({}): {members}", band.discipline);
    }
    println!("Time quantum: {}", engine.queues().time_quantum());
    println!();

    engine.start();
    while !engine.is_complete() {
        let outcome = engine.tick();
        if output.trace {
            match outcome {
                TickOutcome::Idle { time } => println!("t={time}: idle"),
                TickOutcome::Executed {
                    time,
                    pid,
                    band,
                    completed,
                    preempted,
                    ..
                } => {
                    let note = if completed {
                        " (completed)"
                    } else if preempted {
                        " (quantum expired)"
                    } else {
                        ""
                    };
                    println!("t={time}: P{pid} from queue {band}{note}");
                }
                TickOutcome::Inactive => {}
            }
        }
    }

    if output.json {
        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
        return Ok(());
    }

    println!("Gantt: {}", engine.timeline().describe());
    println!();
    match engine.statistics() {
        Some(stats) => println!("{stats}"),
        None => bail!("simulation ended without statistics"),
    }
    Ok(())
}
