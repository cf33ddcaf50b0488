use clap::Parser;
use intcode::config;
use intcode::logging;
use intcode::vm::memory::{DenseMemory, Memory, SparseMemory};
use intcode::vm::parser::{parse_program, parse_values};
use intcode::vm::{Cell, Machine, Status};
use log::{error, info, warn};
use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::process;

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about = "Runs an Intcode program", long_about = None)]
struct Args {
    /// Intcode program file (comma-separated integers).
    program_file: String,

    /// Input values, comma-separated or given repeatedly, consumed in order.
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    input: Vec<String>,

    /// Read further input values from stdin, one per line, once --input runs out.
    #[arg(long)]
    interactive: bool,

    /// Maximum number of instructions to execute.
    #[arg(long, default_value_t = config::DEFAULT_MAX_STEPS)]
    max_steps: u64,

    /// Store memory sparsely, for programs that address far-apart cells.
    #[arg(long)]
    sparse: bool,

    /// Print the final memory image after the program stops.
    #[arg(long)]
    dump_memory: bool,

    /// Debug filter to specify log topics (e.g., "vm,instructions")
    #[arg(long)]
    debug_filter: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = logging::init_logger(logging::parse_level(&args.log_level), args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    let result = if args.sparse {
        run::<SparseMemory>(&args)
    } else {
        run::<DenseMemory>(&args)
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}

fn run<M>(args: &Args) -> Result<(), Box<dyn Error>>
where
    M: Memory + From<Vec<Cell>>,
{
    info!("Loading program from {}", args.program_file);
    let source = fs::read_to_string(&args.program_file)
        .map_err(|e| format!("Error reading file {}: {}", args.program_file, e))?;
    let program = parse_program(&source)?;
    info!("Loaded {} cells", program.len());

    let mut machine: Machine<M> = Machine::with_id(config::DEFAULT_MACHINE_ID, program);
    machine.extend_input(parse_values(&args.input.join(","))?);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout().lock();
    let mut remaining = args.max_steps;

    loop {
        let before = machine.steps();
        let status = machine.run_for(remaining)?;
        remaining = remaining.saturating_sub(machine.steps() - before);

        for value in machine.take_output() {
            writeln!(stdout, "{}", value)?;
        }
        stdout.flush()?;

        match status {
            Status::Halted => {
                info!("Program halted after {} steps", machine.steps());
                break;
            }
            Status::AwaitingInput if args.interactive => match lines.next() {
                Some(line) => machine.extend_input(parse_values(&line?)?),
                None => return Err("Program awaits input but stdin is closed".into()),
            },
            Status::AwaitingInput => {
                return Err(format!(
                    "Program awaits input at IP {} and no more was supplied",
                    machine.ip()
                )
                .into());
            }
            _ if remaining == 0 => {
                warn!("Step limit of {} reached", args.max_steps);
                return Err(format!("Step limit of {} reached", args.max_steps).into());
            }
            _ => {}
        }
    }

    if args.dump_memory {
        let entries = machine.memory().entries();
        if args.sparse {
            for (address, value) in entries {
                writeln!(stdout, "{}: {}", address, value)?;
            }
        } else {
            let image: Vec<String> = entries.iter().map(|(_, value)| value.to_string()).collect();
            writeln!(stdout, "{}", image.join(","))?;
        }
    }

    Ok(())
}
