use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use text_rv_simulator::core::*;
use text_rv_simulator::hash_table::DEFAULT_BUCKET_COUNT;
use text_rv_simulator::program_loader::*;
use text_rv_simulator::register::RegisterFile;

/// Simulator for RV32I instructions written as text
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of the input program file, one instruction per line
    #[arg(short, long, default_value = "main.s")]
    program: PathBuf,

    /// Number of buckets in the memory hash table
    #[arg(long, default_value_t = DEFAULT_BUCKET_COUNT)]
    buckets: usize,

    /// Verbose mode
    /// If this flag is not set, the simulator prints only the final state
    /// If this flag is set to 1, the simulator will print registers after each instruction
    /// If this flag is set to 2, the simulator will also dump memory at the end
    #[arg(short, long)]
    verbose: Option<u32>,

    /// Show how many times each instruction was executed
    #[arg(long)]
    stats: bool,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let lines = match load_program_file(&args.program) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut core = Core::init_with(
        RegisterFile::new(),
        CoreProps {
            bucket_count: args.buckets,
        },
    );
    core.run(
        &lines,
        RunProps {
            verbose: args.verbose.unwrap_or(0),
            take_inst_stats: args.stats,
            show_progress: args.progress,
        },
    );
    core.end();
    ExitCode::SUCCESS
}
