//! NeanderWeb-V simulator CLI.
//!
//! This binary is the driver for the simulator core. It performs:
//! 1. **Run:** Assemble a program file and run it until HLT, a fault, or the loop guard.
//! 2. **Step:** Execute a bounded number of single steps, printing the registers after each.
//! 3. **Asm:** Print the assembled memory as a listing.
//! 4. **Convert:** Rewrite a program file's literals into another numeral base.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use neander_core::asm::{self, SourceFile};
use neander_core::common::Base;
use neander_core::core::ExecState;
use neander_core::core::cpu::execution::RunOutcome;
use neander_core::core::units::cache::CacheKind;
use neander_core::isa::disasm;
use neander_core::sim::loader;
use neander_core::{Config, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "neander",
    author,
    version,
    about = "NeanderWeb-V accumulator machine simulator",
    long_about = "Assemble and execute NeanderWeb-V programs.\n\nProgram files are plain text; an optional first line #HEX or #DEC selects the numeral base.\n\nExamples:\n  neander run programs/sum.txt --stats\n  neander step programs/vector.txt --count 3\n  neander asm programs/sum.txt\n  neander convert programs/sum.txt --to hex"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
struct Common {
    /// Program file to load.
    file: PathBuf,

    /// Numeral base for files without a #HEX/#DEC header (dec or hex).
    #[arg(long)]
    base: Option<Base>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log every cache access and executed instruction to stderr.
    #[arg(long)]
    trace: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assemble and run a program.
    Run {
        #[command(flatten)]
        common: Common,

        /// Print the final machine state as JSON.
        #[arg(long)]
        json: bool,

        /// Print execution statistics after the run.
        #[arg(long)]
        stats: bool,
    },

    /// Assemble a program and execute it one instruction at a time.
    Step {
        #[command(flatten)]
        common: Common,

        /// Maximum number of steps to execute.
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u32,
    },

    /// Assemble a program and print the memory listing.
    Asm {
        #[command(flatten)]
        common: Common,
    },

    /// Rewrite a program file into another numeral base.
    Convert {
        #[command(flatten)]
        common: Common,

        /// Target base (dec or hex).
        #[arg(long)]
        to: Base,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            common,
            json,
            stats,
        } => cmd_run(&common, json, stats),
        Commands::Step { common, count } => cmd_step(&common, count),
        Commands::Asm { common } => cmd_asm(&common),
        Commands::Convert { common, to } => cmd_convert(&common, to),
    };

    match result {
        Ok(code) => code,
        Err(message) => {
            eprintln!("\n[!] FATAL: {message}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the stderr log subscriber. `--trace` overrides `RUST_LOG`.
fn init_tracing(trace: bool) {
    let filter = if trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the configuration and the program file named by `common`.
fn load(common: &Common) -> Result<(Config, SourceFile), String> {
    init_tracing(common.trace);

    let mut config = match &common.config {
        Some(path) => Config::from_file(path).map_err(|e| e.to_string())?,
        None => Config::default(),
    };
    if let Some(base) = common.base {
        config.general.base = base;
    }
    if common.trace {
        config.general.trace_instructions = true;
    }

    let source = loader::load_source(&common.file, config.general.base).map_err(|e| e.to_string())?;
    Ok((config, source))
}

/// Builds a simulator with `source` assembled and reset.
fn prepare(config: &Config, source: &SourceFile, path: &Path) -> Simulator {
    let mut sim = Simulator::new(config);
    let report = sim.load_program(source);
    if report.truncated {
        eprintln!(
            "[!] {}: only {} of {} lines fit in memory",
            path.display(),
            report.lines_assembled,
            source.lines.len()
        );
    }
    sim
}

fn cmd_run(common: &Common, json: bool, stats: bool) -> Result<ExitCode, String> {
    let (config, source) = load(common)?;
    let mut sim = prepare(&config, &source, &common.file);

    let report = sim.run();

    if json {
        let doc = serde_json::json!({
            "report": report,
            "snapshot": sim.snapshot(),
        });
        let text = serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())?;
        println!("{text}");
    } else {
        match report.outcome {
            RunOutcome::Halted => println!("[*] Program halted after {} steps", report.steps),
            RunOutcome::Faulted { fault } => {
                println!("[!] {fault} after {} steps", report.steps);
            }
            RunOutcome::LoopGuardTripped => println!(
                "[!] Infinite loop detected: stopped after {} steps",
                report.steps
            ),
        }
        println!("{}", sim.cpu.regs.dump(sim.base()));
        for kind in [CacheKind::Instruction, CacheKind::Data] {
            let cache = sim.cache_stats(kind);
            println!(
                "{kind}: hits={} misses={} rate={:.2}%",
                cache.hits,
                cache.misses,
                cache.hit_rate()
            );
        }
    }

    if stats {
        sim.stats().print();
    }

    Ok(match report.outcome {
        RunOutcome::Halted => ExitCode::SUCCESS,
        RunOutcome::Faulted { .. } => ExitCode::FAILURE,
        RunOutcome::LoopGuardTripped => ExitCode::from(2),
    })
}

fn cmd_step(common: &Common, count: u32) -> Result<ExitCode, String> {
    let (config, source) = load(common)?;
    let mut sim = prepare(&config, &source, &common.file);
    let base = sim.base();

    println!("       {}", sim.cpu.regs.dump(base));
    for n in 1..=count {
        let pc = sim.cpu.regs.pc;
        let text = u8::try_from(pc).map_or_else(
            |_| String::from("??"),
            |addr| disasm::disassemble_at(&sim.cpu.memory, addr, base).0,
        );
        let state = sim.step();
        println!("{n:>4}  {text:<12} {}", sim.cpu.regs.dump(base));
        match state {
            ExecState::Running => {}
            ExecState::Halted => {
                println!("[*] Program halted");
                break;
            }
            ExecState::Faulted { fault } => {
                println!("[!] {fault}");
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_asm(common: &Common) -> Result<ExitCode, String> {
    let (config, source) = load(common)?;
    let sim = prepare(&config, &source, &common.file);
    let base = sim.base();

    for row in disasm::listing(&sim.cpu.memory, base) {
        let class = row.category.map_or_else(String::new, |c| format!("; {c}"));
        println!(
            "{:>3}  {:<14}{class}",
            asm::format(row.address, base),
            row.text
        );
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_convert(common: &Common, to: Base) -> Result<ExitCode, String> {
    let (_, source) = load(common)?;
    let converted = SourceFile::new(to, asm::convert_base(&source.lines, source.base, to));
    println!("{}", converted.render());
    Ok(ExitCode::SUCCESS)
}
