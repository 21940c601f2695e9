mod config;
mod demo;
mod output;
mod report;

use config::ModsumConfig;
use output::{Output, Verbosity};
use report::{print_record, run_comparison, FilterMode};

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use modsum_core::{
    format_count, reachable_residues, select_moduli, solve_adaptive, solve_dense, solve_filtered,
    solve_sparse, Instance, ModulusList,
};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "modsum")]
#[command(about = "Subset sum solvers with modular residue filtering")]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Configuration file (defaults to the nearest modsum.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// A weight list and target, as raw integers
#[derive(ClapArgs, Debug)]
struct InstanceArgs {
    /// Comma-separated weights, e.g. 3,34,4,12
    #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
    set: Vec<i64>,

    /// Target sum
    #[arg(short, long, allow_negative_numbers = true)]
    target: i64,
}

impl InstanceArgs {
    fn instance(&self) -> Result<Instance> {
        Instance::new(self.set.clone(), self.target).context("Invalid problem instance")
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the dense table DP
    Dense(InstanceArgs),

    /// Run the set-based DP
    Sparse(InstanceArgs),

    /// Run the modular-filtered DP with explicit moduli
    Filtered {
        #[command(flatten)]
        instance: InstanceArgs,

        /// Comma-separated moduli, each at least 2
        #[arg(short, long, value_delimiter = ',', required = true)]
        moduli: Vec<u64>,
    },

    /// Run the modular-filtered DP with heuristically selected moduli
    Adaptive {
        #[command(flatten)]
        instance: InstanceArgs,

        /// Upper bound on selected moduli (defaults to the configured value)
        #[arg(short = 'k', long)]
        max_moduli: Option<usize>,
    },

    /// Show the residues reachable under one modulus
    Residues {
        /// Comma-separated weights
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        set: Vec<i64>,

        /// Modulus, at least 2
        #[arg(short, long)]
        modulus: u64,
    },

    /// Score candidate moduli and show which would be selected
    Select {
        /// Comma-separated weights
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        set: Vec<i64>,

        /// Upper bound on selected moduli (defaults to the configured value)
        #[arg(short = 'k', long)]
        max_moduli: Option<usize>,
    },

    /// Compare every solver on one instance
    Compare {
        #[command(flatten)]
        instance: InstanceArgs,

        /// Comma-separated moduli; selected adaptively when omitted
        #[arg(short, long, value_delimiter = ',')]
        moduli: Vec<u64>,

        /// Upper bound on adaptively selected moduli
        #[arg(short = 'k', long)]
        max_moduli: Option<usize>,
    },

    /// Run the fixed demonstration scenarios
    Demo,
}

#[derive(Serialize)]
struct ResiduesReport {
    modulus: u64,
    residues: Vec<u64>,
    unreachable_fraction: f64,
    operations: u64,
}

#[derive(Serialize)]
struct CandidateReport {
    prime: u64,
    reachable: usize,
    score: f64,
}

#[derive(Serialize)]
struct SelectionReport {
    candidates: Vec<CandidateReport>,
    moduli: Vec<u64>,
    fallback: bool,
    operations: u64,
}

fn weights_only(set: &[i64]) -> Result<Instance> {
    Instance::new(set.to_vec(), 0).context("Invalid weight list")
}

fn run() -> Result<i32> {
    let args = Args::parse();

    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(verbosity.log_filter()))
        .init();

    let mut output = Output::new();
    output.set_verbosity(verbosity);
    output.set_json_mode(args.json);

    let config = ModsumConfig::resolve(args.config.as_deref())?;
    let selector = &config.selector;
    let report = &config.report;

    match args.command {
        Commands::Dense(instance) => {
            let result = solve_dense(&instance.instance()?)?;
            print_record(&output, &result)?;
        }
        Commands::Sparse(instance) => {
            let result = solve_sparse(&instance.instance()?);
            print_record(&output, &result)?;
        }
        Commands::Filtered { instance, moduli } => {
            let moduli = ModulusList::new(moduli).context("Invalid modulus list")?;
            let result = solve_filtered(&instance.instance()?, &moduli);
            print_record(&output, &result)?;
        }
        Commands::Adaptive {
            instance,
            max_moduli,
        } => {
            let k = max_moduli.unwrap_or(report.max_moduli);
            let result = solve_adaptive(&instance.instance()?, k, selector)?;
            print_record(&output, &result)?;
        }
        Commands::Residues { set, modulus } => {
            let instance = weights_only(&set)?;
            let residues = reachable_residues(instance.weights(), modulus)?;
            let summary = ResiduesReport {
                modulus: residues.modulus(),
                residues: residues.iter().collect(),
                unreachable_fraction: residues.unreachable_fraction(),
                operations: residues.operations(),
            };
            if output.is_json() {
                output.json(&summary)?;
            } else {
                output.writeln(&format!(
                    "R({}) = {:?} ({} of {} residues reachable, {:.1}% unreachable)",
                    summary.modulus,
                    summary.residues,
                    residues.len(),
                    summary.modulus,
                    summary.unreachable_fraction * 100.0
                ));
                output.verbose(&format!(
                    "Operations: {}",
                    format_count(summary.operations)
                ));
            }
        }
        Commands::Select { set, max_moduli } => {
            let instance = weights_only(&set)?;
            let k = max_moduli.unwrap_or(report.max_moduli);
            let selection = select_moduli(instance.weights(), k, selector)?;
            let summary = SelectionReport {
                candidates: selection
                    .candidates
                    .iter()
                    .map(|c| CandidateReport {
                        prime: c.prime,
                        reachable: c.reachable,
                        score: c.score,
                    })
                    .collect(),
                moduli: selection.moduli.as_slice().to_vec(),
                fallback: selection.fallback,
                operations: selection.operations,
            };
            if output.is_json() {
                output.json(&summary)?;
            } else {
                output.section("Candidates");
                for c in &summary.candidates {
                    let marker = if summary.moduli.contains(&c.prime) { "*" } else { "-" };
                    output.list_item(
                        marker,
                        &format!("{:>3}: {:>3} reachable, score {:.3}", c.prime, c.reachable, c.score),
                    );
                }
                if summary.fallback {
                    output.warning(&format!(
                        "No modulus scored above {}; using fallback",
                        selector.threshold
                    ));
                }
                output.success(&format!("Selected moduli: {:?}", summary.moduli));
                output.verbose(&format!(
                    "Operations: {}",
                    format_count(summary.operations)
                ));
            }
        }
        Commands::Compare {
            instance,
            moduli,
            max_moduli,
        } => {
            let mode = if moduli.is_empty() {
                FilterMode::Adaptive {
                    max_moduli: max_moduli.unwrap_or(report.max_moduli),
                }
            } else {
                FilterMode::Explicit(ModulusList::new(moduli).context("Invalid modulus list")?)
            };
            let agree = run_comparison(&output, &instance.instance()?, &mode, selector, report)?;
            if !agree {
                return Ok(1);
            }
        }
        Commands::Demo => {
            if !demo::run_demo(&output, selector, report)? {
                return Ok(1);
            }
        }
    }

    Ok(0)
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}
