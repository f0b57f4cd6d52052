//! Dropbear RL lab diagnostics.
//!
//! Operator smoke tooling around the task registry:
//!
//! - `lab list-envs` — print registered Dropbear task ids.
//! - `lab check-cfgs` — resolve every configuration entry point and report
//!   per-entry success or failure.
//! - `lab smoke` — invoke the external training/listing commands with a
//!   per-step timeout and print a summary table.
//!
//! Everything here is informational; a failed check is printed, not
//! propagated.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dropbear_rl_lab::diagnostics::{self, CommandOutcome, check_registry_entries};
use dropbear_rl_lab::registry::{DROPBEAR_VELOCITY_TASK, TaskRegistry};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Dropbear RL lab diagnostics.
#[derive(Parser)]
#[command(name = "lab")]
#[command(about = "Smoke diagnostics for the Dropbear RL lab", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered Dropbear task ids
    ListEnvs,

    /// Resolve every registered configuration entry point
    CheckCfgs {
        /// Also dump the resolved PPO configuration as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the external train/list commands with per-step timeouts
    Smoke {
        /// Launcher used to run the framework scripts
        #[arg(long, default_value = "python")]
        launcher: String,

        /// Per-step timeout in seconds
        #[arg(long, default_value_t = 60)]
        timeout_secs: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::ListEnvs => list_envs(),
        Commands::CheckCfgs { json } => check_cfgs(json),
        Commands::Smoke {
            launcher,
            timeout_secs,
        } => smoke(&launcher, Duration::from_secs(timeout_secs)),
    }
}

fn list_envs() -> Result<()> {
    let registry = TaskRegistry::with_dropbear_tasks().context("registering Dropbear tasks")?;

    println!();
    println!("{}", "Registered Dropbear tasks".bold());
    println!("{}", "=========================".bold());
    let ids: Vec<&str> = registry.ids_matching("Dropbear").collect();
    for (i, id) in ids.iter().enumerate() {
        println!("  {:2}. {id}", i + 1);
    }
    println!();
    println!("Found {} task(s).", ids.len());
    Ok(())
}

fn check_cfgs(json: bool) -> Result<()> {
    let registry = TaskRegistry::with_dropbear_tasks().context("registering Dropbear tasks")?;

    println!();
    println!("{}", "Configuration entry points".bold());
    println!("{}", "==========================".bold());

    let mut all_ok = true;
    for report in check_registry_entries(&registry) {
        match &report.result {
            Ok(()) => println!(
                "{} {}::{}",
                "✓".green(),
                report.task_id,
                report.slot
            ),
            Err(err) => {
                all_ok = false;
                println!(
                    "{} {}::{} — {err}",
                    "✗".red(),
                    report.task_id,
                    report.slot
                );
            }
        }
    }

    if json && let Some(entry) = registry.get(DROPBEAR_VELOCITY_TASK) {
        match (entry.agent_cfg)() {
            Ok(cfg) => {
                let dump =
                    serde_json::to_string_pretty(&cfg).context("serializing PPO config")?;
                println!();
                println!("{dump}");
            }
            Err(err) => println!("{} agent config: {err}", "✗".red()),
        }
    }

    println!();
    if all_ok {
        println!("{}", "All configuration entry points load.".green().bold());
    } else {
        println!("{}", "Some entry points failed; see above.".yellow());
    }
    Ok(())
}

fn smoke(launcher: &str, timeout: Duration) -> Result<()> {
    let specs = diagnostics::dropbear_smoke_commands(launcher, timeout);

    println!();
    println!("{}", "Command smoke test".bold());
    println!("{}", "==================".bold());

    let results = diagnostics::run_suite(&specs);

    for (label, outcome) in &results {
        println!();
        println!("{}: {}", label.bold(), styled_tag(outcome));
        match outcome {
            CommandOutcome::Passed { stdout_excerpt } if !stdout_excerpt.is_empty() => {
                println!("  {stdout_excerpt}");
            }
            CommandOutcome::Failed {
                code,
                stderr_excerpt,
            } => {
                if let Some(code) = code {
                    println!("  exit code {code}");
                }
                if !stderr_excerpt.is_empty() {
                    println!("  {stderr_excerpt}");
                }
            }
            CommandOutcome::Error { message } => println!("  {message}"),
            _ => {}
        }
    }

    println!();
    println!("{}", "Summary".bold());
    println!("{}", "-------".bold());
    for (label, outcome) in &results {
        println!("{:8} {label}", outcome.tag());
    }
    Ok(())
}

fn styled_tag(outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Passed { .. } => outcome.tag().green().to_string(),
        CommandOutcome::Failed { .. } | CommandOutcome::Error { .. } => {
            outcome.tag().red().to_string()
        }
        CommandOutcome::TimedOut => outcome.tag().yellow().to_string(),
    }
}
