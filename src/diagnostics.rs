//! Operator-facing smoke diagnostics.
//!
//! Two kinds of checks, both informational — failures are reported, never
//! propagated:
//!
//! - [`check_registry_entries`] resolves every configuration factory of
//!   every registered task and reports per-entry success or the error.
//! - [`run_command`] / [`run_suite`] invoke external commands (the
//!   framework's train/play scripts) sequentially, each bounded by a
//!   wall-clock timeout, and classify each outcome.

use crate::error::ConfigError;
use crate::registry::{DROPBEAR_VELOCITY_PLAY_TASK, DROPBEAR_VELOCITY_TASK, TaskRegistry};
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// Maximum length of captured output excerpts in reports.
pub const EXCERPT_LEN: usize = 200;

/// Interval between child exit polls.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// An external command to smoke-test.
#[derive(Clone, Debug)]
pub struct CommandSpec {
    /// Human-readable label for the summary table.
    pub label: String,
    /// Program to invoke.
    pub program: String,
    /// Arguments passed to the program.
    pub args: Vec<String>,
    /// Wall-clock bound; the child is killed when it elapses.
    pub timeout: Duration,
}

impl CommandSpec {
    /// Builds a spec from a label, program, and argument list.
    pub fn new(
        label: impl Into<String>,
        program: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
        timeout: Duration,
    ) -> Self {
        Self {
            label: label.into(),
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            timeout,
        }
    }
}

/// Classified result of one command invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Exit status 0.
    Passed {
        /// Truncated stdout.
        stdout_excerpt: String,
    },
    /// Non-zero exit status.
    Failed {
        /// Exit code, when the platform reports one.
        code: Option<i32>,
        /// Truncated stderr.
        stderr_excerpt: String,
    },
    /// No completion within the timeout; the child was killed.
    TimedOut,
    /// The invocation mechanism itself failed (e.g. program not found).
    Error {
        /// Description of the failure.
        message: String,
    },
}

impl CommandOutcome {
    /// Short status tag for table output.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Passed { .. } => "PASSED",
            Self::Failed { .. } => "FAILED",
            Self::TimedOut => "TIMEOUT",
            Self::Error { .. } => "ERROR",
        }
    }
}

/// Truncates `text` to [`EXCERPT_LEN`] characters, marking the cut.
pub fn excerpt(text: &str) -> String {
    let trimmed = text.trim_end();
    if trimmed.chars().count() <= EXCERPT_LEN {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(EXCERPT_LEN).collect();
        format!("{head}...")
    }
}

fn drain_pipe<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = String::new();
        if let Some(mut pipe) = pipe {
            // Read errors just yield an empty excerpt.
            let _ = pipe.read_to_string(&mut buf);
        }
        buf
    })
}

/// Polls the child until it exits or the deadline passes. `Ok(None)` means
/// the deadline hit and the child was killed.
fn wait_with_deadline(
    child: &mut Child,
    timeout: Duration,
) -> std::io::Result<Option<ExitStatus>> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            child.kill()?;
            child.wait()?;
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Runs one command to completion or timeout and classifies the result.
///
/// Output pipes are drained on background threads so a chatty child cannot
/// deadlock against a full pipe buffer.
pub fn run_command(spec: &CommandSpec) -> CommandOutcome {
    let mut child = match Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            return CommandOutcome::Error {
                message: err.to_string(),
            };
        }
    };

    let stdout = drain_pipe(child.stdout.take());
    let stderr = drain_pipe(child.stderr.take());

    let waited = wait_with_deadline(&mut child, spec.timeout);
    let stdout = stdout.join().unwrap_or_default();
    let stderr = stderr.join().unwrap_or_default();

    match waited {
        Ok(Some(status)) if status.success() => CommandOutcome::Passed {
            stdout_excerpt: excerpt(&stdout),
        },
        Ok(Some(status)) => CommandOutcome::Failed {
            code: status.code(),
            stderr_excerpt: excerpt(&stderr),
        },
        Ok(None) => CommandOutcome::TimedOut,
        Err(err) => CommandOutcome::Error {
            message: err.to_string(),
        },
    }
}

/// The standard Dropbear smoke suite: package import, environment listing,
/// a one-iteration headless training run, and a video-capturing play run.
///
/// `launcher` is the interpreter used to run the framework scripts;
/// `timeout` bounds the training and play steps, with the cheaper steps
/// capped lower.
pub fn dropbear_smoke_commands(launcher: &str, timeout: Duration) -> Vec<CommandSpec> {
    vec![
        CommandSpec::new(
            "Package import",
            launcher,
            ["-c", "import dropbear_rl_lab"],
            timeout.min(Duration::from_secs(15)),
        ),
        CommandSpec::new(
            "Environment listing",
            launcher,
            ["scripts/list_envs.py"],
            timeout.min(Duration::from_secs(20)),
        ),
        CommandSpec::new(
            "Training (1 iteration, headless)",
            launcher,
            [
                "scripts/rsl_rl/train.py",
                "--task",
                DROPBEAR_VELOCITY_TASK,
                "--max_iterations",
                "1",
                "--headless",
            ],
            timeout,
        ),
        CommandSpec::new(
            "Play (video capture)",
            launcher,
            [
                "scripts/rsl_rl/play.py",
                "--task",
                DROPBEAR_VELOCITY_PLAY_TASK,
                "--video",
            ],
            timeout,
        ),
    ]
}

/// Runs every spec sequentially, pairing each label with its outcome.
/// A failure or timeout never stops the remaining steps.
pub fn run_suite(specs: &[CommandSpec]) -> Vec<(String, CommandOutcome)> {
    specs
        .iter()
        .map(|spec| (spec.label.clone(), run_command(spec)))
        .collect()
}

/// Result of resolving one configuration entry point of one task.
#[derive(Clone, Debug)]
pub struct EntryReport {
    /// The task the entry belongs to.
    pub task_id: String,
    /// Which slot was resolved (`env_cfg`, `play_env_cfg`, `agent_cfg`).
    pub slot: &'static str,
    /// Outcome of building the configuration.
    pub result: Result<(), ConfigError>,
}

/// Resolves every configuration factory of every registered task.
///
/// Each entry is attempted independently; a failing factory is reported and
/// the scan continues.
pub fn check_registry_entries(registry: &TaskRegistry) -> Vec<EntryReport> {
    let mut reports = Vec::new();
    for (id, entry) in registry.iter() {
        reports.push(EntryReport {
            task_id: id.to_string(),
            slot: "env_cfg",
            result: (entry.env_cfg)().map(drop),
        });
        reports.push(EntryReport {
            task_id: id.to_string(),
            slot: "play_env_cfg",
            result: (entry.play_env_cfg)().map(drop),
        });
        reports.push(EntryReport {
            task_id: id.to_string(),
            slot: "agent_cfg",
            result: (entry.agent_cfg)().map(drop),
        });
    }
    reports
}
