// tests/diagnostics_smoke.rs
use dropbear_rl_lab::diagnostics::{
    CommandOutcome, CommandSpec, EXCERPT_LEN, dropbear_smoke_commands, excerpt, run_command,
    run_suite,
};
use dropbear_rl_lab::{DROPBEAR_VELOCITY_PLAY_TASK, DROPBEAR_VELOCITY_TASK};
use std::time::Duration;

#[test]
fn excerpt_keeps_short_text_and_truncates_long_text() {
    assert_eq!(excerpt("all good\n"), "all good");

    let long = "x".repeat(EXCERPT_LEN + 50);
    let cut = excerpt(&long);
    assert_eq!(cut.chars().count(), EXCERPT_LEN + 3);
    assert!(cut.ends_with("..."));
}

#[test]
fn outcome_tags_are_stable() {
    let passed = CommandOutcome::Passed {
        stdout_excerpt: String::new(),
    };
    let failed = CommandOutcome::Failed {
        code: Some(1),
        stderr_excerpt: String::new(),
    };
    assert_eq!(passed.tag(), "PASSED");
    assert_eq!(failed.tag(), "FAILED");
    assert_eq!(CommandOutcome::TimedOut.tag(), "TIMEOUT");
}

#[test]
fn smoke_suite_covers_import_listing_training_and_video_play() {
    let timeout = Duration::from_secs(60);
    let specs = dropbear_smoke_commands("python", timeout);
    assert_eq!(specs.len(), 4);

    let train = &specs[2];
    assert!(train.args.contains(&DROPBEAR_VELOCITY_TASK.to_string()));
    assert!(train.args.contains(&"--headless".to_string()));
    assert_eq!(train.timeout, timeout);

    // Play runs against the play task and asks for video capture.
    let play = &specs[3];
    assert_eq!(play.program, "python");
    assert!(play.args.contains(&DROPBEAR_VELOCITY_PLAY_TASK.to_string()));
    assert!(play.args.contains(&"--video".to_string()));

    // Cheap steps are capped below the configured timeout.
    assert!(specs[0].timeout <= Duration::from_secs(15));
    assert!(specs[1].timeout <= Duration::from_secs(20));
}

#[cfg(unix)]
mod subprocess {
    use super::*;

    fn sh(label: &str, script: &str, timeout: Duration) -> CommandSpec {
        CommandSpec::new(label, "/bin/sh", ["-c", script], timeout)
    }

    #[test]
    fn zero_exit_is_passed_with_stdout_excerpt() {
        let outcome = run_command(&sh("ok", "echo hello", Duration::from_secs(5)));
        assert_eq!(
            outcome,
            CommandOutcome::Passed {
                stdout_excerpt: "hello".to_string(),
            }
        );
    }

    #[test]
    fn nonzero_exit_is_failed_with_code_and_stderr() {
        let outcome = run_command(&sh(
            "fail",
            "echo broken >&2; exit 3",
            Duration::from_secs(5),
        ));
        assert_eq!(
            outcome,
            CommandOutcome::Failed {
                code: Some(3),
                stderr_excerpt: "broken".to_string(),
            }
        );
    }

    #[test]
    fn overrunning_command_is_killed_and_reported_as_timeout() {
        let outcome = run_command(&sh("slow", "sleep 5", Duration::from_millis(200)));
        assert_eq!(outcome, CommandOutcome::TimedOut);
    }

    #[test]
    fn unspawnable_command_is_an_error() {
        let spec = CommandSpec::new(
            "missing",
            "/no/such/binary",
            Vec::<String>::new(),
            Duration::from_secs(1),
        );
        assert!(matches!(
            run_command(&spec),
            CommandOutcome::Error { .. }
        ));
    }

    #[test]
    fn suite_runs_every_step_despite_failures() {
        let specs = [
            sh("first", "exit 1", Duration::from_secs(5)),
            sh("second", "echo still here", Duration::from_secs(5)),
        ];
        let results = run_suite(&specs);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "first");
        assert!(matches!(results[0].1, CommandOutcome::Failed { .. }));
        assert_eq!(
            results[1].1,
            CommandOutcome::Passed {
                stdout_excerpt: "still here".to_string(),
            }
        );
    }
}
