//! Error types for configuration construction and task registration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or validating configuration records.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The asset tree cannot be located because the configuration directory
    /// does not have enough ancestors to ascend through.
    #[error("cannot resolve asset tree: {base:?} has fewer than {levels} ancestor directories")]
    AssetPathUnresolvable {
        /// Directory the ascent started from.
        base: PathBuf,
        /// Number of levels the layout convention requires.
        levels: usize,
    },

    /// A joint name was referenced that is not part of the robot's joint set.
    #[error("unknown joint `{joint}` referenced by {context}")]
    UnknownJoint {
        /// The offending joint name.
        joint: String,
        /// Where the reference came from (actuator group, initial pose, ...).
        context: String,
    },

    /// The SDK joint-name list contains the same joint twice.
    #[error("duplicate SDK joint name `{0}`")]
    DuplicateSdkJoint(String),

    /// A joint pattern matched nothing in the robot's joint set.
    #[error("pattern `{pattern}` in {context} matches no joint")]
    UnmatchedPattern {
        /// Display form of the pattern.
        pattern: String,
        /// Where the pattern came from.
        context: String,
    },

    /// The soft joint position limit factor is outside `(0, 1]`.
    #[error("soft joint position limit factor must be in (0, 1], got {0}")]
    InvalidLimitFactor(f32),

    /// A count parameter that must be positive was zero.
    #[error("{field} must be > 0, got {value}")]
    InvalidCount {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// A numeric hyperparameter is outside its valid range.
    #[error("{field} must be in [{min}, {max}), got {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Exclusive upper bound.
        max: f64,
    },

    /// `num_mini_batches` does not divide the rollout transition count, which
    /// would make the optimizer silently truncate batches.
    #[error(
        "num_mini_batches ({mini_batches}) must divide num_envs * num_steps_per_env ({transitions})"
    )]
    MiniBatchMismatch {
        /// Configured mini-batch count.
        mini_batches: usize,
        /// Transitions collected per rollout.
        transitions: usize,
    },
}

/// Errors raised by the task registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The task identifier is already registered. Registration never silently
    /// overwrites an existing entry.
    #[error("task id `{0}` is already registered")]
    Duplicate(String),
}
