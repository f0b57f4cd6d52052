//! # dropbear-rl-lab
//!
//! Task and articulation configuration for the *Dropbear* humanoid robot,
//! consumed by an external simulation/RL stack for velocity-tracking
//! locomotion training.
//!
//! It decouples the robot *description* (joint layout, actuator gains,
//! initial pose, safety limits) from the physics and training machinery,
//! producing plain data records that a trainer ingests: an
//! [`ArticulationCfg`] for the body, a [`PpoRunnerCfg`] for the optimizer,
//! and a [`TaskRegistry`] mapping task identifiers to the config factories
//! that build them.
//!
//! Nothing here simulates or trains. The crate is the contract between the
//! Dropbear asset, the control SDK, and the RL runner.

pub mod articulation;
pub mod diagnostics;
pub mod dropbear;
pub mod error;
pub mod ppo;
pub mod registry;
pub mod velocity;

pub use articulation::*;
pub use dropbear::*;
pub use error::*;
pub use ppo::*;
pub use registry::*;
pub use velocity::*;
