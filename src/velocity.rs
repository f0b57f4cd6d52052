//! Velocity-tracking environment variant records.
//!
//! The reward, observation, and termination wiring lives in the external
//! environment framework; these records carry what this crate owns — the
//! robot description plus the per-variant knobs the two registered Dropbear
//! tasks differ in.

use crate::articulation::ArticulationCfg;
use crate::dropbear::dropbear_articulation_cfg;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Which behavior variant of the velocity task this config describes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityVariant {
    /// Rough-terrain training with observation corruption enabled.
    RoughTerrain,
    /// Play/evaluation: small env count, clean observations.
    Play,
}

/// Configuration of one velocity-tracking environment variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VelocityEnvCfg {
    /// Behavior variant.
    pub variant: VelocityVariant,
    /// The robot being trained.
    pub robot: ArticulationCfg,
    /// Parallel environment instances.
    pub num_envs: usize,
    /// Spacing between environment origins (m).
    pub env_spacing: f32,
    /// Episode length (s).
    pub episode_length_s: f32,
    /// Whether observations are corrupted with noise during rollouts.
    pub observation_noise: bool,
}

/// Rough-terrain training variant for Dropbear.
pub fn dropbear_velocity_rough_env_cfg() -> Result<VelocityEnvCfg, ConfigError> {
    Ok(VelocityEnvCfg {
        variant: VelocityVariant::RoughTerrain,
        robot: dropbear_articulation_cfg()?,
        num_envs: 4096,
        env_spacing: 2.5,
        episode_length_s: 20.0,
        observation_noise: true,
    })
}

/// Play/evaluation variant: the training config with a small env count and
/// observation corruption disabled. Everything else is left untouched so
/// play runs see exactly the trained dynamics.
pub fn dropbear_velocity_rough_env_cfg_play() -> Result<VelocityEnvCfg, ConfigError> {
    let mut cfg = dropbear_velocity_rough_env_cfg()?;
    cfg.variant = VelocityVariant::Play;
    cfg.num_envs = 50;
    cfg.observation_noise = false;
    Ok(cfg)
}
