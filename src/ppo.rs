//! PPO runner hyperparameters for Dropbear velocity tracking.
//!
//! Construction is two-phase, matching the runner's own convention:
//! [`PpoRunnerCfg::base`] supplies the framework defaults for rough-terrain
//! locomotion, then a robot-specific override pass mutates the policy and
//! algorithm fields. [`dropbear_velocity_rough_ppo_cfg`] performs both
//! phases and validates the result.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Activation function used by the actor and critic MLPs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    /// Exponential linear unit; smooth gradients around zero.
    Elu,
    /// Rectified linear unit.
    Relu,
    /// Hyperbolic tangent.
    Tanh,
}

/// Learning-rate schedule mode of the optimizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LrSchedule {
    /// Constant learning rate.
    Fixed,
    /// KL-adaptive learning rate driven by `desired_kl`.
    Adaptive,
}

/// Actor-critic network architecture.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyCfg {
    /// Standard deviation of the initial action noise.
    pub init_noise_std: f64,
    /// Hidden layer widths of the actor MLP.
    pub actor_hidden_dims: Vec<usize>,
    /// Hidden layer widths of the critic MLP.
    pub critic_hidden_dims: Vec<usize>,
    /// Activation between hidden layers.
    pub activation: Activation,
}

/// PPO optimizer hyperparameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PpoAlgorithmCfg {
    /// Weight of the value-function loss term.
    pub value_loss_coef: f64,
    /// Clip the value loss like the surrogate objective.
    pub use_clipped_value_loss: bool,
    /// Surrogate clipping threshold.
    pub clip_param: f64,
    /// Entropy bonus coefficient.
    pub entropy_coef: f64,
    /// Optimization epochs per rollout.
    pub num_learning_epochs: usize,
    /// Mini-batches the rollout is split into per epoch.
    pub num_mini_batches: usize,
    /// Optimizer step size.
    pub learning_rate: f64,
    /// Learning-rate schedule mode.
    pub schedule: LrSchedule,
    /// Discount factor.
    pub gamma: f64,
    /// GAE advantage-smoothing factor.
    pub lam: f64,
    /// Target KL divergence for the adaptive schedule.
    pub desired_kl: f64,
    /// Gradient-norm ceiling.
    pub max_grad_norm: f64,
}

/// Complete configuration record consumed by the external PPO runner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PpoRunnerCfg {
    /// Experiment name used for logging and checkpoint directories.
    pub experiment_name: String,
    /// Parallel simulated environments.
    pub num_envs: usize,
    /// Steps collected per environment per rollout.
    pub num_steps_per_env: usize,
    /// Training iteration ceiling.
    pub max_iterations: usize,
    /// Checkpoint interval in iterations.
    pub save_interval: usize,
    /// Network architecture.
    pub policy: PolicyCfg,
    /// Optimizer hyperparameters.
    pub algorithm: PpoAlgorithmCfg,
}

impl PpoRunnerCfg {
    /// Framework defaults for rough-terrain locomotion, before any
    /// robot-specific overrides.
    pub fn base() -> Self {
        Self {
            experiment_name: String::new(),
            num_envs: 4096,
            num_steps_per_env: 24,
            max_iterations: 1500,
            save_interval: 50,
            policy: PolicyCfg {
                init_noise_std: 1.0,
                actor_hidden_dims: vec![512, 256, 128],
                critic_hidden_dims: vec![512, 256, 128],
                activation: Activation::Elu,
            },
            algorithm: PpoAlgorithmCfg {
                value_loss_coef: 1.0,
                use_clipped_value_loss: true,
                clip_param: 0.2,
                entropy_coef: 0.01,
                num_learning_epochs: 5,
                num_mini_batches: 4,
                learning_rate: 1.0e-3,
                schedule: LrSchedule::Adaptive,
                gamma: 0.99,
                lam: 0.95,
                desired_kl: 0.01,
                max_grad_norm: 1.0,
            },
        }
    }

    /// Checks the record before it is handed to the optimizer.
    ///
    /// The mini-batch constraint is the one the runner would otherwise
    /// silently truncate on: `num_mini_batches` must divide
    /// `num_envs * num_steps_per_env` evenly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_envs == 0 {
            return Err(ConfigError::InvalidCount {
                field: "num_envs",
                value: self.num_envs,
            });
        }
        if self.num_steps_per_env == 0 {
            return Err(ConfigError::InvalidCount {
                field: "num_steps_per_env",
                value: self.num_steps_per_env,
            });
        }
        if self.algorithm.num_mini_batches == 0 {
            return Err(ConfigError::InvalidCount {
                field: "num_mini_batches",
                value: self.algorithm.num_mini_batches,
            });
        }
        let transitions = self.num_envs * self.num_steps_per_env;
        if transitions % self.algorithm.num_mini_batches != 0 {
            return Err(ConfigError::MiniBatchMismatch {
                mini_batches: self.algorithm.num_mini_batches,
                transitions,
            });
        }
        for (field, value) in [
            ("gamma", self.algorithm.gamma),
            ("lam", self.algorithm.lam),
        ] {
            if !(0.0..1.0).contains(&value) {
                return Err(ConfigError::OutOfRange {
                    field,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        if self.algorithm.learning_rate <= 0.0 {
            return Err(ConfigError::OutOfRange {
                field: "learning_rate",
                value: self.algorithm.learning_rate,
                min: f64::MIN_POSITIVE,
                max: f64::INFINITY,
            });
        }
        Ok(())
    }
}

/// Override pass tuning the base record for Dropbear.
///
/// Humanoid control needs wider networks and a markedly more conservative
/// optimizer than the quadruped defaults: tight clipping and KL target,
/// fewer epochs, fixed learning rate, strong gradient clipping, and extra
/// entropy to keep exploration alive.
fn apply_dropbear_overrides(cfg: &mut PpoRunnerCfg) {
    cfg.experiment_name = "dropbear_velocity".to_string();
    cfg.num_steps_per_env = 32;
    cfg.max_iterations = 30000;

    cfg.policy.init_noise_std = 0.5;
    cfg.policy.actor_hidden_dims = vec![512, 512, 256];
    cfg.policy.critic_hidden_dims = vec![512, 512, 256];
    cfg.policy.activation = Activation::Elu;

    cfg.algorithm.value_loss_coef = 1.0;
    cfg.algorithm.use_clipped_value_loss = true;
    cfg.algorithm.clip_param = 0.1;
    cfg.algorithm.entropy_coef = 0.05;
    cfg.algorithm.num_learning_epochs = 2;
    cfg.algorithm.num_mini_batches = 4;
    cfg.algorithm.learning_rate = 1.0e-4;
    cfg.algorithm.schedule = LrSchedule::Fixed;
    cfg.algorithm.gamma = 0.99;
    cfg.algorithm.lam = 0.95;
    cfg.algorithm.desired_kl = 0.005;
    cfg.algorithm.max_grad_norm = 0.5;
}

/// PPO configuration for Dropbear velocity tracking on rough terrain:
/// base defaults, Dropbear overrides, then validation.
pub fn dropbear_velocity_rough_ppo_cfg() -> Result<PpoRunnerCfg, ConfigError> {
    let mut cfg = PpoRunnerCfg::base();
    apply_dropbear_overrides(&mut cfg);
    cfg.validate()?;
    Ok(cfg)
}
