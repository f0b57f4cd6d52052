//! Task registry mapping task identifiers to configuration factories.
//!
//! The registry is an explicitly constructed value, passed to whoever needs
//! it — there is no ambient global table. Entries hold typed factory
//! functions rather than stringly-typed entry points, so configuration stays
//! lazy (nothing heavy is built at registration time) without deferring name
//! resolution to runtime.

use crate::error::{ConfigError, RegistryError};
use crate::ppo::{PpoRunnerCfg, dropbear_velocity_rough_ppo_cfg};
use crate::velocity::{
    VelocityEnvCfg, dropbear_velocity_rough_env_cfg, dropbear_velocity_rough_env_cfg_play,
};
use std::collections::BTreeMap;

/// Task identifier of the Dropbear rough-terrain velocity training task.
pub const DROPBEAR_VELOCITY_TASK: &str = "Isaac-Velocity-Dropbear-v0";

/// Task identifier of the Dropbear velocity play/evaluation task.
pub const DROPBEAR_VELOCITY_PLAY_TASK: &str = "Isaac-Velocity-Dropbear-Play-v0";

/// Factory producing an environment configuration on demand.
pub type EnvCfgFactory = fn() -> Result<VelocityEnvCfg, ConfigError>;

/// Factory producing an agent (PPO runner) configuration on demand.
pub type AgentCfgFactory = fn() -> Result<PpoRunnerCfg, ConfigError>;

/// One registered task: the three configuration entry points the trainer
/// looks up by task id.
#[derive(Clone)]
pub struct TaskEntry {
    /// Environment configuration used for training.
    pub env_cfg: EnvCfgFactory,
    /// Environment configuration used when playing back a policy.
    pub play_env_cfg: EnvCfgFactory,
    /// Agent configuration for the RL runner.
    pub agent_cfg: AgentCfgFactory,
}

/// Ordered table of registered tasks.
///
/// Identifiers are unique: registering an id twice is an error, never a
/// silent overwrite. Entries are process-lifetime data; nothing is ever
/// removed.
#[derive(Clone, Default)]
pub struct TaskRegistry {
    entries: BTreeMap<String, TaskEntry>,
}

impl TaskRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the Dropbear tasks already registered.
    pub fn with_dropbear_tasks() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        register_dropbear_tasks(&mut registry)?;
        Ok(registry)
    }

    /// Registers `entry` under `id`.
    ///
    /// Fails with [`RegistryError::Duplicate`] when `id` is already taken.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        entry: TaskEntry,
    ) -> Result<(), RegistryError> {
        let id = id.into();
        if self.entries.contains_key(&id) {
            return Err(RegistryError::Duplicate(id));
        }
        self.entries.insert(id, entry);
        Ok(())
    }

    /// Looks up a task by id.
    pub fn get(&self, id: &str) -> Option<&TaskEntry> {
        self.entries.get(id)
    }

    /// All registered task ids, in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Registered task ids containing `fragment`, in sorted order.
    pub fn ids_matching<'a>(&'a self, fragment: &'a str) -> impl Iterator<Item = &'a str> {
        self.ids().filter(move |id| id.contains(fragment))
    }

    /// Iterates over `(id, entry)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TaskEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Number of registered tasks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Registers both Dropbear velocity tasks.
///
/// [`DROPBEAR_VELOCITY_TASK`] trains on the rough-terrain variant;
/// [`DROPBEAR_VELOCITY_PLAY_TASK`] uses the play variant as its primary
/// environment so evaluation runs never pick up training-time corruption.
/// Both share the same agent configuration.
pub fn register_dropbear_tasks(registry: &mut TaskRegistry) -> Result<(), RegistryError> {
    registry.register(
        DROPBEAR_VELOCITY_TASK,
        TaskEntry {
            env_cfg: dropbear_velocity_rough_env_cfg,
            play_env_cfg: dropbear_velocity_rough_env_cfg_play,
            agent_cfg: dropbear_velocity_rough_ppo_cfg,
        },
    )?;
    registry.register(
        DROPBEAR_VELOCITY_PLAY_TASK,
        TaskEntry {
            env_cfg: dropbear_velocity_rough_env_cfg_play,
            play_env_cfg: dropbear_velocity_rough_env_cfg_play,
            agent_cfg: dropbear_velocity_rough_ppo_cfg,
        },
    )?;
    Ok(())
}
