//! Engine-agnostic articulation description for a simulated robot.
//!
//! The central type is [`ArticulationCfg`]: a complete, immutable record of
//! a robot body as the simulation ingests it — asset reference, spawn-time
//! physics properties, initial state, actuator groups, and the joint-name
//! surface shared with the control SDK. Construction is pure data assembly;
//! [`ArticulationCfg::validate`] checks the cross-references between the
//! pieces.

use crate::error::ConfigError;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// A pattern selecting joints by name.
///
/// Replaces the regex strings conventionally used for joint selection with
/// the two forms this robot actually needs: an exact name, or a wildcard
/// matching every joint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JointPattern {
    /// Matches a single joint by its exact name.
    Exact(String),
    /// Matches every joint (the `".*"` of the regex convention).
    Any,
}

impl JointPattern {
    /// Returns `true` if `joint` is selected by this pattern.
    pub fn matches(&self, joint: &str) -> bool {
        match self {
            Self::Exact(name) => name == joint,
            Self::Any => true,
        }
    }

    /// Convenience constructor for an exact-name pattern.
    pub fn exact(name: impl Into<String>) -> Self {
        Self::Exact(name.into())
    }
}

impl fmt::Display for JointPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(name) => f.write_str(name),
            Self::Any => f.write_str(".*"),
        }
    }
}

/// Rigid-body solver properties applied to every link at spawn time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RigidBodyPropsCfg {
    /// Disable gravity on the body. Used while the robot is fixed to the
    /// world during early training.
    pub disable_gravity: bool,
    /// Whether the solver retains accelerations between steps.
    pub retain_accelerations: bool,
    /// Linear velocity damping coefficient.
    pub linear_damping: f32,
    /// Angular velocity damping coefficient.
    pub angular_damping: f32,
    /// Cap on linear velocity (m/s).
    pub max_linear_velocity: f32,
    /// Cap on angular velocity (rad/s).
    pub max_angular_velocity: f32,
    /// Cap on the velocity used to resolve interpenetrations (m/s).
    pub max_depenetration_velocity: f32,
    /// Whether gyroscopic forces are simulated.
    pub enable_gyroscopic_forces: bool,
}

impl Default for RigidBodyPropsCfg {
    fn default() -> Self {
        Self {
            disable_gravity: false,
            retain_accelerations: false,
            linear_damping: 0.0,
            angular_damping: 0.0,
            max_linear_velocity: 1000.0,
            max_angular_velocity: 1000.0,
            max_depenetration_velocity: 100.0,
            enable_gyroscopic_forces: true,
        }
    }
}

/// Articulation-root solver properties.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArticulationRootPropsCfg {
    /// Whether links of the same articulation collide with each other.
    pub enabled_self_collisions: bool,
    /// Solver position iteration count.
    pub solver_position_iteration_count: u32,
    /// Solver velocity iteration count.
    pub solver_velocity_iteration_count: u32,
    /// Weld the root link to the world frame.
    pub fix_root_link: bool,
}

impl Default for ArticulationRootPropsCfg {
    fn default() -> Self {
        Self {
            enabled_self_collisions: true,
            solver_position_iteration_count: 8,
            solver_velocity_iteration_count: 4,
            fix_root_link: false,
        }
    }
}

/// Everything the simulation needs to spawn the robot: the asset reference
/// and the physics properties applied on top of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpawnCfg {
    /// Path to the USD asset describing geometry and joint topology.
    /// Computed from the layout convention; existence is not checked here.
    pub usd_path: PathBuf,
    /// Whether contact sensors on the asset are activated.
    pub activate_contact_sensors: bool,
    /// Per-link rigid body properties.
    pub rigid_props: RigidBodyPropsCfg,
    /// Articulation root properties.
    pub articulation_props: ArticulationRootPropsCfg,
}

/// Initial state of the articulation at reset.
///
/// Joints absent from `joint_pos` rest at angle `0.0`, and joints matched by
/// no `joint_vel` rule start at velocity `0.0`. The zero defaults are
/// deliberate policy for this robot, not an omission: only joints whose rest
/// pose differs from the asset's zero configuration are listed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InitialStateCfg {
    /// Base position in world space.
    pub pos: Vec3,
    /// Base orientation in world space.
    pub rot: Quat,
    /// Initial joint angles (radians) for joints away from zero.
    pub joint_pos: BTreeMap<String, f32>,
    /// Initial joint velocities as pattern rules; the first matching rule
    /// wins.
    pub joint_vel: Vec<(JointPattern, f32)>,
}

impl Default for InitialStateCfg {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            rot: Quat::IDENTITY,
            joint_pos: BTreeMap::new(),
            joint_vel: Vec::new(),
        }
    }
}

impl InitialStateCfg {
    /// Initial angle for `joint`, falling back to zero when unlisted.
    pub fn joint_pos_or_default(&self, joint: &str) -> f32 {
        self.joint_pos.get(joint).copied().unwrap_or(0.0)
    }

    /// Initial velocity for `joint`: the first matching rule, or zero.
    pub fn joint_vel_or_default(&self, joint: &str) -> f32 {
        self.joint_vel
            .iter()
            .find(|(pattern, _)| pattern.matches(joint))
            .map(|&(_, vel)| vel)
            .unwrap_or(0.0)
    }
}

/// An actuator model shared by a group of joints.
///
/// Maps a desired joint command to applied torque through an implicit PD
/// controller parameterized by stiffness and damping, bounded by the effort
/// and velocity limits.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActuatorGroupCfg {
    /// Patterns selecting the joints this group drives.
    pub joint_names: Vec<JointPattern>,
    /// Maximum torque (Nm) or force (N).
    pub effort_limit: f32,
    /// Maximum joint velocity (rad/s or m/s).
    pub velocity_limit: f32,
    /// PD proportional gain.
    pub stiffness: f32,
    /// PD derivative gain.
    pub damping: f32,
    /// Joint friction coefficient.
    pub friction: f32,
    /// Joint armature (reflected rotor inertia).
    pub armature: f32,
}

impl ActuatorGroupCfg {
    /// Returns `true` if any pattern in this group selects `joint`.
    pub fn drives(&self, joint: &str) -> bool {
        self.joint_names.iter().any(|p| p.matches(joint))
    }
}

/// The complete description of a robot articulation.
///
/// Built once from static data, validated, then handed to the simulation
/// runtime; nothing mutates it afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArticulationCfg {
    /// Asset reference and spawn-time physics.
    pub spawn: SpawnCfg,
    /// State the robot resets to.
    pub init_state: InitialStateCfg,
    /// The robot's full joint set, in asset order.
    pub joint_names: Vec<String>,
    /// Actuator groups keyed by group name.
    pub actuators: BTreeMap<String, ActuatorGroupCfg>,
    /// Factor applied to joint position limits for safety margin
    /// (`0.9` = 90% of the mechanical range).
    pub soft_joint_pos_limit_factor: f32,
    /// Ordered joint names exposed to the control SDK. Must be a subset of
    /// `joint_names`; the ordering is the SDK's channel layout.
    pub joint_sdk_names: Vec<String>,
}

impl ArticulationCfg {
    /// Checks the cross-references between the description's pieces.
    ///
    /// Verified invariants:
    /// - every SDK joint name exists in the joint set, with no duplicates;
    /// - every exact joint name in an actuator group exists in the SDK list
    ///   (the group drives a joint the controller can address);
    /// - every actuator pattern selects at least one joint;
    /// - every joint named in the initial pose exists in the joint set;
    /// - the soft limit factor lies in `(0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = Vec::with_capacity(self.joint_sdk_names.len());
        for name in &self.joint_sdk_names {
            if !self.joint_names.iter().any(|j| j == name) {
                return Err(ConfigError::UnknownJoint {
                    joint: name.clone(),
                    context: "SDK joint list".into(),
                });
            }
            if seen.contains(&name) {
                return Err(ConfigError::DuplicateSdkJoint(name.clone()));
            }
            seen.push(name);
        }

        for (group, actuator) in &self.actuators {
            for pattern in &actuator.joint_names {
                if let JointPattern::Exact(name) = pattern
                    && !self.joint_sdk_names.iter().any(|j| j == name)
                {
                    return Err(ConfigError::UnknownJoint {
                        joint: name.clone(),
                        context: format!("actuator group `{group}`"),
                    });
                }
                if !self.joint_names.iter().any(|j| pattern.matches(j)) {
                    return Err(ConfigError::UnmatchedPattern {
                        pattern: pattern.to_string(),
                        context: format!("actuator group `{group}`"),
                    });
                }
            }
        }

        for name in self.init_state.joint_pos.keys() {
            if !self.joint_names.iter().any(|j| j == name) {
                return Err(ConfigError::UnknownJoint {
                    joint: name.clone(),
                    context: "initial pose".into(),
                });
            }
        }

        if !(self.soft_joint_pos_limit_factor > 0.0 && self.soft_joint_pos_limit_factor <= 1.0) {
            return Err(ConfigError::InvalidLimitFactor(
                self.soft_joint_pos_limit_factor,
            ));
        }

        Ok(())
    }

    /// Joints driven by at least one actuator group, in joint-set order.
    pub fn actuated_joints(&self) -> Vec<&str> {
        self.joint_names
            .iter()
            .filter(|joint| self.actuators.values().any(|a| a.drives(joint)))
            .map(String::as_str)
            .collect()
    }
}
