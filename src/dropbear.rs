//! The Dropbear humanoid robot description.
//!
//! Dropbear is a 28-joint humanoid: two five-joint arms, a four-joint pelvic
//! girdle, two four-joint legs, and a six-lead-screw neck assembly. The
//! joint-name strings here are the contract with both the USD asset and the
//! control SDK — they must match exactly.
//!
//! [`dropbear_articulation_cfg`] builds the full validated
//! [`ArticulationCfg`] from static data. The asset path follows the lab's
//! layout convention: the model tree sits a fixed number of directory levels
//! above the configuration directory (see [`model_dir`]).

use crate::articulation::{
    ActuatorGroupCfg, ArticulationCfg, ArticulationRootPropsCfg, InitialStateCfg, JointPattern,
    RigidBodyPropsCfg, SpawnCfg,
};
use crate::error::ConfigError;
use glam::{Quat, Vec3};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Left arm joints, shoulder to wrist.
pub const LEFT_ARM_JOINTS: [&str; 5] =
    ["LH_yaw", "LH_pitch", "LH_roll", "LH_Revolute41", "LH_wrist_roll"];

/// Right arm joints, shoulder to wrist.
pub const RIGHT_ARM_JOINTS: [&str; 5] =
    ["RH_yaw", "RH_pitch", "RH_roll", "RH_Revolute41", "RH_wrist_roll"];

/// Pelvic girdle joints connecting the torso to the legs.
pub const PELVIC_GIRDLE_JOINTS: [&str; 4] = [
    "PG_left_leg_pitch",
    "PG_left_leg_roll",
    "PG_right_leg_pitch",
    "PG_right_leg_roll",
];

/// Left leg joints, hip to ankle.
pub const LEFT_LEG_JOINTS: [&str; 4] = [
    "LL_hip_joint",
    "LL_knee_actuator_joint",
    "LL_Revolute28",
    "LL_Revolute29",
];

/// Right leg joints, hip to ankle.
pub const RIGHT_LEG_JOINTS: [&str; 4] = [
    "RL_hip_joint",
    "RL_knee_actuator_joint",
    "RL_Revolute28",
    "RL_Revolute29",
];

/// Head/neck lead-screw joints of the parallel neck mechanism.
pub const HEAD_JOINTS: [&str; 6] = [
    "head_LeadScrew1",
    "head_LeadScrew2",
    "head_LeadScrew3",
    "head_LeadScrew4",
    "head_LeadScrew5",
    "head_LeadScrew6",
];

/// SDK channel layout, one joint per channel, in wire order.
///
/// This is NOT plain region order: the control SDK groups the proximal leg
/// drives of both legs (hips, then knees) ahead of the distal revolutes, so
/// channels 14-21 interleave left and right. The sequence is a fixed
/// contract with the external controller; do not derive it from the region
/// constants.
pub const SDK_JOINT_ORDER: [&str; 28] = [
    // Left arm channels
    "LH_yaw",
    "LH_pitch",
    "LH_roll",
    "LH_Revolute41",
    "LH_wrist_roll",
    // Right arm channels
    "RH_yaw",
    "RH_pitch",
    "RH_roll",
    "RH_Revolute41",
    "RH_wrist_roll",
    // Pelvic girdle channels
    "PG_left_leg_pitch",
    "PG_left_leg_roll",
    "PG_right_leg_pitch",
    "PG_right_leg_roll",
    // Leg channels: both hips and knees, then the distal revolutes
    "LL_hip_joint",
    "LL_knee_actuator_joint",
    "RL_hip_joint",
    "RL_knee_actuator_joint",
    "LL_Revolute28",
    "LL_Revolute29",
    "RL_Revolute28",
    "RL_Revolute29",
    // Head channels
    "head_LeadScrew1",
    "head_LeadScrew2",
    "head_LeadScrew3",
    "head_LeadScrew4",
    "head_LeadScrew5",
    "head_LeadScrew6",
];

/// Directory name of the model tree holding the Dropbear asset.
pub const ASSET_TREE_DIR: &str = "dropbear_model";

/// How many directory levels above the configuration directory the model
/// tree sits. Fixed by the lab's repository layout.
pub const ASSET_ANCESTOR_LEVELS: usize = 5;

/// The full Dropbear joint set in region order: left arm, right arm, pelvic
/// girdle, left leg, right leg, head.
pub fn dropbear_joint_names() -> Vec<String> {
    LEFT_ARM_JOINTS
        .iter()
        .chain(&RIGHT_ARM_JOINTS)
        .chain(&PELVIC_GIRDLE_JOINTS)
        .chain(&LEFT_LEG_JOINTS)
        .chain(&RIGHT_LEG_JOINTS)
        .chain(&HEAD_JOINTS)
        .map(|s| s.to_string())
        .collect()
}

/// The SDK joint-name list in channel order (see [`SDK_JOINT_ORDER`]).
pub fn dropbear_sdk_joint_names() -> Vec<String> {
    SDK_JOINT_ORDER.iter().map(|s| s.to_string()).collect()
}

/// Resolves the model tree directory from `config_dir`.
///
/// Ascends [`ASSET_ANCESTOR_LEVELS`] levels, then descends into
/// [`ASSET_TREE_DIR`]. Purely lexical: the result is not checked for
/// existence, but running out of ancestors is a fatal construction error.
pub fn model_dir(config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let mut dir = config_dir;
    for _ in 0..ASSET_ANCESTOR_LEVELS {
        dir = dir
            .parent()
            .ok_or_else(|| ConfigError::AssetPathUnresolvable {
                base: config_dir.to_path_buf(),
                levels: ASSET_ANCESTOR_LEVELS,
            })?;
    }
    Ok(dir.join(ASSET_TREE_DIR))
}

/// Path to the Dropbear USD asset under the model tree rooted via
/// `config_dir`.
pub fn dropbear_usd_path(config_dir: &Path) -> Result<PathBuf, ConfigError> {
    Ok(model_dir(config_dir)?
        .join("Dropbear")
        .join("usd")
        .join("dropbear.usd"))
}

/// Directory the Dropbear configuration is conventionally rooted at, mirroring
/// the `tasks/locomotion/robots/dropbear` nesting the ascent count assumes.
fn default_config_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src/tasks/locomotion/robots/dropbear")
}

/// Builds the Dropbear articulation description from static data and
/// validates it.
///
/// The rest pose bends the elbows and crouches the legs slightly for a
/// stable stance; every other joint rests at zero. All 28 joints start at
/// zero velocity via a single wildcard rule.
pub fn dropbear_articulation_cfg() -> Result<ArticulationCfg, ConfigError> {
    dropbear_articulation_cfg_at(&default_config_dir())
}

/// Same as [`dropbear_articulation_cfg`], rooting the asset-path convention
/// at an explicit configuration directory.
pub fn dropbear_articulation_cfg_at(config_dir: &Path) -> Result<ArticulationCfg, ConfigError> {
    let joint_pos: BTreeMap<String, f32> = [
        // Elbows bent for balance.
        ("LH_Revolute41", -0.5),
        ("RH_Revolute41", -0.5),
        // Standing crouch: hips back, knees forward, ankles back.
        ("LL_hip_joint", -0.2),
        ("LL_knee_actuator_joint", 0.4),
        ("LL_Revolute28", -0.2),
        ("RL_hip_joint", -0.2),
        ("RL_knee_actuator_joint", 0.4),
        ("RL_Revolute28", -0.2),
    ]
    .into_iter()
    .map(|(name, angle)| (name.to_string(), angle))
    .collect();

    let body_joints: Vec<JointPattern> = LEFT_ARM_JOINTS
        .iter()
        .chain(&RIGHT_ARM_JOINTS)
        .chain(&PELVIC_GIRDLE_JOINTS)
        .chain(&LEFT_LEG_JOINTS)
        .chain(&RIGHT_LEG_JOINTS)
        .map(|name| JointPattern::exact(*name))
        .collect();
    let neck_joints: Vec<JointPattern> = HEAD_JOINTS
        .iter()
        .map(|name| JointPattern::exact(*name))
        .collect();

    let actuators = BTreeMap::from([
        (
            "body".to_string(),
            ActuatorGroupCfg {
                joint_names: body_joints,
                effort_limit: 80.0,
                velocity_limit: 50.0,
                stiffness: 40.0,
                damping: 2.0,
                friction: 0.01,
                armature: 0.01,
            },
        ),
        (
            "neck".to_string(),
            ActuatorGroupCfg {
                joint_names: neck_joints,
                effort_limit: 50.0,
                velocity_limit: 50.0,
                // Stiffer and more damped than the body for precise head
                // positioning.
                stiffness: 100.0,
                damping: 5.0,
                friction: 0.01,
                armature: 0.01,
            },
        ),
    ]);

    let cfg = ArticulationCfg {
        spawn: SpawnCfg {
            usd_path: dropbear_usd_path(config_dir)?,
            activate_contact_sensors: true,
            rigid_props: RigidBodyPropsCfg {
                // Gravity stays off while the root is welded to the world;
                // the caps keep early-training solver states bounded.
                disable_gravity: true,
                retain_accelerations: false,
                linear_damping: 0.1,
                angular_damping: 0.1,
                max_linear_velocity: 100.0,
                max_angular_velocity: 100.0,
                max_depenetration_velocity: 1.0,
                enable_gyroscopic_forces: false,
            },
            articulation_props: ArticulationRootPropsCfg {
                enabled_self_collisions: false,
                solver_position_iteration_count: 4,
                solver_velocity_iteration_count: 0,
                fix_root_link: true,
            },
        },
        init_state: InitialStateCfg {
            pos: Vec3::new(0.0, 0.0, 1.0),
            rot: Quat::IDENTITY,
            joint_pos,
            joint_vel: vec![(JointPattern::Any, 0.0)],
        },
        joint_names: dropbear_joint_names(),
        actuators,
        soft_joint_pos_limit_factor: 0.9,
        joint_sdk_names: dropbear_sdk_joint_names(),
    };

    cfg.validate()?;
    Ok(cfg)
}
