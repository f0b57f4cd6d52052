// tests/task_registration.rs
use dropbear_rl_lab::diagnostics::check_registry_entries;
use dropbear_rl_lab::{
    Activation, ConfigError, DROPBEAR_VELOCITY_PLAY_TASK, DROPBEAR_VELOCITY_TASK, LrSchedule,
    PpoRunnerCfg, RegistryError, TaskRegistry, VelocityVariant, dropbear_velocity_rough_ppo_cfg,
    register_dropbear_tasks,
};

#[test]
fn exactly_two_dropbear_tasks_are_registered() {
    let registry = TaskRegistry::with_dropbear_tasks().unwrap();
    let ids: Vec<&str> = registry.ids().collect();
    assert_eq!(
        ids,
        vec![
            "Isaac-Velocity-Dropbear-Play-v0",
            "Isaac-Velocity-Dropbear-v0",
        ]
    );
    assert_eq!(registry.ids_matching("Dropbear").count(), 2);
    assert_eq!(registry.ids_matching("Anymal").count(), 0);
}

#[test]
fn duplicate_registration_is_a_detectable_error() {
    let mut registry = TaskRegistry::with_dropbear_tasks().unwrap();
    let err = register_dropbear_tasks(&mut registry).unwrap_err();
    assert_eq!(
        err,
        RegistryError::Duplicate(DROPBEAR_VELOCITY_TASK.to_string())
    );
    // The failed registration must not have disturbed the table.
    assert_eq!(registry.len(), 2);
}

#[test]
fn every_entry_point_resolves() {
    let registry = TaskRegistry::with_dropbear_tasks().unwrap();
    let reports = check_registry_entries(&registry);
    assert_eq!(reports.len(), 6, "three slots per task");
    for report in &reports {
        assert!(
            report.result.is_ok(),
            "{}::{} failed: {:?}",
            report.task_id,
            report.slot,
            report.result
        );
    }
}

#[test]
fn train_task_wires_rough_and_play_variants() {
    let registry = TaskRegistry::with_dropbear_tasks().unwrap();
    let entry = registry.get(DROPBEAR_VELOCITY_TASK).unwrap();

    let train = (entry.env_cfg)().unwrap();
    assert_eq!(train.variant, VelocityVariant::RoughTerrain);
    assert_eq!(train.num_envs, 4096);
    assert!(train.observation_noise);

    let play = (entry.play_env_cfg)().unwrap();
    assert_eq!(play.variant, VelocityVariant::Play);
    assert_eq!(play.num_envs, 50);
    assert!(!play.observation_noise);
    // Same robot and episode shape as training.
    assert_eq!(play.robot, train.robot);
    assert_eq!(play.episode_length_s, train.episode_length_s);
}

#[test]
fn play_task_uses_the_play_variant_throughout() {
    let registry = TaskRegistry::with_dropbear_tasks().unwrap();
    let entry = registry.get(DROPBEAR_VELOCITY_PLAY_TASK).unwrap();
    assert_eq!((entry.env_cfg)().unwrap().variant, VelocityVariant::Play);
    assert_eq!(
        (entry.play_env_cfg)().unwrap().variant,
        VelocityVariant::Play
    );
}

#[test]
fn dropbear_overrides_are_applied_after_base_defaults() {
    let base = PpoRunnerCfg::base();
    let cfg = dropbear_velocity_rough_ppo_cfg().unwrap();

    // Phase two tightened the optimizer relative to the base record.
    assert_eq!(base.algorithm.clip_param, 0.2);
    assert_eq!(cfg.algorithm.clip_param, 0.1);
    assert_eq!(base.algorithm.schedule, LrSchedule::Adaptive);
    assert_eq!(cfg.algorithm.schedule, LrSchedule::Fixed);

    assert_eq!(cfg.experiment_name, "dropbear_velocity");
    assert_eq!(cfg.num_steps_per_env, 32);
    assert_eq!(cfg.max_iterations, 30000);
    assert_eq!(cfg.policy.init_noise_std, 0.5);
    assert_eq!(cfg.policy.actor_hidden_dims, vec![512, 512, 256]);
    assert_eq!(cfg.policy.critic_hidden_dims, vec![512, 512, 256]);
    assert_eq!(cfg.policy.activation, Activation::Elu);
    assert_eq!(cfg.algorithm.entropy_coef, 0.05);
    assert_eq!(cfg.algorithm.num_learning_epochs, 2);
    assert_eq!(cfg.algorithm.num_mini_batches, 4);
    assert_eq!(cfg.algorithm.learning_rate, 1.0e-4);
    assert_eq!(cfg.algorithm.gamma, 0.99);
    assert_eq!(cfg.algorithm.lam, 0.95);
    assert_eq!(cfg.algorithm.desired_kl, 0.005);
    assert_eq!(cfg.algorithm.max_grad_norm, 0.5);
}

#[test]
fn mini_batches_must_divide_rollout_transitions() {
    let mut cfg = dropbear_velocity_rough_ppo_cfg().unwrap();
    assert_eq!((cfg.num_envs * cfg.num_steps_per_env) % cfg.algorithm.num_mini_batches, 0);

    cfg.algorithm.num_mini_batches = 7;
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::MiniBatchMismatch {
            mini_batches: 7,
            transitions: 4096 * 32,
        })
    );

    cfg.algorithm.num_mini_batches = 0;
    assert_eq!(
        cfg.validate(),
        Err(ConfigError::InvalidCount {
            field: "num_mini_batches",
            value: 0,
        })
    );
}

#[test]
fn degenerate_hyperparameters_fail_fast() {
    let mut cfg = dropbear_velocity_rough_ppo_cfg().unwrap();
    cfg.algorithm.gamma = 1.0;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::OutOfRange { field: "gamma", .. })
    ));

    let mut cfg = dropbear_velocity_rough_ppo_cfg().unwrap();
    cfg.algorithm.learning_rate = 0.0;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::OutOfRange {
            field: "learning_rate",
            ..
        })
    ));

    let mut cfg = dropbear_velocity_rough_ppo_cfg().unwrap();
    cfg.num_envs = 0;
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::InvalidCount {
            field: "num_envs",
            ..
        })
    ));
}
