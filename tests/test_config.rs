use std::env;
use std::path::PathBuf;

use arcade_shooter::config::{self, WorldConfig};
use arcade_shooter::{ConfigError, Error};

// ── Environment settings ──────────────────────────────────────────────────────

/// Every case that touches the process environment lives here so parallel
/// tests never race on the same variables.
#[test]
fn environment_settings() {
    // SHOOTER_SEED
    env::remove_var("SHOOTER_SEED");
    assert_eq!(config::seed().unwrap(), None);

    env::set_var("SHOOTER_SEED", " 7 ");
    assert_eq!(config::seed().unwrap(), Some(7));

    env::set_var("SHOOTER_SEED", "abc");
    match config::seed() {
        Err(ConfigError { var, value }) => {
            assert_eq!(var, "SHOOTER_SEED");
            assert_eq!(value, "abc");
        }
        other => panic!("expected a config error, got {:?}", other),
    }

    env::set_var("SHOOTER_SEED", "-1");
    assert!(config::seed().is_err());
    env::remove_var("SHOOTER_SEED");

    // SHOOTER_ASSETS
    env::remove_var("SHOOTER_ASSETS");
    assert_eq!(config::assets_dir(), None);
    env::set_var("SHOOTER_ASSETS", "/opt/shooter/sprites");
    assert_eq!(config::assets_dir(), Some(PathBuf::from("/opt/shooter/sprites")));
    env::remove_var("SHOOTER_ASSETS");

    // SHOOTER_LOG_FILE
    env::remove_var("SHOOTER_LOG_FILE");
    assert_eq!(config::log_file(), env::temp_dir().join("arcade_shooter.log"));
    env::set_var("SHOOTER_LOG_FILE", "/var/log/shooter.log");
    assert_eq!(config::log_file(), PathBuf::from("/var/log/shooter.log"));
    env::remove_var("SHOOTER_LOG_FILE");
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[test]
fn config_error_names_the_variable() {
    let err = Error::from(ConfigError {
        var: "SHOOTER_SEED",
        value: "abc".to_string(),
    });
    assert_eq!(err.to_string(), "invalid value \"abc\" for SHOOTER_SEED");
}

#[test]
fn log_file_failure_does_not_blame_the_terminal() {
    let err = Error::Log {
        path: PathBuf::from("/nowhere/shooter.log"),
        source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
    };
    let message = err.to_string();
    assert!(message.contains("log file"), "{}", message);
    assert!(!message.contains("terminal"), "{}", message);
    assert!(std::error::Error::source(&err).is_some());
}

// ── Tuning ────────────────────────────────────────────────────────────────────

#[test]
fn default_tuning_matches_the_arcade_original() {
    let cfg = WorldConfig::default();
    assert_eq!((cfg.width, cfg.height), (800.0, 600.0));
    assert_eq!(cfg.player_speed, 300.0);
    assert_eq!(cfg.fire_interval, 0.1);
    assert_eq!(cfg.spawn_interval, 1.0);
    assert_eq!((cfg.enemy_speed_min, cfg.enemy_speed_max), (100.0, 200.0));
    assert_eq!(cfg.bullet_speed, 200.0);
    assert_eq!(cfg.explosion_lifetime, 0.1);
    assert_eq!((cfg.score_anchor.x, cfg.score_anchor.y), (10.0, 550.0));
}
