use monument_defense::config::{validate_tick_rate, GameConfig, MAX_TICK_HZ};
use monument_defense::error::ConfigError;

#[test]
fn defaults_match_the_original_island() {
    let config = GameConfig::default();
    assert_eq!(config.starting_health, 50);
    assert_eq!(config.enemy_count, 100);
    assert_eq!(config.enemy_height, 2.5);
    assert_eq!(config.weapon_cooldown, 0.1);
    assert_eq!(config.swing_duration, 0.15);
    assert_eq!(config.projectile_lifetime, 3.0);
    assert_eq!(config.projectile_speed, 100.0);
    assert!(config.validate().is_ok());
}

#[test]
fn zero_health_rejected() {
    let config = GameConfig {
        starting_health: 0,
        ..GameConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroStartingHealth));
}

#[test]
fn non_positive_speed_rejected_with_field_name() {
    let config = GameConfig {
        enemy_speed: -1.0,
        ..GameConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert_eq!(
        err,
        ConfigError::NonPositive {
            field: "enemy_speed",
            value: -1.0
        }
    );
    assert_eq!(err.to_string(), "enemy_speed must be greater than zero, got -1");
}

#[test]
fn non_finite_values_rejected() {
    let config = GameConfig {
        projectile_lifetime: f64::INFINITY,
        ..GameConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::NonFinite {
            field: "projectile_lifetime"
        })
    );
}

#[test]
fn sprint_must_not_slow_down() {
    let config = GameConfig {
        sprint_multiplier: 0.5,
        ..GameConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::SprintSlowerThanWalk { .. })
    ));
}

#[test]
fn tick_rate_bounds() {
    assert!(validate_tick_rate(60).is_ok());
    assert!(validate_tick_rate(MAX_TICK_HZ).is_ok());
    assert!(validate_tick_rate(0).is_err());
    assert!(validate_tick_rate(MAX_TICK_HZ + 1).is_err());
}
