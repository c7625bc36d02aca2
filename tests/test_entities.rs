use glam::Vec3;
use monument_defense::config::GameConfig;
use monument_defense::entities::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn new_state_starts_on_menu_with_empty_registry() {
    let state = GameState::default();
    assert_eq!(state.screen, Screen::Menu);
    assert_eq!(state.health, 50);
    assert_eq!(state.score, 0);
    assert_eq!(state.high_score, 0);
    assert!(state.enemies.is_empty());
    assert!(state.projectiles.is_empty());
    assert!(state.player.is_none());
    assert!(!state.is_playing());
}

#[test]
fn sprint_speed_is_base_times_multiplier() {
    let config = GameConfig::default();
    let player = Player::new(EntityHandle(0), config.player_start, &config);
    assert_eq!(player.base_speed, 15.0);
    assert!(close(player.sprint_speed, 15.0 * 1.75));
    assert_eq!(player.speed, player.base_speed);
    assert!(player.enabled);
}

#[test]
fn view_sits_above_the_feet() {
    let config = GameConfig::default();
    let player = Player::new(EntityHandle(0), Vec3::new(1.0, 0.5, -3.0), &config);
    assert_eq!(player.view_position(), Vec3::new(1.0, 2.5, -3.0));
}

#[test]
fn forward_follows_yaw_and_pitch() {
    let config = GameConfig::default();
    let mut player = Player::new(EntityHandle(0), Vec3::ZERO, &config);

    let f = player.forward();
    assert!(close(f.x, 0.0) && close(f.y, 0.0) && close(f.z, 1.0));

    player.yaw = std::f32::consts::FRAC_PI_2;
    let f = player.forward();
    assert!(close(f.x, 1.0) && close(f.z, 0.0));
    let r = player.right();
    assert!(close(r.x, 0.0) && close(r.z, -1.0));

    player.yaw = 0.0;
    player.pitch = 0.3;
    assert!(close(player.forward().length(), 1.0));
    assert!(player.forward().y > 0.0);
}

#[test]
fn fresh_weapon_is_ready_immediately() {
    let weapon = Weapon::new(EntityHandle(3), 0.1);
    assert_eq!(weapon.swing, SwingState::Idle);
    assert!(weapon.cooled_down(0.0));
    assert!(weapon.enabled);
}

#[test]
fn weapon_cooldown_measured_from_last_fire() {
    let mut weapon = Weapon::new(EntityHandle(3), 0.1);
    weapon.last_fire = 2.0;
    assert!(!weapon.cooled_down(2.05));
    assert!(weapon.cooled_down(2.1));
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState::default();
    let mut cloned = original.clone();

    cloned.score = 999;
    cloned.enemies.push(Enemy {
        handle: EntityHandle(1),
        position: Vec3::ZERO,
        speed: 1.0,
        heading: 0.0,
    });

    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
