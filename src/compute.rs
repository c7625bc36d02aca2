//! Game rules.
//!
//! Every function takes the explicitly owned `GameState` plus the host
//! `Engine`; randomness is injected so tests can seed it. Update rules never
//! touch the health and score counters directly: they go through
//! `minus_health` and `increment_score`, which refuse to act outside play.

use glam::Vec3;
use log::{debug, info, trace};
use rand::Rng;

use crate::engine::{Collider, CollisionMask, Engine};
use crate::entities::{
    EntityHandle, EntityKind, Enemy, GameState, Monument, Player, Projectile, Screen, SwingState,
    Weapon,
};
use crate::input::HeldKeys;
use crate::timers::TimerAction;

// ── Screen transitions ────────────────────────────────────────────────────────

/// Menu → Playing. Resets the counters, builds the island, spawns the player,
/// the sword and the whole wave. Returns `false` (and does nothing) from any
/// other screen.
pub fn start_game<E: Engine>(state: &mut GameState, engine: &mut E, rng: &mut impl Rng) -> bool {
    if state.screen != Screen::Menu {
        debug!("start_game ignored on {:?}", state.screen);
        return false;
    }

    clear_scene(state, engine);
    state.screen = Screen::Playing;
    state.health = state.config.starting_health;
    state.score = 0;

    create_world(state, engine);

    let start = state.config.player_start;
    let player_handle = engine.spawn(EntityKind::Player, start, Collider::None);
    state.player = Some(Player::new(player_handle, start, &state.config));

    let sword_handle = engine.spawn(EntityKind::Weapon, start, Collider::None);
    state.weapon = Some(Weapon::new(sword_handle, state.config.weapon_cooldown));

    spawn_enemies(state, engine, rng);

    info!(
        "game started: health={} enemies={}",
        state.health,
        state.enemies.len()
    );
    true
}

pub fn open_stats(state: &mut GameState) -> bool {
    open_from_menu(state, Screen::Stats)
}

pub fn open_instructions(state: &mut GameState) -> bool {
    open_from_menu(state, Screen::Instructions)
}

fn open_from_menu(state: &mut GameState, target: Screen) -> bool {
    if state.screen != Screen::Menu {
        debug!("{:?} ignored on {:?}", target, state.screen);
        return false;
    }
    state.screen = target;
    info!("screen: Menu -> {:?}", target);
    true
}

/// Stats, Instructions or GameOver → Menu. Clears whatever is left of the
/// previous run.
pub fn return_to_menu<E: Engine>(state: &mut GameState, engine: &mut E) -> bool {
    match state.screen {
        Screen::Stats | Screen::Instructions | Screen::GameOver => {
            let from = state.screen;
            clear_scene(state, engine);
            state.screen = Screen::Menu;
            info!("screen: {:?} -> Menu", from);
            true
        }
        Screen::Menu | Screen::Playing => {
            debug!("return_to_menu ignored on {:?}", state.screen);
            false
        }
    }
}

/// Playing → GameOver. Freezes the player and sword, removes every enemy and
/// folds the score into the high score.
pub fn game_over<E: Engine>(state: &mut GameState, engine: &mut E) -> bool {
    if !state.is_playing() {
        return false;
    }

    if let Some(player) = state.player.as_mut() {
        player.enabled = false;
    }
    if let Some(weapon) = state.weapon.as_mut() {
        weapon.enabled = false;
    }
    for enemy in state.enemies.drain(..) {
        engine.destroy(enemy.handle);
    }

    state.high_score = state.high_score.max(state.score);
    state.screen = Screen::GameOver;
    info!(
        "game over: score={} high_score={}",
        state.score, state.high_score
    );
    true
}

fn clear_scene<E: Engine>(state: &mut GameState, engine: &mut E) {
    engine.clear();
    state.player = None;
    state.weapon = None;
    state.monument = None;
    state.enemies.clear();
    state.projectiles.clear();
    state.timers.clear();
}

// ── Bookkeeping ───────────────────────────────────────────────────────────────

/// Loses `amount` lives; ends the run at zero. No-op outside play.
pub fn minus_health<E: Engine>(state: &mut GameState, engine: &mut E, amount: u32) {
    if !state.is_playing() {
        return;
    }
    state.health = state.health.saturating_sub(amount);
    debug!("health -> {}", state.health);
    if state.health == 0 {
        game_over(state, engine);
    }
}

/// No-op outside play.
pub fn increment_score(state: &mut GameState, amount: u32) {
    if !state.is_playing() {
        return;
    }
    state.score += amount;
    debug!("score -> {}", state.score);
}

// ── World construction ────────────────────────────────────────────────────────

fn create_world<E: Engine>(state: &mut GameState, engine: &mut E) {
    let config = &state.config;
    engine.spawn(
        EntityKind::Ground,
        Vec3::ZERO,
        Collider::Box {
            half_extents: config.ground_half_extents,
        },
    );

    let position = config.monument_position;
    let handle = engine.spawn(
        EntityKind::Monument,
        position,
        Collider::Box {
            half_extents: config.monument_half_extents,
        },
    );
    state.monument = Some(Monument { handle, position });
}

/// Fills the registry with `enemy_count` fish on integer x/z coordinates
/// across the island. Some land on the monument; they hit it on the first
/// tick.
pub fn spawn_enemies<E: Engine>(state: &mut GameState, engine: &mut E, rng: &mut impl Rng) {
    let half = (state.config.arena_half_extent as i32).max(1);
    let collider = Collider::Box {
        half_extents: state.config.enemy_half_extents,
    };

    for _ in 0..state.config.enemy_count {
        let x = rng.gen_range(-half..half) as f32;
        let z = rng.gen_range(-half..half) as f32;
        let position = Vec3::new(x, state.config.enemy_height, z);
        let handle = engine.spawn(EntityKind::Enemy, position, collider);
        state.enemies.push(Enemy {
            handle,
            position,
            speed: state.config.enemy_speed,
            heading: 0.0,
        });
    }
}

pub fn spawn_projectile<E: Engine>(
    state: &mut GameState,
    engine: &mut E,
    origin: Vec3,
    direction: Vec3,
) -> Option<EntityHandle> {
    let direction = direction.try_normalize()?;
    let now = engine.now();
    let handle = engine.spawn(
        EntityKind::Projectile,
        origin,
        Collider::Box {
            half_extents: state.config.projectile_half_extents,
        },
    );
    state.projectiles.push(Projectile {
        handle,
        position: origin,
        direction,
        speed: state.config.projectile_speed,
        spawned_at: now,
    });
    state.timers.schedule(
        now + state.config.projectile_lifetime,
        TimerAction::ProjectileExpire,
        handle,
    );
    Some(handle)
}

/// Removes an enemy from the registry and the host. `false` when it was
/// already gone, so a second destruction has no effect.
pub fn destroy_enemy<E: Engine>(state: &mut GameState, engine: &mut E, handle: EntityHandle) -> bool {
    let Some(index) = state.enemies.iter().position(|e| e.handle == handle) else {
        return false;
    };
    state.enemies.remove(index);
    engine.destroy(handle);
    true
}

pub fn destroy_projectile<E: Engine>(
    state: &mut GameState,
    engine: &mut E,
    handle: EntityHandle,
) -> bool {
    let Some(index) = state.projectiles.iter().position(|p| p.handle == handle) else {
        return false;
    };
    state.projectiles.remove(index);
    engine.destroy(handle);
    true
}

// ── Per-entity update rules ───────────────────────────────────────────────────

/// Sprint, look, walk, and the quit key.
pub fn update_player<E: Engine>(state: &mut GameState, engine: &mut E, input: &HeldKeys, dt: f32) {
    if !state.is_playing() {
        return;
    }
    let config = &state.config;
    let Some(player) = state.player.as_mut() else {
        return;
    };
    if !player.enabled {
        return;
    }

    player.speed = if input.sprint {
        player.sprint_speed
    } else {
        player.base_speed
    };

    player.yaw += axis(input.turn_right, input.turn_left) * config.turn_rate * dt;
    player.pitch = (player.pitch + axis(input.look_up, input.look_down) * config.look_rate * dt)
        .clamp(-config.max_pitch, config.max_pitch);

    let (sin_yaw, cos_yaw) = player.yaw.sin_cos();
    let ahead = Vec3::new(sin_yaw, 0.0, cos_yaw);
    let wish = ahead * axis(input.forward, input.back)
        + player.right() * axis(input.strafe_right, input.strafe_left);
    if let Some(dir) = wish.try_normalize() {
        let limit = config.arena_half_extent;
        let mut next = player.position + dir * player.speed * dt;
        next.x = next.x.clamp(-limit, limit);
        next.z = next.z.clamp(-limit, limit);
        player.position = next;
        engine.set_position(player.handle, next);
    }

    if input.quit {
        info!("quit requested during play");
        engine.quit();
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Idle + trigger + cooldown elapsed → swing and shoot once.
pub fn update_weapon<E: Engine>(state: &mut GameState, engine: &mut E, input: &HeldKeys) {
    if !input.fire || !state.is_playing() {
        return;
    }
    let now = engine.now();

    let ready = state.weapon.as_ref().is_some_and(|w| {
        w.enabled && w.swing == SwingState::Idle && w.cooled_down(now)
    });
    if !ready {
        return;
    }
    let Some((origin, direction)) = state
        .player
        .as_ref()
        .map(|p| (p.view_position() + p.forward() * state.config.muzzle_offset, p.forward()))
    else {
        return;
    };

    let swing_ends = now + state.config.swing_duration;
    if let Some(weapon) = state.weapon.as_mut() {
        weapon.swing = SwingState::Swinging;
        weapon.last_fire = now;
        state
            .timers
            .schedule(swing_ends, TimerAction::SwingReturn, weapon.handle);
    }
    spawn_projectile(state, engine, origin, direction);
}

/// Walk toward the monument on the enemy's own plane, then lose a life if
/// the monument was reached.
pub fn update_enemy<E: Engine>(state: &mut GameState, engine: &mut E, handle: EntityHandle, dt: f32) {
    let Some(target) = state.monument.as_ref().map(|m| m.position) else {
        return;
    };
    let stop_radius_sq = state.config.enemy_stop_radius * state.config.enemy_stop_radius;
    let Some(enemy) = state.enemies.iter_mut().find(|e| e.handle == handle) else {
        return;
    };

    let flat_target = Vec3::new(target.x, enemy.position.y, target.z);
    let to_target = flat_target - enemy.position;
    if to_target.length_squared() > stop_radius_sq {
        enemy.heading = to_target.x.atan2(to_target.z);
        if let Some(dir) = to_target.try_normalize() {
            enemy.position += dir * enemy.speed * dt;
            engine.set_position(handle, enemy.position);
        }
    }

    let Some(hit) = engine.intersects(handle, CollisionMask::MONUMENT) else {
        return;
    };
    match hit.kind {
        EntityKind::Monument => {
            trace!("enemy {:?} reached the monument", handle);
            if destroy_enemy(state, engine, handle) {
                minus_health(state, engine, 1);
            }
        }
        EntityKind::Ground
        | EntityKind::Player
        | EntityKind::Weapon
        | EntityKind::Enemy
        | EntityKind::Projectile => {}
    }
}

/// Fly straight; the first live enemy touched dies, scores, and takes the
/// projectile with it.
pub fn update_projectile<E: Engine>(
    state: &mut GameState,
    engine: &mut E,
    handle: EntityHandle,
    dt: f32,
) {
    let Some(projectile) = state.projectiles.iter_mut().find(|p| p.handle == handle) else {
        return;
    };
    projectile.position += projectile.direction * projectile.speed * dt;
    engine.set_position(handle, projectile.position);

    let Some(hit) = engine.intersects(handle, CollisionMask::ENEMY) else {
        return;
    };
    match hit.kind {
        EntityKind::Enemy => {
            if destroy_enemy(state, engine, hit.other) {
                trace!("projectile {:?} killed enemy {:?}", handle, hit.other);
                increment_score(state, 1);
                destroy_projectile(state, engine, handle);
            }
        }
        EntityKind::Ground
        | EntityKind::Monument
        | EntityKind::Player
        | EntityKind::Weapon
        | EntityKind::Projectile => {}
    }
}

// ── Timers ────────────────────────────────────────────────────────────────────

/// Applies every timer due at `engine.now()`. Each action checks its target
/// still exists; a stale entry does nothing.
pub fn fire_due_timers<E: Engine>(state: &mut GameState, engine: &mut E) {
    let now = engine.now();
    for entry in state.timers.pop_due(now) {
        match entry.action {
            TimerAction::SwingReturn => {
                if let Some(weapon) = state.weapon.as_mut().filter(|w| w.handle == entry.target) {
                    weapon.swing = SwingState::Idle;
                    trace!("swing over at {:.3}", now);
                }
            }
            TimerAction::ProjectileExpire => {
                if destroy_projectile(state, engine, entry.target) {
                    trace!("projectile {:?} expired at {:.3}", entry.target, now);
                }
            }
        }
    }
}

// ── Per-tick driver ───────────────────────────────────────────────────────────

/// One frame. The host advances its clock before calling this.
pub fn tick<E: Engine>(state: &mut GameState, engine: &mut E, input: &HeldKeys, dt: f32) {
    fire_due_timers(state, engine);

    if state.is_playing() {
        update_player(state, engine, input, dt);
        update_weapon(state, engine, input);

        let enemies: Vec<EntityHandle> = state.enemies.iter().map(|e| e.handle).collect();
        for handle in enemies {
            update_enemy(state, engine, handle, dt);
        }
    }

    // Shots already in flight keep going after a game over until they expire.
    let projectiles: Vec<EntityHandle> = state.projectiles.iter().map(|p| p.handle).collect();
    for handle in projectiles {
        update_projectile(state, engine, handle, dt);
    }

    state.tick_count += 1;
}
