//! All game entity types: data plus the odd derived quantity, no rules.

use glam::Vec3;

use crate::config::GameConfig;
use crate::timers::TimerQueue;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Stats,
    Instructions,
    GameOver,
}

/// Opaque id the host hands out for every object it places.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Ground,
    Monument,
    Player,
    Weapon,
    Enemy,
    Projectile,
}

// ── Player & weapon ───────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub handle: EntityHandle,
    /// Feet position; the eye sits `eye_height` above it.
    pub position: Vec3,
    /// Radians; 0 looks down +z, positive turns toward +x.
    pub yaw: f32,
    /// Radians; positive looks up.
    pub pitch: f32,
    pub eye_height: f32,
    pub base_speed: f32,
    pub sprint_multiplier: f32,
    pub sprint_speed: f32,
    /// Speed chosen on the last update.
    pub speed: f32,
    pub enabled: bool,
}

impl Player {
    pub fn new(handle: EntityHandle, position: Vec3, config: &GameConfig) -> Self {
        let base_speed = config.player_base_speed;
        Self {
            handle,
            position,
            yaw: 0.0,
            pitch: 0.0,
            eye_height: config.eye_height,
            base_speed,
            sprint_multiplier: config.sprint_multiplier,
            sprint_speed: base_speed * config.sprint_multiplier,
            speed: base_speed,
            enabled: true,
        }
    }

    pub fn view_position(&self) -> Vec3 {
        self.position + Vec3::Y * self.eye_height
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
    }

    /// Unit vector to the player's right on the ground plane.
    pub fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwingState {
    Idle,
    Swinging,
}

#[derive(Clone, Debug)]
pub struct Weapon {
    pub handle: EntityHandle,
    pub cooldown: f64,
    /// Time of the last projectile; starts at `-cooldown` so the first
    /// request always fires.
    pub last_fire: f64,
    pub swing: SwingState,
    pub enabled: bool,
}

impl Weapon {
    pub fn new(handle: EntityHandle, cooldown: f64) -> Self {
        Self {
            handle,
            cooldown,
            last_fire: -cooldown,
            swing: SwingState::Idle,
            enabled: true,
        }
    }

    pub fn cooled_down(&self, now: f64) -> bool {
        now - self.last_fire >= self.cooldown
    }
}

// ── Enemies, projectiles, objective ───────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub handle: EntityHandle,
    pub position: Vec3,
    pub speed: f32,
    /// Radians, same convention as `Player::yaw`.
    pub heading: f32,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub handle: EntityHandle,
    pub position: Vec3,
    /// Always unit length.
    pub direction: Vec3,
    pub speed: f32,
    pub spawned_at: f64,
}

#[derive(Clone, Debug)]
pub struct Monument {
    pub handle: EntityHandle,
    pub position: Vec3,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// Everything the rules own. Passed by `&mut` to every update; there is no
/// global game manager.
#[derive(Clone, Debug)]
pub struct GameState {
    pub screen: Screen,
    pub health: u32,
    pub score: u32,
    /// Best score this process has seen; only ever raised on game over.
    pub high_score: u32,
    pub player: Option<Player>,
    pub weapon: Option<Weapon>,
    pub monument: Option<Monument>,
    /// Live enemies in spawn order.
    pub enemies: Vec<Enemy>,
    /// Live projectiles in spawn order.
    pub projectiles: Vec<Projectile>,
    pub timers: TimerQueue,
    pub config: GameConfig,
    pub tick_count: u64,
}

impl GameState {
    pub fn new(config: GameConfig) -> Self {
        Self {
            screen: Screen::Menu,
            health: config.starting_health,
            score: 0,
            high_score: 0,
            player: None,
            weapon: None,
            monument: None,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            timers: TimerQueue::new(),
            config,
            tick_count: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.screen == Screen::Playing
    }

    pub fn enemy(&self, handle: EntityHandle) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.handle == handle)
    }

    pub fn projectile(&self, handle: EntityHandle) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.handle == handle)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
