//! The boundary between the game rules and whatever hosts them.
//!
//! The rules never own transforms or colliders themselves; they ask the host
//! to place, move, query and remove objects through [`Engine`].

use glam::Vec3;

use crate::entities::{EntityHandle, EntityKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Collider {
    /// Visible but never reported by collision queries.
    None,
    /// Axis-aligned box centred on the entity position.
    Box { half_extents: Vec3 },
}

/// Which entity kinds a collision query may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CollisionMask(pub u8);

impl CollisionMask {
    pub const NONE: Self = Self(0);
    pub const GROUND: Self = Self(1 << 0);
    pub const MONUMENT: Self = Self(1 << 1);
    pub const PLAYER: Self = Self(1 << 2);
    pub const WEAPON: Self = Self(1 << 3);
    pub const ENEMY: Self = Self(1 << 4);
    pub const PROJECTILE: Self = Self(1 << 5);
    pub const ALL: Self = Self(0b0011_1111);

    pub fn of(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Ground => Self::GROUND,
            EntityKind::Monument => Self::MONUMENT,
            EntityKind::Player => Self::PLAYER,
            EntityKind::Weapon => Self::WEAPON,
            EntityKind::Enemy => Self::ENEMY,
            EntityKind::Projectile => Self::PROJECTILE,
        }
    }

    #[inline]
    pub fn allows(self, kind: EntityKind) -> bool {
        self.0 & Self::of(kind).0 != 0
    }
}

impl std::ops::BitOr for CollisionMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// The other party of an overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    pub other: EntityHandle,
    pub kind: EntityKind,
}

pub trait Engine {
    fn spawn(&mut self, kind: EntityKind, position: Vec3, collider: Collider) -> EntityHandle;

    /// Removes the entity. Destroying an unknown or already destroyed handle
    /// is a no-op and returns `false`.
    fn destroy(&mut self, handle: EntityHandle) -> bool;

    fn is_alive(&self, handle: EntityHandle) -> bool;

    fn set_position(&mut self, handle: EntityHandle, position: Vec3);

    /// First live entity, in spawn order, whose collider overlaps `handle`'s
    /// and whose kind passes `mask`. Never reports `handle` itself.
    fn intersects(&self, handle: EntityHandle, mask: CollisionMask) -> Option<Hit>;

    /// Seconds since the host started.
    fn now(&self) -> f64;

    fn quit(&mut self);

    fn quit_requested(&self) -> bool;

    /// Drops every entity, like clearing a scene.
    fn clear(&mut self);
}
