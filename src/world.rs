//! In-process host: a flat list of boxes and a clock.

use glam::Vec3;
use log::trace;

use crate::engine::{Collider, CollisionMask, Engine, Hit};
use crate::entities::{EntityHandle, EntityKind};

#[derive(Clone, Debug)]
struct Body {
    handle: EntityHandle,
    kind: EntityKind,
    position: Vec3,
    collider: Collider,
}

#[derive(Clone, Debug, Default)]
pub struct SimWorld {
    /// Kept in spawn order so queries are deterministic.
    bodies: Vec<Body>,
    next_handle: u32,
    clock: f64,
    quit: bool,
}

impl SimWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the clock forward. Negative or non-finite steps are ignored so
    /// the clock stays monotonic.
    pub fn advance(&mut self, dt: f64) {
        if dt.is_finite() && dt > 0.0 {
            self.clock += dt;
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.bodies.iter().filter(|b| b.kind == kind).count()
    }

    pub fn position(&self, handle: EntityHandle) -> Option<Vec3> {
        self.body(handle).map(|b| b.position)
    }

    pub fn kind(&self, handle: EntityHandle) -> Option<EntityKind> {
        self.body(handle).map(|b| b.kind)
    }

    fn body(&self, handle: EntityHandle) -> Option<&Body> {
        self.bodies.iter().find(|b| b.handle == handle)
    }
}

fn overlaps(a_pos: Vec3, a_half: Vec3, b_pos: Vec3, b_half: Vec3) -> bool {
    let gap = (a_pos - b_pos).abs();
    let reach = a_half + b_half;
    gap.x <= reach.x && gap.y <= reach.y && gap.z <= reach.z
}

impl Engine for SimWorld {
    fn spawn(&mut self, kind: EntityKind, position: Vec3, collider: Collider) -> EntityHandle {
        let handle = EntityHandle(self.next_handle);
        self.next_handle += 1;
        self.bodies.push(Body {
            handle,
            kind,
            position,
            collider,
        });
        handle
    }

    fn destroy(&mut self, handle: EntityHandle) -> bool {
        match self.bodies.iter().position(|b| b.handle == handle) {
            Some(index) => {
                self.bodies.remove(index);
                true
            }
            None => false,
        }
    }

    fn is_alive(&self, handle: EntityHandle) -> bool {
        self.body(handle).is_some()
    }

    fn set_position(&mut self, handle: EntityHandle, position: Vec3) {
        if let Some(body) = self.bodies.iter_mut().find(|b| b.handle == handle) {
            body.position = position;
        }
    }

    fn intersects(&self, handle: EntityHandle, mask: CollisionMask) -> Option<Hit> {
        let me = self.body(handle)?;
        let Collider::Box { half_extents: mine } = me.collider else {
            return None;
        };

        let found = self.bodies.iter().find(|other| {
            if other.handle == handle || !mask.allows(other.kind) {
                return false;
            }
            match other.collider {
                Collider::None => false,
                Collider::Box { half_extents } => {
                    overlaps(me.position, mine, other.position, half_extents)
                }
            }
        })?;

        trace!(
            "{:?} {:?} overlaps {:?} {:?}",
            me.kind,
            me.handle,
            found.kind,
            found.handle
        );
        Some(Hit {
            other: found.handle,
            kind: found.kind,
        })
    }

    fn now(&self) -> f64 {
        self.clock
    }

    fn quit(&mut self) {
        self.quit = true;
    }

    fn quit_requested(&self) -> bool {
        self.quit
    }

    fn clear(&mut self) {
        self.bodies.clear();
    }
}
