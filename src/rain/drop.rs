use glam::Vec2;

use crate::audio::EntityHandle;
use crate::config::DropConfig;

pub type DropId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropState {
    Falling,
    Colliding,
    Destroyed,
}

/// One falling rain entity.
///
/// `position` is owned exclusively by the drop while it is alive; the
/// external integrator advances it through `Rainfall::set_position`. The
/// collision parameters are inherited from the scheduler's config at spawn
/// time and never change afterwards.
#[derive(Debug)]
pub struct Raindrop {
    pub id: DropId,
    pub handle: EntityHandle,
    pub position: Vec2,
    pub state: DropState,
    pub(crate) max_collision_life: f32,
    pub(crate) destruction_chance: f32,
}

impl Raindrop {
    pub(crate) fn new(id: DropId, handle: EntityHandle, position: Vec2, cfg: &DropConfig) -> Self {
        Self {
            id,
            handle,
            position,
            state: DropState::Falling,
            max_collision_life: cfg.max_collision_life,
            destruction_chance: cfg.destruction_chance,
        }
    }

    pub fn is_falling(&self) -> bool {
        self.state == DropState::Falling
    }
}
