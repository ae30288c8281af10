use glam::Vec2;
use rand::Rng;
use tracing::{debug, trace};

use super::drop::{DropId, DropState, Raindrop};
use super::schedule::ResolutionSchedule;
use super::spawner::Spawner;
use crate::audio::{CueSink, RainBackend};
use crate::config::{DropConfig, SpawnerConfig};
use crate::core::timebase::{Tick, Timebase};

/// Owns the live drop population, the spawner, and the pending resolution
/// schedule. Drives both once per tick.
#[derive(Debug)]
pub struct Rainfall {
    spawner: Spawner,
    drop_cfg: DropConfig,
    drops: Vec<Raindrop>,
    schedule: ResolutionSchedule,
    next_id: DropId,
    time: Timebase,
}

impl Rainfall {
    pub fn new(
        spawner_cfg: SpawnerConfig,
        drop_cfg: DropConfig,
        time: Timebase,
        now: Tick,
    ) -> Self {
        Self {
            spawner: Spawner::new(spawner_cfg, &time, now),
            drop_cfg,
            drops: Vec::new(),
            schedule: ResolutionSchedule::new(),
            next_id: 0,
            time,
        }
    }

    pub fn tick<R, B, C>(&mut self, now: Tick, rng: &mut R, backend: &mut B, cues: &mut C)
    where
        R: Rng + ?Sized,
        B: RainBackend,
        C: CueSink + ?Sized,
    {
        let elapsed = self.time.tick_to_sec(now);
        for position in self.spawner.tick(now, elapsed, rng) {
            self.spawn_drop(position, backend);
        }
        while let Some(id) = self.schedule.pop_due(now) {
            self.resolve(id, rng, backend, cues);
        }
    }

    fn spawn_drop<B: RainBackend>(&mut self, position: Vec2, backend: &mut B) {
        let id = self.next_id;
        self.next_id += 1;
        let handle = backend.spawn_entity(position, self.spawner.wobble_angle());
        trace!(id, x = position.x, y = position.y, "drop spawned");
        self.drops
            .push(Raindrop::new(id, handle, position, &self.drop_cfg));
    }

    /// External collision signal for `id`. Schedules one resolution after a
    /// uniform random delay in `[0, max_collision_life)`; signals received
    /// while a resolution is already pending are ignored.
    pub fn signal_collision<R: Rng + ?Sized>(&mut self, id: DropId, now: Tick, rng: &mut R) {
        let Some(drop) = self.drops.iter_mut().find(|d| d.id == id) else {
            debug!(id, "collision signal for unknown drop");
            return;
        };
        if drop.state == DropState::Colliding {
            trace!(id, "collision signal ignored, resolution already pending");
            return;
        }
        drop.state = DropState::Colliding;
        let delay_sec = if drop.max_collision_life > 0.0 {
            rng.random_range(0.0..drop.max_collision_life)
        } else {
            0.0
        };
        let due = now.saturating_add(self.time.sec_to_tick(delay_sec));
        self.schedule.push(due, id);
    }

    fn resolve<R, B, C>(&mut self, id: DropId, rng: &mut R, backend: &mut B, cues: &mut C)
    where
        R: Rng + ?Sized,
        B: RainBackend,
        C: CueSink + ?Sized,
    {
        // Pending resolutions are never cancelled; one that outlives its drop
        // is a no-op.
        let Some(idx) = self.drops.iter().position(|d| d.id == id) else {
            debug!(id, "resolution fired for missing drop");
            return;
        };

        let (position, handle) = {
            let drop = &self.drops[idx];
            (drop.position, drop.handle)
        };
        // The effect marks where the collision happened, before any reset.
        backend.spawn_effect(position, self.spawner.wobble_angle());

        if rng.random::<f32>() < self.drops[idx].destruction_chance {
            self.drops[idx].state = DropState::Destroyed;
            backend.despawn_entity(handle);
            self.drops.swap_remove(idx);
            debug!(id, "drop destroyed");
        } else {
            let fresh = self.spawner.spawn_position(rng);
            let drop = &mut self.drops[idx];
            drop.position = fresh;
            drop.state = DropState::Falling;
            backend.clear_trail(handle);
        }

        // The cue marks the resolution itself, destroyed or not.
        cues.play_random_cue();
    }

    /// Position update from the external integrator; unknown ids are ignored.
    pub fn set_position(&mut self, id: DropId, position: Vec2) {
        if let Some(drop) = self.drops.iter_mut().find(|d| d.id == id) {
            drop.position = position;
        }
    }

    /// External removal of a drop. Any resolution still pending for `id`
    /// stays scheduled and no-ops when it fires.
    pub fn remove_drop<B: RainBackend>(&mut self, id: DropId, backend: &mut B) {
        if let Some(idx) = self.drops.iter().position(|d| d.id == id) {
            backend.despawn_entity(self.drops[idx].handle);
            self.drops.swap_remove(idx);
        }
    }

    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    pub fn emitter_angle(&self) -> f32 {
        self.spawner.wobble_angle()
    }

    pub fn pending_resolutions(&self) -> usize {
        self.schedule.len()
    }

    pub fn in_burst(&self) -> bool {
        self.spawner.in_burst()
    }
}
