use glam::Vec2;
use rand::Rng;

use crate::config::SpawnerConfig;
use crate::core::timebase::{Tick, Timebase};
use crate::core::util::jitter;

/// Decides when and where new drops enter the scene.
///
/// Runs an initial burst of `spawn_count` drops at `spawn_rate` intervals,
/// then settles into probabilistic steady state. The steady-state gate is
/// armed past the end of the burst before the burst starts, so the two phases
/// can never double-spawn.
#[derive(Debug)]
pub struct Spawner {
    cfg: SpawnerConfig,
    rate_ticks: Tick,
    burst_remaining: u32,
    next_burst_at: Tick,
    next_spawn_at: Tick,
    wobble_angle: f32,
}

impl Spawner {
    pub fn new(cfg: SpawnerConfig, time: &Timebase, now: Tick) -> Self {
        let rate_ticks = time.sec_to_tick(cfg.spawn_rate);
        let next_spawn_at =
            now.saturating_add(rate_ticks.saturating_mul(cfg.spawn_count as Tick + 1));
        Self {
            rate_ticks,
            burst_remaining: cfg.spawn_count,
            next_burst_at: now,
            next_spawn_at,
            wobble_angle: 0.0,
            cfg,
        }
    }

    /// Advance one tick; returns the spawn positions emitted this tick.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        now: Tick,
        elapsed_sec: f32,
        rng: &mut R,
    ) -> Vec<Vec2> {
        // Cosmetic sway of the whole emitter, re-randomized every tick rather
        // than smoothed; jitter at high wobble_randomness is intended.
        self.wobble_angle = (elapsed_sec * self.cfg.wobble_freq
            + jitter(rng, self.cfg.wobble_randomness))
        .sin()
            * self.cfg.wobble_amount;

        let mut spawned = Vec::new();
        while self.burst_remaining > 0 && now >= self.next_burst_at {
            spawned.push(self.spawn_position(rng));
            self.burst_remaining -= 1;
            self.next_burst_at = self.next_burst_at.saturating_add(self.rate_ticks);
        }

        if now > self.next_spawn_at {
            if rng.random::<f32>() < self.cfg.spawn_chance {
                spawned.push(self.spawn_position(rng));
            }
            // The check cadence is fixed: advance whether or not a drop was
            // emitted.
            self.next_spawn_at = now.saturating_add(self.rate_ticks);
        }
        spawned
    }

    /// Fresh spawn position: uniform x across the band, fixed height. Every
    /// call is an independent draw; no spacing between drops is enforced.
    pub fn spawn_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        Vec2::new(jitter(rng, self.cfg.spawn_range), self.cfg.spawn_height)
    }

    /// Current emitter rotation about the forward axis.
    pub fn wobble_angle(&self) -> f32 {
        self.wobble_angle
    }

    pub fn in_burst(&self) -> bool {
        self.burst_remaining > 0
    }
}
