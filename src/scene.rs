use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::audio::{AmbientVoice, RainBackend};
use crate::config::{ConfigError, SceneConfig};
use crate::core::timebase::{Tick, Timebase};
use crate::rain::drop::DropId;
use crate::rain::rainfall::Rainfall;
use crate::sea::shaper::SeaShaper;

/// Orchestrator: owns the rain simulation, the sea shaper, the clock, and the
/// simulation RNG. One `tick` call per simulation step; collision signals
/// arrive from the outside between ticks.
pub struct Scene {
    time: Timebase,
    now: Tick,
    rng: SmallRng,
    rainfall: Rainfall,
    shaper: SeaShaper,
}

impl Scene {
    /// Fails fast on configuration faults; nothing is scheduled until the
    /// config is known to be well-formed.
    pub fn new(cfg: SceneConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let time = Timebase {
            tick_hz: cfg.sim.tick_hz,
        };
        let start_pitch = cfg.ambience.start_pitch;
        Ok(Self {
            time,
            now: 0,
            rng: SmallRng::seed_from_u64(cfg.sim.seed),
            rainfall: Rainfall::new(cfg.spawner, cfg.drops, time, 0),
            shaper: SeaShaper::new(cfg.ambience, start_pitch),
        })
    }

    pub fn tick<B: RainBackend, V: AmbientVoice>(&mut self, backend: &mut B, voice: &mut V) {
        self.now += 1;
        self.rainfall.tick(self.now, &mut self.rng, backend, voice);
        let params = self.shaper.shape(voice.playback());
        voice.apply_params(params);
    }

    pub fn signal_collision(&mut self, id: DropId) {
        self.rainfall.signal_collision(id, self.now, &mut self.rng);
    }

    pub fn rainfall(&self) -> &Rainfall {
        &self.rainfall
    }

    pub fn rainfall_mut(&mut self) -> &mut Rainfall {
        &mut self.rainfall
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn elapsed_sec(&self) -> f32 {
        self.time.tick_to_sec(self.now)
    }

    pub fn time(&self) -> Timebase {
        self.time
    }
}
