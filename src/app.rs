use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, trace};

use crate::audio::cues::CueBank;
use crate::audio::{AmbientVoice, CueSink, EntityHandle, PlaybackState, RainBackend, VoiceParams};
use crate::cli::Args;
use crate::config::SceneConfig;
use crate::rain::drop::DropId;
use crate::scene::Scene;

/// Renderer stub: logs the calls a real renderer would consume and keeps
/// running totals for the end-of-run summary.
#[derive(Default)]
struct TraceBackend {
    next_handle: EntityHandle,
    spawned: u64,
    effects: u64,
    despawned: u64,
}

impl RainBackend for TraceBackend {
    fn spawn_entity(&mut self, position: Vec2, rotation: f32) -> EntityHandle {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.spawned += 1;
        trace!(handle, x = position.x, y = position.y, rotation, "spawn entity");
        handle
    }

    fn spawn_effect(&mut self, position: Vec2, _rotation: f32) {
        self.effects += 1;
        trace!(x = position.x, y = position.y, "splash effect");
    }

    fn clear_trail(&mut self, handle: EntityHandle) {
        trace!(handle, "clear trail");
    }

    fn despawn_entity(&mut self, handle: EntityHandle) {
        self.despawned += 1;
        trace!(handle, "despawn entity");
    }
}

/// Simulated looping ambient voice. The playback position advances at the
/// applied pitch, mirroring a sample-counting player whose speed follows the
/// pitch parameter.
struct SimVoice {
    loop_len_sec: f32,
    position_sec: f32,
    elapsed_sec: f32,
    params: VoiceParams,
    cues: CueBank,
    rng: SmallRng,
}

impl SimVoice {
    fn new(loop_len_sec: f32, start_pitch: f32, cues: CueBank, seed: u64) -> Self {
        Self {
            loop_len_sec,
            position_sec: 0.0,
            elapsed_sec: 0.0,
            params: VoiceParams {
                pitch: start_pitch,
                cutoff_hz: 0.0,
                volume: 1.0,
            },
            cues,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    fn advance(&mut self, dt: f32) {
        self.elapsed_sec += dt;
        self.position_sec =
            (self.position_sec + dt * self.params.pitch).rem_euclid(self.loop_len_sec);
    }
}

impl CueSink for SimVoice {
    fn play_random_cue(&mut self) {
        if let Some(name) = self.cues.pick(&mut self.rng) {
            debug!(name, volume = self.cues.volume(), "rain cue");
        }
    }
}

impl AmbientVoice for SimVoice {
    fn playback(&self) -> PlaybackState {
        PlaybackState {
            fraction: self.position_sec / self.loop_len_sec,
            elapsed_sec: self.elapsed_sec,
        }
    }

    fn apply_params(&mut self, params: VoiceParams) {
        self.params = params;
    }
}

pub fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut cfg = SceneConfig::load_or_default(&args.config);
    if let Some(duration) = args.duration {
        cfg.sim.duration_sec = duration;
    }
    if let Some(seed) = args.seed {
        cfg.sim.seed = seed;
    }

    let dt = 1.0 / cfg.sim.tick_hz;
    let fall_speed = cfg.sim.fall_speed;
    let total_ticks = (cfg.sim.duration_sec * cfg.sim.tick_hz).round() as u64;
    let ticks_per_sec = cfg.sim.tick_hz.round() as u64;

    let mut backend = TraceBackend::default();
    let mut voice = SimVoice::new(
        cfg.sim.ambient_loop_sec,
        cfg.ambience.start_pitch,
        CueBank::from_config(&cfg.cues),
        cfg.sim.seed ^ 0x5eaf00d,
    );
    let mut scene = Scene::new(cfg)?;

    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_for_ctrlc = stop_flag.clone();
    ctrlc::set_handler(move || {
        stop_flag_for_ctrlc.store(true, Ordering::SeqCst);
    })?;

    info!(total_ticks, "scene start");
    for _ in 0..total_ticks {
        if stop_flag.load(Ordering::SeqCst) {
            info!("stop requested, ending scene");
            break;
        }

        // External integration: constant fall, waterline at y = 0.
        let falling: Vec<(DropId, Vec2)> = scene
            .rainfall()
            .drops()
            .iter()
            .filter(|d| d.is_falling())
            .map(|d| (d.id, d.position + Vec2::new(0.0, -fall_speed * dt)))
            .collect();
        for (id, position) in falling {
            scene.rainfall_mut().set_position(id, position);
            if position.y <= 0.0 {
                scene.signal_collision(id);
            }
        }

        voice.advance(dt);
        scene.tick(&mut backend, &mut voice);

        if ticks_per_sec > 0 && scene.now() % (ticks_per_sec * 5) == 0 {
            let params = voice.params;
            info!(
                t = scene.elapsed_sec(),
                drops = scene.rainfall().drops().len(),
                pending = scene.rainfall().pending_resolutions(),
                pitch = params.pitch,
                cutoff_hz = params.cutoff_hz,
                volume = params.volume,
                "scene status"
            );
        }
    }

    info!(
        spawned = backend.spawned,
        effects = backend.effects,
        despawned = backend.despawned,
        alive = scene.rainfall().drops().len(),
        "scene finished"
    );
    Ok(())
}
