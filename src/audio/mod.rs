pub mod cues;

use glam::Vec2;

/// Opaque collaborator handle for a spawned entity. The core only stores it
/// to hand back through `clear_trail` and `despawn_entity`.
pub type EntityHandle = u64;

/// Snapshot of the looping ambient voice, polled once per tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlaybackState {
    /// Position within the current loop, wrapping in [0, 1).
    pub fraction: f32,
    /// Monotonic simulation clock in seconds.
    pub elapsed_sec: f32,
}

/// Parameters applied to the ambient voice once per tick. The sea shaper is
/// the sole writer of all three values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VoiceParams {
    pub pitch: f32,
    pub cutoff_hz: f32,
    pub volume: f32,
}

/// Scene-side collaborator: entity and effect instantiation, trail control.
pub trait RainBackend {
    fn spawn_entity(&mut self, position: Vec2, rotation: f32) -> EntityHandle;
    /// Fire-and-forget visual effect; the return value is never consulted.
    fn spawn_effect(&mut self, position: Vec2, rotation: f32);
    fn clear_trail(&mut self, handle: EntityHandle);
    fn despawn_entity(&mut self, handle: EntityHandle);
}

/// One-shot playback from the pre-configured cue collection. The caller never
/// selects which cue.
pub trait CueSink {
    fn play_random_cue(&mut self);
}

/// The single looping ambient voice shaped by the sea shaper.
pub trait AmbientVoice: CueSink {
    fn playback(&self) -> PlaybackState;
    fn apply_params(&mut self, params: VoiceParams);
}
