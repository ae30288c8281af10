use std::f32::consts::PI;

use crate::audio::{PlaybackState, VoiceParams};
use crate::config::AmbienceConfig;
use crate::core::util::lerp;

/// Derives pitch, low-pass cutoff, and volume for the looping sea voice.
///
/// Pure per-tick mapping: the only state is the shaping config and the start
/// pitch captured once at construction.
#[derive(Debug, Clone)]
pub struct SeaShaper {
    cfg: AmbienceConfig,
    start_pitch: f32,
}

impl SeaShaper {
    pub fn new(cfg: AmbienceConfig, start_pitch: f32) -> Self {
        Self { cfg, start_pitch }
    }

    pub fn shape(&self, state: PlaybackState) -> VoiceParams {
        VoiceParams {
            pitch: self.pitch(state.elapsed_sec),
            cutoff_hz: self.cutoff(state.fraction),
            volume: self.volume(state.elapsed_sec, state.fraction),
        }
    }

    /// Slow oscillation around the starting pitch. Cosine rather than sine
    /// only for phase variety; it starts at the peak offset.
    fn pitch(&self, elapsed: f32) -> f32 {
        self.start_pitch + (elapsed * self.cfg.pitch_freq).cos() * self.cfg.pitch_amount
    }

    /// One arc per loop: minimum at the loop edges, maximum at the midpoint.
    /// Derived from the playback fraction, never the clock, so pitch-induced
    /// playback speed changes cannot desynchronize the sweep from the loop.
    fn cutoff(&self, fraction: f32) -> f32 {
        let min = self.cfg.filter_min_cutoff;
        let max = self.cfg.filter_max_cutoff;
        (min + (fraction * PI).sin() * (max - min)).clamp(min, max)
    }

    fn volume(&self, elapsed: f32, fraction: f32) -> f32 {
        let fade_start = 1.0 - self.cfg.fade_out_max_dur;
        if fraction < fade_start {
            return 1.0;
        }
        if self.cfg.fade_out_amount == 0.0 {
            return 1.0;
        }

        // Rescale the fade window onto [0.5, 1] so the envelope rides the
        // falling quarter of the sine: 1 at the window start, 0 at loop end.
        // fade_out_max_dur > 0 is enforced at config validation, so the
        // window width never divides by zero.
        let scaled = (fraction - fade_start) / (1.0 - fade_start) * 0.5 + 0.5;
        let envelope = (scaled * PI).sin();

        // Slow modulator independent of playback position. Cosine is 1 at
        // t=0, so a zero fade_out_dur_freq leaves the volume at 1 instead of
        // snapping down when the fade window is entered.
        let mix = ((elapsed * self.cfg.fade_out_dur_freq).cos() + 1.0) / 2.0;
        let modulated = lerp(1.0, envelope, mix);

        let min_vol = 1.0 - self.cfg.fade_out_amount;
        (modulated * (1.0 - min_vol) + min_vol).clamp(min_vol, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shaper_with(cfg: AmbienceConfig) -> SeaShaper {
        let start_pitch = cfg.start_pitch;
        SeaShaper::new(cfg, start_pitch)
    }

    #[test]
    fn pitch_oscillates_around_start() {
        let cfg = AmbienceConfig {
            pitch_freq: 2.0,
            pitch_amount: 0.1,
            start_pitch: 1.5,
            ..AmbienceConfig::default()
        };
        let shaper = shaper_with(cfg);
        for i in 0..500 {
            let elapsed = i as f32 * 0.05;
            let p = shaper.shape(PlaybackState {
                fraction: 0.0,
                elapsed_sec: elapsed,
            });
            assert!((1.4..=1.6).contains(&p.pitch), "pitch {} out of band", p.pitch);
        }
        // At t=0 the cosine is at its peak.
        let p0 = shaper.shape(PlaybackState::default());
        assert!((p0.pitch - 1.6).abs() < 1e-6);
    }

    #[test]
    fn cutoff_arc_endpoints() {
        let cfg = AmbienceConfig {
            filter_min_cutoff: 500.0,
            filter_max_cutoff: 8000.0,
            ..AmbienceConfig::default()
        };
        let shaper = shaper_with(cfg);
        let at = |fraction: f32| {
            shaper
                .shape(PlaybackState {
                    fraction,
                    elapsed_sec: 0.0,
                })
                .cutoff_hz
        };
        assert!((at(0.0) - 500.0).abs() < 1.0);
        assert!((at(0.5) - 8000.0).abs() < 1.0);
        assert!((at(1.0) - 500.0).abs() < 1.0);
    }

    #[test]
    fn cutoff_never_escapes_configured_band() {
        let cfg = AmbienceConfig {
            filter_min_cutoff: 650.0,
            filter_max_cutoff: 7200.0,
            ..AmbienceConfig::default()
        };
        let shaper = shaper_with(cfg);
        for i in 0..=1000 {
            let fraction = i as f32 / 1000.0;
            let c = shaper
                .shape(PlaybackState {
                    fraction,
                    elapsed_sec: 0.0,
                })
                .cutoff_hz;
            assert!((650.0..=7200.0).contains(&c), "cutoff {c} at fraction {fraction}");
        }
    }

    #[test]
    fn volume_is_full_before_fade_window() {
        let cfg = AmbienceConfig {
            fade_out_max_dur: 0.25,
            fade_out_amount: 0.6,
            ..AmbienceConfig::default()
        };
        let shaper = shaper_with(cfg);
        for i in 0..100 {
            let fraction = i as f32 / 100.0 * 0.74;
            let v = shaper
                .shape(PlaybackState {
                    fraction,
                    elapsed_sec: 123.4,
                })
                .volume;
            assert_eq!(v, 1.0, "fraction {fraction} is before the fade window");
        }
    }

    #[test]
    fn volume_bounded_by_fade_amount() {
        let cfg = AmbienceConfig {
            fade_out_max_dur: 0.4,
            fade_out_amount: 0.7,
            ..AmbienceConfig::default()
        };
        let shaper = shaper_with(cfg);
        for i in 0..=200 {
            for j in 0..=100 {
                let elapsed = i as f32 * 0.37;
                let fraction = j as f32 / 100.0;
                let v = shaper
                    .shape(PlaybackState {
                        fraction,
                        elapsed_sec: elapsed,
                    })
                    .volume;
                assert!(
                    (0.3..=1.0).contains(&v),
                    "volume {v} at elapsed={elapsed} fraction={fraction}"
                );
            }
        }
    }

    #[test]
    fn zero_fade_amount_short_circuits_to_full_volume() {
        let cfg = AmbienceConfig {
            fade_out_amount: 0.0,
            fade_out_max_dur: 1.0,
            ..AmbienceConfig::default()
        };
        let shaper = shaper_with(cfg);
        for j in 0..=100 {
            let fraction = j as f32 / 100.0;
            let v = shaper
                .shape(PlaybackState {
                    fraction,
                    elapsed_sec: 55.5,
                })
                .volume;
            assert_eq!(v, 1.0);
        }
    }
}
