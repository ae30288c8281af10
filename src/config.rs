use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnerConfig {
    #[serde(default = "SpawnerConfig::default_spawn_height")]
    pub spawn_height: f32,
    #[serde(default = "SpawnerConfig::default_spawn_range")]
    pub spawn_range: f32,
    #[serde(default = "SpawnerConfig::default_spawn_count")]
    pub spawn_count: u32,
    #[serde(default = "SpawnerConfig::default_spawn_rate")]
    pub spawn_rate: f32,
    #[serde(default = "SpawnerConfig::default_spawn_chance")]
    pub spawn_chance: f32,
    #[serde(default = "SpawnerConfig::default_wobble_freq")]
    pub wobble_freq: f32,
    #[serde(default = "SpawnerConfig::default_wobble_amount")]
    pub wobble_amount: f32,
    #[serde(default = "SpawnerConfig::default_wobble_randomness")]
    pub wobble_randomness: f32,
}

impl SpawnerConfig {
    fn default_spawn_height() -> f32 {
        12.0
    }
    fn default_spawn_range() -> f32 {
        9.0
    }
    fn default_spawn_count() -> u32 {
        16
    }
    fn default_spawn_rate() -> f32 {
        0.25
    }
    fn default_spawn_chance() -> f32 {
        0.55
    }
    fn default_wobble_freq() -> f32 {
        0.9
    }
    fn default_wobble_amount() -> f32 {
        4.0
    }
    fn default_wobble_randomness() -> f32 {
        0.3
    }
}

impl Default for SpawnerConfig {
    fn default() -> Self {
        Self {
            spawn_height: Self::default_spawn_height(),
            spawn_range: Self::default_spawn_range(),
            spawn_count: Self::default_spawn_count(),
            spawn_rate: Self::default_spawn_rate(),
            spawn_chance: Self::default_spawn_chance(),
            wobble_freq: Self::default_wobble_freq(),
            wobble_amount: Self::default_wobble_amount(),
            wobble_randomness: Self::default_wobble_randomness(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropConfig {
    #[serde(default = "DropConfig::default_max_collision_life")]
    pub max_collision_life: f32,
    #[serde(default = "DropConfig::default_destruction_chance")]
    pub destruction_chance: f32,
}

impl DropConfig {
    fn default_max_collision_life() -> f32 {
        1.2
    }
    fn default_destruction_chance() -> f32 {
        0.2
    }
}

impl Default for DropConfig {
    fn default() -> Self {
        Self {
            max_collision_life: Self::default_max_collision_life(),
            destruction_chance: Self::default_destruction_chance(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbienceConfig {
    #[serde(default = "AmbienceConfig::default_pitch_freq")]
    pub pitch_freq: f32,
    #[serde(default = "AmbienceConfig::default_pitch_amount")]
    pub pitch_amount: f32,
    #[serde(default = "AmbienceConfig::default_start_pitch")]
    pub start_pitch: f32,
    #[serde(default = "AmbienceConfig::default_filter_min_cutoff")]
    pub filter_min_cutoff: f32,
    #[serde(default = "AmbienceConfig::default_filter_max_cutoff")]
    pub filter_max_cutoff: f32,
    #[serde(default = "AmbienceConfig::default_fade_out_dur_freq")]
    pub fade_out_dur_freq: f32,
    #[serde(default = "AmbienceConfig::default_fade_out_max_dur")]
    pub fade_out_max_dur: f32,
    #[serde(default = "AmbienceConfig::default_fade_out_amount")]
    pub fade_out_amount: f32,
}

impl AmbienceConfig {
    fn default_pitch_freq() -> f32 {
        0.11
    }
    fn default_pitch_amount() -> f32 {
        0.04
    }
    fn default_start_pitch() -> f32 {
        1.0
    }
    fn default_filter_min_cutoff() -> f32 {
        650.0
    }
    fn default_filter_max_cutoff() -> f32 {
        7200.0
    }
    fn default_fade_out_dur_freq() -> f32 {
        0.07
    }
    fn default_fade_out_max_dur() -> f32 {
        0.35
    }
    fn default_fade_out_amount() -> f32 {
        0.55
    }
}

impl Default for AmbienceConfig {
    fn default() -> Self {
        Self {
            pitch_freq: Self::default_pitch_freq(),
            pitch_amount: Self::default_pitch_amount(),
            start_pitch: Self::default_start_pitch(),
            filter_min_cutoff: Self::default_filter_min_cutoff(),
            filter_max_cutoff: Self::default_filter_max_cutoff(),
            fade_out_dur_freq: Self::default_fade_out_dur_freq(),
            fade_out_max_dur: Self::default_fade_out_max_dur(),
            fade_out_amount: Self::default_fade_out_amount(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CueConfig {
    #[serde(default = "CueConfig::default_names")]
    pub names: Vec<String>,
    #[serde(default = "CueConfig::default_volume")]
    pub volume: f32,
}

impl CueConfig {
    fn default_names() -> Vec<String> {
        ["drip_soft", "drip_mid", "drip_bright", "plink"]
            .map(String::from)
            .to_vec()
    }
    fn default_volume() -> f32 {
        0.8
    }
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            names: Self::default_names(),
            volume: Self::default_volume(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default = "SimConfig::default_seed")]
    pub seed: u64,
    #[serde(default = "SimConfig::default_tick_hz")]
    pub tick_hz: f32,
    #[serde(default = "SimConfig::default_duration_sec")]
    pub duration_sec: f32,
    #[serde(default = "SimConfig::default_fall_speed")]
    pub fall_speed: f32,
    #[serde(default = "SimConfig::default_ambient_loop_sec")]
    pub ambient_loop_sec: f32,
}

impl SimConfig {
    fn default_seed() -> u64 {
        0
    }
    fn default_tick_hz() -> f32 {
        60.0
    }
    fn default_duration_sec() -> f32 {
        30.0
    }
    fn default_fall_speed() -> f32 {
        7.5
    }
    fn default_ambient_loop_sec() -> f32 {
        24.0
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: Self::default_seed(),
            tick_hz: Self::default_tick_hz(),
            duration_sec: Self::default_duration_sec(),
            fall_speed: Self::default_fall_speed(),
            ambient_loop_sec: Self::default_ambient_loop_sec(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SceneConfig {
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub spawner: SpawnerConfig,
    #[serde(default)]
    pub drops: DropConfig,
    #[serde(default)]
    pub ambience: AmbienceConfig,
    #[serde(default)]
    pub cues: CueConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("spawn_rate must be positive and finite, got {0}")]
    SpawnRate(f32),
    #[error("tick_hz must be positive and finite, got {0}")]
    TickHz(f32),
    #[error("{name} must be within [0, 1], got {value}")]
    UnitRange { name: &'static str, value: f32 },
    #[error("{name} must be non-negative and finite, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("filter_min_cutoff {min} exceeds filter_max_cutoff {max}")]
    FilterRange { min: f32, max: f32 },
    #[error("fade_out_max_dur must be within (0, 1], got {0}")]
    FadeOutMaxDur(f32),
}

impl SceneConfig {
    /// Reject out-of-range parameters before any scheduling begins. The tick
    /// loop never re-checks these.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sim.tick_hz.is_finite() && self.sim.tick_hz > 0.0) {
            return Err(ConfigError::TickHz(self.sim.tick_hz));
        }
        let s = &self.spawner;
        if !(s.spawn_rate.is_finite() && s.spawn_rate > 0.0) {
            return Err(ConfigError::SpawnRate(s.spawn_rate));
        }
        non_negative("spawn_range", s.spawn_range)?;
        non_negative("wobble_randomness", s.wobble_randomness)?;
        unit_range("spawn_chance", s.spawn_chance)?;

        let d = &self.drops;
        non_negative("max_collision_life", d.max_collision_life)?;
        unit_range("destruction_chance", d.destruction_chance)?;

        let a = &self.ambience;
        if a.filter_min_cutoff > a.filter_max_cutoff {
            return Err(ConfigError::FilterRange {
                min: a.filter_min_cutoff,
                max: a.filter_max_cutoff,
            });
        }
        if !(a.fade_out_max_dur > 0.0 && a.fade_out_max_dur <= 1.0) {
            return Err(ConfigError::FadeOutMaxDur(a.fade_out_max_dur));
        }
        unit_range("fade_out_amount", a.fade_out_amount)?;
        unit_range("cue volume", self.cues.volume)?;
        Ok(())
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    eprintln!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write commented defaults and return them.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                let commented = comment_out_values(&text);
                if let Err(err) = fs::write(path_obj, commented) {
                    eprintln!("Failed to write default config to {path}: {err}");
                }
            }
            Err(_) => {
                eprintln!("Failed to serialize default config; continuing with defaults");
            }
        }
        default_cfg
    }
}

/// Keep section headers, comment out every value line so the written file
/// documents the defaults without pinning them.
fn comment_out_values(text: &str) -> String {
    let mut out = String::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || (trimmed.starts_with('[') && trimmed.ends_with(']')) {
            out.push_str(line);
        } else {
            out.push_str("# ");
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

fn unit_range(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::UnitRange { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
