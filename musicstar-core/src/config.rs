use std::path::{Path, PathBuf};

use serde::Deserialize;

use musicstar_types::{ParamRange, SequencerSettings, STEPS};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

const DEFAULT_FRAME_RATE: u32 = 60;
const DEFAULT_TUNING_A4: f32 = 440.0;

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    sequencer: SequencerConfig,
    #[serde(default)]
    lanes: LanesConfig,
    #[serde(default)]
    driver: DriverConfig,
}

#[derive(Deserialize, Default)]
struct SequencerConfig {
    tempo_min: Option<f32>,
    tempo_max: Option<f32>,
    default_tempo: Option<f32>,
    freq_min: Option<f32>,
    freq_max: Option<f32>,
    default_freq_percent: Option<f32>,
}

#[derive(Deserialize, Default)]
struct LanesConfig {
    top_seed: Option<Vec<usize>>,
    bottom_seed: Option<Vec<usize>>,
}

#[derive(Deserialize, Default)]
struct DriverConfig {
    frame_rate: Option<u32>,
    tuning_a4: Option<f32>,
}

pub struct Config {
    sequencer: SequencerConfig,
    lanes: LanesConfig,
    driver: DriverConfig,
}

impl Config {
    /// Embedded defaults, overridden by the user's config file if present.
    pub fn load() -> Self {
        match user_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Self::embedded(),
        }
    }

    /// Embedded defaults, overridden by `path`. Unreadable or malformed
    /// overrides are logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        let mut config = Self::embedded();
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                Ok(user) => config.merge(user),
                Err(e) => {
                    log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                }
            },
            Err(e) => {
                log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
            }
        }
        config
    }

    /// Embedded defaults overridden by `contents`.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let user: ConfigFile = toml::from_str(contents)?;
        let mut config = Self::embedded();
        config.merge(user);
        Ok(config)
    }

    fn embedded() -> Self {
        let base: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            log::error!(target: "config", "embedded config.toml is malformed: {}", e);
            ConfigFile::default()
        });
        Config {
            sequencer: base.sequencer,
            lanes: base.lanes,
            driver: base.driver,
        }
    }

    fn merge(&mut self, user: ConfigFile) {
        merge_sequencer(&mut self.sequencer, user.sequencer);
        merge_lanes(&mut self.lanes, user.lanes);
        merge_driver(&mut self.driver, user.driver);
    }

    /// Sequencer construction settings, with invalid values replaced by defaults.
    pub fn settings(&self) -> SequencerSettings {
        let fallback = SequencerSettings::default();
        let s = &self.sequencer;

        let tempo_range = sanitize_range(
            ParamRange::linear(
                s.tempo_min.unwrap_or(fallback.tempo_range.min),
                s.tempo_max.unwrap_or(fallback.tempo_range.max),
            ),
            fallback.tempo_range,
            "tempo",
        );
        let freq_range = sanitize_range(
            ParamRange::exponential(
                s.freq_min.unwrap_or(fallback.freq_range.min),
                s.freq_max.unwrap_or(fallback.freq_range.max),
            ),
            fallback.freq_range,
            "freq",
        );

        SequencerSettings {
            tempo_range,
            default_tempo: tempo_range.clamp(s.default_tempo.unwrap_or(fallback.default_tempo)),
            freq_range,
            default_freq_percent: s
                .default_freq_percent
                .filter(|p| p.is_finite())
                .unwrap_or(fallback.default_freq_percent)
                .clamp(0.0, 1.0),
            top_seed: sanitize_seed(self.lanes.top_seed.as_deref(), &fallback.top_seed),
            bottom_seed: sanitize_seed(self.lanes.bottom_seed.as_deref(), &fallback.bottom_seed),
        }
    }

    /// Host loop frame rate (clamped to 1..=1000).
    pub fn frame_rate(&self) -> u32 {
        self.driver
            .frame_rate
            .unwrap_or(DEFAULT_FRAME_RATE)
            .clamp(1, 1000)
    }

    /// Reference pitch for the note tables.
    pub fn tuning_a4(&self) -> f32 {
        self.driver
            .tuning_a4
            .filter(|a4| a4.is_finite() && *a4 > 0.0)
            .unwrap_or(DEFAULT_TUNING_A4)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("musicstar").join("config.toml"))
}

fn sanitize_range(range: ParamRange, fallback: ParamRange, name: &str) -> ParamRange {
    if range.is_valid() && range.min > 0.0 {
        range
    } else {
        log::warn!(target: "config", "invalid {} range {}..{}, using defaults", name, range.min, range.max);
        fallback
    }
}

fn sanitize_seed(seed: Option<&[usize]>, fallback: &[usize]) -> Vec<usize> {
    match seed {
        Some(steps) => {
            let kept: Vec<usize> = steps.iter().copied().filter(|&s| s < STEPS).collect();
            if kept.len() != steps.len() {
                log::warn!(target: "config", "dropping seed steps outside 0..{}", STEPS);
            }
            kept
        }
        None => fallback.to_vec(),
    }
}

fn merge_sequencer(base: &mut SequencerConfig, user: SequencerConfig) {
    if user.tempo_min.is_some() {
        base.tempo_min = user.tempo_min;
    }
    if user.tempo_max.is_some() {
        base.tempo_max = user.tempo_max;
    }
    if user.default_tempo.is_some() {
        base.default_tempo = user.default_tempo;
    }
    if user.freq_min.is_some() {
        base.freq_min = user.freq_min;
    }
    if user.freq_max.is_some() {
        base.freq_max = user.freq_max;
    }
    if user.default_freq_percent.is_some() {
        base.default_freq_percent = user.default_freq_percent;
    }
}

fn merge_lanes(base: &mut LanesConfig, user: LanesConfig) {
    if user.top_seed.is_some() {
        base.top_seed = user.top_seed;
    }
    if user.bottom_seed.is_some() {
        base.bottom_seed = user.bottom_seed;
    }
}

fn merge_driver(base: &mut DriverConfig, user: DriverConfig) {
    if user.frame_rate.is_some() {
        base.frame_rate = user.frame_rate;
    }
    if user.tuning_a4.is_some() {
        base.tuning_a4 = user.tuning_a4;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_embedded_config() {
        let config = Config::embedded();
        let settings = config.settings();
        assert_eq!(settings.tempo_range, ParamRange::linear(40.0, 1000.0));
        assert_eq!(settings.default_tempo, 120.0);
        assert_eq!(settings.freq_range, ParamRange::exponential(300.0, 12000.0));
        assert_eq!(settings.default_freq_percent, 1.0);
        assert_eq!(settings.top_seed, vec![0]);
        assert_eq!(settings.bottom_seed, vec![5]);
        assert_eq!(config.frame_rate(), 60);
        assert_eq!(config.tuning_a4(), 440.0);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config = Config::parse(
            r#"
            [sequencer]
            tempo_max = 300.0

            [lanes]
            bottom_seed = [1, 4, 7]
            "#,
        )
        .unwrap();
        let settings = config.settings();
        assert_eq!(settings.tempo_range.min, 40.0);
        assert_eq!(settings.tempo_range.max, 300.0);
        assert_eq!(settings.top_seed, vec![0]);
        assert_eq!(settings.bottom_seed, vec![1, 4, 7]);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::parse(
            r#"
            [sequencer]
            tempo_min = 500.0
            tempo_max = 100.0
            freq_min = 0.0
            default_freq_percent = 3.0

            [lanes]
            top_seed = [2, 12, 99]

            [driver]
            frame_rate = 0
            tuning_a4 = -1.0
            "#,
        )
        .unwrap();
        let settings = config.settings();
        assert_eq!(settings.tempo_range, ParamRange::linear(40.0, 1000.0));
        assert_eq!(settings.freq_range, ParamRange::exponential(300.0, 12000.0));
        assert_eq!(settings.default_freq_percent, 1.0);
        assert_eq!(settings.top_seed, vec![2]);
        assert_eq!(config.frame_rate(), 1);
        assert_eq!(config.tuning_a4(), 440.0);
    }

    #[test]
    fn test_default_tempo_clamped_into_range() {
        let config = Config::parse("[sequencer]\ndefault_tempo = 5000.0\n").unwrap();
        assert_eq!(config.settings().default_tempo, 1000.0);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(Config::parse("[sequencer\ntempo_min = ").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "[driver]\nframe_rate = 120").unwrap();

        let config = Config::load_from(&path);
        assert_eq!(config.frame_rate(), 120);
        assert_eq!(config.settings().default_tempo, 120.0);
    }

    #[test]
    fn test_load_from_malformed_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "frame_rate = [").unwrap();
        let config = Config::load_from(&path);
        assert_eq!(config.frame_rate(), 60);

        let missing = dir.path().join("missing.toml");
        assert_eq!(Config::load_from(&missing).frame_rate(), 60);
    }
}
