//! Tuning parameters for the gesture detector.
//!
//! Everything the historical firmware selected with preprocessor switches is
//! an explicit runtime option here: the shake variance gate, sample
//! quantization, float vs fixed feature arithmetic, and the thresholded
//! gravity filter.

/// Arithmetic used for the directional dot features.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FeatureArith {
    /// Software float cosine similarity.
    #[default]
    Float,
    /// 16-bit fixed-point cosine similarity, for targets where software
    /// float is too slow. Agrees with `Float` within 0.03 on the cosine.
    Fixed,
}

#[derive(Clone, Copy, Debug)]
pub struct DetectorConfig {
    /// Minimum milliseconds between processed ticks.
    pub sample_interval_ms: u32,
    /// One-pole coefficient of the gravity tracker.
    pub gravity_alpha: f32,
    /// When set, gravity holds still while any raw component exceeds this.
    pub gravity_hold_thresh: Option<f32>,
    /// Squared-length floor below which a sample carries no direction.
    pub min_len_thresh: f32,

    /// Shake score threshold and hysteresis counts.
    pub shake_threshold: f32,
    pub shake_event_count: i32,
    pub shake_event_low_count: i32,
    /// Variance gate on the magnitude-squared window: shake scoring only
    /// runs while the signal variance strictly exceeds this. `None` scores
    /// every tick.
    pub shake_gate: Option<f32>,

    /// Tap score threshold and hysteresis count.
    pub tap_threshold: f32,
    pub tap_event_count: i32,
    /// A tap is only considered while the large-window variance stays at or
    /// below this (the quiet gate).
    pub tap_quiet_thresh: f32,

    /// Coarsen samples to multiples of this factor before the dot features.
    pub quantize: Option<i32>,
    pub feature_arith: FeatureArith,
    /// Also score the slow (wavelength-8) dot feature. Runtime-togglable via
    /// `toggle_alg`.
    pub allow_slow_gesture: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: 18,
            gravity_alpha: 0.005,
            gravity_hold_thresh: None,
            min_len_thresh: 1.0,
            shake_threshold: 0.4,
            shake_event_count: 6,
            shake_event_low_count: 3,
            shake_gate: Some(4.0),
            tap_threshold: 200.0,
            tap_event_count: 1,
            tap_quiet_thresh: 25.0,
            quantize: None,
            feature_arith: FeatureArith::Float,
            allow_slow_gesture: false,
        }
    }
}

/// Rejected configuration values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    ZeroSampleInterval,
    AlphaOutOfRange,
    NonPositiveEventCount,
    BadQuantizeFactor,
}

impl DetectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_interval_ms == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        if !(self.gravity_alpha > 0.0 && self.gravity_alpha <= 1.0) {
            return Err(ConfigError::AlphaOutOfRange);
        }
        if self.shake_event_count <= 0
            || self.shake_event_low_count < 0
            || self.tap_event_count <= 0
        {
            return Err(ConfigError::NonPositiveEventCount);
        }
        if let Some(factor) = self.quantize {
            if factor <= 0 {
                return Err(ConfigError::BadQuantizeFactor);
            }
        }
        Ok(())
    }
}
