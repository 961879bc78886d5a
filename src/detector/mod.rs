//! Shake/tap detection over the gravity-removed accelerometer stream.

pub mod config;
pub mod platform;
pub mod template_match;

pub use config::{ConfigError, DetectorConfig, FeatureArith};
pub use platform::{Platform, Sample};

use crate::numeric::bits::clamp_to_i8;
use crate::numeric::fastmath::fast_inv_sqrt;
use crate::numeric::Fixed;
use crate::pipeline::{
    AxisZ, Debouncer, EventThresholdFilter, HistoryBuffer, Identity, MagSq, RunningStats,
    SimpleIirFilter,
};
use crate::vector::{dot_norm, dot_norm_fixed, Vec3};

// Oscillation wavelengths (in ticks) probed by the directional features, and
// the windows their running means use.
const DOT_WAVELENGTH_FAST: usize = 5;
const DOT_WAVELENGTH_SLOW: usize = 8;
const DOT_MEAN_WINDOW_FAST: usize = DOT_WAVELENGTH_FAST;
const DOT_MEAN_WINDOW_SLOW: usize = DOT_WAVELENGTH_SLOW;

const SHAKE_STATS_WINDOW: usize = 10;
const SAMPLE_HISTORY_LEN: usize = 2 * DOT_WAVELENGTH_SLOW + SHAKE_STATS_WINDOW;

// Ticks a quiet window keeps the tap check armed.
const TAP_K: usize = 2;
const TAP_LARGE_WINDOW: usize = 8;
const TAP_IMPULSE_WINDOW: usize = 2;

const QUANT_FIXED_FRAC: i32 = 7;
type FeatureFixed = Fixed<i16, QUANT_FIXED_FRAC>;

/// Gesture codes reported by [`GestureDetector::current_gesture`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    None,
    Shake,
    Tap,
}

impl Gesture {
    /// Numeric event code for hosts that forward gestures onto an event bus.
    pub fn code(self) -> i32 {
        match self {
            Gesture::None => 0,
            Gesture::Shake => 100,
            Gesture::Tap => 101,
        }
    }
}

/// The detection pipeline. One instance owns every buffer and filter; no
/// allocation happens after construction and nothing blocks.
///
/// Call [`init`](Self::init) once to prime the gravity estimate, then
/// [`system_tick`](Self::system_tick) from the host's polling loop at least
/// once per sample interval; extra calls are absorbed by the internal rate
/// gate.
pub struct GestureDetector {
    config: DetectorConfig,
    state: Gesture,

    gravity: Vec3<f32>,
    gravity_filter: SimpleIirFilter<Vec3<f32>, f32>,

    // Gravity-removed samples, shared by every windowed statistic.
    samples: HistoryBuffer<Sample, SAMPLE_HISTORY_LEN>,
    tap_large_stats: RunningStats<TAP_LARGE_WINDOW, i64, AxisZ>,
    tap_impulse_stats: RunningStats<TAP_IMPULSE_WINDOW, i64, AxisZ>,
    shake_gate_stats: RunningStats<SHAKE_STATS_WINDOW, f32, MagSq>,

    dot_fast_delay: HistoryBuffer<f32, { DOT_MEAN_WINDOW_FAST + 1 }>,
    dot_fast_stats: RunningStats<DOT_MEAN_WINDOW_FAST, f32, Identity>,
    dot_slow_delay: HistoryBuffer<f32, { DOT_MEAN_WINDOW_SLOW + 1 }>,
    dot_slow_stats: RunningStats<DOT_MEAN_WINDOW_SLOW, f32, Identity>,

    quiet_var_delay: HistoryBuffer<f32, { TAP_K + 1 }>,
    tap_countdown: u32,

    shake_event_filter: EventThresholdFilter<f32>,
    tap_event_filter: EventThresholdFilter<f32>,

    prev_time: u32,
    button_a: Debouncer,
    button_b: Debouncer,
    printing: bool,

    last_raw: Sample,
    last_filtered: Sample,
}

impl GestureDetector {
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: Gesture::None,
            gravity: Vec3::default(),
            gravity_filter: SimpleIirFilter::new(config.gravity_alpha),
            samples: HistoryBuffer::new(),
            tap_large_stats: RunningStats::new(),
            tap_impulse_stats: RunningStats::new(),
            shake_gate_stats: RunningStats::new(),
            dot_fast_delay: HistoryBuffer::new(),
            dot_fast_stats: RunningStats::new(),
            dot_slow_delay: HistoryBuffer::new(),
            dot_slow_stats: RunningStats::new(),
            quiet_var_delay: HistoryBuffer::new(),
            tap_countdown: 0,
            shake_event_filter: EventThresholdFilter::new(
                config.shake_threshold,
                config.shake_event_count,
                config.shake_event_low_count,
            ),
            tap_event_filter: EventThresholdFilter::new(
                config.tap_threshold,
                config.tap_event_count,
                0,
            ),
            prev_time: 0,
            button_a: Debouncer::default(),
            button_b: Debouncer::default(),
            printing: false,
            last_raw: Vec3::default(),
            last_filtered: Vec3::default(),
            config,
        })
    }

    /// Primes the gravity estimate from the first live sample. Without this
    /// the gravity tracker starts from zero and the first seconds of
    /// gravity-removed samples are garbage.
    pub fn init<P: Platform>(&mut self, platform: &mut P) {
        platform.update_accelerometer();
        let sample = platform.accel_sample();
        let float_sample = Vec3::<f32>::from(sample);
        self.gravity = float_sample;
        self.gravity_filter.init(float_sample);
        log::info!("gesture detector primed, gravity {float_sample:?}");
    }

    /// Advance the detector if at least one sample interval has elapsed.
    /// The elapsed-time comparison survives rollover of the platform's
    /// low-resolution clock.
    pub fn system_tick<P: Platform>(&mut self, platform: &mut P) {
        let time = platform.system_time();
        let elapsed = time.wrapping_sub(self.prev_time);
        if elapsed >= self.config.sample_interval_ms || time < self.prev_time {
            self.prev_time = time;

            let a_clicked = self.button_a.poll(platform.button_a());
            if a_clicked {
                self.toggle_printing();
            }
            let b_clicked = self.button_b.poll(platform.button_b());
            if b_clicked {
                self.toggle_alg(platform);
            }

            self.state = self.detect_gesture(platform);
        }
    }

    /// Gesture found by the most recent processed tick.
    pub fn current_gesture(&self) -> Gesture {
        self.state
    }

    pub fn toggle_printing(&mut self) {
        self.printing = !self.printing;
    }

    /// Flips the slow-wavelength feature on or off, echoing the active
    /// variant on the host display.
    pub fn toggle_alg<P: Platform>(&mut self, platform: &mut P) {
        self.config.allow_slow_gesture = !self.config.allow_slow_gesture;
        platform.show_char(if self.config.allow_slow_gesture { '2' } else { '1' }, 50);
    }

    /// Distance from the recent sample history to a recorded template, for
    /// hosts matching custom gestures on top of the built-in pair.
    pub fn template_distance(&self, template: &[Sample], resample_rate: usize) -> f32 {
        template_match::template_dist_sq(template, resample_rate, &self.samples)
    }

    fn detect_gesture<P: Platform>(&mut self, platform: &mut P) -> Gesture {
        platform.update_accelerometer();
        let sample = platform.accel_sample();

        let should_check_tap = self.tap_countdown > 0;
        // Gate decisions read the windows as of the previous tick, before
        // this sample lands in the history.
        let should_check_shake = match self.config.shake_gate {
            Some(gate) => self.shake_gate_stats.var() > gate,
            None => true,
        };

        let quiet_var = self.tap_large_stats.var();
        self.quiet_var_delay.add_sample(quiet_var);
        if quiet_var <= self.config.tap_quiet_thresh {
            self.tap_countdown = TAP_K as u32;
        } else if self.tap_countdown > 0 {
            self.tap_countdown -= 1;
        }

        self.process_sample(sample);

        let shake_score = self.shake_prediction();

        if should_check_tap {
            let tap_score = self.tap_prediction();
            if self.tap_event_filter.filter_value(tap_score) {
                self.shake_event_filter.reset();
                log::debug!(
                    "tap: score {tap_score}, raw {:?}",
                    self.last_raw
                );
                return Gesture::Tap;
            }
        }

        if should_check_shake {
            if self.shake_event_filter.filter_value(shake_score) {
                self.tap_event_filter.reset();
                log::debug!(
                    "shake: score {shake_score}, raw {:?}",
                    self.last_raw
                );
                return Gesture::Shake;
            }
        } else {
            // A still signal cannot be mid-shake: flush any stale counts so
            // they do not carry across quiet periods.
            self.shake_event_filter.reset();
        }

        if self.printing {
            log::trace!(
                "{}\t{}\t{}\t{:?}\t{shake_score}",
                platform.system_time(),
                platform.button_a(),
                platform.button_b(),
                self.last_raw,
            );
        }

        Gesture::None
    }

    fn process_sample(&mut self, sample: Sample) {
        self.last_raw = sample;

        let float_sample = Vec3::<f32>::from(sample);
        self.gravity = match self.config.gravity_hold_thresh {
            Some(thresh) => self.gravity_filter.filter_sample_held(float_sample, thresh),
            None => self.gravity_filter.filter_sample(float_sample),
        };

        let current = Vec3::new(
            clamp_to_i8(float_sample.x - self.gravity.x),
            clamp_to_i8(float_sample.y - self.gravity.y),
            clamp_to_i8(float_sample.z - self.gravity.z),
        );
        self.last_filtered = current;

        self.samples.add_sample(current);
        self.tap_large_stats.add_sample(&self.samples);
        self.tap_impulse_stats.add_sample(&self.samples);
        self.shake_gate_stats.add_sample(&self.samples);

        process_dot_feature(
            &self.samples,
            current,
            DOT_WAVELENGTH_FAST,
            &self.config,
            &mut self.dot_fast_delay,
            &mut self.dot_fast_stats,
        );
        if self.config.allow_slow_gesture {
            process_dot_feature(
                &self.samples,
                current,
                DOT_WAVELENGTH_SLOW,
                &self.config,
                &mut self.dot_slow_delay,
                &mut self.dot_slow_stats,
            );
        }
    }

    fn shake_prediction(&self) -> f32 {
        let fast = self.dot_fast_stats.mean();
        if self.config.allow_slow_gesture {
            let slow = self.dot_slow_stats.mean();
            if slow > fast {
                slow
            } else {
                fast
            }
        } else {
            fast
        }
    }

    fn tap_prediction(&self) -> f32 {
        // A dead-quiet preceding window (device resting on a table) damps
        // tap amplitude, so scale the impulse energy up by its inverse.
        let scale = fast_inv_sqrt(1.0 + self.quiet_var_delay.get(TAP_K));
        self.tap_impulse_stats.var() * scale
    }
}

/// Cosine similarity between the current sample and its copies one and two
/// wavelengths back, folded into the feature delay line. Only an
/// opposite-sign pair (anti-phase at one wavelength, in-phase at two) counts
/// as oscillation; everything else contributes zero.
fn process_dot_feature<const DN: usize, const W: usize>(
    samples: &HistoryBuffer<Sample, SAMPLE_HISTORY_LEN>,
    current: Sample,
    wavelength: usize,
    config: &DetectorConfig,
    feature_delay: &mut HistoryBuffer<f32, DN>,
    feature_stats: &mut RunningStats<W, f32, Identity>,
) {
    let half = sample_similarity(current, samples.get(wavelength), config);
    let full = sample_similarity(current, samples.get(2 * wavelength), config);

    let feature = if half < 0.0 && full > 0.0 { full - half } else { 0.0 };
    feature_delay.add_sample(feature);
    feature_stats.add_sample(feature_delay);
}

fn sample_similarity(a: Sample, b: Sample, config: &DetectorConfig) -> f32 {
    let (a, b) = match config.quantize {
        Some(factor) => (quantize_sample(a, factor), quantize_sample(b, factor)),
        None => (a, b),
    };
    match config.feature_arith {
        FeatureArith::Float => dot_norm(&a, &b, config.min_len_thresh),
        FeatureArith::Fixed => dot_norm_fixed(
            &Vec3::<FeatureFixed>::from(a),
            &Vec3::<FeatureFixed>::from(b),
            FeatureFixed::from_f32(config.min_len_thresh),
        )
        .to_f32(),
    }
}

/// Coarsens each component to a multiple of `factor`, toward zero.
fn quantize_sample(sample: Sample, factor: i32) -> Sample {
    sample.map(|c| ((c as i32 / factor) * factor) as i8)
}
