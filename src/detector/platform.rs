//! Host collaborator boundary.

use crate::vector::Vec3;

/// Latest accelerometer reading, one signed byte per axis.
pub type Sample = Vec3<i8>;

/// Everything the detector needs from its host environment.
///
/// The buttons and display hooks are diagnostic-only: the detection
/// algorithm behaves identically when they keep their no-op defaults, which
/// is also how the test harness runs.
pub trait Platform {
    /// Refresh sensor hardware state before reading.
    fn update_accelerometer(&mut self);

    fn accel_sample(&mut self) -> Sample;

    /// Monotonic low-resolution milliseconds. May wrap; the detector's tick
    /// gating handles the rollover.
    fn system_time(&mut self) -> u32;

    fn button_a(&mut self) -> bool {
        false
    }

    fn button_b(&mut self) -> bool {
        false
    }

    fn show_char(&mut self, _ch: char, _duration_ms: u32) {}

    /// Fatal-error escape hatch. Unused on the detector's normal paths.
    fn panic(&mut self) -> ! {
        panic!("gesture platform fault");
    }
}
