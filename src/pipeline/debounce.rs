//! Count-based debouncing for the diagnostic buttons.

/// Debounced click detector over a raw pressed/released level.
///
/// A press must hold for `up_thresh` polls to latch; the click fires once on
/// the release path, when the counter decays back through `down_thresh`.
#[derive(Clone, Debug)]
pub struct Debouncer {
    count: i32,
    latched: bool,
    up_thresh: i32,
    down_thresh: i32,
}

impl Debouncer {
    pub fn new(up_thresh: i32, down_thresh: i32) -> Self {
        Self {
            count: 0,
            latched: false,
            up_thresh,
            down_thresh,
        }
    }

    pub fn poll(&mut self, pressed: bool) -> bool {
        if pressed {
            self.count += 1;
            if self.count >= self.up_thresh {
                self.latched = true;
                self.count = self.up_thresh;
            }
        } else if self.count > 0 {
            self.count -= 1;
            if self.count <= self.down_thresh && self.latched {
                self.latched = false;
                self.count = 0;
                return true;
            }
        }
        false
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(4, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_fires_once_on_release() {
        let mut button = Debouncer::default();
        for _ in 0..6 {
            assert!(!button.poll(true));
        }
        assert!(!button.poll(false));
        assert!(button.poll(false));
        // Further release polls stay quiet.
        for _ in 0..6 {
            assert!(!button.poll(false));
        }
    }

    #[test]
    fn short_bounce_never_latches() {
        let mut button = Debouncer::default();
        for _ in 0..3 {
            button.poll(true);
        }
        for _ in 0..6 {
            assert!(!button.poll(false));
        }
    }

    #[test]
    fn release_glitch_during_press_is_absorbed() {
        let mut button = Debouncer::default();
        for _ in 0..4 {
            button.poll(true);
        }
        assert!(!button.poll(false)); // count 3, above down_thresh
        for _ in 0..4 {
            assert!(!button.poll(true));
        }
        assert!(!button.poll(false));
        assert!(button.poll(false));
    }
}
