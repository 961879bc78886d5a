//! Distance between the live sample history and a recorded gesture
//! template, for template-matched custom gestures.

use crate::pipeline::HistoryBuffer;
use crate::vector::{norm_sq, Vec3};

/// One recorded shake cycle at the nominal tick rate, stored in time order
/// (oldest first).
pub const SHAKE_TEMPLATE: [Vec3<i8>; 16] = [
    Vec3 { x: -10, y: 7, z: -91 },
    Vec3 { x: 43, y: 0, z: -102 },
    Vec3 { x: 107, y: -37, z: -101 },
    Vec3 { x: 109, y: 5, z: -75 },
    Vec3 { x: 98, y: 56, z: -66 },
    Vec3 { x: 9, y: 97, z: -36 },
    Vec3 { x: -67, y: 78, z: -65 },
    Vec3 { x: -86, y: 40, z: -127 },
    Vec3 { x: -87, y: 55, z: -103 },
    Vec3 { x: -29, y: 64, z: -97 },
    Vec3 { x: 43, y: 64, z: -84 },
    Vec3 { x: 81, y: 28, z: -82 },
    Vec3 { x: 108, y: -41, z: -78 },
    Vec3 { x: 76, y: -13, z: -69 },
    Vec3 { x: 10, y: 3, z: -46 },
    Vec3 { x: -2, y: -1, z: -49 },
];

/// Sum of squared distances between `template` and the sample history,
/// subsampled every `resample_rate` ticks. The template's last entry lines
/// up with the newest sample.
///
/// The caller keeps `(template.len() - 1) * resample_rate` within the
/// buffer's capacity.
pub fn template_dist_sq<const N: usize>(
    template: &[Vec3<i8>],
    resample_rate: usize,
    history: &HistoryBuffer<Vec3<i8>, N>,
) -> f32 {
    let len = template.len();
    let mut result = 0.0;
    for (index, &entry) in template.iter().enumerate() {
        let delayed = history.get((len - 1 - index) * resample_rate);
        let diff = Vec3::new(
            entry.x as i16 - delayed.x as i16,
            entry.y as i16 - delayed.y as i16,
            entry.z as i16 - delayed.z as i16,
        );
        result += norm_sq(&diff);
    }
    result
}
