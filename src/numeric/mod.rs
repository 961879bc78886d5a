pub mod bits;
pub mod fastmath;
pub mod fixed;

pub use self::bits::{clamp_to_i8, shift_left, shift_right, FixedBacking};
pub use self::fastmath::{fast_inv_sqrt, fast_sqrt};
pub use self::fixed::{fix_mul, fix_shift_left, fix_shift_right, Fixed};
