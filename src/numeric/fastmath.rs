//! Bit-pattern square-root approximations for targets without sqrt hardware.

/// Fast inverse square root, one Newton step.
///
/// Relative error stays under 0.2% across the positive range. Not defined for
/// `value <= 0` (returns a meaningless finite number, never traps).
#[inline]
pub fn fast_inv_sqrt(value: f32) -> f32 {
    let half = value * 0.5;
    let i = 0x5f3759df_u32.wrapping_sub(value.to_bits() >> 1);
    let y = f32::from_bits(i);
    y * (1.5 - half * y * y)
}

/// Fast forward square root, one Heron step.
#[inline]
pub fn fast_sqrt(value: f32) -> f32 {
    let i = 0x1fbd1df5 + (value.to_bits() >> 1);
    let y = f32::from_bits(i);
    0.5 * (y + value / y)
}

#[cfg(test)]
mod tests;
