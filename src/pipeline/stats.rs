//! Incremental mean/variance over a trailing window of a history buffer.

use core::marker::PhantomData;
use core::ops::{Add, Mul, Sub};

use super::history::HistoryBuffer;
use crate::numeric::fastmath::fast_inv_sqrt;
use crate::vector::Vec3;

/// Extracts the tracked scalar from a buffered sample, already widened to
/// the accumulator type.
pub trait Channel<S> {
    type Out;

    fn extract(sample: &S) -> Self::Out;
}

/// Track the sample itself.
pub struct Identity;

impl<S: Copy> Channel<S> for Identity {
    type Out = S;

    #[inline]
    fn extract(sample: &S) -> S {
        *sample
    }
}

pub struct AxisX;
pub struct AxisY;
pub struct AxisZ;

/// Squared magnitude of a sample vector.
pub struct MagSq;

macro_rules! impl_axis_channel {
    ($name:ident, $field:ident) => {
        impl Channel<Vec3<i8>> for $name {
            type Out = i64;

            #[inline]
            fn extract(sample: &Vec3<i8>) -> i64 {
                sample.$field as i64
            }
        }
    };
}

impl_axis_channel!(AxisX, x);
impl_axis_channel!(AxisY, y);
impl_axis_channel!(AxisZ, z);

impl Channel<Vec3<i8>> for MagSq {
    type Out = f32;

    #[inline]
    fn extract(sample: &Vec3<i8>) -> f32 {
        let x = sample.x as i32;
        let y = sample.y as i32;
        let z = sample.z as i32;
        (x * x + y * y + z * z) as f32
    }
}

/// Accumulator scalar for the running sums. Wider than the sample scalar so
/// a window's worth of squares cannot overflow.
pub trait Accum:
    Copy + Default + PartialOrd + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
{
    fn div_count(self, count: usize) -> Self;
    fn to_f32(self) -> f32;
}

impl Accum for i64 {
    #[inline]
    fn div_count(self, count: usize) -> Self {
        self / count as i64
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }
}

impl Accum for f32 {
    #[inline]
    fn div_count(self, count: usize) -> Self {
        self / count as f32
    }

    #[inline]
    fn to_f32(self) -> f32 {
        self
    }
}

/// Running sum and sum-of-squares over the `W` most recent writes of a
/// history buffer, maintained by an add/evict pair instead of rescanning.
///
/// The stats object shadows a buffer it does not own: call
/// [`add_sample`](Self::add_sample) exactly once after every buffer write,
/// passing the buffer that was just written. The window must leave one slot
/// of slack (`W <= N - 1`) so the evicted sample, the one now `W` writes
/// old, is still readable.
pub struct RunningStats<const W: usize, A, C> {
    sum: A,
    sum_sq: A,
    _channel: PhantomData<C>,
}

impl<const W: usize, A: Accum, C> RunningStats<W, A, C> {
    pub fn new() -> Self {
        Self {
            sum: A::default(),
            sum_sq: A::default(),
            _channel: PhantomData,
        }
    }

    pub fn add_sample<S, const N: usize>(&mut self, history: &HistoryBuffer<S, N>)
    where
        S: Copy + Default,
        C: Channel<S, Out = A>,
    {
        debug_assert!(W < N, "window {W} needs a buffer longer than itself");

        let evicted = C::extract(&history.get(W));
        self.sum = self.sum - evicted;
        self.sum_sq = self.sum_sq - evicted * evicted;

        let entered = C::extract(&history.get(0));
        self.sum = self.sum + entered;
        self.sum_sq = self.sum_sq + entered * entered;
    }

    /// Window mean in the accumulator type (integer division for integer
    /// accumulators).
    #[inline]
    pub fn mean(&self) -> A {
        self.sum.div_count(W)
    }

    #[inline]
    pub fn mean_f32(&self) -> f32 {
        self.sum.to_f32() / W as f32
    }

    /// Population variance over the window.
    #[inline]
    pub fn var(&self) -> f32 {
        (self.sum_sq - (self.sum * self.sum).div_count(W)).to_f32() / W as f32
    }

    #[inline]
    pub fn std_dev(&self) -> f32 {
        1.0 / fast_inv_sqrt(self.var())
    }
}

impl<const W: usize, A: Accum, C> Default for RunningStats<W, A, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
