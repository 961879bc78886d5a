use super::*;

#[test]
fn window_of_four_over_ramp() {
    let mut buf: HistoryBuffer<f32, 5> = HistoryBuffer::new();
    let mut stats: RunningStats<4, f32, Identity> = RunningStats::new();

    for v in 0..4 {
        buf.add_sample(v as f32);
        stats.add_sample(&buf);
    }
    assert_eq!(stats.mean(), 1.5);
    assert_eq!(stats.var(), 1.25);
    assert!((stats.std_dev() - 1.1180339887).abs() < 0.002);

    for v in 4..8 {
        buf.add_sample(v as f32);
        stats.add_sample(&buf);
    }
    assert_eq!(stats.mean(), 5.5);
    assert!((stats.var() - 1.25).abs() < 1e-4);
    assert!((stats.std_dev() - 1.1180339887).abs() < 0.002);
}

#[test]
fn agrees_with_naive_recompute_at_every_step() {
    const W: usize = 6;
    let seq: [f32; 24] = [
        3.0, -1.5, 0.25, 7.0, 7.0, -2.75, 4.5, 0.0, 1.0, -8.25, 3.5, 3.5, 12.0,
        -0.5, 2.25, 6.0, -3.0, 0.75, 5.5, -1.25, 9.0, 0.5, -4.75, 2.0,
    ];

    let mut buf: HistoryBuffer<f32, 8> = HistoryBuffer::new();
    let mut stats: RunningStats<W, f32, Identity> = RunningStats::new();

    // The incremental stats see default-initialized history before the first
    // write, so the naive window does too.
    let mut padded = vec![0.0f32; W];
    padded.extend_from_slice(&seq);

    for (step, &v) in seq.iter().enumerate() {
        buf.add_sample(v);
        stats.add_sample(&buf);

        let window = &padded[step + 1..step + 1 + W];
        let mean = window.iter().sum::<f32>() / W as f32;
        let var = window.iter().map(|x| (x - mean) * (x - mean)).sum::<f32>() / W as f32;

        assert!((stats.mean() - mean).abs() < 1e-4, "step {step}");
        assert!((stats.var() - var).abs() < 1e-3, "step {step}");
    }
}

#[test]
fn axis_channels_track_one_component() {
    let mut buf: HistoryBuffer<Vec3<i8>, 6> = HistoryBuffer::new();
    let mut z_stats: RunningStats<4, i64, AxisZ> = RunningStats::new();
    let mut x_stats: RunningStats<4, i64, AxisX> = RunningStats::new();
    let mut y_stats: RunningStats<4, i64, AxisY> = RunningStats::new();

    for (x, y, z) in [(1, -4, 10), (2, -8, 20), (3, -12, 30), (4, -16, 40)] {
        buf.add_sample(Vec3::new(x, y, z));
        z_stats.add_sample(&buf);
        x_stats.add_sample(&buf);
        y_stats.add_sample(&buf);
    }

    assert_eq!(z_stats.mean(), 25);
    assert_eq!(z_stats.mean_f32(), 25.0);
    assert_eq!(z_stats.var(), 125.0);
    assert_eq!(x_stats.mean(), 2); // integer division of 10 / 4
    assert_eq!(x_stats.mean_f32(), 2.5);
    assert_eq!(y_stats.mean(), -10);
}

#[test]
fn mag_sq_channel_sums_all_axes() {
    let mut buf: HistoryBuffer<Vec3<i8>, 4> = HistoryBuffer::new();
    let mut stats: RunningStats<2, f32, MagSq> = RunningStats::new();

    buf.add_sample(Vec3::new(3, 4, 0));
    stats.add_sample(&buf);
    buf.add_sample(Vec3::new(0, 0, 5));
    stats.add_sample(&buf);

    assert_eq!(stats.mean(), 25.0);
    assert_eq!(stats.var(), 0.0);

    buf.add_sample(Vec3::new(1, 1, 1));
    stats.add_sample(&buf);
    assert_eq!(stats.mean(), 14.0); // (25 + 3) / 2
}

#[test]
fn eviction_keeps_sums_exact_across_many_wraps() {
    let mut buf: HistoryBuffer<Vec3<i8>, 10> = HistoryBuffer::new();
    let mut stats: RunningStats<8, i64, AxisZ> = RunningStats::new();

    for i in 0..1000i64 {
        let z = ((i * 37) % 251 - 125) as i8;
        buf.add_sample(Vec3::new(0, 0, z));
        stats.add_sample(&buf);
    }

    let expected: i64 = (992..1000)
        .map(|i| ((i * 37) % 251 - 125) as i64)
        .sum();
    assert_eq!(stats.mean(), expected / 8);
}
