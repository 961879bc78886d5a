use super::*;

fn rel_err(approx: f32, exact: f32) -> f32 {
    ((approx - exact) / exact).abs()
}

#[test]
fn inv_sqrt_matches_reference_values() {
    for v in [1.1f32, 2.2, 100.1, 500.5, 1234.56, 3456789.0] {
        assert!(rel_err(fast_inv_sqrt(v), 1.0 / v.sqrt()) < 0.002, "v = {v}");
    }
}

#[test]
fn inv_sqrt_accuracy_over_sweep() {
    let mut v = 1e-4f32;
    while v < 1e8 {
        assert!(rel_err(fast_inv_sqrt(v), 1.0 / v.sqrt()) < 0.002, "v = {v}");
        v *= 1.37;
    }
}

#[test]
fn sqrt_accuracy_over_sweep() {
    let mut v = 1e-4f32;
    while v < 1e8 {
        assert!(rel_err(fast_sqrt(v), v.sqrt()) < 0.005, "v = {v}");
        v *= 1.37;
    }
}

#[test]
fn sqrt_of_exact_squares() {
    for v in [1.0f32, 4.0, 9.0, 16.0, 1024.0] {
        assert!(rel_err(fast_sqrt(v), v.sqrt()) < 0.005, "v = {v}");
    }
}
