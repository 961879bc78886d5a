use super::*;

#[test]
fn unwritten_slots_read_back_default() {
    let buf: HistoryBuffer<f32, 4> = HistoryBuffer::new();
    for delay in 0..4 {
        assert_eq!(buf.get(delay), 0.0);
    }
}

#[test]
fn delay_indexes_backwards_from_newest() {
    let mut buf: HistoryBuffer<f32, 5> = HistoryBuffer::new();
    for v in [10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 1.0, 2.0, 3.0, 4.0, 5.0] {
        buf.add_sample(v);
    }

    assert_eq!(buf.get(0), 5.0);
    assert_eq!(buf.get(1), 4.0);
    assert_eq!(buf.get(2), 3.0);
    assert_eq!(buf.get(3), 2.0);
    assert_eq!(buf.get(4), 1.0);
}

#[test]
fn fifo_order_holds_before_and_after_wrap() {
    let mut buf: HistoryBuffer<i32, 3> = HistoryBuffer::new();

    buf.add_sample(1);
    buf.add_sample(2);
    assert_eq!(buf.get(0), 2);
    assert_eq!(buf.get(1), 1);
    assert_eq!(buf.get(2), 0); // never written

    for k in 3..=20 {
        buf.add_sample(k);
        assert_eq!(buf.get(0), k);
        assert_eq!(buf.get(1), k - 1);
        assert_eq!(buf.get(2), k - 2);
    }
}

#[test]
fn zero_capacity_is_inert() {
    let mut buf: HistoryBuffer<i8, 0> = HistoryBuffer::new();
    buf.add_sample(42);
    assert_eq!(buf.get(0), 0);
    assert_eq!(buf.get(7), 0);
}
