use super::*;

#[test]
fn clamp_level_is_total() {
    assert_eq!(clamp_level(15.0), 10.0);
    assert_eq!(clamp_level(-3.0), 0.0);
    assert_eq!(clamp_level(f64::NAN), 0.0);
    assert_eq!(clamp_level(f64::INFINITY), 10.0);
    assert_eq!(clamp_level(4.5), 4.5);
}

#[test]
fn patterns_hit_documented_endpoints() {
    assert_eq!(linear_scalar(0.0), 0.0);
    assert_eq!(linear_scalar(10.0), 1.0);
    assert_eq!(linear_range(0.0, 2.0, 32.0), 2.0);
    assert_eq!(linear_range(10.0, 2.0, 32.0), 32.0);
    assert_eq!(linear_range(5.0, 0.0, 20.0), 10.0);
    assert_eq!(signed_bipolar(0.0), -1.0);
    assert_eq!(signed_bipolar(5.0), 0.0);
    assert_eq!(signed_bipolar(10.0), 1.0);
}

#[test]
fn patterns_are_monotonic() {
    let mut prev = (f64::MIN, f64::MIN, f64::MIN);
    for i in 0..=100 {
        let l = f64::from(i) / 10.0;
        let cur = (linear_scalar(l), linear_range(l, 1.0, 40.0), signed_bipolar(l));
        assert!(cur.0 >= prev.0 && cur.1 >= prev.1 && cur.2 >= prev.2);
        prev = cur;
    }
}
