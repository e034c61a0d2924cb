use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"slidefx");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_bytes(b"slide");
    b.write_bytes(b"fx");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn unit_seed_is_deterministic_and_in_range() {
    for step in 0..64 {
        let a = next_unit_seed(0.25, step);
        let b = next_unit_seed(0.25, step);
        assert_eq!(a, b);
        assert!((0.0..1.0).contains(&a));
    }
    assert_ne!(next_unit_seed(0.25, 1), next_unit_seed(0.25, 2));
}

#[test]
fn clamp_finite_handles_nan() {
    assert_eq!(clamp_finite(f64::NAN, 0.0, 10.0), 0.0);
    assert_eq!(clamp_finite(15.0, 0.0, 10.0), 10.0);
    assert_eq!(clamp_finite(f64::NEG_INFINITY, 0.0, 10.0), 0.0);
}
