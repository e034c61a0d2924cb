use super::*;

#[test]
fn rgb_parses_common_forms() {
    assert_eq!(Rgb8::parse("#ff8000").unwrap(), Rgb8::new(255, 128, 0));
    assert_eq!(Rgb8::parse("0x00ff00").unwrap(), Rgb8::new(0, 255, 0));
    assert_eq!(Rgb8::parse("#fff").unwrap(), Rgb8::WHITE);
    assert!(Rgb8::parse("#12345").is_err());
    assert!(Rgb8::parse("#zzzzzz").is_err());
}

#[test]
fn rgb_hex_roundtrips_through_serde() {
    let c = Rgb8::from_hex(0x336699);
    let json = serde_json::to_string(&c).unwrap();
    assert_eq!(json, "\"#336699\"");
    let back: Rgb8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, c);
}

#[test]
fn viewport_must_be_positive() {
    assert!(validate_viewport(Size::new(0.0, 10.0)).is_err());
    assert!(validate_viewport(Size::new(f64::NAN, 10.0)).is_err());
    assert!(validate_viewport(Size::new(800.0, 600.0)).is_ok());
}

#[test]
fn normalized_from_center_spans_unit_square() {
    let vp = Size::new(200.0, 100.0);
    assert_eq!(normalized_from_center(Point::new(100.0, 50.0), vp), Vec2::ZERO);
    assert_eq!(
        normalized_from_center(Point::new(0.0, 0.0), vp),
        Vec2::new(-1.0, -1.0)
    );
    assert_eq!(
        normalized_from_center(Point::new(400.0, 100.0), vp),
        Vec2::new(1.0, 1.0)
    );
}

#[test]
fn negative_seconds_become_zero_duration() {
    assert_eq!(duration_from_secs(-1.0), Duration::ZERO);
    assert_eq!(duration_from_secs(f64::NAN), Duration::ZERO);
    assert_eq!(duration_from_secs(0.5), Duration::from_millis(500));
}
