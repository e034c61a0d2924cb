use serde_json::json;

use super::*;

#[test]
fn null_params_use_defaults() {
    let v = serde_json::Value::Null;
    let bag = ParamBag::new("blur", &v).unwrap();
    assert_eq!(bag.f64_or("strength", 8.0).unwrap(), 8.0);
    assert_eq!(bag.u32_or("quality", 4).unwrap(), 4);
    assert!(!bag.has("strength"));
}

#[test]
fn non_object_params_are_rejected() {
    let v = json!([1, 2]);
    assert!(ParamBag::new("blur", &v).is_err());
}

#[test]
fn wrong_types_are_validation_errors() {
    let v = json!({ "strength": "big", "quality": -1, "center": [1] });
    let bag = ParamBag::new("blur", &v).unwrap();
    let err = bag.f64_or("strength", 0.0).unwrap_err();
    assert!(err.to_string().contains("blur.strength"));
    assert!(bag.u32_or("quality", 0).is_err());
    assert!(bag.vec2_or("center", Vec2::ZERO).is_err());
}

#[test]
fn vectors_accept_array_and_object_forms() {
    let v = json!({ "a": [1.5, -2.0], "b": { "x": 3.0, "y": 4.0 } });
    let bag = ParamBag::new("rgb-split", &v).unwrap();
    assert_eq!(bag.vec2_or("a", Vec2::ZERO).unwrap(), Vec2::new(1.5, -2.0));
    assert_eq!(bag.point_or("b", Point::ORIGIN).unwrap(), Point::new(3.0, 4.0));
}

#[test]
fn colors_accept_three_forms() {
    let v = json!({ "a": "#102030", "b": 0x405060, "c": [7, 8, 9], "d": [300, 0, 0] });
    let bag = ParamBag::new("color-overlay", &v).unwrap();
    assert_eq!(bag.color_or("a", Rgb8::BLACK).unwrap(), Rgb8::new(16, 32, 48));
    assert_eq!(bag.color_or("b", Rgb8::BLACK).unwrap(), Rgb8::new(64, 80, 96));
    assert_eq!(bag.color_or("c", Rgb8::BLACK).unwrap(), Rgb8::new(7, 8, 9));
    assert!(bag.color_or("d", Rgb8::BLACK).is_err());
}

#[test]
fn bounded_reads_reject_out_of_range() {
    let v = json!({ "mix": 1.5 });
    let bag = ParamBag::new("color-map", &v).unwrap();
    assert!(bag.f64_in("mix", 1.0, 0.0, 1.0).is_err());
    assert_eq!(bag.f64_in("other", 0.5, 0.0, 1.0).unwrap(), 0.5);
}

#[test]
fn required_string_must_be_non_blank() {
    let v = json!({ "texture": "  " });
    let bag = ParamBag::new("color-map", &v).unwrap();
    assert!(bag.required_str("texture").is_err());
    assert!(bag.required_str("missing").is_err());
}
