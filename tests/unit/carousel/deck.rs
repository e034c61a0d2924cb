use super::*;

const DECK: &str = r#"{
    "slides": [
        { "image": "img/a.png", "title": "Dunes", "subtitle": "Erg Chebbi" },
        { "image": "img/b.png", "base_scale": 1.1 }
    ],
    "displacement": { "background": "maps/bg.png", "cursor": "maps/cursor.png" },
    "image_effects": [ { "kind": "rgb-split", "intensity": 4 } ]
}"#;

#[test]
fn parses_with_defaults() {
    let deck = SlideDeck::from_json_str(DECK).unwrap();
    assert_eq!(deck.slides.len(), 2);
    assert_eq!(deck.slides[0].base_scale, 1.0);
    assert_eq!(deck.slides[1].title, "");
    assert_eq!(deck.slides[1].base_scale, 1.1);
    assert_eq!(deck.image_effects[0].intensity, 4.0);
    assert!(deck.image_effects[0].enabled);
    assert!(deck.caption_effects.is_empty());
    assert_eq!(deck.config, CarouselConfig::default());
}

#[test]
fn empty_deck_is_rejected() {
    let deck = SlideDeck::new(
        Vec::new(),
        DisplacementMaps {
            background: "bg.png".into(),
            cursor: "c.png".into(),
        },
    );
    assert!(matches!(deck.validate(), Err(SlideFxError::Validation(_))));
}

#[test]
fn bad_scale_and_escaping_paths_are_rejected() {
    let maps = DisplacementMaps {
        background: "bg.png".into(),
        cursor: "c.png".into(),
    };
    let mut slide = SlideSpec::new("a.png");
    slide.base_scale = 0.0;
    assert!(SlideDeck::new(vec![slide], maps.clone()).validate().is_err());

    let escaping = SlideDeck::new(vec![SlideSpec::new("../secret.png")], maps);
    assert!(escaping.validate().is_err());
}

#[test]
fn round_trips_through_pretty_json() {
    let deck = SlideDeck::from_json_str(DECK).unwrap();
    let back = SlideDeck::from_json_str(&deck.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, deck);
}
