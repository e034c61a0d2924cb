use serde_json::json;

use super::*;
use crate::{
    carousel::deck::SlideSpec,
    effects::descriptor::EffectDescriptor,
    interaction::throttle::ThrottleStrategy,
};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn deck(n: usize) -> SlideDeck {
    let slides = (0..n)
        .map(|i| SlideSpec::new(format!("img/{i}.png")).with_caption(format!("Title {i}"), "sub"))
        .collect();
    let mut deck = SlideDeck::new(
        slides,
        DisplacementMaps {
            background: "maps/bg.png".into(),
            cursor: "maps/cursor.png".into(),
        },
    );
    deck.image_effects = vec![
        EffectDescriptor::new("pixelate")
            .with_intensity(10.0)
            .with_params(json!({ "size": 4.0 })),
        EffectDescriptor::new("no-such-effect"),
    ];
    deck.caption_effects = vec![EffectDescriptor::new("glow").disabled()];
    deck.config.throttle = ThrottleStrategy::None;
    deck
}

fn viewport() -> Size {
    Size::new(800.0, 600.0)
}

fn pixelate_size(c: &Carousel, index: usize) -> f64 {
    let applied = c.effects().entry(&slide_target(index)).unwrap();
    c.effects().instance(applied[0].handle).unwrap().magnitude()
}

#[test]
fn build_wires_targets_and_base_effects() {
    let c = Carousel::new(deck(3), viewport()).unwrap();
    assert_eq!(c.len(), 3);
    assert_eq!(c.current_index(), 0);

    let bases = c.coupling().handles();
    assert_eq!(bases.len(), 2);
    for i in 0..3 {
        let image = c.transitions().slide(i).unwrap().image;
        let stack = c.scene().effects(image);
        assert_eq!(&stack[..2], bases.as_slice());
        assert_eq!(stack.len(), 3);
        assert_eq!(c.effects().entry(&text_target(i)).map(|e| e.len()), Some(0));
    }
    // Two displacement layers plus one pixelate per slide.
    assert_eq!(c.effects().live_count(), 5);
    assert_eq!(c.resources().pending().len(), 5);
    assert_eq!(c.events().len(), 12);
}

#[test]
fn cursor_channel_is_optional() {
    let mut d = deck(2);
    d.config.cursor_displacement_enabled = false;
    let c = Carousel::new(d, viewport()).unwrap();
    assert!(c.coupling().cursor().is_none());
    assert_eq!(c.effects().base_handles().len(), 1);
}

#[test]
fn invalid_inputs_fail_construction() {
    assert!(Carousel::new(deck(0), viewport()).is_err());
    assert!(Carousel::new(deck(2), Size::new(0.0, 600.0)).is_err());
}

#[test]
fn hover_toggles_current_slide_intensity() {
    let mut c = Carousel::new(deck(2), viewport()).unwrap();
    assert_eq!(pixelate_size(&c, 0), 4.0);

    c.handle_event(&EventTarget::Viewport, InputEvent::PointerEnter, ms(0));
    assert!(c.is_hovered());
    assert_eq!(pixelate_size(&c, 0), 40.0);
    assert_eq!(pixelate_size(&c, 1), 4.0);

    c.handle_event(&EventTarget::Viewport, InputEvent::PointerLeave, ms(100));
    assert!(!c.is_hovered());
    assert_eq!(pixelate_size(&c, 0), 4.0);
}

#[test]
fn hover_follows_the_slide_after_a_transition() {
    let mut c = Carousel::new(deck(2), viewport()).unwrap();
    c.on_pointer_enter(ms(0));
    assert!(c.next(ms(0)));
    let report = c.tick(ms(1000));
    assert_eq!(report.transition.map(|t| t.to), Some(1));
    assert_eq!(pixelate_size(&c, 0), 4.0);
    assert_eq!(pixelate_size(&c, 1), 40.0);
}

#[test]
fn nav_clicks_route_to_navigation() {
    let mut c = Carousel::new(deck(3), viewport()).unwrap();
    let ran = c.handle_event(&EventTarget::element(NAV_PREVIOUS), InputEvent::Click, ms(0));
    assert_eq!(ran, 1);
    assert!(c.is_transitioning());
    c.tick(ms(1000));
    assert_eq!(c.current_index(), 2);

    assert_eq!(c.handle_event(&EventTarget::element("elsewhere"), InputEvent::Click, ms(1100)), 0);
    c.handle_event(&EventTarget::element(NAV_NEXT), InputEvent::Click, ms(1100));
    c.tick(ms(2100));
    assert_eq!(c.current_index(), 0);
}

#[test]
fn drag_past_threshold_commits_and_short_drag_springs_back() {
    let mut c = Carousel::new(deck(3), viewport()).unwrap();
    let image = c.transitions().slide(0).unwrap().image;
    let vp = EventTarget::Viewport;

    c.handle_event(&vp, InputEvent::PointerDown { position: Point::new(500.0, 300.0) }, ms(0));
    c.handle_event(&vp, InputEvent::PointerMove { position: Point::new(450.0, 300.0) }, ms(10));
    let preview = c.scene().scale(image).unwrap();
    assert!(preview > 1.0 && preview < 1.25);
    c.handle_event(&vp, InputEvent::PointerUp { position: Point::new(450.0, 300.0) }, ms(20));
    assert!(!c.is_transitioning());
    c.tick(ms(1100));
    assert_eq!(c.scene().scale(image), Some(1.0));

    c.handle_event(&vp, InputEvent::TouchStart { position: Point::new(700.0, 300.0) }, ms(2000));
    c.handle_event(&vp, InputEvent::TouchMove { position: Point::new(200.0, 300.0) }, ms(2010));
    c.handle_event(&vp, InputEvent::TouchEnd { position: Point::new(200.0, 300.0) }, ms(2020));
    assert!(c.is_transitioning());
    c.tick(ms(3020));
    assert_eq!(c.current_index(), 1);
}

#[test]
fn resize_route_updates_viewport_and_ignores_bad_sizes() {
    let mut c = Carousel::new(deck(1), viewport()).unwrap();
    let ran = c.handle_event(
        &EventTarget::Window,
        InputEvent::Resize {
            viewport: Size::new(1024.0, 768.0),
        },
        ms(0),
    );
    assert_eq!(ran, 1);
    assert_eq!(c.viewport(), Size::new(1024.0, 768.0));
    c.resize(Size::new(f64::NAN, 10.0));
    assert_eq!(c.viewport(), Size::new(1024.0, 768.0));
}

#[test]
fn autoplay_advances_on_its_interval_unless_hovered() {
    let mut d = deck(3);
    d.config.autoplay_interval = Some(2.0);
    let mut c = Carousel::new(d, viewport()).unwrap();

    assert!(!c.tick(ms(0)).autoplayed);
    assert!(c.tick(ms(2000)).autoplayed);
    c.tick(ms(3000));
    assert_eq!(c.current_index(), 1);

    c.on_pointer_enter(ms(3000));
    assert!(!c.tick(ms(4000)).autoplayed);
    assert!(!c.tick(ms(6000)).autoplayed);
    assert_eq!(c.current_index(), 1);
}

#[test]
fn frame_rate_window_tracks_the_host_tick_spacing() {
    let mut c = Carousel::new(deck(2), viewport()).unwrap();
    for i in 0..100 {
        assert!(c.tick(ms(i * 50)).processed);
    }
    assert_eq!(c.throttler().sample_count(), 60);
    assert!((c.throttler().current_fps() - 20.0).abs() < 1e-6);
}

#[test]
fn caption_tilt_covers_both_slides_during_a_crossfade() {
    let mut d = deck(2);
    d.config.cursor_momentum = 0.1;
    d.config.caption_tilt_deg = 6.0;
    let mut c = Carousel::new(d, viewport()).unwrap();
    let outgoing = c.transitions().slide(0).unwrap().caption;
    let incoming = c.transitions().slide(1).unwrap().caption;

    c.on_pointer_enter(ms(0));
    c.pointer_move(ms(0), Point::new(800.0, 300.0));
    assert!(c.next(ms(0)));
    c.tick(ms(500));
    assert_eq!(c.scene().get(outgoing).unwrap().rotation_deg, 6.0);
    assert_eq!(c.scene().get(incoming).unwrap().rotation_deg, 6.0);

    c.tick(ms(1000));
    assert_eq!(c.current_index(), 1);
    assert_eq!(c.scene().get(outgoing).unwrap().rotation_deg, 0.0);
    assert_eq!(c.scene().get(incoming).unwrap().rotation_deg, 6.0);
}

#[test]
fn dispose_tears_everything_down_once() {
    let mut c = Carousel::new(deck(2), viewport()).unwrap();
    c.dispose();
    assert!(c.is_disposed());
    assert!(c.events().is_disposed());
    assert!(c.events().is_empty());
    assert_eq!(c.effects().live_count(), 0);
    assert!(c.resources().is_empty());
    let image = c.transitions().slide(0).unwrap().image;
    assert!(c.scene().effects(image).is_empty());

    assert!(!c.next(ms(0)));
    assert_eq!(c.handle_event(&EventTarget::Viewport, InputEvent::PointerEnter, ms(0)), 0);
    assert_eq!(c.tick(ms(10)), FrameReport::default());
    c.dispose();
}
