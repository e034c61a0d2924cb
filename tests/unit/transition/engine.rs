use super::*;
use crate::scene::graph::{NodeRole, SceneNode};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn deck(n: usize, base_scale: f64) -> (Scene, TransitionEngine) {
    let mut scene = Scene::new();
    let root = scene.root();
    let slides = (0..n)
        .map(|index| SlideNodes {
            image: scene.add_child(root, SceneNode::new(NodeRole::SlideImage { index })),
            caption: scene.add_child(root, SceneNode::new(NodeRole::Caption { index })),
            base_scale,
        })
        .collect();
    let engine = TransitionEngine::new(slides, TransitionSettings::default());
    engine.install(&mut scene);
    (scene, engine)
}

fn rejection(err: SlideFxError) -> TransitionRejection {
    match err {
        SlideFxError::InvalidTransitionTarget { reason, .. } => reason,
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn install_shows_only_the_first_slide() {
    let (scene, engine) = deck(3, 1.2);
    for i in 0..3 {
        let s = engine.slide(i).unwrap();
        assert_eq!(scene.opacity(s.image), Some(if i == 0 { 1.0 } else { 0.0 }));
        assert_eq!(scene.scale(s.image), Some(1.2));
    }
}

#[test]
fn start_sets_incoming_hidden_and_enlarged() {
    let (mut scene, mut engine) = deck(3, 1.0);
    engine.transition_to(2, ms(0), &mut scene).unwrap();
    let inc = *engine.slide(2).unwrap();
    assert_eq!(scene.opacity(inc.image), Some(0.0));
    assert_eq!(scene.opacity(inc.caption), Some(0.0));
    assert_eq!(scene.scale(inc.image), Some(1.3));
    assert!(engine.is_transitioning());
    assert_eq!(engine.in_flight_target(), Some(2));
    assert_eq!(engine.current_index(), 0);
}

#[test]
fn midway_both_slides_are_partially_visible() {
    let (mut scene, mut engine) = deck(2, 1.0);
    engine.transition_to(1, ms(0), &mut scene).unwrap();
    assert_eq!(engine.tick(ms(500), &mut scene), None);

    let out = *engine.slide(0).unwrap();
    let inc = *engine.slide(1).unwrap();
    assert!((scene.opacity(out.image).unwrap() - 0.5).abs() < 1e-9);
    assert!((scene.opacity(inc.caption).unwrap() - 0.5).abs() < 1e-9);
    assert!((scene.scale(out.image).unwrap() - 1.15).abs() < 1e-9);
    assert!((scene.scale(inc.image).unwrap() - 1.15).abs() < 1e-9);
}

#[test]
fn completion_settles_every_slide() {
    let (mut scene, mut engine) = deck(4, 0.9);
    engine.transition_to(2, ms(100), &mut scene).unwrap();
    engine.tick(ms(600), &mut scene);
    let outcome = engine.tick(ms(1100), &mut scene).unwrap();
    assert_eq!(
        outcome,
        TransitionOutcome {
            from: 0,
            to: 2,
            finished_at: ms(1100)
        }
    );
    assert_eq!(engine.current_index(), 2);
    assert!(!engine.is_transitioning());
    for i in 0..4 {
        let s = engine.slide(i).unwrap();
        let expect = if i == 2 { 1.0 } else { 0.0 };
        assert_eq!(scene.opacity(s.image), Some(expect));
        assert_eq!(scene.opacity(s.caption), Some(expect));
    }
    assert_eq!(scene.scale(engine.slide(2).unwrap().image), Some(0.9));
    assert_eq!(engine.tick(ms(1200), &mut scene), None);
}

#[test]
fn requests_in_flight_and_out_of_range_are_rejected_without_state_change() {
    let (mut scene, mut engine) = deck(3, 1.0);
    let err = engine.transition_to(3, ms(0), &mut scene).unwrap_err();
    assert_eq!(rejection(err), TransitionRejection::OutOfRange);
    let err = engine.transition_to(0, ms(0), &mut scene).unwrap_err();
    assert_eq!(rejection(err), TransitionRejection::AlreadyCurrent);

    engine.transition_to(1, ms(0), &mut scene).unwrap();
    for j in [1, 2] {
        let err = engine.transition_to(j, ms(200), &mut scene).unwrap_err();
        assert_eq!(rejection(err), TransitionRejection::InFlight);
    }
    assert_eq!(engine.in_flight_target(), Some(1));
    assert_eq!(scene.opacity(engine.slide(2).unwrap().image), Some(0.0));

    engine.tick(ms(1000), &mut scene);
    assert_eq!(engine.current_index(), 1);
}

#[test]
fn next_and_previous_wrap() {
    let (mut scene, mut engine) = deck(4, 1.0);
    let mut now = ms(0);
    let mut seen = Vec::new();
    for _ in 0..4 {
        engine.next(now, &mut scene).unwrap();
        now += ms(1000);
        engine.tick(now, &mut scene);
        seen.push(engine.current_index());
    }
    assert_eq!(seen, vec![1, 2, 3, 0]);

    engine.previous(now, &mut scene).unwrap();
    engine.tick(now + ms(1000), &mut scene);
    assert_eq!(engine.current_index(), 3);
}

#[test]
fn single_and_empty_decks_reject_navigation() {
    let (mut scene, mut engine) = deck(1, 1.0);
    let err = engine.next(ms(0), &mut scene).unwrap_err();
    assert_eq!(rejection(err), TransitionRejection::AlreadyCurrent);

    let (mut scene, mut engine) = deck(0, 1.0);
    let err = engine.previous(ms(0), &mut scene).unwrap_err();
    assert_eq!(rejection(err), TransitionRejection::Empty);
}

#[test]
fn drag_preview_settles_back_to_base() {
    let (mut scene, mut engine) = deck(2, 1.0);
    assert!(engine.preview_scale(1.2, &mut scene));
    let image = engine.slide(0).unwrap().image;
    assert_eq!(scene.scale(image), Some(1.2));

    engine.settle_preview(ms(0), &scene);
    engine.tick(ms(500), &mut scene);
    let mid = scene.scale(image).unwrap();
    assert!(mid > 1.0 && mid < 1.2);
    engine.tick(ms(1000), &mut scene);
    assert_eq!(scene.scale(image), Some(1.0));

    engine.transition_to(1, ms(2000), &mut scene).unwrap();
    assert!(!engine.preview_scale(1.1, &mut scene));
}
