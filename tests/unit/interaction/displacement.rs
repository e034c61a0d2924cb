use serde_json::json;

use super::*;
use crate::{
    assets::cache::ResourceCache,
    effects::{descriptor::EffectDescriptor, factory::create_effect},
};

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn channel() -> DisplacementChannel {
    DisplacementChannel::new(EffectHandle::default(), DisplacementSettings::default())
}

#[test]
fn starts_idle_at_zero() {
    let mut c = channel();
    assert_eq!(c.phase(), DisplacementPhase::Idle);
    assert_eq!(c.tick(ms(100)).strength, 0.0);
}

#[test]
fn hover_enter_ramps_to_default_strength() {
    let mut c = channel();
    c.pointer_enter(ms(0));
    assert_eq!(c.phase(), DisplacementPhase::Amplifying);
    let mid = c.tick(ms(250)).strength;
    assert!(mid > 0.0 && mid < 30.0);
    assert_eq!(c.tick(ms(500)).strength, 30.0);
}

#[test]
fn hover_leave_within_idle_timeout_decays_to_zero() {
    let mut c = channel();
    c.pointer_enter(ms(0));
    c.tick(ms(600));
    c.pointer_leave(ms(1000));

    // Held during the leave delay.
    assert_eq!(c.tick(ms(1100)).strength, 30.0);
    let falling = c.tick(ms(1400)).strength;
    assert!(falling > 0.0 && falling < 30.0);
    assert_eq!(c.tick(ms(1700)).strength, 0.0);
    assert_eq!(c.phase(), DisplacementPhase::Idle);
}

#[test]
fn leave_mid_ramp_decays_from_the_frozen_value() {
    let mut c = channel();
    c.pointer_enter(ms(0));
    c.pointer_leave(ms(200));
    let frozen = c.tick(ms(300)).strength;
    assert!(frozen > 0.0 && frozen < 30.0);
    assert_eq!(c.tick(ms(400)).strength, frozen);
    let s = c.tick(ms(500)).strength;
    assert!(s < frozen);
    assert_eq!(c.tick(ms(900)).strength, 0.0);
}

#[test]
fn motion_pushes_back_the_idle_deadline() {
    let mut c = channel();
    c.pointer_enter(ms(0));
    c.pointer_move(ms(2500), Vec2::new(10.0, 0.0));
    assert_eq!(c.idle_deadline(), Some(ms(5500)));

    assert_eq!(c.tick(ms(3500)).strength, 30.0);
    assert_eq!(c.phase(), DisplacementPhase::Amplifying);

    c.tick(ms(5500));
    assert_eq!(c.phase(), DisplacementPhase::Decaying);
    assert_eq!(c.tick(ms(6000)).strength, 0.0);
    // Pointer still inside: back to tracking, and motion re-amplifies.
    assert_eq!(c.phase(), DisplacementPhase::Tracking);
    c.pointer_move(ms(6100), Vec2::new(12.0, 0.0));
    assert_eq!(c.phase(), DisplacementPhase::Amplifying);
}

#[test]
fn hover_enter_always_amplifies() {
    let mut c = channel();
    c.pointer_enter(ms(0));
    c.pointer_leave(ms(100));
    c.tick(ms(350));
    assert_eq!(c.phase(), DisplacementPhase::Decaying);
    c.pointer_enter(ms(360));
    assert_eq!(c.phase(), DisplacementPhase::Amplifying);
    assert_eq!(c.tick(ms(860)).strength, 30.0);
}

#[test]
fn offset_follows_pointer_with_smoothing() {
    let mut c = DisplacementChannel::new(
        EffectHandle::default(),
        DisplacementSettings {
            follow: 0.1,
            ..DisplacementSettings::default()
        },
    );
    c.pointer_move(ms(0), Vec2::new(200.0, -100.0));
    assert_eq!(c.phase(), DisplacementPhase::Tracking);
    let mid = c.tick(ms(70)).offset;
    assert!(mid.x > 0.0 && mid.x < 20.0);
    assert_eq!(c.tick(ms(140)).offset, Vec2::new(20.0, -10.0));
}

#[test]
fn coupling_writes_into_displacement_instances() {
    let mut resources = ResourceCache::new();
    let mut effects = EffectLifecycleManager::new();
    let d = EffectDescriptor::new("displacement").with_params(json!({ "texture": "d.png" }));
    let bg = effects
        .register_base(create_effect(&d, &mut resources).unwrap())
        .unwrap();
    let cur = effects
        .register_base(create_effect(&d, &mut resources).unwrap())
        .unwrap();

    let mut coupling = DisplacementCoupling::new(
        DisplacementChannel::new(bg, DisplacementSettings::default()),
        Some(DisplacementChannel::new(
            cur,
            DisplacementSettings {
                default_strength: 65.0,
                ..DisplacementSettings::default()
            },
        )),
    );
    assert_eq!(coupling.handles().as_slice(), &[bg, cur]);

    let viewport = Size::new(800.0, 600.0);
    coupling.pointer_enter(ms(0));
    coupling.pointer_move(ms(0), Point::new(500.0, 300.0), viewport);
    coupling.tick(ms(1000), &mut effects);

    let bg_fx = effects.instance(bg).unwrap().displacement().unwrap();
    assert_eq!(bg_fx.strength(), 30.0);
    assert_eq!(bg_fx.offset, Vec2::new(100.0, 0.0));
    let cur_fx = effects.instance(cur).unwrap().displacement().unwrap();
    assert_eq!(cur_fx.strength(), 65.0);
}
