use super::*;

fn at(frame: u32, fps: f64) -> Duration {
    Duration::from_secs_f64(frame as f64 / fps)
}

#[test]
fn none_processes_every_frame() {
    let mut t = FrameThrottler::new(ThrottleStrategy::None);
    assert!((0..10).all(|i| t.should_process(at(i, 240.0), FramePriority::Low)));
}

#[test]
fn fixed_fps_halves_a_60hz_tick() {
    let mut t = FrameThrottler::new(ThrottleStrategy::FixedFps { fps: 30.0 });
    let processed = (0..60)
        .filter(|i| t.should_process(at(*i, 60.0), FramePriority::Normal))
        .count();
    assert_eq!(processed, 30);
}

#[test]
fn fixed_fps_waits_for_the_full_interval() {
    let mut t = FrameThrottler::new(ThrottleStrategy::FixedFps { fps: 60.0 });
    assert!(t.should_process(Duration::ZERO, FramePriority::Normal));
    assert!(!t.should_process(Duration::from_micros(16_300), FramePriority::Normal));
    assert!(!t.should_process(Duration::from_micros(16_666), FramePriority::Normal));
    assert!(t.should_process(Duration::from_micros(16_667), FramePriority::Normal));
}

#[test]
fn priority_lets_high_frames_through() {
    let mut t = FrameThrottler::new(ThrottleStrategy::Priority { fps: 10.0 });
    assert!(t.should_process(at(0, 60.0), FramePriority::Normal));
    assert!(!t.should_process(at(1, 60.0), FramePriority::Normal));
    assert!(t.should_process(at(2, 60.0), FramePriority::High));
    assert!(!t.should_process(at(3, 60.0), FramePriority::Low));
}

#[test]
fn adaptive_backs_off_under_load_and_respects_the_floor() {
    let mut t = FrameThrottler::default();
    assert_eq!(t.target_fps(), 60.0);
    t.should_process(Duration::ZERO, FramePriority::Normal);
    for _ in 0..10 {
        t.frame_processed(Duration::from_millis(40));
    }

    t.should_process(Duration::from_millis(1000), FramePriority::Normal);
    assert!((t.target_fps() - 48.0).abs() < 1e-9);

    for s in 2..8 {
        t.should_process(Duration::from_secs(s), FramePriority::Normal);
    }
    assert_eq!(t.target_fps(), 30.0);
}

#[test]
fn adaptive_recovers_when_frames_are_cheap() {
    let mut t = FrameThrottler::new(ThrottleStrategy::Adaptive {
        target_fps: 30.0,
        min_fps: 30.0,
        max_fps: 60.0,
    });
    t.should_process(Duration::ZERO, FramePriority::Normal);
    for _ in 0..10 {
        t.frame_processed(Duration::from_millis(2));
    }
    for s in 1..6 {
        t.should_process(Duration::from_secs(s), FramePriority::Normal);
    }
    assert_eq!(t.target_fps(), 60.0);
}

#[test]
fn adaptive_holds_steady_inside_the_band() {
    let mut t = FrameThrottler::default();
    t.should_process(Duration::ZERO, FramePriority::Normal);
    for _ in 0..60 {
        t.frame_processed(Duration::from_millis(20));
    }
    for s in 1..4 {
        t.should_process(Duration::from_secs(s), FramePriority::Normal);
    }
    assert!((t.current_fps() - 50.0).abs() < 1e-6);
    assert_eq!(t.target_fps(), 60.0);
}

#[test]
fn rolling_window_holds_sixty_samples() {
    let mut t = FrameThrottler::default();
    assert_eq!(t.current_fps(), 0.0);
    for _ in 0..30 {
        t.frame_processed(Duration::from_millis(10));
    }
    for _ in 0..60 {
        t.frame_processed(Duration::from_millis(20));
    }
    assert_eq!(t.sample_count(), 60);
    assert!((t.current_fps() - 50.0).abs() < 1e-6);
}

#[test]
fn strategy_validation_and_serde_shape() {
    assert!(ThrottleStrategy::FixedFps { fps: 0.0 }.validate().is_err());
    assert!(
        ThrottleStrategy::Adaptive {
            target_fps: 60.0,
            min_fps: 50.0,
            max_fps: 40.0
        }
        .validate()
        .is_err()
    );
    let s: ThrottleStrategy =
        serde_json::from_str(r#"{ "strategy": "fixed-fps", "fps": 24 }"#).unwrap();
    assert_eq!(s, ThrottleStrategy::FixedFps { fps: 24.0 });
    let s: ThrottleStrategy = serde_json::from_str(r#"{ "strategy": "none" }"#).unwrap();
    assert_eq!(s, ThrottleStrategy::None);
}
