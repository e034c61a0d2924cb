#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod carousel;
pub mod effects;
pub mod foundation;
pub mod interaction;
pub mod scene;
pub mod transition;

pub use animation::{ease::Ease, tween::TweenSlot};
pub use assets::cache::{FsTextureLoader, MemoryTextureLoader, ResourceCache, TextureHandle, TextureLoader};
pub use carousel::{
    config::CarouselConfig,
    deck::{DisplacementMaps, SlideDeck, SlideSpec},
    player::{Carousel, FrameReport, InputEvent, Route},
};
pub use effects::{
    catalog::EffectKind,
    descriptor::EffectDescriptor,
    factory::create_effect,
    instance::{EffectControl, EffectHandle, EffectInstance},
    manager::EffectLifecycleManager,
};
pub use foundation::{
    core::{Point, Rgb8, Size, Vec2},
    error::{SlideFxError, SlideFxResult, TransitionRejection},
};
pub use interaction::{
    events::{EventHost, EventKind, EventLifecycleManager, EventTarget, ListenerOptions},
    throttle::{FramePriority, FrameThrottler, ThrottleStrategy},
};
pub use scene::graph::{NodeId, Scene};
pub use transition::engine::{TransitionEngine, TransitionOutcome};
