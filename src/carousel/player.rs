use std::time::Duration;

use crate::{
    assets::cache::{LoadReport, ResourceCache, TextureLoader},
    carousel::{
        config::CarouselConfig,
        deck::{DisplacementMaps, SlideDeck},
    },
    effects::{factory::create_effect, manager::EffectLifecycleManager},
    foundation::{
        core::{Point, Size, secs, validate_viewport},
        error::SlideFxResult,
    },
    interaction::{
        displacement::{DisplacementChannel, DisplacementCoupling},
        events::{EventHost, EventKind, EventLifecycleManager, EventTarget, ListenerOptions, NullHost},
        gesture::{SwipeGesture, SwipeOutcome},
        parallax::Parallax,
        throttle::{FramePriority, FrameThrottler},
    },
    scene::graph::{NodeId, NodeRole, Scene, SceneNode},
    transition::engine::{SlideNodes, TransitionEngine, TransitionOutcome},
};

pub const NAV_NEXT: &str = "nav-next";
pub const NAV_PREVIOUS: &str = "nav-prev";

pub fn slide_target(index: usize) -> String {
    format!("slide-{index}")
}

pub fn text_target(index: usize) -> String {
    format!("text-{index}")
}

/// Host input delivered to [`Carousel::handle_event`]. Positions are in viewport space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerMove { position: Point },
    PointerEnter,
    PointerLeave,
    PointerDown { position: Point },
    PointerUp { position: Point },
    TouchStart { position: Point },
    TouchMove { position: Point },
    TouchEnd { position: Point },
    Click,
    Resize { viewport: Size },
}

impl InputEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::PointerMove { .. } => EventKind::PointerMove,
            Self::PointerEnter => EventKind::PointerEnter,
            Self::PointerLeave => EventKind::PointerLeave,
            Self::PointerDown { .. } => EventKind::PointerDown,
            Self::PointerUp { .. } => EventKind::PointerUp,
            Self::TouchStart { .. } => EventKind::TouchStart,
            Self::TouchMove { .. } => EventKind::TouchMove,
            Self::TouchEnd { .. } => EventKind::TouchEnd,
            Self::Click => EventKind::Click,
            Self::Resize { .. } => EventKind::Resize,
        }
    }

    fn position(&self) -> Option<Point> {
        match *self {
            Self::PointerMove { position }
            | Self::PointerDown { position }
            | Self::PointerUp { position }
            | Self::TouchStart { position }
            | Self::TouchMove { position }
            | Self::TouchEnd { position } => Some(position),
            _ => None,
        }
    }
}

/// What a registered listener does when its event fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Hover,
    Pointer,
    DragStart,
    DragMove,
    DragEnd,
    NavNext,
    NavPrevious,
    Resize,
}

/// Result of one [`Carousel::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Time-varying effects were advanced on this frame.
    pub processed: bool,
    pub transition: Option<TransitionOutcome>,
    pub autoplayed: bool,
}

/// Interactive carousel: owns the scene, the resource cache and every manager.
///
/// Construction is synchronous and leaves every texture on its placeholder; [`ready`]
/// resolves them. All entry points are no-ops once [`dispose`] has run.
///
/// [`ready`]: Carousel::ready
/// [`dispose`]: Carousel::dispose
pub struct Carousel<E: EventHost = NullHost> {
    config: CarouselConfig,
    viewport: Size,
    scene: Scene,
    container: NodeId,
    resources: ResourceCache,
    effects: EffectLifecycleManager,
    events: EventLifecycleManager<Route, E>,
    coupling: DisplacementCoupling,
    transitions: TransitionEngine,
    parallax: Parallax,
    gesture: SwipeGesture,
    throttler: FrameThrottler,
    hovered: bool,
    last_advance: Option<Duration>,
    autoplay_due: Option<Duration>,
    disposed: bool,
}

impl Carousel<NullHost> {
    pub fn new(deck: SlideDeck, viewport: Size) -> SlideFxResult<Self> {
        Self::with_host(deck, viewport, NullHost)
    }
}

impl<E: EventHost> Carousel<E> {
    #[tracing::instrument(skip_all, fields(slides = deck.slides.len()))]
    pub fn with_host(deck: SlideDeck, viewport: Size, host: E) -> SlideFxResult<Self> {
        deck.validate()?;
        let viewport = validate_viewport(viewport)?;
        let config = deck.config.clone();

        let mut scene = Scene::new();
        let mut resources = ResourceCache::new();
        let mut effects = EffectLifecycleManager::new();

        let root = scene.root();
        let container = scene.add_child(root, SceneNode::new(NodeRole::Container));

        let background = effects.register_base(create_effect(
            &DisplacementMaps::descriptor(&deck.displacement.background),
            &mut resources,
        )?)?;
        let background = DisplacementChannel::new(background, config.background_settings());
        let cursor = if config.cursor_displacement_enabled {
            let handle = effects.register_base(create_effect(
                &DisplacementMaps::descriptor(&deck.displacement.cursor),
                &mut resources,
            )?)?;
            Some(DisplacementChannel::new(handle, config.cursor_settings()))
        } else {
            None
        };
        let coupling = DisplacementCoupling::new(background, cursor);
        let base = coupling.handles();

        let mut slides = Vec::with_capacity(deck.slides.len());
        for (index, spec) in deck.slides.iter().enumerate() {
            let texture = resources.request(&spec.image)?;
            let image = scene.add_child(
                container,
                SceneNode::new(NodeRole::SlideImage { index })
                    .with_texture(texture)
                    .with_scale(spec.base_scale),
            );
            let caption = scene.add_child(container, SceneNode::new(NodeRole::Caption { index }));
            scene.add_child(
                caption,
                SceneNode::new(NodeRole::CaptionTitle { index }).with_text(spec.title.as_str()),
            );
            scene.add_child(
                caption,
                SceneNode::new(NodeRole::CaptionSubtitle { index }).with_text(spec.subtitle.as_str()),
            );

            let slide = slide_target(index);
            let text = text_target(index);
            effects.apply(&mut scene, &mut resources, &slide, image, &deck.image_effects, &base)?;
            effects.apply(&mut scene, &mut resources, &text, caption, &deck.caption_effects, &[])?;
            // Resting state until hovered.
            effects.update_intensities(&slide, false);
            effects.update_intensities(&text, false);

            slides.push(SlideNodes {
                image,
                caption,
                base_scale: spec.base_scale,
            });
        }

        let transitions = TransitionEngine::new(slides, config.transition_settings());
        transitions.install(&mut scene);

        let mut events = EventLifecycleManager::with_host(host);
        register_routes(&mut events);

        tracing::info!(
            slides = transitions.len(),
            effects = effects.live_count(),
            textures = resources.len(),
            "carousel built"
        );

        Ok(Self {
            parallax: Parallax::new(config.parallax_settings()),
            gesture: SwipeGesture::new(config.swipe_threshold_fraction, config.swipe_scale_intensity),
            throttler: FrameThrottler::new(config.throttle),
            config,
            viewport,
            scene,
            container,
            resources,
            effects,
            events,
            coupling,
            transitions,
            hovered: false,
            last_advance: None,
            autoplay_due: None,
            disposed: false,
        })
    }

    /// Resolves every pending texture through `loader`. Failed loads keep their placeholder.
    #[tracing::instrument(skip_all, fields(pending = self.resources.pending().len()))]
    pub async fn ready(&mut self, loader: &dyn TextureLoader) -> LoadReport {
        if self.disposed {
            return LoadReport::default();
        }
        let report = self.resources.load_pending(loader).await;
        tracing::info!(
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "carousel ready"
        );
        report
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn resources(&self) -> &ResourceCache {
        &self.resources
    }

    pub fn effects(&self) -> &EffectLifecycleManager {
        &self.effects
    }

    pub fn events(&self) -> &EventLifecycleManager<Route, E> {
        &self.events
    }

    pub fn coupling(&self) -> &DisplacementCoupling {
        &self.coupling
    }

    pub fn transitions(&self) -> &TransitionEngine {
        &self.transitions
    }

    pub fn throttler(&self) -> &FrameThrottler {
        &self.throttler
    }

    pub fn current_index(&self) -> usize {
        self.transitions.current_index()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitions.is_transitioning()
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Starts a transition to `index`. Rejections are logged and reported as `false`.
    pub fn go_to(&mut self, index: usize, now: Duration) -> bool {
        if self.disposed {
            return false;
        }
        match self.transitions.transition_to(index, now, &mut self.scene) {
            Ok(()) => {
                self.reschedule_autoplay(now);
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "navigation ignored");
                false
            }
        }
    }

    pub fn next(&mut self, now: Duration) -> bool {
        let len = self.len().max(1);
        self.go_to((self.current_index() + 1) % len, now)
    }

    pub fn previous(&mut self, now: Duration) -> bool {
        let len = self.len().max(1);
        self.go_to((self.current_index() + len - 1) % len, now)
    }

    fn set_slide_active(&mut self, index: usize, active: bool) {
        self.effects.update_intensities(&slide_target(index), active);
        self.effects.update_intensities(&text_target(index), active);
    }

    pub fn on_pointer_enter(&mut self, now: Duration) {
        if self.disposed {
            return;
        }
        self.hovered = true;
        self.coupling.pointer_enter(now);
        self.set_slide_active(self.current_index(), true);
    }

    pub fn on_pointer_leave(&mut self, now: Duration) {
        if self.disposed {
            return;
        }
        self.hovered = false;
        self.coupling.pointer_leave(now);
        self.parallax.pointer_leave(now);
        self.set_slide_active(self.current_index(), false);
        if self.gesture.is_active() {
            self.gesture.cancel();
            self.transitions.settle_preview(now, &self.scene);
        }
    }

    pub fn pointer_move(&mut self, now: Duration, position: Point) {
        if self.disposed {
            return;
        }
        self.coupling.pointer_move(now, position, self.viewport);
        self.parallax.pointer_move(now, position, self.viewport);
    }

    /// Re-targets the viewport. Invalid sizes are logged and ignored.
    pub fn resize(&mut self, viewport: Size) {
        match validate_viewport(viewport) {
            Ok(v) => self.viewport = v,
            Err(e) => tracing::warn!(error = %e, "ignoring viewport resize"),
        }
    }

    fn drag_start(&mut self, position: Point) {
        if !self.transitions.is_transitioning() {
            self.gesture.begin(position);
        }
    }

    fn drag_move(&mut self, position: Point) {
        if self.gesture.update(position).is_none() {
            return;
        }
        let Some(base) = self.transitions.current_slide().map(|s| s.base_scale) else {
            return;
        };
        let scale = self.gesture.live_scale(base, self.viewport.width);
        self.transitions.preview_scale(scale, &mut self.scene);
    }

    fn drag_end(&mut self, now: Duration, position: Point) {
        let committed = match self.gesture.release(position, self.viewport.width) {
            None => return,
            Some(SwipeOutcome::Next) => self.next(now),
            Some(SwipeOutcome::Previous) => self.previous(now),
            Some(SwipeOutcome::Cancel) => false,
        };
        if !committed {
            self.transitions.settle_preview(now, &self.scene);
        }
    }

    /// Routes `event` through every listener registered for `(target, kind)`. Returns the
    /// number of routes that ran.
    pub fn handle_event(&mut self, target: &EventTarget, event: InputEvent, now: Duration) -> usize {
        if self.disposed {
            return 0;
        }
        let routes = self.events.dispatch(target, event.kind());
        for route in routes.iter().copied() {
            match (route, event) {
                (Route::Hover, InputEvent::PointerEnter) => self.on_pointer_enter(now),
                (Route::Hover, InputEvent::PointerLeave) => self.on_pointer_leave(now),
                (Route::Pointer, InputEvent::PointerMove { position }) => self.pointer_move(now, position),
                (Route::DragStart, e) => {
                    if let Some(p) = e.position() {
                        self.drag_start(p);
                    }
                }
                (Route::DragMove, e) => {
                    if let Some(p) = e.position() {
                        self.drag_move(p);
                    }
                }
                (Route::DragEnd, e) => {
                    if let Some(p) = e.position() {
                        self.drag_end(now, p);
                    }
                }
                (Route::NavNext, _) => {
                    self.next(now);
                }
                (Route::NavPrevious, _) => {
                    self.previous(now);
                }
                (Route::Resize, InputEvent::Resize { viewport }) => self.resize(viewport),
                (route, event) => tracing::debug!(?route, ?event, "route does not apply to event"),
            }
        }
        routes.len()
    }

    fn reschedule_autoplay(&mut self, now: Duration) {
        self.autoplay_due = self.config.autoplay().map(|interval| now + interval);
    }

    fn autoplay(&mut self, now: Duration) -> bool {
        let Some(interval) = self.config.autoplay() else {
            return false;
        };
        let due = *self.autoplay_due.get_or_insert(now + interval);
        if now < due {
            return false;
        }
        if self.hovered || self.gesture.is_active() || self.is_transitioning() {
            self.autoplay_due = Some(now + interval);
            return false;
        }
        self.next(now)
    }

    /// Advances one frame. Tweens are always sampled; time-varying effects only advance on
    /// frames the throttler lets through.
    pub fn tick(&mut self, now: Duration) -> FrameReport {
        if self.disposed {
            return FrameReport::default();
        }
        let mut report = FrameReport::default();

        if let Some(outcome) = self.transitions.tick(now, &mut self.scene) {
            if let Some(from) = self.transitions.slide(outcome.from) {
                Parallax::release_caption(&mut self.scene, from.caption);
            }
            if self.hovered {
                self.set_slide_active(outcome.from, false);
                self.set_slide_active(outcome.to, true);
            }
            report.transition = Some(outcome);
        }
        report.autoplayed = self.autoplay(now);

        self.coupling.tick(now, &mut self.effects);
        let captions: Vec<NodeId> = [
            Some(self.transitions.current_index()),
            self.transitions.in_flight_target(),
        ]
        .into_iter()
        .flatten()
        .filter_map(|i| self.transitions.slide(i).map(|s| s.caption))
        .collect();
        self.parallax.apply(now, &mut self.scene, self.container, &captions);

        if self.throttler.should_process(now, FramePriority::Normal) {
            let since = self.last_advance.map(|t| now.saturating_sub(t));
            self.effects.advance(since.map(secs).unwrap_or(0.0));
            if let Some(interval) = since.filter(|d| !d.is_zero()) {
                self.throttler.frame_processed(interval);
            }
            self.last_advance = Some(now);
            report.processed = true;
        }
        report
    }

    /// Tears down listeners, effect instances and cached textures. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.events.dispose();
        self.effects.dispose(&mut self.scene);
        self.gesture.cancel();
        self.resources.clear();
        self.disposed = true;
        tracing::info!("carousel disposed");
    }
}

fn register_routes<E: EventHost>(events: &mut EventLifecycleManager<Route, E>) {
    let viewport = EventTarget::Viewport;
    let plain = ListenerOptions::default();
    let passive = ListenerOptions::passive();
    let table = [
        (viewport.clone(), EventKind::PointerEnter, Route::Hover, plain),
        (viewport.clone(), EventKind::PointerLeave, Route::Hover, plain),
        (viewport.clone(), EventKind::PointerMove, Route::Pointer, passive),
        (viewport.clone(), EventKind::PointerMove, Route::DragMove, passive),
        (viewport.clone(), EventKind::PointerDown, Route::DragStart, plain),
        (viewport.clone(), EventKind::PointerUp, Route::DragEnd, plain),
        (viewport.clone(), EventKind::TouchStart, Route::DragStart, passive),
        (viewport.clone(), EventKind::TouchMove, Route::DragMove, passive),
        (viewport, EventKind::TouchEnd, Route::DragEnd, plain),
        (EventTarget::Window, EventKind::Resize, Route::Resize, passive),
        (EventTarget::element(NAV_NEXT), EventKind::Click, Route::NavNext, plain),
        (EventTarget::element(NAV_PREVIOUS), EventKind::Click, Route::NavPrevious, plain),
    ];
    for (target, kind, route, options) in table {
        events.on(target, kind, route, options);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/player.rs"]
mod tests;
