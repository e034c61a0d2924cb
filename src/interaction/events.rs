//! Listener bookkeeping for every interaction source.
//!
//! The manager never touches a platform directly: attach/detach calls go through an
//! [`EventHost`], and every registration is detached exactly once, either individually or by
//! [`EventLifecycleManager::dispose`].

use std::fmt;

use slotmap::{Key, SlotMap, new_key_type};
use smallvec::SmallVec;

new_key_type! {
    /// Returned by [`EventLifecycleManager::on`]; pass to `unregister` to detach.
    pub struct ListenerId;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventTarget {
    /// The carousel's interactive region.
    Viewport,
    Window,
    Document,
    /// A named external element, such as a navigation button.
    Element(String),
}

impl EventTarget {
    pub fn element(name: impl Into<String>) -> Self {
        Self::Element(name.into())
    }
}

impl fmt::Display for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Viewport => f.write_str("viewport"),
            Self::Window => f.write_str("window"),
            Self::Document => f.write_str("document"),
            Self::Element(name) => write!(f, "#{name}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    PointerMove,
    PointerEnter,
    PointerLeave,
    PointerDown,
    PointerUp,
    TouchStart,
    TouchMove,
    TouchEnd,
    Click,
    Resize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    pub passive: bool,
    /// Unregister automatically after the first dispatch.
    pub once: bool,
    pub capture: bool,
}

impl ListenerOptions {
    pub fn passive() -> Self {
        Self {
            passive: true,
            ..Self::default()
        }
    }

    pub fn once() -> Self {
        Self {
            once: true,
            ..Self::default()
        }
    }
}

/// Platform side of listener registration.
pub trait EventHost {
    fn attach(&mut self, id: ListenerId, target: &EventTarget, kind: EventKind, options: ListenerOptions);
    fn detach(&mut self, id: ListenerId, target: &EventTarget, kind: EventKind);
}

/// Host for headless sessions; events are injected through `dispatch`.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl EventHost for NullHost {
    fn attach(&mut self, _: ListenerId, _: &EventTarget, _: EventKind, _: ListenerOptions) {}
    fn detach(&mut self, _: ListenerId, _: &EventTarget, _: EventKind) {}
}

impl EventHost for Box<dyn EventHost> {
    fn attach(&mut self, id: ListenerId, target: &EventTarget, kind: EventKind, options: ListenerOptions) {
        (**self).attach(id, target, kind, options);
    }

    fn detach(&mut self, id: ListenerId, target: &EventTarget, kind: EventKind) {
        (**self).detach(id, target, kind);
    }
}

#[derive(Clone, Debug)]
struct Registration<H> {
    target: EventTarget,
    kind: EventKind,
    handler: H,
    options: ListenerOptions,
}

pub struct EventLifecycleManager<H, E: EventHost = NullHost> {
    host: E,
    listeners: SlotMap<ListenerId, Registration<H>>,
    /// Registration order, for deterministic dispatch.
    order: Vec<ListenerId>,
    disposed: bool,
}

impl<H> EventLifecycleManager<H, NullHost> {
    pub fn new() -> Self {
        Self::with_host(NullHost)
    }
}

impl<H> Default for EventLifecycleManager<H, NullHost> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H, E: EventHost> EventLifecycleManager<H, E> {
    pub fn with_host(host: E) -> Self {
        Self {
            host,
            listeners: SlotMap::with_key(),
            order: Vec::new(),
            disposed: false,
        }
    }

    pub fn host(&self) -> &E {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut E {
        &mut self.host
    }

    /// Registers `handler` and attaches it on the host. After `dispose` this is a no-op
    /// returning a null id.
    pub fn on(
        &mut self,
        target: EventTarget,
        kind: EventKind,
        handler: H,
        options: ListenerOptions,
    ) -> ListenerId {
        if self.disposed {
            tracing::warn!(event_target = %target, ?kind, "listener registered after dispose; ignoring");
            return ListenerId::null();
        }
        let id = self.listeners.insert(Registration {
            target,
            kind,
            handler,
            options,
        });
        self.order.push(id);
        if let Some(reg) = self.listeners.get(id) {
            self.host.attach(id, &reg.target, reg.kind, reg.options);
        }
        id
    }

    /// Detaches one registration. Returns false if it was already gone.
    pub fn unregister(&mut self, id: ListenerId) -> bool {
        let Some(reg) = self.listeners.remove(id) else {
            return false;
        };
        self.order.retain(|x| *x != id);
        self.host.detach(id, &reg.target, reg.kind);
        true
    }

    fn unregister_where(&mut self, pred: impl Fn(&Registration<H>) -> bool) -> usize {
        let doomed: Vec<ListenerId> = self
            .order
            .iter()
            .copied()
            .filter(|id| self.listeners.get(*id).is_some_and(&pred))
            .collect();
        for id in &doomed {
            self.unregister(*id);
        }
        doomed.len()
    }

    /// Detaches every registration of `handler` for `(target, kind)`.
    pub fn off(&mut self, target: &EventTarget, kind: EventKind, handler: &H) -> usize
    where
        H: PartialEq,
    {
        self.unregister_where(|r| &r.target == target && r.kind == kind && &r.handler == handler)
    }

    pub fn clear_target(&mut self, target: &EventTarget) -> usize {
        self.unregister_where(|r| &r.target == target)
    }

    pub fn clear_type(&mut self, kind: EventKind) -> usize {
        self.unregister_where(|r| r.kind == kind)
    }

    /// Handlers registered for `(target, kind)`, in registration order. `once` listeners are
    /// unregistered as part of the dispatch.
    pub fn dispatch(&mut self, target: &EventTarget, kind: EventKind) -> SmallVec<[H; 4]>
    where
        H: Clone,
    {
        let mut out = SmallVec::new();
        let mut spent = SmallVec::<[ListenerId; 2]>::new();
        for id in &self.order {
            let Some(reg) = self.listeners.get(*id) else {
                continue;
            };
            if &reg.target == target && reg.kind == kind {
                out.push(reg.handler.clone());
                if reg.options.once {
                    spent.push(*id);
                }
            }
        }
        for id in spent {
            self.unregister(id);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn contains(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(id)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Detaches everything exactly once. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let count = self.listeners.len();
        for id in std::mem::take(&mut self.order) {
            if let Some(reg) = self.listeners.remove(id) {
                self.host.detach(id, &reg.target, reg.kind);
            }
        }
        self.disposed = true;
        tracing::debug!(listeners = count, "event manager disposed");
    }
}

impl<H, E: EventHost> Drop for EventLifecycleManager<H, E> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/events.rs"]
mod tests;
