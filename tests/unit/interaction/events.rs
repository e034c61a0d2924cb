use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::*;

#[derive(Default)]
struct Ledger {
    attached: HashMap<ListenerId, usize>,
    detached: HashMap<ListenerId, usize>,
}

#[derive(Clone, Default)]
struct RecordingHost(Rc<RefCell<Ledger>>);

impl EventHost for RecordingHost {
    fn attach(&mut self, id: ListenerId, _: &EventTarget, _: EventKind, _: ListenerOptions) {
        *self.0.borrow_mut().attached.entry(id).or_default() += 1;
    }

    fn detach(&mut self, id: ListenerId, _: &EventTarget, _: EventKind) {
        *self.0.borrow_mut().detached.entry(id).or_default() += 1;
    }
}

impl RecordingHost {
    fn attach_count(&self, id: ListenerId) -> usize {
        self.0.borrow().attached.get(&id).copied().unwrap_or(0)
    }

    fn detach_count(&self, id: ListenerId) -> usize {
        self.0.borrow().detached.get(&id).copied().unwrap_or(0)
    }
}

fn manager() -> (EventLifecycleManager<&'static str, RecordingHost>, RecordingHost) {
    let host = RecordingHost::default();
    (EventLifecycleManager::with_host(host.clone()), host)
}

#[test]
fn every_on_attaches_exactly_once() {
    let (mut m, host) = manager();
    let a = m.on(EventTarget::Viewport, EventKind::PointerMove, "move", ListenerOptions::passive());
    let b = m.on(EventTarget::Window, EventKind::Resize, "resize", ListenerOptions::default());
    assert_eq!(host.attach_count(a), 1);
    assert_eq!(host.attach_count(b), 1);
    assert_eq!(m.len(), 2);
}

#[test]
fn unregister_detaches_once() {
    let (mut m, host) = manager();
    let a = m.on(EventTarget::Viewport, EventKind::Click, "click", ListenerOptions::default());
    assert!(m.unregister(a));
    assert!(!m.unregister(a));
    assert_eq!(host.detach_count(a), 1);
    assert!(m.is_empty());
}

#[test]
fn off_matches_target_type_and_handler() {
    let (mut m, host) = manager();
    let a = m.on(EventTarget::Viewport, EventKind::PointerDown, "drag", ListenerOptions::default());
    let b = m.on(EventTarget::Viewport, EventKind::PointerDown, "other", ListenerOptions::default());
    let c = m.on(EventTarget::Window, EventKind::PointerDown, "drag", ListenerOptions::default());

    assert_eq!(m.off(&EventTarget::Viewport, EventKind::PointerDown, &"drag"), 1);
    assert_eq!(host.detach_count(a), 1);
    assert!(m.contains(b));
    assert!(m.contains(c));
}

#[test]
fn clear_target_and_clear_type() {
    let (mut m, _host) = manager();
    let nav = EventTarget::element("next-button");
    m.on(nav.clone(), EventKind::Click, "next", ListenerOptions::default());
    m.on(EventTarget::Viewport, EventKind::TouchStart, "t0", ListenerOptions::passive());
    m.on(EventTarget::Viewport, EventKind::TouchEnd, "t1", ListenerOptions::passive());
    m.on(EventTarget::Document, EventKind::TouchEnd, "t2", ListenerOptions::passive());

    assert_eq!(m.clear_target(&nav), 1);
    assert_eq!(m.clear_type(EventKind::TouchEnd), 2);
    assert_eq!(m.len(), 1);
}

#[test]
fn dispatch_is_ordered_and_consumes_once_listeners() {
    let (mut m, host) = manager();
    m.on(EventTarget::Viewport, EventKind::Click, "first", ListenerOptions::default());
    let once = m.on(EventTarget::Viewport, EventKind::Click, "second", ListenerOptions::once());
    m.on(EventTarget::Window, EventKind::Click, "elsewhere", ListenerOptions::default());

    let got = m.dispatch(&EventTarget::Viewport, EventKind::Click);
    assert_eq!(got.as_slice(), &["first", "second"]);
    assert_eq!(host.detach_count(once), 1);

    let got = m.dispatch(&EventTarget::Viewport, EventKind::Click);
    assert_eq!(got.as_slice(), &["first"]);
}

#[test]
fn dispose_detaches_everything_once_and_later_calls_are_no_ops() {
    let (mut m, host) = manager();
    let ids: Vec<_> = (0..3)
        .map(|_| m.on(EventTarget::Viewport, EventKind::PointerMove, "h", ListenerOptions::default()))
        .collect();

    m.dispose();
    m.dispose();
    for id in &ids {
        assert_eq!(host.detach_count(*id), 1);
    }

    assert_eq!(m.off(&EventTarget::Viewport, EventKind::PointerMove, &"h"), 0);
    assert_eq!(m.clear_target(&EventTarget::Viewport), 0);
    assert_eq!(m.clear_type(EventKind::PointerMove), 0);
    let late = m.on(EventTarget::Viewport, EventKind::Click, "late", ListenerOptions::default());
    assert!(late.is_null());
    assert!(m.is_empty());
    assert!(m.is_disposed());
}

#[test]
fn drop_detaches_outstanding_listeners() {
    let host = RecordingHost::default();
    let id = {
        let mut m: EventLifecycleManager<u8, _> = EventLifecycleManager::with_host(host.clone());
        m.on(EventTarget::Viewport, EventKind::PointerEnter, 1, ListenerOptions::default())
    };
    assert_eq!(host.detach_count(id), 1);
}
