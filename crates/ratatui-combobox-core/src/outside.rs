//! Outside-interaction detection.
//!
//! A [`PointerHub`] stands for the document-level pointer stream. Each mounted widget holds an
//! [`OutsideClickListener`] obtained from [`PointerHub::subscribe`]; the listener is released when
//! it is dropped, so no registration outlives the widget that owns it. The app calls
//! [`PointerHub::dispatch`] for every mouse event before routing it to widgets, and each widget
//! drains its own listener with [`OutsideClickListener::take_outside_hit`].
//!
//! Everything here is single-threaded (`Rc`/`RefCell`), matching the UI thread it runs on.

use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;
use std::rc::Weak;

use ratatui::layout::Position;
use ratatui::layout::Rect;

use crate::input::MouseEvent;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Default)]
struct Slot {
    regions: RefCell<Vec<Rect>>,
    armed: Cell<bool>,
    hit: Cell<bool>,
}

impl Slot {
    fn contains(&self, pos: Position) -> bool {
        self.regions.borrow().iter().any(|r| r.contains(pos))
    }
}

#[derive(Debug, Default)]
struct HubInner {
    next_id: u64,
    listeners: Vec<(ListenerId, Rc<Slot>)>,
}

/// The shared pointer-event source. Cloning yields another handle to the same hub.
#[derive(Clone, Debug, Default)]
pub struct PointerHub {
    inner: Rc<RefCell<HubInner>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. It starts disarmed with no regions.
    pub fn subscribe(&self) -> OutsideClickListener {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        let slot = Rc::new(Slot::default());
        inner.listeners.push((id, slot.clone()));
        tracing::trace!(id = id.0, live = inner.listeners.len(), "pointer listener acquired");
        OutsideClickListener {
            id,
            slot,
            hub: Rc::downgrade(&self.inner),
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Delivers one pointer event. Every armed listener whose regions do not contain a
    /// pointer-down position is marked. Returns how many listeners were marked.
    pub fn dispatch(&self, event: &MouseEvent) -> usize {
        if !event.is_pointer_down() {
            return 0;
        }
        let pos = event.position();
        let inner = self.inner.borrow();
        let mut marked = 0;
        for (_, slot) in &inner.listeners {
            if slot.armed.get() && !slot.contains(pos) {
                slot.hit.set(true);
                marked += 1;
            }
        }
        marked
    }
}

/// A live registration with a [`PointerHub`]. Dropping it unregisters.
#[derive(Debug)]
pub struct OutsideClickListener {
    id: ListenerId,
    slot: Rc<Slot>,
    hub: Weak<RefCell<HubInner>>,
}

impl OutsideClickListener {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Only armed listeners are marked. Disarming also forgets a pending hit.
    pub fn set_armed(&self, armed: bool) {
        self.slot.armed.set(armed);
        if !armed {
            self.slot.hit.set(false);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.slot.armed.get()
    }

    /// The screen areas that count as "inside" (the widget's rendered subtree).
    pub fn set_regions(&self, regions: impl IntoIterator<Item = Rect>) {
        let mut r = self.slot.regions.borrow_mut();
        r.clear();
        r.extend(regions.into_iter().filter(|r| !r.is_empty()));
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.slot.contains(pos)
    }

    /// `true` while an outside hit is pending. Does not consume it.
    pub fn has_outside_hit(&self) -> bool {
        self.slot.hit.get()
    }

    /// Returns and clears the pending outside hit.
    pub fn take_outside_hit(&self) -> bool {
        self.slot.hit.replace(false)
    }

    /// `true` while the hub this listener came from is still alive.
    pub fn is_attached(&self) -> bool {
        self.hub.strong_count() > 0
    }
}

impl Drop for OutsideClickListener {
    fn drop(&mut self) {
        let Some(hub) = self.hub.upgrade() else {
            return;
        };
        // A panic while the hub is borrowed must not turn into a double panic here.
        let Ok(mut inner) = hub.try_borrow_mut() else {
            return;
        };
        inner.listeners.retain(|(id, _)| *id != self.id);
        tracing::trace!(id = self.id.0, live = inner.listeners.len(), "pointer listener released");
    }
}
