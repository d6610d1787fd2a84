//! Pointer-down notifications with scoped listeners.
//!
//! The host feeds every pointer-down it sees into a [`PointerBus`]. Listeners
//! are held only as long as their [`Subscription`] lives, so a listener is
//! removed on every exit path of whoever owns it.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

/// Parts of the picker a pointer target can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerPart {
    MonthSelectButton,
    MonthPicker,
    YearSelectButton,
    YearPicker,
    NavigationButton,
    DayGrid,
    TimePicker,
    Picker,
}

impl PickerPart {
    /// Month/year triggers and their dropdowns.
    pub fn is_dropdown_chrome(self) -> bool {
        matches!(
            self,
            PickerPart::MonthSelectButton
                | PickerPart::MonthPicker
                | PickerPart::YearSelectButton
                | PickerPart::YearPicker
        )
    }
}

/// A pointer-down, described by the parts enclosing its target,
/// innermost first. An empty chain is a press outside the picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointerDown {
    pub ancestry: Vec<PickerPart>,
}

impl PointerDown {
    pub fn outside() -> Self {
        PointerDown::default()
    }

    pub fn on(ancestry: impl IntoIterator<Item = PickerPart>) -> Self {
        PointerDown {
            ancestry: ancestry.into_iter().collect(),
        }
    }

    /// Whether any enclosing part satisfies `pred`.
    pub fn closest(&self, pred: impl Fn(PickerPart) -> bool) -> Option<PickerPart> {
        self.ancestry.iter().copied().find(|part| pred(*part))
    }
}

type Listener = Box<dyn FnMut(&PointerDown)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
    /// Depth of `pointer_down` calls in progress
    delivering: u32,
    /// Subscriptions dropped while their listener was out for delivery
    removed: HashSet<u64>,
}

/// Single-threaded fan-out of pointer-down events.
///
/// Listeners may subscribe or drop subscriptions (their own included) while
/// an event is being delivered. New listeners first hear the next event;
/// dropped ones are not called again, even later in the same delivery.
#[derive(Default, Clone)]
pub struct PointerBus {
    listeners: Rc<RefCell<Listeners>>,
}

impl PointerBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` until the returned subscription is dropped.
    #[must_use = "the listener is removed as soon as the subscription is dropped"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&PointerDown) + 'static,
    {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, Box::new(listener)));

        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    /// Deliver `event` to every listener in registration order.
    pub fn pointer_down(&self, event: &PointerDown) {
        // Listeners run with the list released so they can re-enter the bus
        let mut batch = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.delivering += 1;
            std::mem::take(&mut listeners.entries)
        };

        for (id, listener) in batch.iter_mut() {
            if self.listeners.borrow().removed.contains(&*id) {
                continue;
            }
            listener(event);
        }

        let dropped: Vec<(u64, Listener)> = {
            let mut guard = self.listeners.borrow_mut();
            let Listeners {
                entries,
                delivering,
                removed,
                ..
            } = &mut *guard;

            *delivering -= 1;
            let added = std::mem::replace(entries, Vec::with_capacity(batch.len()));
            let (dropped, kept): (Vec<_>, Vec<_>) = batch
                .into_iter()
                .chain(added)
                .partition(|(id, _)| removed.contains(id));
            *entries = kept;
            if *delivering == 0 {
                removed.clear();
            }
            dropped
        };

        // Captured state may own subscriptions of its own
        drop(dropped);
    }

    /// Listeners currently registered and not out for delivery.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }
}

/// Keeps one listener registered on a [`PointerBus`].
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(listeners) = self.listeners.upgrade() else {
            return;
        };

        let entry = {
            let mut listeners = listeners.borrow_mut();
            match listeners.entries.iter().position(|(id, _)| *id == self.id) {
                Some(idx) => Some(listeners.entries.remove(idx)),
                None => {
                    if listeners.delivering > 0 {
                        listeners.removed.insert(self.id);
                    }
                    None
                }
            }
        };

        drop(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn delivers_to_live_subscribers() {
        let bus = PointerBus::new();
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        let _sub = bus.subscribe(move |_| counter.set(counter.get() + 1));

        bus.pointer_down(&PointerDown::outside());
        bus.pointer_down(&PointerDown::on([PickerPart::DayGrid, PickerPart::Picker]));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn dropping_subscription_removes_listener() {
        let bus = PointerBus::new();
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        let sub = bus.subscribe(move |_| counter.set(counter.get() + 1));
        assert_eq!(bus.listener_count(), 1);

        drop(sub);
        assert_eq!(bus.listener_count(), 0);

        bus.pointer_down(&PointerDown::outside());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn subscription_outliving_bus_is_harmless() {
        let bus = PointerBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        drop(sub);
    }

    #[test]
    fn closest_searches_ancestry() {
        let event = PointerDown::on([PickerPart::MonthPicker, PickerPart::Picker]);
        assert_eq!(
            event.closest(PickerPart::is_dropdown_chrome),
            Some(PickerPart::MonthPicker)
        );
        assert_eq!(PointerDown::outside().closest(PickerPart::is_dropdown_chrome), None);
    }

    #[test]
    fn listener_can_drop_a_later_subscription() {
        let bus = PointerBus::new();
        let hits = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::default();

        let target = slot.clone();
        let _first = bus.subscribe(move |_| {
            target.borrow_mut().take();
        });

        let counter = hits.clone();
        *slot.borrow_mut() = Some(bus.subscribe(move |_| counter.set(counter.get() + 1)));
        assert_eq!(bus.listener_count(), 2);

        bus.pointer_down(&PointerDown::outside());
        assert_eq!(hits.get(), 0);
        assert_eq!(bus.listener_count(), 1);

        bus.pointer_down(&PointerDown::outside());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn listener_can_drop_its_own_subscription() {
        let bus = PointerBus::new();
        let hits = Rc::new(Cell::new(0));
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::default();

        let counter = hits.clone();
        let own = slot.clone();
        *slot.borrow_mut() = Some(bus.subscribe(move |_| {
            counter.set(counter.get() + 1);
            own.borrow_mut().take();
        }));

        bus.pointer_down(&PointerDown::outside());
        bus.pointer_down(&PointerDown::outside());
        assert_eq!(hits.get(), 1);
        assert_eq!(bus.listener_count(), 0);
    }

    #[test]
    fn listener_can_subscribe_during_delivery() {
        let bus = PointerBus::new();
        let late_hits = Rc::new(Cell::new(0));
        let late: Rc<RefCell<Option<Subscription>>> = Rc::default();

        let handle = bus.clone();
        let slot = late.clone();
        let counter = late_hits.clone();
        let _first = bus.subscribe(move |_| {
            if slot.borrow().is_none() {
                let counter = counter.clone();
                let sub = handle.subscribe(move |_| counter.set(counter.get() + 1));
                *slot.borrow_mut() = Some(sub);
            }
        });

        bus.pointer_down(&PointerDown::outside());
        assert_eq!(bus.listener_count(), 2);
        assert_eq!(late_hits.get(), 0);

        bus.pointer_down(&PointerDown::outside());
        assert_eq!(late_hits.get(), 1);
        assert_eq!(bus.listener_count(), 2);

        late.borrow_mut().take();
        assert_eq!(bus.listener_count(), 1);
    }
}
